use crate::common::{DomainError, DomainResult, ToolId};
use crate::domains::tools::models::{Tool, ToolFilter};
use crate::kernel::ServerDeps;

pub async fn get_tool(id: ToolId, deps: &ServerDeps) -> DomainResult<Tool> {
    deps.gateway()
        .get_tool(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Tool {}", id)))
}

/// List tools ordered by name, optionally in one category
pub async fn list_tools(category: Option<String>, deps: &ServerDeps) -> DomainResult<Vec<Tool>> {
    let filter = ToolFilter {
        category: category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty()),
    };
    Ok(deps.gateway().list_tools(&filter).await?)
}
