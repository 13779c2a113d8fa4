use tracing::info;

use crate::common::{DomainError, DomainResult, ToolId};
use crate::domains::tools::data::{CreateToolInput, UpdateToolInput};
use crate::domains::tools::models::Tool;
use crate::kernel::ServerDeps;

/// Add a tool to the directory (admin only)
pub async fn create_tool(input: CreateToolInput, deps: &ServerDeps) -> DomainResult<Tool> {
    let tool = deps.gateway().insert_tool(input.validate()?).await?;
    info!(tool_id = %tool.id, name = %tool.name, "Tool created");
    Ok(tool)
}

/// Edit a tool's listing fields (admin only). Aggregates are never touched here.
pub async fn update_tool(
    id: ToolId,
    input: UpdateToolInput,
    deps: &ServerDeps,
) -> DomainResult<Tool> {
    let tool = deps
        .gateway()
        .update_tool(id, input.validate()?)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Tool {}", id)))?;
    info!(tool_id = %id, "Tool updated");
    Ok(tool)
}

/// Remove a tool and every item submitted against it (admin only)
pub async fn delete_tool(id: ToolId, deps: &ServerDeps) -> DomainResult<()> {
    if !deps.gateway().delete_tool(id).await? {
        return Err(DomainError::not_found(format!("Tool {}", id)));
    }
    info!(tool_id = %id, "Tool deleted");
    Ok(())
}
