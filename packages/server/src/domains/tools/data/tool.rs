use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};
use crate::domains::tools::models::{CreateTool, Tool, UpdateTool};

/// Tool as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolData {
    pub id: String,

    pub name: String,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub logo_url: Option<String>,

    pub comment_count: i32,
    pub upvote_count: i32,
    pub downvote_count: i32,
    /// Upvotes minus downvotes
    pub score: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tool> for ToolData {
    fn from(tool: Tool) -> Self {
        Self {
            id: tool.id.to_string(),
            name: tool.name,
            description: tool.description,
            website_url: tool.website_url,
            category: tool.category,
            logo_url: tool.logo_url,
            comment_count: tool.comment_count,
            upvote_count: tool.upvote_count,
            downvote_count: tool.downvote_count,
            score: tool.upvote_count - tool.downvote_count,
            created_at: tool.created_at,
            updated_at: tool.updated_at,
        }
    }
}

/// Input for adding a tool (admin only)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateToolInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub logo_url: Option<String>,
}

/// Input for editing a tool (admin only). Missing fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateToolInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub logo_url: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl CreateToolInput {
    pub fn validate(self) -> DomainResult<CreateTool> {
        let name = clean(self.name).ok_or_else(|| DomainError::validation("name is required"))?;
        Ok(CreateTool {
            name,
            description: clean(self.description),
            website_url: clean(self.website_url),
            category: clean(self.category).map(|c| c.to_lowercase()),
            logo_url: clean(self.logo_url),
        })
    }
}

impl UpdateToolInput {
    pub fn validate(self) -> DomainResult<UpdateTool> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(DomainError::validation("name cannot be blank"));
        }
        Ok(UpdateTool {
            name: clean(self.name),
            description: clean(self.description),
            website_url: clean(self.website_url),
            category: clean(self.category).map(|c| c.to_lowercase()),
            logo_url: clean(self.logo_url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let err = CreateToolInput {
            name: Some("   ".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_create_normalizes_category() {
        let tool = CreateToolInput {
            name: Some(" Lever ".to_string()),
            category: Some("ATS".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(tool.name, "Lever");
        assert_eq!(tool.category.as_deref(), Some("ats"));
        assert_eq!(tool.description, None);
    }

    #[test]
    fn test_update_rejects_blank_name() {
        assert!(UpdateToolInput {
            name: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .is_err());
        assert!(UpdateToolInput::default().validate().is_ok());
    }
}
