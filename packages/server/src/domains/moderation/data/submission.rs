use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{DomainError, DomainResult, RecruiterId, ToolId};
use crate::domains::moderation::models::{
    ItemKind, ItemPayload, ModerationStatus, NewSubmittedItem, ParentRef, SubmittedItem,
    Submitter, VoteDirection,
};

const MAX_COMMENT_LENGTH: usize = 5_000;
const MAX_FIELD_LENGTH: usize = 200;

/// Submitter contact fields shared by comments and votes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitterInput {
    pub tool_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub submitter_email: Option<String>,
    pub submitter_name: Option<String>,
    pub submitter_company: Option<String>,
    pub submitter_title: Option<String>,
}

/// Input for submitting a comment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitCommentInput {
    #[serde(flatten)]
    pub submitter: SubmitterInput,
    pub content: Option<String>,
}

/// Input for submitting a vote
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteInput {
    #[serde(flatten)]
    pub submitter: SubmitterInput,
    pub direction: Option<String>,
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> DomainResult<String> {
    let value = trimmed(value).ok_or_else(|| DomainError::validation(format!("{} is required", field)))?;
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(DomainError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_FIELD_LENGTH
        )));
    }
    Ok(value)
}

/// Resolve the parent reference. Exactly one of the two ids must be given.
pub fn parent_from_ids(
    tool_id: Option<Uuid>,
    recruiter_id: Option<Uuid>,
) -> DomainResult<ParentRef> {
    match (tool_id, recruiter_id) {
        (Some(id), None) => Ok(ParentRef::Tool(ToolId::from_uuid(id))),
        (None, Some(id)) => Ok(ParentRef::Recruiter(RecruiterId::from_uuid(id))),
        (None, None) => Err(DomainError::validation("toolId or recruiterId is required")),
        (Some(_), Some(_)) => Err(DomainError::validation(
            "Only one of toolId and recruiterId may be given",
        )),
    }
}

impl SubmitterInput {
    fn validate(self) -> DomainResult<(ParentRef, Submitter)> {
        let parent = parent_from_ids(self.tool_id, self.recruiter_id)?;

        let email = required(self.submitter_email, "submitterEmail")?.to_lowercase();
        let valid_email = email
            .split_once('@')
            .map_or(false, |(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid_email {
            return Err(DomainError::validation("submitterEmail is not a valid email address"));
        }

        let submitter = Submitter {
            email,
            name: required(self.submitter_name, "submitterName")?,
            company: trimmed(self.submitter_company),
            title: trimmed(self.submitter_title),
        };
        Ok((parent, submitter))
    }
}

impl SubmitCommentInput {
    pub fn validate(self) -> DomainResult<NewSubmittedItem> {
        let (parent, submitter) = self.submitter.validate()?;
        let content = trimmed(self.content)
            .ok_or_else(|| DomainError::validation("content is required"))?;
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DomainError::validation(format!(
                "content must be at most {} characters",
                MAX_COMMENT_LENGTH
            )));
        }
        Ok(NewSubmittedItem {
            parent,
            submitter,
            payload: ItemPayload::Comment { content },
        })
    }
}

impl SubmitVoteInput {
    pub fn validate(self) -> DomainResult<NewSubmittedItem> {
        let (parent, submitter) = self.submitter.validate()?;
        let direction = trimmed(self.direction)
            .ok_or_else(|| DomainError::validation("direction is required"))?
            .parse::<VoteDirection>()
            .map_err(DomainError::Validation)?;
        Ok(NewSubmittedItem {
            parent,
            submitter,
            payload: ItemPayload::Vote { direction },
        })
    }
}

/// Submitted item as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedItemData {
    pub id: String,
    pub kind: ItemKind,
    pub status: ModerationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<String>,

    // Submitter. Email is only exposed to admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter_email: Option<String>,
    pub submitter_name: String,
    pub submitter_company: Option<String>,
    pub submitter_title: Option<String>,

    // Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<VoteDirection>,

    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<SubmittedItem> for SubmittedItemData {
    fn from(item: SubmittedItem) -> Self {
        Self {
            id: item.id.to_string(),
            kind: item.kind(),
            status: item.status,
            tool_id: item.parent.tool_id().map(|id| id.to_string()),
            recruiter_id: item.parent.recruiter_id().map(|id| id.to_string()),
            submitter_email: Some(item.submitter.email),
            submitter_name: item.submitter.name,
            submitter_company: item.submitter.company,
            submitter_title: item.submitter.title,
            content: item.payload.content().map(str::to_string),
            direction: item.payload.direction(),
            reviewed_at: item.reviewed_at,
            created_at: item.created_at,
        }
    }
}

impl SubmittedItemData {
    /// Strip fields that only admins may see.
    pub fn public(item: SubmittedItem) -> Self {
        Self {
            submitter_email: None,
            ..Self::from(item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submitter() -> SubmitterInput {
        SubmitterInput {
            tool_id: Some(Uuid::new_v4()),
            recruiter_id: None,
            submitter_email: Some("  Grace@Example.com ".to_string()),
            submitter_name: Some("Grace".to_string()),
            submitter_company: Some("  ".to_string()),
            submitter_title: Some("Engineer".to_string()),
        }
    }

    #[test]
    fn test_comment_validation_normalizes_fields() {
        let item = SubmitCommentInput {
            submitter: submitter(),
            content: Some("  Great tool  ".to_string()),
        }
        .validate()
        .unwrap();

        assert_eq!(item.submitter.email, "grace@example.com");
        assert_eq!(item.submitter.company, None);
        assert_eq!(item.submitter.title.as_deref(), Some("Engineer"));
        assert_eq!(item.payload.content(), Some("Great tool"));
    }

    #[test]
    fn test_missing_email_is_rejected() {
        let err = SubmitVoteInput {
            submitter: SubmitterInput {
                submitter_email: None,
                ..submitter()
            },
            direction: Some("up".to_string()),
        }
        .validate()
        .unwrap_err();

        assert!(matches!(err, DomainError::Validation(ref m) if m.contains("submitterEmail")));
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let err = SubmitVoteInput {
            submitter: SubmitterInput {
                submitter_email: Some("not-an-email".to_string()),
                ..submitter()
            },
            direction: Some("up".to_string()),
        }
        .validate()
        .unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_parent_must_be_exactly_one() {
        let none = SubmitterInput {
            tool_id: None,
            ..submitter()
        };
        assert!(SubmitCommentInput {
            submitter: none,
            content: Some("hi".to_string()),
        }
        .validate()
        .is_err());

        let both = SubmitterInput {
            recruiter_id: Some(Uuid::new_v4()),
            ..submitter()
        };
        assert!(SubmitCommentInput {
            submitter: both,
            content: Some("hi".to_string()),
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_vote_needs_known_direction() {
        let missing = SubmitVoteInput {
            submitter: submitter(),
            direction: None,
        };
        assert!(missing.validate().is_err());

        let unknown = SubmitVoteInput {
            submitter: submitter(),
            direction: Some("sideways".to_string()),
        };
        assert!(unknown.validate().is_err());
    }

    #[test]
    fn test_deserializes_camel_case_body() {
        let tool_id = Uuid::new_v4();
        let body = serde_json::json!({
            "toolId": tool_id,
            "submitterEmail": "a@b.io",
            "submitterName": "A",
            "direction": "down"
        });
        let input: SubmitVoteInput = serde_json::from_value(body).unwrap();
        let item = input.validate().unwrap();
        assert_eq!(item.parent, ParentRef::Tool(ToolId::from_uuid(tool_id)));
        assert_eq!(item.payload.direction(), Some(VoteDirection::Down));
    }
}
