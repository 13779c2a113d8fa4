use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{DomainError, DomainResult};
use crate::domains::recruiters::models::{CreateRecruiter, Recruiter, UpdateRecruiter};

/// Recruiter as returned over HTTP
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterData {
    pub id: String,

    // Profile
    pub name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub linkedin_url: Option<String>,
    pub specialties: Option<String>,

    // Contact email is only exposed to admins
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    pub comment_count: i32,
    pub upvote_count: i32,
    pub downvote_count: i32,
    pub score: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recruiter> for RecruiterData {
    fn from(recruiter: Recruiter) -> Self {
        Self {
            id: recruiter.id.to_string(),
            name: recruiter.name,
            company: recruiter.company,
            title: recruiter.title,
            linkedin_url: recruiter.linkedin_url,
            specialties: recruiter.specialties,
            email: recruiter.email,
            comment_count: recruiter.comment_count,
            upvote_count: recruiter.upvote_count,
            downvote_count: recruiter.downvote_count,
            score: recruiter.upvote_count - recruiter.downvote_count,
            created_at: recruiter.created_at,
            updated_at: recruiter.updated_at,
        }
    }
}

impl RecruiterData {
    pub fn public(recruiter: Recruiter) -> Self {
        Self {
            email: None,
            ..Self::from(recruiter)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecruiterInput {
    pub name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub specialties: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecruiterInput {
    pub name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub specialties: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_email(value: Option<String>) -> DomainResult<Option<String>> {
    match clean(value) {
        None => Ok(None),
        Some(email) if email.contains('@') => Ok(Some(email.to_lowercase())),
        Some(_) => Err(DomainError::validation("email is not a valid email address")),
    }
}

impl CreateRecruiterInput {
    pub fn validate(self) -> DomainResult<CreateRecruiter> {
        let name = clean(self.name).ok_or_else(|| DomainError::validation("name is required"))?;
        Ok(CreateRecruiter {
            name,
            company: clean(self.company),
            title: clean(self.title),
            email: clean_email(self.email)?,
            linkedin_url: clean(self.linkedin_url),
            specialties: clean(self.specialties),
        })
    }
}

impl UpdateRecruiterInput {
    pub fn validate(self) -> DomainResult<UpdateRecruiter> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(DomainError::validation("name cannot be blank"));
        }
        Ok(UpdateRecruiter {
            name: clean(self.name),
            company: clean(self.company),
            title: clean(self.title),
            email: clean_email(self.email)?,
            linkedin_url: clean(self.linkedin_url),
            specialties: clean(self.specialties),
        })
    }
}
