use crate::common::{DomainError, DomainResult, RecruiterId};
use crate::domains::recruiters::models::{Recruiter, RecruiterFilter};
use crate::kernel::ServerDeps;

pub async fn get_recruiter(id: RecruiterId, deps: &ServerDeps) -> DomainResult<Recruiter> {
    deps.gateway()
        .get_recruiter(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Recruiter {}", id)))
}

/// List recruiters ordered by name, optionally at one company (case-insensitive)
pub async fn list_recruiters(
    company: Option<String>,
    deps: &ServerDeps,
) -> DomainResult<Vec<Recruiter>> {
    let filter = RecruiterFilter {
        company: company.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
    };
    Ok(deps.gateway().list_recruiters(&filter).await?)
}
