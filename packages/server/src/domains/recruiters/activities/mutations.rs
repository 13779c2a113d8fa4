use tracing::info;

use crate::common::{DomainError, DomainResult, RecruiterId};
use crate::domains::recruiters::data::{CreateRecruiterInput, UpdateRecruiterInput};
use crate::domains::recruiters::models::Recruiter;
use crate::kernel::ServerDeps;

pub async fn create_recruiter(
    input: CreateRecruiterInput,
    deps: &ServerDeps,
) -> DomainResult<Recruiter> {
    let recruiter = deps.gateway().insert_recruiter(input.validate()?).await?;
    info!(recruiter_id = %recruiter.id, "Recruiter created");
    Ok(recruiter)
}

pub async fn update_recruiter(
    id: RecruiterId,
    input: UpdateRecruiterInput,
    deps: &ServerDeps,
) -> DomainResult<Recruiter> {
    let recruiter = deps
        .gateway()
        .update_recruiter(id, input.validate()?)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Recruiter {}", id)))?;
    info!(recruiter_id = %id, "Recruiter updated");
    Ok(recruiter)
}

/// Remove a recruiter and every item submitted against them
pub async fn delete_recruiter(id: RecruiterId, deps: &ServerDeps) -> DomainResult<()> {
    if !deps.gateway().delete_recruiter(id).await? {
        return Err(DomainError::not_found(format!("Recruiter {}", id)));
    }
    info!(recruiter_id = %id, "Recruiter deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::moderation::activities::submit_comment;
    use crate::domains::moderation::data::{SubmitCommentInput, SubmitterInput};
    use crate::domains::recruiters::activities::list_recruiters;
    use crate::kernel::test_dependencies::MockGateway;

    fn input(name: &str, company: &str) -> CreateRecruiterInput {
        CreateRecruiterInput {
            name: Some(name.to_string()),
            company: Some(company.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_company_filter_ignores_case() {
        let deps = MockGateway::new().deps();
        create_recruiter(input("Ada", "Hooli"), &deps).await.unwrap();
        create_recruiter(input("Bo", "Initech"), &deps).await.unwrap();

        let found = list_recruiters(Some("hooli".to_string()), &deps)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Ada");
    }

    #[tokio::test]
    async fn test_delete_removes_submitted_items() {
        let gateway = MockGateway::new();
        let deps = gateway.deps();
        let recruiter = create_recruiter(input("Ada", "Hooli"), &deps).await.unwrap();

        submit_comment(
            SubmitCommentInput {
                submitter: SubmitterInput {
                    recruiter_id: Some(recruiter.id.into_uuid()),
                    submitter_email: Some("c@example.com".to_string()),
                    submitter_name: Some("C".to_string()),
                    ..Default::default()
                },
                content: Some("Responsive and honest".to_string()),
            },
            &deps,
        )
        .await
        .unwrap();
        assert_eq!(gateway.item_count(), 1);

        delete_recruiter(recruiter.id, &deps).await.unwrap();
        assert_eq!(gateway.item_count(), 0);
        assert!(matches!(
            delete_recruiter(recruiter.id, &deps).await,
            Err(DomainError::NotFound(_))
        ));
    }
}
