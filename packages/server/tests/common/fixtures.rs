//! Builders for test data.

use directory_core::domains::moderation::activities;
use directory_core::domains::moderation::{
    SubmitCommentInput, SubmitVoteInput, SubmittedItem, SubmitterInput,
};
use directory_core::domains::recruiters::activities::create_recruiter;
use directory_core::domains::recruiters::{CreateRecruiterInput, Recruiter};
use directory_core::domains::tools::activities::create_tool;
use directory_core::domains::tools::{CreateToolInput, Tool};
use directory_core::kernel::ServerDeps;
use uuid::Uuid;

pub async fn tool(deps: &ServerDeps) -> Tool {
    create_tool(
        CreateToolInput {
            name: Some(format!("Tool {}", Uuid::new_v4())),
            category: Some("ats".to_string()),
            ..Default::default()
        },
        deps,
    )
    .await
    .expect("Failed to create tool")
}

pub async fn recruiter(deps: &ServerDeps) -> Recruiter {
    create_recruiter(
        CreateRecruiterInput {
            name: Some("Jordan Lee".to_string()),
            company: Some(format!("Agency {}", Uuid::new_v4())),
            ..Default::default()
        },
        deps,
    )
    .await
    .expect("Failed to create recruiter")
}

pub fn submitter(tool: Option<&Tool>, recruiter: Option<&Recruiter>, email: &str) -> SubmitterInput {
    SubmitterInput {
        tool_id: tool.map(|t| t.id.into_uuid()),
        recruiter_id: recruiter.map(|r| r.id.into_uuid()),
        submitter_email: Some(email.to_string()),
        submitter_name: Some("Test Submitter".to_string()),
        submitter_company: None,
        submitter_title: None,
    }
}

pub async fn comment_on(tool: &Tool, deps: &ServerDeps) -> SubmittedItem {
    activities::submit_comment(
        SubmitCommentInput {
            submitter: submitter(Some(tool), None, "commenter@example.com"),
            content: Some("Useful for small teams".to_string()),
        },
        deps,
    )
    .await
    .expect("Failed to submit comment")
}

pub async fn vote_on(
    recruiter: &Recruiter,
    email: &str,
    direction: &str,
    deps: &ServerDeps,
) -> SubmittedItem {
    activities::submit_vote(
        SubmitVoteInput {
            submitter: submitter(None, Some(recruiter), email),
            direction: Some(direction.to_string()),
        },
        deps,
    )
    .await
    .expect("Failed to submit vote")
}
