//! PgGateway and schema checks against a real Postgres database.

mod common;

use crate::common::*;
use directory_core::common::{RecruiterId, SubmittedItemId};
use directory_core::domains::moderation::{
    ItemPayload, ModerationStatus, NewSubmittedItem, ParentRef, Submitter, VoteDirection,
};
use directory_core::domains::tools::UpdateTool;
use directory_core::kernel::migrations::{migration_states, run_pending};
use directory_core::kernel::{BaseGateway, GatewayError};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn migrations_are_applied_once(ctx: &TestHarness) {
    let states = migration_states(&ctx.db_pool).await.unwrap();
    assert_eq!(states.len(), 3);
    assert!(states.iter().all(|m| m.applied && m.checksum_matches));

    assert_eq!(run_pending(&ctx.db_pool).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn ping_succeeds(ctx: &TestHarness) {
    ctx.gateway().ping().await.unwrap();
}

#[test_context(TestHarness)]
#[tokio::test]
async fn conditional_update_only_applies_from_expected_status(ctx: &TestHarness) {
    let deps = ctx.deps();
    let gateway = ctx.gateway();
    let tool = tool(&deps).await;
    let item = comment_on(&tool, &deps).await;

    let missed = gateway
        .update_item_status(item.id, ModerationStatus::Approved, ModerationStatus::Rejected)
        .await
        .unwrap();
    assert!(missed.is_none());

    let hit = gateway
        .update_item_status(item.id, ModerationStatus::Pending, ModerationStatus::Approved)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(hit.status, ModerationStatus::Approved);
    assert!(hit.reviewed_at.is_some());

    assert!(gateway
        .update_item_status(SubmittedItemId::new(), ModerationStatus::Pending, ModerationStatus::Approved)
        .await
        .unwrap()
        .is_none());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn insert_for_missing_parent_reports_the_parent(ctx: &TestHarness) {
    let parent = ParentRef::Recruiter(RecruiterId::new());
    let err = ctx
        .gateway()
        .insert_item(NewSubmittedItem {
            parent,
            submitter: Submitter {
                email: "x@example.com".to_string(),
                name: "X".to_string(),
                company: None,
                title: None,
            },
            payload: ItemPayload::Vote {
                direction: VoteDirection::Up,
            },
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MissingParent(p) if p == parent));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn item_round_trips_through_database(ctx: &TestHarness) {
    let deps = ctx.deps();
    let recruiter = recruiter(&deps).await;
    let created = vote_on(&recruiter, "rt@example.com", "downvote", &deps).await;

    let loaded = ctx.gateway().get_item(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.parent, ParentRef::Recruiter(recruiter.id));
    assert_eq!(
        loaded.payload,
        ItemPayload::Vote {
            direction: VoteDirection::Down
        }
    );
    assert_eq!(loaded.submitter, created.submitter);
    assert_eq!(loaded.status, ModerationStatus::Pending);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn update_keeps_unset_columns(ctx: &TestHarness) {
    let deps = ctx.deps();
    let gateway = ctx.gateway();
    let tool = tool(&deps).await;

    let updated = gateway
        .update_tool(
            tool.id,
            UpdateTool {
                description: Some("Now with a description".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, tool.name);
    assert_eq!(updated.category, tool.category);
    assert_eq!(updated.description.as_deref(), Some("Now with a description"));
    assert!(updated.updated_at >= tool.updated_at);
}
