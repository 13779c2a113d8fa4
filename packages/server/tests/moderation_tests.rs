//! Moderation workflow against a real Postgres database.

mod common;

use crate::common::*;
use directory_core::common::{DomainError, ToolId};
use directory_core::domains::moderation::activities::{
    delete_item, get_item, list_by_status, list_queue, set_status, submit_comment, submit_vote,
};
use directory_core::domains::moderation::{
    Aggregates, ItemKind, ModerationStatus, ParentRef, SubmissionPolicy, SubmitCommentInput,
    SubmitVoteInput,
};
use directory_core::domains::recruiters::activities::get_recruiter;
use directory_core::domains::tools::activities::{delete_tool, get_tool};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn approve_comment_updates_listing_and_count(ctx: &TestHarness) {
    let deps = ctx.deps();
    let tool = tool(&deps).await;
    let parent = ParentRef::Tool(tool.id);

    let item = comment_on(&tool, &deps).await;
    assert_eq!(item.status, ModerationStatus::Pending);
    assert_eq!(item.submitter.email, "commenter@example.com");

    let approved = set_status(item.id, ModerationStatus::Approved, &deps)
        .await
        .unwrap();
    assert!(approved.reviewed_at.is_some());

    let listed = list_by_status(parent, ModerationStatus::Approved, None, &deps)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, item.id);

    assert_eq!(get_tool(tool.id, &deps).await.unwrap().comment_count, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn decided_items_cannot_change_again(ctx: &TestHarness) {
    let deps = ctx.deps();
    let recruiter = recruiter(&deps).await;
    let vote = vote_on(&recruiter, "a@example.com", "up", &deps).await;

    set_status(vote.id, ModerationStatus::Rejected, &deps)
        .await
        .unwrap();
    let err = set_status(vote.id, ModerationStatus::Approved, &deps)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::InvalidTransition {
            from: ModerationStatus::Rejected,
            to: ModerationStatus::Approved
        }
    ));
    assert_eq!(
        get_item(vote.id, &deps).await.unwrap().status,
        ModerationStatus::Rejected
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concurrent_reviews_have_one_winner(ctx: &TestHarness) {
    let deps = ctx.deps();
    let tool = tool(&deps).await;
    let item = comment_on(&tool, &deps).await;

    let (a, b) = tokio::join!(
        set_status(item.id, ModerationStatus::Approved, &deps),
        set_status(item.id, ModerationStatus::Rejected, &deps),
    );

    let outcomes = [a, b];
    let winners: Vec<_> = outcomes.iter().filter(|r| r.is_ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(DomainError::InvalidTransition { .. }))));

    let stored = get_item(item.id, &deps).await.unwrap();
    let winner = winners[0].as_ref().unwrap();
    assert_eq!(stored.status, winner.status);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn aggregates_follow_approvals_and_deletes(ctx: &TestHarness) {
    let deps = ctx.deps();
    let recruiter = recruiter(&deps).await;

    let up = vote_on(&recruiter, "a@example.com", "up", &deps).await;
    let down = vote_on(&recruiter, "b@example.com", "down", &deps).await;
    let ignored = vote_on(&recruiter, "c@example.com", "up", &deps).await;
    let _pending = vote_on(&recruiter, "d@example.com", "up", &deps).await;

    set_status(up.id, ModerationStatus::Approved, &deps).await.unwrap();
    set_status(down.id, ModerationStatus::Approved, &deps).await.unwrap();
    set_status(ignored.id, ModerationStatus::Rejected, &deps).await.unwrap();

    assert_eq!(
        get_recruiter(recruiter.id, &deps).await.unwrap().aggregates(),
        Aggregates {
            comment_count: 0,
            upvote_count: 1,
            downvote_count: 1
        }
    );

    delete_item(up.id, &deps).await.unwrap();
    assert_eq!(
        get_recruiter(recruiter.id, &deps).await.unwrap().aggregates(),
        Aggregates {
            comment_count: 0,
            upvote_count: 0,
            downvote_count: 1
        }
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_vote_persists_nothing(ctx: &TestHarness) {
    let deps = ctx.deps();
    let recruiter = recruiter(&deps).await;

    let mut input = submitter(None, Some(&recruiter), "ignored@example.com");
    input.submitter_email = None;
    let err = submit_vote(
        SubmitVoteInput {
            submitter: input,
            direction: Some("up".to_string()),
        },
        &deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let parent = ParentRef::Recruiter(recruiter.id);
    for status in ModerationStatus::ALL {
        assert!(list_by_status(parent, status, None, &deps)
            .await
            .unwrap()
            .is_empty());
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn duplicate_vote_policy(ctx: &TestHarness) {
    let deps = ctx.deps_with_policy(SubmissionPolicy {
        reject_duplicate_votes: true,
    });
    let recruiter = recruiter(&deps).await;

    vote_on(&recruiter, "same@example.com", "up", &deps).await;
    let err = submit_vote(
        SubmitVoteInput {
            submitter: submitter(None, Some(&recruiter), "Same@Example.com"),
            direction: Some("up".to_string()),
        },
        &deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::DuplicateSubmission(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_tool_removes_its_items(ctx: &TestHarness) {
    let deps = ctx.deps();
    let tool = tool(&deps).await;
    let item = comment_on(&tool, &deps).await;

    delete_tool(tool.id, &deps).await.unwrap();

    assert!(matches!(
        get_item(item.id, &deps).await,
        Err(DomainError::NotFound(_))
    ));
    assert!(matches!(
        list_by_status(
            ParentRef::Tool(tool.id),
            ModerationStatus::Pending,
            None,
            &deps
        )
        .await,
        Err(DomainError::NotFound(_))
    ));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn queue_lists_pending_items_newest_first(ctx: &TestHarness) {
    let deps = ctx.deps();
    let tool = tool(&deps).await;
    let recruiter = recruiter(&deps).await;

    let older = comment_on(&tool, &deps).await;
    let newer = vote_on(&recruiter, "q@example.com", "down", &deps).await;

    let queue = list_queue(ModerationStatus::Pending, None, &deps)
        .await
        .unwrap();
    let older_pos = queue.iter().position(|i| i.id == older.id).unwrap();
    let newer_pos = queue.iter().position(|i| i.id == newer.id).unwrap();
    assert!(newer_pos < older_pos);

    let votes = list_queue(ModerationStatus::Pending, Some(ItemKind::Vote), &deps)
        .await
        .unwrap();
    assert!(votes.iter().all(|i| i.kind() == ItemKind::Vote));
    assert!(votes.iter().any(|i| i.id == newer.id));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_parent_is_not_found(ctx: &TestHarness) {
    let deps = ctx.deps();
    let err = list_by_status(
        ParentRef::Tool(ToolId::new()),
        ModerationStatus::Approved,
        None,
        &deps,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_approvals_on_one_tool_are_all_counted(ctx: &TestHarness) {
    let deps = ctx.deps();
    let tool = tool(&deps).await;
    let parent = ParentRef::Tool(tool.id);

    let mut ids = Vec::new();
    for _ in 0..8 {
        ids.push(comment_on(&tool, &deps).await.id);
    }

    let mut reviews = tokio::task::JoinSet::new();
    for id in ids {
        let deps = deps.clone();
        reviews.spawn(async move { set_status(id, ModerationStatus::Approved, &deps).await });
    }
    while let Some(result) = reviews.join_next().await {
        result.unwrap().unwrap();
    }

    let approved = list_by_status(parent, ModerationStatus::Approved, None, &deps)
        .await
        .unwrap();
    assert_eq!(approved.len(), 8);
    assert_eq!(get_tool(tool.id, &deps).await.unwrap().comment_count, 8);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn submitting_to_a_deleted_tool_is_not_found(ctx: &TestHarness) {
    let deps = ctx.deps();
    let tool = tool(&deps).await;
    delete_tool(tool.id, &deps).await.unwrap();

    let err = submit_comment(
        SubmitCommentInput {
            submitter: submitter(Some(&tool), None, "late@example.com"),
            content: Some("Still around?".to_string()),
        },
        &deps,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, DomainError::NotFound(_)));
}
