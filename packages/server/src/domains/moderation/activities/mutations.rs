//! Moderation mutation activities

use tracing::info;

use crate::common::{DomainError, DomainResult, SubmittedItemId};
use crate::domains::moderation::data::{SubmitCommentInput, SubmitVoteInput};
use crate::domains::moderation::models::{
    ItemFilter, ItemKind, ModerationStatus, NewSubmittedItem, SubmittedItem,
};
use crate::kernel::{GatewayError, ServerDeps};

/// Validate and submit a comment (goes to pending)
pub async fn submit_comment(
    input: SubmitCommentInput,
    deps: &ServerDeps,
) -> DomainResult<SubmittedItem> {
    submit(input.validate()?, deps).await
}

/// Validate and submit a vote (goes to pending)
pub async fn submit_vote(input: SubmitVoteInput, deps: &ServerDeps) -> DomainResult<SubmittedItem> {
    submit(input.validate()?, deps).await
}

/// Insert a validated submission in `pending` status.
///
/// Fails with NotFound if the parent does not exist, including when it is
/// deleted while the submission is in flight. Duplicate votes are accepted
/// unless the submission policy says otherwise.
pub async fn submit(item: NewSubmittedItem, deps: &ServerDeps) -> DomainResult<SubmittedItem> {
    let gateway = deps.gateway();

    if deps.submission_policy.reject_duplicate_votes && item.payload.kind() == ItemKind::Vote {
        let previous = gateway
            .list_items(&ItemFilter {
                parent: Some(item.parent),
                kind: Some(ItemKind::Vote),
                submitter_email: Some(item.submitter.email.clone()),
                ..Default::default()
            })
            .await?;
        if previous
            .iter()
            .any(|vote| vote.status != ModerationStatus::Rejected)
        {
            return Err(DomainError::DuplicateSubmission(format!(
                "{} has already voted on {}",
                item.submitter.email, item.parent
            )));
        }
    }

    let created = gateway.insert_item(item).await.map_err(|err| match err {
        GatewayError::MissingParent(parent) => DomainError::not_found(parent.to_string()),
        other => DomainError::Upstream(other),
    })?;

    info!(
        item_id = %created.id,
        parent = %created.parent,
        kind = created.kind().as_str(),
        "Submission received"
    );

    Ok(created)
}

/// Move a pending item to approved or rejected (admin only).
///
/// The update is conditional on the item still being pending, so two admins
/// racing on the same item cannot both succeed. An approval lands in the
/// parent's counts together with the status change.
pub async fn set_status(
    id: SubmittedItemId,
    new_status: ModerationStatus,
    deps: &ServerDeps,
) -> DomainResult<SubmittedItem> {
    if !new_status.is_terminal() {
        return Err(DomainError::validation(format!(
            "status must be approved or rejected, got {}",
            new_status
        )));
    }

    let gateway = deps.gateway();

    let current = gateway
        .get_item(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Item {}", id)))?;

    if !current.status.can_transition_to(new_status) {
        return Err(DomainError::InvalidTransition {
            from: current.status,
            to: new_status,
        });
    }

    let updated = match gateway
        .update_item_status(id, current.status, new_status)
        .await?
    {
        Some(item) => item,
        None => {
            // Lost a race: someone else moved or deleted it since the read
            let latest = gateway
                .get_item(id)
                .await?
                .ok_or_else(|| DomainError::not_found(format!("Item {}", id)))?;
            return Err(DomainError::InvalidTransition {
                from: latest.status,
                to: new_status,
            });
        }
    };

    info!(
        item_id = %id,
        parent = %updated.parent,
        status = %updated.status,
        "Item reviewed"
    );

    Ok(updated)
}

/// Hard delete an item in any state (admin only).
///
/// Deleting an approved item also takes it out of the parent's counts.
pub async fn delete_item(id: SubmittedItemId, deps: &ServerDeps) -> DomainResult<SubmittedItem> {
    let deleted = deps
        .gateway()
        .delete_item(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Item {}", id)))?;

    info!(
        item_id = %id,
        parent = %deleted.parent,
        status = %deleted.status,
        "Item deleted"
    );

    Ok(deleted)
}
