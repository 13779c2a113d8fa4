//! Moderation query activities

use crate::common::{DomainError, DomainResult, SubmittedItemId};
use crate::domains::moderation::models::{
    ItemFilter, ItemKind, ModerationStatus, ParentRef, SubmittedItem,
};
use crate::kernel::ServerDeps;

/// Items of one parent in one status, newest first.
///
/// Public listings call this with `Approved`; the review queue for a single
/// listing uses `Pending`.
pub async fn list_by_status(
    parent: ParentRef,
    status: ModerationStatus,
    kind: Option<ItemKind>,
    deps: &ServerDeps,
) -> DomainResult<Vec<SubmittedItem>> {
    let gateway = deps.gateway();

    if !gateway.parent_exists(parent).await? {
        return Err(DomainError::not_found(parent.to_string()));
    }

    let items = gateway
        .list_items(&ItemFilter {
            parent: Some(parent),
            status: Some(status),
            kind,
            ..Default::default()
        })
        .await?;

    Ok(items)
}

/// Items in one status across all parents (admin review queue).
pub async fn list_queue(
    status: ModerationStatus,
    kind: Option<ItemKind>,
    deps: &ServerDeps,
) -> DomainResult<Vec<SubmittedItem>> {
    let items = deps
        .gateway()
        .list_items(&ItemFilter {
            status: Some(status),
            kind,
            ..Default::default()
        })
        .await?;
    Ok(items)
}

pub async fn get_item(id: SubmittedItemId, deps: &ServerDeps) -> DomainResult<SubmittedItem> {
    deps.gateway()
        .get_item(id)
        .await?
        .ok_or_else(|| DomainError::not_found(format!("Item {}", id)))
}
