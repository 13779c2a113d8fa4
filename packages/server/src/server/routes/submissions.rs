use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Query,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::common::DomainError;
use crate::domains::moderation::activities;
use crate::domains::moderation::data::parent_from_ids;
use crate::domains::moderation::{
    ItemKind, ModerationStatus, SubmitCommentInput, SubmitVoteInput, SubmittedItem,
    SubmittedItemData,
};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::middleware::AdminUser;

/// Query for listing the items of one parent
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListQuery {
    pub tool_id: Option<Uuid>,
    pub recruiter_id: Option<Uuid>,
    pub status: Option<String>,
}

pub(crate) fn parse_status(
    raw: Option<&str>,
    default: ModerationStatus,
) -> ApiResult<ModerationStatus> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse::<ModerationStatus>()
            .map_err(|e| ApiError::from(DomainError::validation(e.to_string()))),
    }
}

pub(crate) fn present(item: SubmittedItem, admin: &Option<AdminUser>) -> SubmittedItemData {
    if admin.is_some() {
        SubmittedItemData::from(item)
    } else {
        SubmittedItemData::public(item)
    }
}

pub async fn submit_comment_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SubmitCommentInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmittedItemData>)> {
    let Json(input) = payload?;
    let item = activities::submit_comment(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(SubmittedItemData::public(item))))
}

pub async fn submit_vote_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SubmitVoteInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmittedItemData>)> {
    let Json(input) = payload?;
    let item = activities::submit_vote(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(SubmittedItemData::public(item))))
}

async fn list_items(
    kind: ItemKind,
    admin: Option<AdminUser>,
    state: AppState,
    query: ItemListQuery,
) -> ApiResult<Json<Vec<SubmittedItemData>>> {
    let parent = parent_from_ids(query.tool_id, query.recruiter_id)?;
    let status = parse_status(query.status.as_deref(), ModerationStatus::Approved)?;

    // Only approved items are public
    if status != ModerationStatus::Approved && admin.is_none() {
        return Err(ApiError::Unauthorized);
    }

    let items = activities::list_by_status(parent, status, Some(kind), &state.deps).await?;
    Ok(Json(items.into_iter().map(|i| present(i, &admin)).collect()))
}

pub async fn list_comments_handler(
    admin: Option<AdminUser>,
    Extension(state): Extension<AppState>,
    query: Result<Query<ItemListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SubmittedItemData>>> {
    let Query(query) = query?;
    list_items(ItemKind::Comment, admin, state, query).await
}

pub async fn list_votes_handler(
    admin: Option<AdminUser>,
    Extension(state): Extension<AppState>,
    query: Result<Query<ItemListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SubmittedItemData>>> {
    let Query(query) = query?;
    list_items(ItemKind::Vote, admin, state, query).await
}
