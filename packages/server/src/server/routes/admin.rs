use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    Json,
};
use serde::Deserialize;

use crate::common::DomainError;
use crate::domains::moderation::activities;
use crate::domains::moderation::{ItemKind, ModerationStatus, SubmittedItemData};
use crate::server::app::AppState;
use crate::server::error::{parse_id, ApiError, ApiResult};
use crate::server::middleware::AdminUser;
use crate::server::routes::submissions::parse_status;

#[derive(Debug, Default, Deserialize)]
pub struct QueueQuery {
    pub status: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusBody {
    pub status: String,
}

/// Review queue across all parents, newest first (pending by default)
pub async fn list_queue_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    query: Result<Query<QueueQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SubmittedItemData>>> {
    let Query(query) = query?;
    let status = parse_status(query.status.as_deref(), ModerationStatus::Pending)?;
    let kind = query
        .kind
        .as_deref()
        .map(str::parse::<ItemKind>)
        .transpose()
        .map_err(|e| ApiError::from(DomainError::Validation(e)))?;

    let items = activities::list_queue(status, kind, &state.deps).await?;
    Ok(Json(items.into_iter().map(SubmittedItemData::from).collect()))
}

pub async fn get_item_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubmittedItemData>> {
    let item = activities::get_item(parse_id(&id)?, &state.deps).await?;
    Ok(Json(item.into()))
}

pub async fn set_status_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SetStatusBody>, JsonRejection>,
) -> ApiResult<Json<SubmittedItemData>> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let status = body
        .status
        .parse::<ModerationStatus>()
        .map_err(|e| ApiError::from(DomainError::validation(e.to_string())))?;

    let item = activities::set_status(id, status, &state.deps).await?;
    Ok(Json(item.into()))
}

pub async fn delete_item_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubmittedItemData>> {
    let item = activities::delete_item(parse_id(&id)?, &state.deps).await?;
    Ok(Json(item.into()))
}
