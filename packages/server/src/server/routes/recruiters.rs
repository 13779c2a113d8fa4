use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domains::recruiters::activities;
use crate::domains::recruiters::{
    CreateRecruiterInput, Recruiter, RecruiterData, UpdateRecruiterInput,
};
use crate::server::app::AppState;
use crate::server::error::{parse_id, ApiResult};
use crate::server::middleware::AdminUser;

#[derive(Debug, Default, Deserialize)]
pub struct RecruiterQuery {
    pub company: Option<String>,
}

fn present(recruiter: Recruiter, admin: &Option<AdminUser>) -> RecruiterData {
    if admin.is_some() {
        RecruiterData::from(recruiter)
    } else {
        RecruiterData::public(recruiter)
    }
}

pub async fn list_recruiters_handler(
    admin: Option<AdminUser>,
    Extension(state): Extension<AppState>,
    query: Result<Query<RecruiterQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<RecruiterData>>> {
    let Query(query) = query?;
    let recruiters = activities::list_recruiters(query.company, &state.deps).await?;
    Ok(Json(
        recruiters
            .into_iter()
            .map(|r| present(r, &admin))
            .collect(),
    ))
}

pub async fn get_recruiter_handler(
    admin: Option<AdminUser>,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RecruiterData>> {
    let recruiter = activities::get_recruiter(parse_id(&id)?, &state.deps).await?;
    Ok(Json(present(recruiter, &admin)))
}

pub async fn create_recruiter_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    payload: Result<Json<CreateRecruiterInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RecruiterData>)> {
    let Json(input) = payload?;
    let recruiter = activities::create_recruiter(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(recruiter.into())))
}

pub async fn update_recruiter_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateRecruiterInput>, JsonRejection>,
) -> ApiResult<Json<RecruiterData>> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    let recruiter = activities::update_recruiter(id, input, &state.deps).await?;
    Ok(Json(recruiter.into()))
}

pub async fn delete_recruiter_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    activities::delete_recruiter(parse_id(&id)?, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
