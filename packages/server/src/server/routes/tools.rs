use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::domains::tools::activities;
use crate::domains::tools::{CreateToolInput, ToolData, UpdateToolInput};
use crate::server::app::AppState;
use crate::server::error::{parse_id, ApiResult};
use crate::server::middleware::AdminUser;

#[derive(Debug, Default, Deserialize)]
pub struct ToolQuery {
    pub category: Option<String>,
}

pub async fn list_tools_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<ToolQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ToolData>>> {
    let Query(query) = query?;
    let tools = activities::list_tools(query.category, &state.deps).await?;
    Ok(Json(tools.into_iter().map(ToolData::from).collect()))
}

pub async fn get_tool_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ToolData>> {
    let tool = activities::get_tool(parse_id(&id)?, &state.deps).await?;
    Ok(Json(tool.into()))
}

pub async fn create_tool_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    payload: Result<Json<CreateToolInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ToolData>)> {
    let Json(input) = payload?;
    let tool = activities::create_tool(input, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(tool.into())))
}

pub async fn update_tool_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateToolInput>, JsonRejection>,
) -> ApiResult<Json<ToolData>> {
    let id = parse_id(&id)?;
    let Json(input) = payload?;
    let tool = activities::update_tool(id, input, &state.deps).await?;
    Ok(Json(tool.into()))
}

pub async fn delete_tool_handler(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    activities::delete_tool(parse_id(&id)?, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
