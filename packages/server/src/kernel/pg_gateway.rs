//! Postgres implementation of the data access gateway.
//!
//! The SQL lives on the models (`Tool::create`, `SubmittedItem::update_status_if`,
//! ...); this type only adapts them to `BaseGateway`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use super::traits::{BaseGateway, GatewayError, GatewayResult};
use crate::common::{RecruiterId, SubmittedItemId, ToolId};
use crate::config::Config;
use crate::domains::moderation::models::{
    ItemFilter, ModerationStatus, NewSubmittedItem, SubmittedItem,
};
use crate::domains::recruiters::models::{
    CreateRecruiter, Recruiter, RecruiterFilter, UpdateRecruiter,
};
use crate::domains::tools::models::{CreateTool, Tool, ToolFilter, UpdateTool};

#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool using the database settings in `config`.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseGateway for PgGateway {
    async fn get_tool(&self, id: ToolId) -> GatewayResult<Option<Tool>> {
        Ok(Tool::find_by_id_optional(id, &self.pool).await?)
    }

    async fn list_tools(&self, filter: &ToolFilter) -> GatewayResult<Vec<Tool>> {
        Ok(Tool::find_with_filter(filter, &self.pool).await?)
    }

    async fn insert_tool(&self, input: CreateTool) -> GatewayResult<Tool> {
        Ok(Tool::create(input, &self.pool).await?)
    }

    async fn update_tool(&self, id: ToolId, input: UpdateTool) -> GatewayResult<Option<Tool>> {
        Ok(Tool::update(id, input, &self.pool).await?)
    }

    async fn delete_tool(&self, id: ToolId) -> GatewayResult<bool> {
        Ok(Tool::delete(id, &self.pool).await?)
    }

    async fn get_recruiter(&self, id: RecruiterId) -> GatewayResult<Option<Recruiter>> {
        Ok(Recruiter::find_by_id_optional(id, &self.pool).await?)
    }

    async fn list_recruiters(&self, filter: &RecruiterFilter) -> GatewayResult<Vec<Recruiter>> {
        Ok(Recruiter::find_with_filter(filter, &self.pool).await?)
    }

    async fn insert_recruiter(&self, input: CreateRecruiter) -> GatewayResult<Recruiter> {
        Ok(Recruiter::create(input, &self.pool).await?)
    }

    async fn update_recruiter(
        &self,
        id: RecruiterId,
        input: UpdateRecruiter,
    ) -> GatewayResult<Option<Recruiter>> {
        Ok(Recruiter::update(id, input, &self.pool).await?)
    }

    async fn delete_recruiter(&self, id: RecruiterId) -> GatewayResult<bool> {
        Ok(Recruiter::delete(id, &self.pool).await?)
    }

    async fn get_item(&self, id: SubmittedItemId) -> GatewayResult<Option<SubmittedItem>> {
        Ok(SubmittedItem::find_by_id_optional(id, &self.pool).await?)
    }

    async fn list_items(&self, filter: &ItemFilter) -> GatewayResult<Vec<SubmittedItem>> {
        Ok(SubmittedItem::find_with_filter(filter, &self.pool).await?)
    }

    async fn insert_item(&self, input: NewSubmittedItem) -> GatewayResult<SubmittedItem> {
        let parent = input.parent;
        SubmittedItem::create(input, &self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    GatewayError::MissingParent(parent)
                }
                other => GatewayError::Database(other),
            })
    }

    async fn update_item_status(
        &self,
        id: SubmittedItemId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> GatewayResult<Option<SubmittedItem>> {
        Ok(SubmittedItem::update_status_if(id, from, to, &self.pool).await?)
    }

    async fn delete_item(&self, id: SubmittedItemId) -> GatewayResult<Option<SubmittedItem>> {
        Ok(SubmittedItem::delete(id, &self.pool).await?)
    }

    async fn ping(&self) -> GatewayResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
