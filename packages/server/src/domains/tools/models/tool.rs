use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::ToolId;
use crate::domains::moderation::models::Aggregates;

/// Tool model - software listed in the directory
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tool {
    pub id: ToolId,

    // Listing
    pub name: String,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub logo_url: Option<String>,

    // Aggregates over approved submissions
    pub comment_count: i32,
    pub upvote_count: i32,
    pub downvote_count: i32,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new tool
#[derive(Debug, Clone)]
pub struct CreateTool {
    pub name: String,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub logo_url: Option<String>,
}

/// Input for updating a tool. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTool {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website_url: Option<String>,
    pub category: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    pub category: Option<String>,
}

impl Tool {
    pub fn aggregates(&self) -> Aggregates {
        Aggregates {
            comment_count: self.comment_count,
            upvote_count: self.upvote_count,
            downvote_count: self.downvote_count,
        }
    }

    /// Find tool by ID, returning None if not found
    pub async fn find_by_id_optional(id: ToolId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find tools, optionally restricted to one category
    pub async fn find_with_filter(filter: &ToolFilter, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM tools
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(filter.category.as_deref())
        .fetch_all(pool)
        .await
    }

    /// Create a new tool with zeroed aggregates
    pub async fn create(input: CreateTool, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO tools (id, name, description, website_url, category, logo_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ToolId::new())
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.website_url)
        .bind(&input.category)
        .bind(&input.logo_url)
        .fetch_one(pool)
        .await
    }

    /// Update a tool
    pub async fn update(id: ToolId, input: UpdateTool, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE tools SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                website_url = COALESCE($4, website_url),
                category = COALESCE($5, category),
                logo_url = COALESCE($6, logo_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.website_url)
        .bind(&input.category)
        .bind(&input.logo_url)
        .fetch_optional(pool)
        .await
    }

    /// Delete a tool. Its submitted items go with it (ON DELETE CASCADE).
    pub async fn delete(id: ToolId, pool: &PgPool) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
