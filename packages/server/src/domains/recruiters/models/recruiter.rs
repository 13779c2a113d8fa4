use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::RecruiterId;
use crate::domains::moderation::models::Aggregates;

/// Recruiter model - people listed in the recruiter directory
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Recruiter {
    pub id: RecruiterId,

    // Profile
    pub name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub specialties: Option<String>,

    // Aggregates over approved submissions
    pub comment_count: i32,
    pub upvote_count: i32,
    pub downvote_count: i32,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateRecruiter {
    pub name: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub specialties: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRecruiter {
    pub name: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub specialties: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecruiterFilter {
    pub company: Option<String>,
}

impl Recruiter {
    pub fn aggregates(&self) -> Aggregates {
        Aggregates {
            comment_count: self.comment_count,
            upvote_count: self.upvote_count,
            downvote_count: self.downvote_count,
        }
    }

    pub async fn find_by_id_optional(
        id: RecruiterId,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM recruiters WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find recruiters, optionally restricted to one company (case-insensitive)
    pub async fn find_with_filter(
        filter: &RecruiterFilter,
        pool: &PgPool,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM recruiters
            WHERE ($1::text IS NULL OR LOWER(company) = LOWER($1))
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(filter.company.as_deref())
        .fetch_all(pool)
        .await
    }

    pub async fn create(input: CreateRecruiter, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO recruiters (id, name, company, title, email, linkedin_url, specialties)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(RecruiterId::new())
        .bind(&input.name)
        .bind(&input.company)
        .bind(&input.title)
        .bind(&input.email)
        .bind(&input.linkedin_url)
        .bind(&input.specialties)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        id: RecruiterId,
        input: UpdateRecruiter,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE recruiters SET
                name = COALESCE($2, name),
                company = COALESCE($3, company),
                title = COALESCE($4, title),
                email = COALESCE($5, email),
                linkedin_url = COALESCE($6, linkedin_url),
                specialties = COALESCE($7, specialties),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.company)
        .bind(&input.title)
        .bind(&input.email)
        .bind(&input.linkedin_url)
        .bind(&input.specialties)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(id: RecruiterId, pool: &PgPool) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM recruiters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
