use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use super::ModerationStatus;
use crate::common::{RecruiterId, SubmittedItemId, ToolId};

/// The listing a comment or vote is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentRef {
    Tool(ToolId),
    Recruiter(RecruiterId),
}

impl ParentRef {
    pub fn kind(&self) -> &'static str {
        match self {
            ParentRef::Tool(_) => "tool",
            ParentRef::Recruiter(_) => "recruiter",
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            ParentRef::Tool(id) => id.into_uuid(),
            ParentRef::Recruiter(id) => id.into_uuid(),
        }
    }

    pub fn tool_id(&self) -> Option<ToolId> {
        match self {
            ParentRef::Tool(id) => Some(*id),
            ParentRef::Recruiter(_) => None,
        }
    }

    pub fn recruiter_id(&self) -> Option<RecruiterId> {
        match self {
            ParentRef::Recruiter(id) => Some(*id),
            ParentRef::Tool(_) => None,
        }
    }
}

impl std::fmt::Display for ParentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.uuid())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Comment,
    Vote,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Comment => "comment",
            ItemKind::Vote => "vote",
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comment" => Ok(ItemKind::Comment),
            "vote" => Ok(ItemKind::Vote),
            other => Err(format!("Invalid item kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }
}

impl std::str::FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "upvote" => Ok(VoteDirection::Up),
            "down" | "downvote" => Ok(VoteDirection::Down),
            other => Err(format!("Invalid vote direction: {}", other)),
        }
    }
}

/// What was submitted: comment text or a vote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemPayload {
    Comment { content: String },
    Vote { direction: VoteDirection },
}

impl ItemPayload {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemPayload::Comment { .. } => ItemKind::Comment,
            ItemPayload::Vote { .. } => ItemKind::Vote,
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            ItemPayload::Comment { content } => Some(content),
            ItemPayload::Vote { .. } => None,
        }
    }

    pub fn direction(&self) -> Option<VoteDirection> {
        match self {
            ItemPayload::Vote { direction } => Some(*direction),
            ItemPayload::Comment { .. } => None,
        }
    }
}

/// Contact details of whoever submitted the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub email: String,
    pub name: String,
    pub company: Option<String>,
    pub title: Option<String>,
}

/// A comment or vote as stored in `submitted_items`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedItem {
    pub id: SubmittedItemId,
    pub parent: ParentRef,
    pub submitter: Submitter,
    pub payload: ItemPayload,
    pub status: ModerationStatus,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl SubmittedItem {
    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }
}

/// A validated submission ready to be inserted as `pending`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmittedItem {
    pub parent: ParentRef,
    pub submitter: Submitter,
    pub payload: ItemPayload,
}

/// Filter for item listings. `None` fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub parent: Option<ParentRef>,
    pub status: Option<ModerationStatus>,
    pub kind: Option<ItemKind>,
    pub submitter_email: Option<String>,
}

impl ItemFilter {
    pub fn matches(&self, item: &SubmittedItem) -> bool {
        self.parent.map_or(true, |p| p == item.parent)
            && self.status.map_or(true, |s| s == item.status)
            && self.kind.map_or(true, |k| k == item.kind())
            && self
                .submitter_email
                .as_deref()
                .map_or(true, |e| e.eq_ignore_ascii_case(&item.submitter.email))
    }
}

/// Counts of approved children for one parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregates {
    pub comment_count: i32,
    pub upvote_count: i32,
    pub downvote_count: i32,
}

impl Aggregates {
    /// Tally approved items. Items in other states are ignored.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a SubmittedItem>) -> Self {
        items
            .into_iter()
            .filter(|item| item.status == ModerationStatus::Approved)
            .fold(Self::default(), |mut acc, item| {
                match item.payload {
                    ItemPayload::Comment { .. } => acc.comment_count += 1,
                    ItemPayload::Vote {
                        direction: VoteDirection::Up,
                    } => acc.upvote_count += 1,
                    ItemPayload::Vote {
                        direction: VoteDirection::Down,
                    } => acc.downvote_count += 1,
                }
                acc
            })
    }
}

fn decode_error(column: &str, message: String) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: message.into(),
    }
}

impl<'r> FromRow<'r, PgRow> for SubmittedItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let tool_id: Option<ToolId> = row.try_get("tool_id")?;
        let recruiter_id: Option<RecruiterId> = row.try_get("recruiter_id")?;
        let parent = match (tool_id, recruiter_id) {
            (Some(id), None) => ParentRef::Tool(id),
            (None, Some(id)) => ParentRef::Recruiter(id),
            _ => {
                return Err(decode_error(
                    "tool_id",
                    "exactly one of tool_id and recruiter_id must be set".to_string(),
                ))
            }
        };

        let kind: String = row.try_get("kind")?;
        let payload = match kind.parse::<ItemKind>().map_err(|e| decode_error("kind", e))? {
            ItemKind::Comment => ItemPayload::Comment {
                content: row
                    .try_get::<Option<String>, _>("content")?
                    .unwrap_or_default(),
            },
            ItemKind::Vote => {
                let direction: Option<String> = row.try_get("vote_direction")?;
                let direction = direction
                    .unwrap_or_default()
                    .parse::<VoteDirection>()
                    .map_err(|e| decode_error("vote_direction", e))?;
                ItemPayload::Vote { direction }
            }
        };

        let status: String = row.try_get("status")?;
        let status = status
            .parse::<ModerationStatus>()
            .map_err(|e| decode_error("status", e.to_string()))?;

        Ok(Self {
            id: row.try_get("id")?,
            parent,
            submitter: Submitter {
                email: row.try_get("submitter_email")?,
                name: row.try_get("submitter_name")?,
                company: row.try_get("submitter_company")?,
                title: row.try_get("submitter_title")?,
            },
            payload,
            status,
            reviewed_at: row.try_get("reviewed_at")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl SubmittedItem {
    /// Find item by ID, returning None if not found
    pub async fn find_by_id_optional(
        id: SubmittedItemId,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM submitted_items WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find items matching a filter, newest first
    pub async fn find_with_filter(filter: &ItemFilter, pool: &PgPool) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM submitted_items
            WHERE ($1::uuid IS NULL OR tool_id = $1)
              AND ($2::uuid IS NULL OR recruiter_id = $2)
              AND ($3::text IS NULL OR status = $3)
              AND ($4::text IS NULL OR kind = $4)
              AND ($5::text IS NULL OR LOWER(submitter_email) = LOWER($5))
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(filter.parent.and_then(|p| p.tool_id()))
        .bind(filter.parent.and_then(|p| p.recruiter_id()))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.kind.map(|k| k.as_str()))
        .bind(filter.submitter_email.as_deref())
        .fetch_all(pool)
        .await
    }

    /// Insert a new item in `pending` status
    pub async fn create(input: NewSubmittedItem, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO submitted_items (
                id, kind, tool_id, recruiter_id,
                submitter_email, submitter_name, submitter_company, submitter_title,
                content, vote_direction, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'pending')
            RETURNING *
            "#,
        )
        .bind(SubmittedItemId::new())
        .bind(input.payload.kind().as_str())
        .bind(input.parent.tool_id())
        .bind(input.parent.recruiter_id())
        .bind(&input.submitter.email)
        .bind(&input.submitter.name)
        .bind(&input.submitter.company)
        .bind(&input.submitter.title)
        .bind(input.payload.content())
        .bind(input.payload.direction().map(|d| d.as_str()))
        .fetch_one(pool)
        .await
    }

    /// Move an item to `to`, but only if it is currently in `from`.
    ///
    /// Returns None when no row matched, either because the item is gone or
    /// because its status already changed. When the move enters or leaves
    /// `approved`, the parent's counts are adjusted in the same statement.
    pub async fn update_status_if(
        id: SubmittedItemId,
        from: ModerationStatus,
        to: ModerationStatus,
        pool: &PgPool,
    ) -> sqlx::Result<Option<Self>> {
        let query = format!(
            r#"
            WITH reviewed AS (
                UPDATE submitted_items SET
                    status = $3,
                    reviewed_at = NOW()
                WHERE id = $1 AND status = $2
                RETURNING *
            ),
            changed AS (
                SELECT *, $4::int AS adjustment FROM reviewed
            ),
            {ADJUST_PARENT_COUNTS}
            SELECT * FROM reviewed
            "#
        );
        sqlx::query_as::<_, Self>(&query)
            .bind(id)
            .bind(from.as_str())
            .bind(to.as_str())
            .bind(approved_delta(from, to))
            .fetch_optional(pool)
            .await
    }

    /// Delete an item, returning the deleted row. Removing an approved item
    /// takes it out of the parent's counts in the same statement.
    pub async fn delete(id: SubmittedItemId, pool: &PgPool) -> sqlx::Result<Option<Self>> {
        let query = format!(
            r#"
            WITH removed AS (
                DELETE FROM submitted_items WHERE id = $1 RETURNING *
            ),
            changed AS (
                SELECT *, CASE WHEN status = 'approved' THEN -1 ELSE 0 END AS adjustment
                FROM removed
            ),
            {ADJUST_PARENT_COUNTS}
            SELECT * FROM removed
            "#
        );
        sqlx::query_as::<_, Self>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}

/// +1 when a move enters `approved`, -1 when it leaves, 0 otherwise.
pub fn approved_delta(from: ModerationStatus, to: ModerationStatus) -> i32 {
    match (
        from == ModerationStatus::Approved,
        to == ModerationStatus::Approved,
    ) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}

// Shared tail for statements that change which items are approved. Expects a
// `changed` CTE of submitted_items rows plus an `adjustment` column. Increments are
// applied to the locked parent row, so concurrent reviews never overwrite each
// other's counts.
const ADJUST_PARENT_COUNTS: &str = r#"
            delta AS (
                SELECT
                    tool_id,
                    recruiter_id,
                    CASE WHEN kind = 'comment' THEN adjustment ELSE 0 END AS comments,
                    CASE WHEN kind = 'vote' AND vote_direction = 'up' THEN adjustment ELSE 0 END AS upvotes,
                    CASE WHEN kind = 'vote' AND vote_direction = 'down' THEN adjustment ELSE 0 END AS downvotes
                FROM changed
                WHERE adjustment <> 0
            ),
            tool_counts AS (
                UPDATE tools SET
                    comment_count = comment_count + delta.comments,
                    upvote_count = upvote_count + delta.upvotes,
                    downvote_count = downvote_count + delta.downvotes,
                    updated_at = NOW()
                FROM delta
                WHERE tools.id = delta.tool_id
            ),
            recruiter_counts AS (
                UPDATE recruiters SET
                    comment_count = comment_count + delta.comments,
                    upvote_count = upvote_count + delta.upvotes,
                    downvote_count = downvote_count + delta.downvotes,
                    updated_at = NOW()
                FROM delta
                WHERE recruiters.id = delta.recruiter_id
            )"#;
