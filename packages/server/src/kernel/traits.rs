// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The moderation
// rules live in domains/moderation/activities and only talk to the database
// through BaseGateway.
//
// Naming convention: Base* for trait names (e.g., BaseGateway)

use async_trait::async_trait;
use thiserror::Error;

use crate::common::{RecruiterId, SubmittedItemId, ToolId};
use crate::domains::moderation::models::{
    ItemFilter, ModerationStatus, NewSubmittedItem, ParentRef, SubmittedItem,
};
use crate::domains::recruiters::models::{
    CreateRecruiter, Recruiter, RecruiterFilter, UpdateRecruiter,
};
use crate::domains::tools::models::{CreateTool, Tool, ToolFilter, UpdateTool};

/// A failed call to the database. The message is passed through untouched.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),

    /// An insert referenced a parent that does not exist (or was just deleted).
    #[error("{0} does not exist")]
    MissingParent(ParentRef),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

// =============================================================================
// Data Access Gateway
// =============================================================================

/// Single-call access to directory entities.
///
/// Every method is one round trip. Nothing is cached, retried or composed
/// into a transaction; callers that need two calls make two calls. Parent
/// aggregate counts are kept in step by the calls that change which items
/// are approved, within the same statement.
#[async_trait]
pub trait BaseGateway: Send + Sync {
    // Tools
    async fn get_tool(&self, id: ToolId) -> GatewayResult<Option<Tool>>;
    async fn list_tools(&self, filter: &ToolFilter) -> GatewayResult<Vec<Tool>>;
    async fn insert_tool(&self, input: CreateTool) -> GatewayResult<Tool>;
    async fn update_tool(&self, id: ToolId, input: UpdateTool) -> GatewayResult<Option<Tool>>;
    async fn delete_tool(&self, id: ToolId) -> GatewayResult<bool>;

    // Recruiters
    async fn get_recruiter(&self, id: RecruiterId) -> GatewayResult<Option<Recruiter>>;
    async fn list_recruiters(&self, filter: &RecruiterFilter) -> GatewayResult<Vec<Recruiter>>;
    async fn insert_recruiter(&self, input: CreateRecruiter) -> GatewayResult<Recruiter>;
    async fn update_recruiter(
        &self,
        id: RecruiterId,
        input: UpdateRecruiter,
    ) -> GatewayResult<Option<Recruiter>>;
    async fn delete_recruiter(&self, id: RecruiterId) -> GatewayResult<bool>;

    // Submitted items
    async fn get_item(&self, id: SubmittedItemId) -> GatewayResult<Option<SubmittedItem>>;
    async fn list_items(&self, filter: &ItemFilter) -> GatewayResult<Vec<SubmittedItem>>;
    /// Insert as `pending`. Fails with `MissingParent` if the parent is gone.
    async fn insert_item(&self, input: NewSubmittedItem) -> GatewayResult<SubmittedItem>;

    /// Conditional status update: only applies while the item is in `from`.
    /// Entering or leaving `approved` adjusts the parent's counts.
    async fn update_item_status(
        &self,
        id: SubmittedItemId,
        from: ModerationStatus,
        to: ModerationStatus,
    ) -> GatewayResult<Option<SubmittedItem>>;

    /// Hard delete, returning the row that was removed. An approved row is
    /// taken out of the parent's counts.
    async fn delete_item(&self, id: SubmittedItemId) -> GatewayResult<Option<SubmittedItem>>;

    /// Liveness check used by the health endpoint.
    async fn ping(&self) -> GatewayResult<()>;

    /// Whether a parent row exists.
    async fn parent_exists(&self, parent: ParentRef) -> GatewayResult<bool> {
        Ok(match parent {
            ParentRef::Tool(id) => self.get_tool(id).await?.is_some(),
            ParentRef::Recruiter(id) => self.get_recruiter(id).await?.is_some(),
        })
    }
}
