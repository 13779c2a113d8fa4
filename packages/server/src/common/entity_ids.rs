//! Typed ID definitions for directory entities.
//!
//! ```rust
//! use directory_core::common::{ToolId, RecruiterId};
//!
//! let tool_id = ToolId::new();
//! let recruiter_id = RecruiterId::new();
//! // let wrong: ToolId = recruiter_id; // compile error
//! # let _ = (tool_id, recruiter_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for tools listed in the directory.
pub struct Tool;

/// Marker type for recruiters listed in the directory.
pub struct Recruiter;

/// Marker type for comments and votes awaiting or past moderation.
pub struct SubmittedItem;

// ============================================================================
// Type aliases
// ============================================================================

pub type ToolId = Id<Tool>;

pub type RecruiterId = Id<Recruiter>;

pub type SubmittedItemId = Id<SubmittedItem>;
