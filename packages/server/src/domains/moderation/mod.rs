//! Moderation domain - comment and vote submissions and their review workflow
//!
//! Items are submitted anonymously as `pending`. An admin moves each one to
//! `approved` or `rejected`, and parent aggregates only ever count approved
//! items.

pub mod activities;
pub mod data;
pub mod models;

pub use data::{SubmitCommentInput, SubmitVoteInput, SubmittedItemData, SubmitterInput};
pub use models::{
    Aggregates, ItemFilter, ItemKind, ItemPayload, ModerationStatus, NewSubmittedItem, ParentRef,
    SubmittedItem, Submitter, VoteDirection,
};

/// Caller-chosen rules applied at submission time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionPolicy {
    /// Refuse a second pending or approved vote from the same email on the
    /// same parent. Off by default: duplicates are accepted as-is.
    pub reject_duplicate_votes: bool,
}
