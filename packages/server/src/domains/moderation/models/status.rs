use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Moderation status of a submitted comment or vote.
///
/// Items start `Pending` and move exactly once, to `Approved` or `Rejected`.
/// Both of those are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid moderation status: {0}")]
pub struct ParseStatusError(pub String);

impl ModerationStatus {
    pub const ALL: [ModerationStatus; 3] = [
        ModerationStatus::Pending,
        ModerationStatus::Approved,
        ModerationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ModerationStatus::Pending)
    }

    /// Whether an admin may move an item from `self` to `next`.
    pub fn can_transition_to(&self, next: ModerationStatus) -> bool {
        matches!(
            (self, next),
            (ModerationStatus::Pending, ModerationStatus::Approved)
                | (ModerationStatus::Pending, ModerationStatus::Rejected)
        )
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModerationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ModerationStatus::Pending),
            "approved" => Ok(ModerationStatus::Approved),
            "rejected" => Ok(ModerationStatus::Rejected),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}
