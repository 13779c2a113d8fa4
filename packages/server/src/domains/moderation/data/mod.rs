pub mod submission;

pub use submission::{
    parent_from_ids, SubmitCommentInput, SubmitVoteInput, SubmittedItemData, SubmitterInput,
};
