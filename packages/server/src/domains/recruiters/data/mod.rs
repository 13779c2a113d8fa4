pub mod recruiter;

pub use recruiter::{CreateRecruiterInput, RecruiterData, UpdateRecruiterInput};
