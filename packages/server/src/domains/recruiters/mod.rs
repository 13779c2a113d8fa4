//! Recruiters domain - people listed in the directory

pub mod activities;
pub mod data;
pub mod models;

pub use data::{CreateRecruiterInput, RecruiterData, UpdateRecruiterInput};
pub use models::{CreateRecruiter, Recruiter, RecruiterFilter, UpdateRecruiter};
