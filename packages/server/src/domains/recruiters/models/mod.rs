pub mod recruiter;

pub use recruiter::{CreateRecruiter, Recruiter, RecruiterFilter, UpdateRecruiter};
