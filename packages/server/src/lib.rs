// Tool & Recruiter Directory - API Core
//
// Public directory of tools and recruiters with anonymously submitted
// comments and votes. Every submission waits in a moderation queue until
// an admin approves or rejects it.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
