//! Moderation activities - business logic functions
//!
//! Activities take `ServerDeps`, talk to the database through the gateway and
//! return plain data. HTTP handlers call them directly.

mod mutations;
mod queries;


pub use mutations::*;
pub use queries::*;
