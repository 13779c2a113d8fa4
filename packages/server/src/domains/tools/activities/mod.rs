//! Tool activities - directory CRUD

mod mutations;
mod queries;

pub use mutations::*;
pub use queries::*;
