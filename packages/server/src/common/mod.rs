// Common types shared across domains and layers

pub mod entity_ids;
pub mod errors;
pub mod id;

pub use entity_ids::*;
pub use errors::{DomainError, DomainResult};
pub use id::Id;
