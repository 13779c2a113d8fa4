pub mod status;
pub mod submitted_item;

pub use status::*;
pub use submitted_item::*;
