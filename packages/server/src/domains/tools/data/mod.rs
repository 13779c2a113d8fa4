pub mod tool;

pub use tool::{CreateToolInput, ToolData, UpdateToolInput};
