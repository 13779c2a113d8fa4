pub mod tool;

pub use tool::{CreateTool, Tool, ToolFilter, UpdateTool};
