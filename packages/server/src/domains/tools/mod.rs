//! Tools domain - software listed in the directory

pub mod activities;
pub mod data;
pub mod models;

pub use data::{CreateToolInput, ToolData, UpdateToolInput};
pub use models::{CreateTool, Tool, ToolFilter, UpdateTool};
