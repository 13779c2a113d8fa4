// HTTP routes
pub mod admin;
pub mod health;
pub mod recruiters;
pub mod submissions;
pub mod tools;

pub use admin::*;
pub use health::*;
pub use recruiters::*;
pub use submissions::*;
pub use tools::*;
