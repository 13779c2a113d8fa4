// HTTP middleware
pub mod admin_auth;
pub mod rate_limit;

pub use admin_auth::*;
pub use rate_limit::*;
