// Business domains
pub mod moderation;
pub mod recruiters;
pub mod tools;
