use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::moderation::SubmissionPolicy;

/// Per-IP rate limit on public submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub admin_token: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,
    /// `None` disables rate limiting
    pub rate_limit: Option<RateLimitConfig>,
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    pub submission_policy: SubmissionPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let admin_token = var("ADMIN_TOKEN").context("ADMIN_TOKEN must be set")?;
        if admin_token.trim().is_empty() {
            anyhow::bail!("ADMIN_TOKEN must not be empty");
        }

        let per_second: u64 = parse_or(&var, "RATE_LIMIT_PER_SECOND", 2)?;
        let burst_size: u32 = parse_or(&var, "RATE_LIMIT_BURST", 10)?;
        let rate_limit = (per_second > 0 && burst_size > 0).then_some(RateLimitConfig {
            per_second,
            burst_size,
        });

        Ok(Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_or(&var, "PORT", 8080)?,
            admin_token,
            database_max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 10)?,
            run_migrations: parse_or(&var, "RUN_MIGRATIONS", true)?,
            rate_limit,
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            submission_policy: SubmissionPolicy {
                reject_duplicate_votes: parse_or(&var, "REJECT_DUPLICATE_VOTES", false)?,
            },
        })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("DATABASE_URL", "postgres://localhost/directory"),
        ("ADMIN_TOKEN", "secret"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 10);
        assert!(config.run_migrations);
        assert_eq!(
            config.rate_limit,
            Some(RateLimitConfig {
                per_second: 2,
                burst_size: 10
            })
        );
        assert!(config.allowed_origins.is_empty());
        assert!(!config.submission_policy.reject_duplicate_votes);
    }

    #[test]
    fn test_missing_admin_token_fails() {
        let err = Config::from_vars(lookup(&REQUIRED[..1])).unwrap_err();
        assert!(err.to_string().contains("ADMIN_TOKEN"));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("PORT", "9000"),
            ("RATE_LIMIT_PER_SECOND", "0"),
            ("ALLOWED_ORIGINS", "https://a.dev, https://b.dev,"),
            ("REJECT_DUPLICATE_VOTES", "true"),
            ("RUN_MIGRATIONS", "false"),
        ]);
        let config = Config::from_vars(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.rate_limit, None);
        assert_eq!(config.allowed_origins, vec!["https://a.dev", "https://b.dev"]);
        assert!(config.submission_policy.reject_duplicate_votes);
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_bad_port_is_reported() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_vars(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
