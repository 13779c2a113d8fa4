// Rate limiting for public submissions using tower-governor
//
// Keys on the client IP: X-Forwarded-For, X-Real-IP and Forwarded are tried
// first, then the socket address from connect info. A request carrying none
// of them cannot be keyed and is refused.
use axum::routing::MethodRouter;
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tracing::warn;

use crate::config::RateLimitConfig;

/// Wrap a method router in a per-IP governor, or leave it alone when
/// limiting is disabled.
pub fn rate_limited(route: MethodRouter, limit: Option<RateLimitConfig>) -> MethodRouter {
    let Some(limit) = limit else {
        return route;
    };

    let Some(config) = GovernorConfigBuilder::default()
        .key_extractor(SmartIpKeyExtractor)
        .per_second(limit.per_second)
        .burst_size(limit.burst_size)
        .use_headers()
        .finish()
    else {
        warn!(?limit, "Invalid rate limit configuration, submissions are not limited");
        return route;
    };

    route.layer(GovernorLayer {
        config: Arc::new(config),
    })
}
