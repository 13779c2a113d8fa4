//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::{Config, RateLimitConfig};
use crate::kernel::ServerDeps;
use crate::server::middleware::{admin_auth_middleware, rate_limited, AdminToken};
use crate::server::routes::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Router options that come from configuration rather than dependencies
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub admin_token: AdminToken,
    pub rate_limit: Option<RateLimitConfig>,
    pub allowed_origins: Vec<String>,
}

impl AppOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            admin_token: AdminToken::new(&config.admin_token),
            rate_limit: config.rate_limit,
            allowed_origins: config.allowed_origins.clone(),
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Empty list means any origin (development)
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
///
/// Submission endpoints are rate limited per client IP when configured. The IP
/// comes from the forwarding headers set by a reverse proxy, falling back to
/// the peer address when served with `into_make_service_with_connect_info`.
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };
    let admin_token = Arc::new(options.admin_token);

    let router = Router::new()
        // Health check (no auth, no rate limit)
        .route("/health", get(health_handler))
        // Directory
        .route(
            "/tools",
            get(list_tools_handler).post(create_tool_handler),
        )
        .route(
            "/tools/:id",
            get(get_tool_handler)
                .patch(update_tool_handler)
                .delete(delete_tool_handler),
        )
        .route(
            "/recruiters",
            get(list_recruiters_handler).post(create_recruiter_handler),
        )
        .route(
            "/recruiters/:id",
            get(get_recruiter_handler)
                .patch(update_recruiter_handler)
                .delete(delete_recruiter_handler),
        )
        // Public submissions and approved listings
        .route(
            "/comments",
            get(list_comments_handler)
                .merge(rate_limited(post(submit_comment_handler), options.rate_limit)),
        )
        .route(
            "/votes",
            get(list_votes_handler)
                .merge(rate_limited(post(submit_vote_handler), options.rate_limit)),
        )
        // Moderation
        .route("/admin/items", get(list_queue_handler))
        .route(
            "/admin/items/:id",
            get(get_item_handler).delete(delete_item_handler),
        )
        .route("/admin/items/:id/status", post(set_status_handler));

    // Middleware layers (applied in reverse order - last added runs first)
    router
        .layer(middleware::from_fn(move |req, next| {
            admin_auth_middleware(admin_token.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
