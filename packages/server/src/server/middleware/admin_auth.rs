use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::debug;

use crate::server::error::ApiError;

/// The configured admin secret, kept only as a SHA-256 digest
#[derive(Clone)]
pub struct AdminToken {
    digest: String,
}

impl AdminToken {
    pub fn new(token: &str) -> Self {
        Self {
            digest: digest(token),
        }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        digest(candidate) == self.digest
    }
}

impl std::fmt::Debug for AdminToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminToken(..)")
    }
}

fn digest(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Marker placed in request extensions once the bearer token checks out
#[derive(Clone, Debug)]
pub struct AdminUser;

/// Admin authentication middleware
///
/// Reads `Authorization: Bearer <token>` and adds `AdminUser` to request
/// extensions when it matches. Other requests continue unauthenticated.
pub async fn admin_auth_middleware(
    admin_token: Arc<AdminToken>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(admin) = extract_admin(&request, &admin_token) {
        debug!("Authenticated admin request");
        request.extensions_mut().insert(admin);
    }

    next.run(request).await
}

fn extract_admin(request: &Request<Body>, admin_token: &AdminToken) -> Option<AdminUser> {
    let auth_str = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    admin_token.matches(token).then_some(AdminUser)
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_matches() {
        let token = AdminToken::new("s3cret");
        assert!(extract_admin(&request(Some("Bearer s3cret")), &token).is_some());
    }

    #[test]
    fn test_wrong_or_missing_token() {
        let token = AdminToken::new("s3cret");
        assert!(extract_admin(&request(Some("Bearer nope")), &token).is_none());
        assert!(extract_admin(&request(Some("s3cret")), &token).is_none());
        assert!(extract_admin(&request(None), &token).is_none());
    }

    #[test]
    fn test_debug_hides_digest() {
        assert_eq!(format!("{:?}", AdminToken::new("s3cret")), "AdminToken(..)");
    }
}
