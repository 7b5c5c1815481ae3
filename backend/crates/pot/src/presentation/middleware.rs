//! Authentication and Rate-limit Middleware
//!
//! The auth gate is a single router layer: it verifies the bearer token,
//! re-fetches the user from the store, and injects a [`CurrentUser`]
//! extension. Handlers never see a raw token; admin-only handlers take an
//! [`AdminUser`] extractor, so the role check is part of the signature.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{ConnectInfo, FromRequestParts, Request};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use platform::client::extract_client_ip;
use platform::rate_limit::FixedWindowLimiter;

use crate::application::config::PotConfig;
use crate::application::token::verify_token;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::PotError;

/// Shared state for the authentication gate
pub struct AuthGateState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PotConfig>,
}

impl<R> Clone for AuthGateState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

/// The authenticated user behind the current request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// The authenticated user, additionally proven to be an admin
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Verify the bearer token and attach the current user to the request.
///
/// The role inside the token is never trusted; the user record is
/// re-fetched on every request, so a deleted user's token stops working
/// immediately.
pub async fn authenticate<R>(
    state: AuthGateState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, PotError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(req.headers()).ok_or(PotError::MissingToken)?;

    let claims = verify_token(token, &state.config.token_secret, Utc::now())
        .map_err(|_| PotError::InvalidToken)?;

    let user = state
        .repo
        .find_by_id(&UserId::from_uuid(claims.sub))
        .await?
        .ok_or(PotError::UserNotFound)?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = PotError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(PotError::MissingToken)
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = PotError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(PotError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}

/// Per-IP fixed-window rate limiting, applied to every route.
pub async fn throttle(
    limiter: Arc<FixedWindowLimiter>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, PotError> {
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let key = extract_client_ip(req.headers(), direct_ip)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let result = limiter.check(&key);
    if !result.allowed {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return Err(PotError::RateLimited);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_extracts_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn bearer_token_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
