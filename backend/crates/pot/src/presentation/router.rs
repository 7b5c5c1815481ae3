//! Route Table
//!
//! Three tiers: public (login, logout, leaderboard), authenticated
//! (purchase), and admin (console + winner management). The auth gate is
//! a single `route_layer` on the protected tier; the per-IP rate limiter
//! wraps everything.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::Request;
use axum::middleware::{Next, from_fn};
use axum::routing::{delete, get, post, put};
use platform::rate_limit::FixedWindowLimiter;

use crate::application::config::PotConfig;
use crate::domain::repository::{PurchaseRepository, UserRepository, WinnerRepository};
use crate::infra::postgres::PgPotRepository;
use crate::presentation::handlers::{self, PotAppState};
use crate::presentation::middleware::{AuthGateState, authenticate, throttle};

/// Build the application router over the PostgreSQL repository.
pub fn pot_router(repo: PgPotRepository, config: PotConfig) -> Router {
    pot_router_generic(repo, config)
}

/// Build the application router over any repository implementation.
pub fn pot_router_generic<R>(repo: R, config: PotConfig) -> Router
where
    R: UserRepository + PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);
    let limiter = Arc::new(FixedWindowLimiter::new(config.rate_limit.clone()));

    let state = PotAppState {
        repo: Arc::clone(&repo),
        config: Arc::clone(&config),
    };
    let gate = AuthGateState { repo, config };

    let admin = Router::new()
        .route("/add-winner", post(handlers::add_winner))
        .route("/pick-winner", post(handlers::pick_winner))
        .route("/stats", get(handlers::stats))
        .route("/purchases", get(handlers::list_purchases))
        .route("/users", get(handlers::list_users))
        .route("/users/{user_id}", delete(handlers::delete_user))
        .route("/users/{user_id}/role", put(handlers::update_user_role));

    let protected = Router::new()
        .route("/purchase", post(handlers::record_purchase))
        // Historical aliases for the admin winner routes
        .route("/add-winner", post(handlers::add_winner))
        .route("/pick-winner", post(handlers::pick_winner))
        .nest("/admin", admin)
        .route_layer(from_fn(move |req: Request<Body>, next: Next| {
            let gate = gate.clone();
            async move { authenticate(gate, req, next).await }
        }));

    let public = Router::new()
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/leaderboard", get(handlers::leaderboard));

    public
        .merge(protected)
        .layer(from_fn(move |req: Request<Body>, next: Next| {
            let limiter = Arc::clone(&limiter);
            async move { throttle(limiter, req, next).await }
        }))
        .with_state(state)
}
