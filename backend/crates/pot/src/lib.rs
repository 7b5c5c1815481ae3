//! Pot (Half-Pot Promotion) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL repository implementation
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Email + password login issuing signed bearer tokens (1 hour expiry)
//! - Purchase recording against the running monthly pot
//! - Randomized monthly winner selection (scheduled and on-demand)
//! - Public leaderboard of past winners
//! - Admin console: stats, purchase/user listings, role management
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; hashes never leave the store layer
//! - Tokens are HMAC-SHA256 signed and time-limited; the role claim is
//!   informational only - the user is re-fetched on every request
//! - Admin operations require the typed [`AdminUser`] extractor, so a
//!   protected handler cannot run without a resolved identity

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;
pub mod scheduler;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::PotConfig;
pub use error::{PotError, PotResult};
pub use infra::postgres::PgPotRepository;
pub use presentation::middleware::{AdminUser, CurrentUser};
pub use presentation::router::{pot_router, pot_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
