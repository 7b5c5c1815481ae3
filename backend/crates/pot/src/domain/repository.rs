//! Repository Traits
//!
//! Persistence interfaces; the implementation lives in the infra layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{purchase::Purchase, user::User, winner::Winner};
use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
use crate::error::PotResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Provision a new user (email uniqueness enforced by the store)
    async fn create(&self, user: &User) -> PotResult<()>;

    /// Find user by internal id
    async fn find_by_id(&self, user_id: &UserId) -> PotResult<Option<User>>;

    /// Find user by login email
    async fn find_by_email(&self, email: &Email) -> PotResult<Option<User>>;

    /// List all users
    async fn list(&self) -> PotResult<Vec<User>>;

    /// Update a user's role, returning the updated record if it exists
    async fn update_role(&self, user_id: &UserId, role: UserRole) -> PotResult<Option<User>>;

    /// Delete a user, returning the number of rows removed
    async fn delete(&self, user_id: &UserId) -> PotResult<u64>;
}

/// Purchase repository trait
#[trait_variant::make(PurchaseRepository: Send)]
pub trait LocalPurchaseRepository {
    /// Record a purchase
    async fn create(&self, purchase: &Purchase) -> PotResult<()>;

    /// Purchases created inside `[start, end]`, oldest first
    async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> PotResult<Vec<Purchase>>;

    /// List all purchases
    async fn list(&self) -> PotResult<Vec<Purchase>>;

    /// Total number of purchases
    async fn count(&self) -> PotResult<i64>;
}

/// Winner repository trait
#[trait_variant::make(WinnerRepository: Send)]
pub trait LocalWinnerRepository {
    /// Record a winner
    async fn create(&self, winner: &Winner) -> PotResult<()>;

    /// All winners ordered by the month label ascending. The label is free
    /// text, so the order is lexicographic, not chronological.
    async fn list_by_month_label(&self) -> PotResult<Vec<Winner>>;

    /// Total number of winners
    async fn count(&self) -> PotResult<i64>;
}
