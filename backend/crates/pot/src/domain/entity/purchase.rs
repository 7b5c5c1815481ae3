//! Purchase Entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single pot contribution.
///
/// `username` is free text, not a user reference, and `pot_amount` is
/// persisted as given; neither is validated. Rows are append-only.
#[derive(Debug, Clone)]
pub struct Purchase {
    pub purchase_id: Uuid,
    pub username: String,
    pub pot_amount: f64,
    /// Assigned at insert, immutable afterwards
    pub created_at: DateTime<Utc>,
}

impl Purchase {
    pub fn new(username: String, pot_amount: f64) -> Self {
        Self {
            purchase_id: Uuid::new_v4(),
            username,
            pot_amount,
            created_at: Utc::now(),
        }
    }
}
