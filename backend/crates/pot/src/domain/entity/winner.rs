//! Winner Entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A closed monthly record on the leaderboard.
///
/// `month` is a free-text label ("January", ...). Nothing enforces one
/// winner per month: both the scheduled draw and the manual admin path
/// append rows.
#[derive(Debug, Clone)]
pub struct Winner {
    pub winner_id: Uuid,
    pub username: String,
    pub month: String,
    pub amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Winner {
    pub fn new(username: String, month: String, amount: f64) -> Self {
        Self {
            winner_id: Uuid::new_v4(),
            username,
            month,
            amount,
            created_at: Utc::now(),
        }
    }
}
