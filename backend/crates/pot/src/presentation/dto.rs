//! Request / Response DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{purchase::Purchase, user::User, winner::Winner};

/// Login request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
}

/// Generic message body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Purchase submission
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub username: String,
    pub pot_amount: f64,
}

/// Manual winner entry (admin)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddWinnerRequest {
    pub username: String,
    pub month: String,
    pub amount: f64,
}

/// Winner as shown on the leaderboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerDto {
    pub username: String,
    pub month: String,
    pub amount: f64,
}

impl From<Winner> for WinnerDto {
    fn from(winner: Winner) -> Self {
        Self {
            username: winner.username,
            month: winner.month,
            amount: winner.amount,
        }
    }
}

/// Purchase as shown in the admin console
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDto {
    pub purchase_id: Uuid,
    pub username: String,
    pub pot_amount: f64,
    pub created_at_ms: i64,
}

impl From<Purchase> for PurchaseDto {
    fn from(purchase: Purchase) -> Self {
        Self {
            purchase_id: purchase.purchase_id,
            username: purchase.username,
            pot_amount: purchase.pot_amount,
            created_at_ms: purchase.created_at.timestamp_millis(),
        }
    }
}

/// User as shown in the admin console. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at_ms: i64,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.into_uuid(),
            email: user.email.to_string(),
            role: user.user_role.code().to_string(),
            created_at_ms: user.created_at.timestamp_millis(),
        }
    }
}

/// Admin dashboard counters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_winners: i64,
    pub total_purchases: i64,
}

/// Role change request (admin)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub role: String,
}
