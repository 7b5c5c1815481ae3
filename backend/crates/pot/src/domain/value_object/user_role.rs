//! User Role Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role stored on each user record.
///
/// Admin unlocks the admin console and winner management; everyone else
/// is a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(i16)]
pub enum UserRole {
    #[default]
    Member = 0,
    Admin = 1,
}

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// Decode a store value. The column carries a CHECK constraint, so any
    /// other id means the store and the code disagree.
    #[inline]
    pub fn from_id(id: i16) -> Self {
        match id {
            0 => UserRole::Member,
            1 => UserRole::Admin,
            _ => {
                tracing::error!("Invalid UserRole id: {}", id);
                unreachable!("Invalid UserRole id: {}", id)
            }
        }
    }

    /// Parse an untrusted role string (e.g. from an API body).
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "member" => Some(UserRole::Member),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
