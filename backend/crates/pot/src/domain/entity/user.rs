//! User Entity

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};

/// User record. Pre-provisioned; the system has no registration path.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique login identifier
    pub email: Email,
    /// Argon2id PHC string; never serialized into responses
    pub password_hash: HashedPassword,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: Email, password_hash: HashedPassword, user_role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            user_role,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.user_role = role;
        self.updated_at = Utc::now();
    }

    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}
