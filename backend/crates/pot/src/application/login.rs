//! Login Use Case
//!
//! Verifies email + password and issues a bearer token.

use std::sync::Arc;

use chrono::Utc;
use platform::password::ClearTextPassword;

use crate::application::config::PotConfig;
use crate::application::token::{AccessClaims, issue_token};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{PotError, PotResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed bearer token for the Authorization header
    pub token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<PotConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<PotConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> PotResult<LoginOutput> {
        // Every failure below maps to the same InvalidCredentials, so the
        // response does not reveal whether the email exists
        let email = Email::new(&input.email).map_err(|_| PotError::InvalidCredentials)?;

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(PotError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| PotError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(PotError::InvalidCredentials);
        }

        let now = Utc::now();
        let claims = AccessClaims {
            sub: user.user_id.into_uuid(),
            role: user.user_role.code().to_string(),
            iat: now.timestamp(),
            exp: now.timestamp() + self.config.token_ttl_secs(),
        };
        let token = issue_token(&claims, &self.config.token_secret);

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(LoginOutput { token })
    }
}
