//! Bearer Token Issuance and Verification
//!
//! Token format: `base64url(claims json) "." base64url(hmac-sha256 tag)`,
//! signed with the application token secret. Claims carry the user id,
//! the role at issue time, and issue/expiry timestamps. Verification
//! checks the signature (constant time, inside `hmac`) before the expiry.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// Claims embedded in a bearer token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: internal user id
    pub sub: Uuid,
    /// Role code at issue time. Informational only: the authentication
    /// middleware re-fetches the user and never trusts this value.
    pub role: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// Token verification failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("bad signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
}

/// Sign claims into a bearer token
pub fn issue_token(claims: &AccessClaims, secret: &[u8; 32]) -> String {
    let payload =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).expect("claims always serialize"));

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    format!("{payload}.{signature}")
}

/// Check a token's signature and expiry, returning its claims
pub fn verify_token(
    token: &str,
    secret: &[u8; 32],
    now: DateTime<Utc>,
) -> Result<AccessClaims, TokenError> {
    let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
    let signature = URL_SAFE_NO_PAD
        .decode(signature)
        .map_err(|_| TokenError::Malformed)?;

    // Signature is checked before the payload is parsed or expiry read
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::BadSignature)?;

    let payload = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| TokenError::Malformed)?;
    let claims: AccessClaims =
        serde_json::from_slice(&payload).map_err(|_| TokenError::Malformed)?;

    if claims.exp <= now.timestamp() {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}
