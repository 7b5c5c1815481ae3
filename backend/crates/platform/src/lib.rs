//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations:
//! - Password hashing (Argon2id) with memory zeroization
//! - Client IP extraction from request headers
//! - Fixed-window rate limiting

pub mod client;
pub mod password;
pub mod rate_limit;
