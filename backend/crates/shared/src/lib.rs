//! Shared Kernel
//!
//! The smallest vocabulary shared across backend crates: a unified
//! application error type and its mapping onto HTTP statuses. Domain
//! crates define their own error enums and convert into [`error::app_error::AppError`]
//! at the presentation boundary.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
