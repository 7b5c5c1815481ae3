//! Monthly Winner Selection
//!
//! Draws one purchase uniformly at random from the current calendar month
//! and records it as that month's winner.

use std::sync::Arc;

use chrono::{Datelike, TimeZone, Utc};
use rand::Rng;

use crate::domain::entity::winner::Winner;
use crate::domain::repository::{PurchaseRepository, WinnerRepository};
use crate::error::PotResult;

/// Winner selection use case
pub struct SelectWinnerUseCase<R>
where
    R: PurchaseRepository + WinnerRepository,
{
    repo: Arc<R>,
}

impl<R> SelectWinnerUseCase<R>
where
    R: PurchaseRepository + WinnerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Pick this month's winner.
    ///
    /// The eligible window is [first day of the current UTC month 00:00,
    /// now]. Returns `Ok(None)` when no purchase falls inside it; nothing
    /// is persisted in that case. Selection is uniform over the eligible
    /// purchases, independent of amount. Existing winners for the month
    /// are not consulted, so repeated calls append additional rows.
    ///
    /// The RNG is caller-supplied so tests can pin the draw.
    pub async fn execute(&self, rng: &mut (impl Rng + Send)) -> PotResult<Option<Winner>> {
        let now = Utc::now();
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .expect("first of month is a valid UTC timestamp");

        let purchases = self.repo.find_created_between(month_start, now).await?;
        if purchases.is_empty() {
            tracing::info!("No purchases found for this month");
            return Ok(None);
        }

        let index = rng.random_range(0..purchases.len());
        let picked = &purchases[index];

        let month = now.format("%B").to_string();
        let winner = Winner::new(picked.username.clone(), month, picked.pot_amount);
        WinnerRepository::create(self.repo.as_ref(), &winner).await?;

        tracing::info!(
            month = %winner.month,
            username = %winner.username,
            "Monthly winner selected"
        );

        Ok(Some(winner))
    }
}
