//! Monthly Winner Scheduler
//!
//! Background task that sleeps until the first of the next UTC month and
//! runs the winner selection. There is no run-once guard, so a manual
//! pick near the boundary can produce a second winner for the month.

use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::application::select_winner::SelectWinnerUseCase;
use crate::domain::repository::{PurchaseRepository, WinnerRepository};

/// First instant of the month after `now`, UTC.
pub fn next_month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };

    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("first of month is a valid UTC timestamp")
}

/// Run the monthly selection loop forever.
///
/// Failures are logged and the loop keeps going; a missed month is not
/// retried.
pub async fn run<R>(repo: Arc<R>)
where
    R: PurchaseRepository + WinnerRepository + Clone + Send + Sync + 'static,
{
    let use_case = SelectWinnerUseCase::new(repo);

    loop {
        let now = Utc::now();
        let wake_at = next_month_start(now);
        let sleep_for = (wake_at - now)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        tracing::info!(wake_at = %wake_at, "Winner scheduler sleeping until month end");
        tokio::time::sleep(sleep_for).await;

        let mut rng = StdRng::from_os_rng();
        match use_case.execute(&mut rng).await {
            Ok(Some(winner)) => {
                tracing::info!(month = %winner.month, username = %winner.username, "Scheduled winner selected");
            }
            Ok(None) => {
                tracing::info!("Scheduled selection found no purchases");
            }
            Err(err) => {
                tracing::error!(error = %err, "Scheduled winner selection failed");
            }
        }
    }
}
