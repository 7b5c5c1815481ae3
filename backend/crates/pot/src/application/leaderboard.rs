//! Leaderboard Read-back

use std::sync::Arc;

use crate::domain::entity::winner::Winner;
use crate::domain::repository::WinnerRepository;
use crate::error::PotResult;

/// Leaderboard use case
pub struct ListWinnersUseCase<R>
where
    R: WinnerRepository,
{
    repo: Arc<R>,
}

impl<R> ListWinnersUseCase<R>
where
    R: WinnerRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// All winners, ascending by month label.
    ///
    /// The label is free text, so the order is lexicographic ("April"
    /// before "January"), not chronological.
    pub async fn execute(&self) -> PotResult<Vec<Winner>> {
        self.repo.list_by_month_label().await
    }
}
