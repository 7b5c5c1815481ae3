//! Record Purchase Use Case

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::purchase::Purchase;
use crate::domain::repository::PurchaseRepository;
use crate::error::PotResult;

/// Record purchase input
pub struct RecordPurchaseInput {
    pub username: String,
    pub pot_amount: f64,
}

/// Record purchase use case
pub struct RecordPurchaseUseCase<R>
where
    R: PurchaseRepository,
{
    repo: Arc<R>,
}

impl<R> RecordPurchaseUseCase<R>
where
    R: PurchaseRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Persist a purchase against the current pot.
    ///
    /// Amount sign and username format are not validated; the record is
    /// stored as given.
    pub async fn execute(&self, input: RecordPurchaseInput) -> PotResult<Uuid> {
        let purchase = Purchase::new(input.username, input.pot_amount);
        self.repo.create(&purchase).await?;

        tracing::info!(purchase_id = %purchase.purchase_id, "Purchase recorded");

        Ok(purchase.purchase_id)
    }
}
