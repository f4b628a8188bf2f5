//! Receipt processing operations
//!
//! Ties the scorer to storage: a processed receipt is validated, scored and
//! stored under its derived ID before the ID is handed back.

use points_common::{Receipt, Result, Scorer};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::storage::Storage;

pub struct ReceiptService {
    scorer: Scorer,
    storage: RwLock<Storage>,
}

impl ReceiptService {
    pub fn new(scorer: Scorer) -> Self {
        Self::with_storage(scorer, Storage::new())
    }

    pub fn with_storage(scorer: Scorer, storage: Storage) -> Self {
        Self {
            scorer,
            storage: RwLock::new(storage),
        }
    }

    /// Validate, score and store a receipt, returning its ID
    ///
    /// Nothing is stored when validation fails.
    pub async fn process_receipt(&self, receipt: &Receipt) -> Result<String> {
        let validated = receipt.validate().inspect_err(|e| {
            warn!("Rejected receipt from {}: {}", receipt.retailer, e);
        })?;

        let breakdown = self.scorer.breakdown(&validated);
        let points = breakdown.total();
        debug!(?breakdown, "Scored receipt from {}", receipt.retailer);

        let id = receipt.id();
        let replaced = self.storage.write().await.put(id.clone(), points);

        match replaced {
            Some(previous) if previous != points => {
                // Same retailer/date/time/total but different items
                warn!(
                    "Receipt {} overwritten: {} points replaced by {}",
                    id, previous, points
                );
            }
            Some(_) => debug!("Receipt {} resubmitted", id),
            None => {}
        }

        info!("Stored {} points for receipt: {}", points, id);
        Ok(id)
    }

    /// Points for a previously processed receipt
    pub async fn get_points(&self, id: &str) -> Result<u64> {
        self.storage.read().await.get(id)
    }

    /// Number of receipts currently stored
    pub async fn receipt_count(&self) -> usize {
        self.storage.read().await.len()
    }
}
