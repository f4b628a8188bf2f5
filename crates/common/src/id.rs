//! Receipt identifier derivation

use sha2::{Digest, Sha256};

use crate::Receipt;

/// Derive the storage identifier for a receipt
///
/// Hex-encoded SHA-256 of retailer, purchase date, purchase time and total,
/// concatenated as submitted. Items are not part of the digest, so receipts
/// that agree on those four fields share an identifier.
pub fn receipt_id(receipt: &Receipt) -> String {
    let mut hasher = Sha256::new();
    hasher.update(receipt.retailer.as_bytes());
    hasher.update(receipt.purchase_date.as_bytes());
    hasher.update(receipt.purchase_time.as_bytes());
    hasher.update(receipt.total.as_bytes());

    hex::encode(hasher.finalize())
}
