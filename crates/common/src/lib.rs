pub mod error;
pub mod id;
pub mod receipt;
pub mod scorer;

pub use error::{Error, Result};
pub use id::receipt_id;
pub use receipt::{Item, Receipt, ValidatedItem, ValidatedReceipt};
pub use scorer::{score, AfternoonWindow, ParseAfternoonWindowError, PointsBreakdown, Scorer};
