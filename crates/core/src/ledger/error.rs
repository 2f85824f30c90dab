//! Ledger error types for validation and planning errors.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while validating or planning a mutation.
///
/// Every variant here is raised before any write is attempted; a failed
/// plan never leaves partial state behind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Transaction amount cannot be negative.
    #[error("Transaction amount cannot be negative")]
    NegativeAmount,

    /// A recurring transaction must carry an interval.
    #[error("Recurring transaction is missing its recurring interval")]
    MissingRecurringInterval,

    /// A non-recurring transaction must not carry an interval.
    #[error("Recurring interval provided for a non-recurring transaction")]
    UnexpectedRecurringInterval,

    /// Date projection left the supported calendar range.
    #[error("Next occurrence for {0} is out of the supported date range")]
    DateOutOfRange(NaiveDate),

    /// Bulk delete matched no transactions.
    #[error("Bulk delete matched no transactions")]
    EmptyBulkDelete,
}
