//! Balance and goal reconciliation logic.
//!
//! This module implements the core consistency rules that keep an account's
//! cached balance and a goal's accumulated amount mathematically consistent
//! with the set of transactions referencing them:
//! - Signed balance deltas for create/update/delete/bulk-delete
//! - The goal-reassignment state machine for transaction updates
//! - Recurring-transaction date projection
//! - Draft validation (always before any write)
//! - Mutation planning for the storage layer's atomic unit

pub mod balance;
pub mod error;
pub mod goal;
pub mod recurrence;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use balance::{BalanceUpdate, signed_delta};
pub use error::LedgerError;
pub use goal::{GoalReassignment, GoalUpdate};
pub use recurrence::next_occurrence;
pub use service::LedgerService;
pub use types::{
    CacheKey, MutationPlan, RecurringInterval, TransactionDraft, TransactionKind, TransactionView,
};
pub use validation::validate_draft;
