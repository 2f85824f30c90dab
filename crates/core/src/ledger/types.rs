//! Ledger domain types for transaction mutation and reconciliation.
//!
//! These are the inputs and outputs of the mutation planner: what the caller
//! submits (`TransactionDraft`), the projection of a stored row that
//! reconciliation needs (`TransactionView`), and the plan of writes the
//! storage layer must apply inside one atomic unit (`MutationPlan`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::balance::BalanceUpdate;
use super::goal::GoalUpdate;

/// Transaction kind: income adds to the account balance, expense subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money coming into the account.
    Income,
    /// Money leaving the account.
    Expense,
}

/// Recurrence interval for recurring transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecurringInterval {
    /// Every day.
    Daily,
    /// Every 7 days.
    Weekly,
    /// Every calendar month (day-of-month preserved, clamped to month end).
    Monthly,
    /// Every calendar year.
    Yearly,
}

/// Caller input for creating or updating a transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    /// The account the transaction posts to.
    pub account_id: Uuid,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount, always non-negative; the kind carries the sign.
    pub amount: Decimal,
    /// Spending/earning category.
    pub category: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Transaction date.
    pub date: NaiveDate,
    /// Whether the transaction recurs.
    pub is_recurring: bool,
    /// Recurrence interval, present iff `is_recurring`.
    pub recurring_interval: Option<RecurringInterval>,
    /// Optional goal this (income) transaction contributes to.
    pub goal_id: Option<Uuid>,
}

/// The slice of a stored transaction that reconciliation needs.
///
/// Loaded before computing update/delete deltas; everything else on the row
/// is irrelevant to balance and goal consistency.
#[derive(Debug, Clone)]
pub struct TransactionView {
    /// Transaction id.
    pub id: Uuid,
    /// Owning account.
    pub account_id: Uuid,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Stored amount.
    pub amount: Decimal,
    /// Linked goal, if any.
    pub goal_id: Option<Uuid>,
}

/// Externally-cached view invalidated by a successful mutation.
///
/// The orchestrator emits these to its caller; it does not invalidate
/// anything itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey {
    /// The owner's dashboard view.
    Dashboard,
    /// The detail view of one account.
    Account(Uuid),
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "dashboard"),
            Self::Account(id) => write!(f, "account/{id}"),
        }
    }
}

/// The set of derived-field writes one mutation must apply atomically.
///
/// The storage layer executes every update in this plan, plus the row
/// insert/update/delete itself, inside a single store-level transaction:
/// all of it commits or none of it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationPlan {
    /// Projected next occurrence for a recurring transaction.
    pub next_recurring_date: Option<NaiveDate>,
    /// Signed balance deltas, one per affected account.
    pub balance_updates: Vec<BalanceUpdate>,
    /// Signed goal deltas, applied sequentially per affected goal.
    pub goal_updates: Vec<GoalUpdate>,
    /// Cache keys the caller must invalidate on success.
    pub invalidations: Vec<CacheKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_display() {
        assert_eq!(CacheKey::Dashboard.to_string(), "dashboard");

        let id = Uuid::nil();
        assert_eq!(
            CacheKey::Account(id).to_string(),
            "account/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_kind_serde_uppercase() {
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"INCOME\"");

        let kind: TransactionKind = serde_json::from_str("\"EXPENSE\"").unwrap();
        assert_eq!(kind, TransactionKind::Expense);
    }

    #[test]
    fn test_interval_serde_uppercase() {
        let json = serde_json::to_string(&RecurringInterval::Monthly).unwrap();
        assert_eq!(json, "\"MONTHLY\"");

        let interval: RecurringInterval = serde_json::from_str("\"WEEKLY\"").unwrap();
        assert_eq!(interval, RecurringInterval::Weekly);
    }
}
