//! Mutation planning for transaction create/update/bulk-delete.
//!
//! The planner is the pure half of the mutation orchestrator: it validates
//! the input, projects the next recurring date, and assembles the exact set
//! of balance and goal deltas plus cache-invalidation keys. The storage
//! layer executes the plan inside one atomic unit; nothing here performs
//! I/O.

use std::collections::BTreeSet;

use super::balance;
use super::error::LedgerError;
use super::goal;
use super::recurrence::next_occurrence;
use super::types::{CacheKey, MutationPlan, TransactionDraft, TransactionView};
use super::validation::validate_draft;

/// Mutation planner for transaction operations.
pub struct LedgerService;

impl LedgerService {
    /// Plans the creation of a transaction.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the draft fails validation or the recurring
    /// date projection leaves the calendar range. No write happens on error.
    pub fn plan_create(draft: &TransactionDraft) -> Result<MutationPlan, LedgerError> {
        validate_draft(draft)?;

        Ok(MutationPlan {
            next_recurring_date: Self::project_recurrence(draft)?,
            balance_updates: balance::create_update(draft.account_id, draft.kind, draft.amount)
                .into_iter()
                .collect(),
            goal_updates: goal::create_update(draft.kind, draft.goal_id, draft.amount)
                .into_iter()
                .collect(),
            invalidations: vec![CacheKey::Dashboard, CacheKey::Account(draft.account_id)],
        })
    }

    /// Plans the update of an existing transaction.
    ///
    /// Account reassignment yields two single-account balance updates; the
    /// goal side runs the reassignment state machine. When the transaction
    /// moved, the old account's cached view is invalidated too.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if the draft fails validation or the recurring
    /// date projection leaves the calendar range.
    pub fn plan_update(
        original: &TransactionView,
        draft: &TransactionDraft,
    ) -> Result<MutationPlan, LedgerError> {
        validate_draft(draft)?;

        let mut invalidations = vec![CacheKey::Dashboard, CacheKey::Account(draft.account_id)];
        if original.account_id != draft.account_id {
            invalidations.push(CacheKey::Account(original.account_id));
        }

        Ok(MutationPlan {
            next_recurring_date: Self::project_recurrence(draft)?,
            balance_updates: balance::update_updates(
                original,
                draft.account_id,
                draft.kind,
                draft.amount,
            ),
            goal_updates: goal::update_updates(original, draft.kind, draft.goal_id, draft.amount),
            invalidations,
        })
    }

    /// Plans the bulk deletion of the matched transactions.
    ///
    /// Balance deltas are aggregated per account; goal decrements stay one
    /// per transaction. The matched set is the ownership-scoped result of
    /// the caller's id list; ids that did not match were silently excluded.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EmptyBulkDelete` when nothing matched, before
    /// any write is attempted.
    pub fn plan_bulk_delete(matched: &[TransactionView]) -> Result<MutationPlan, LedgerError> {
        if matched.is_empty() {
            return Err(LedgerError::EmptyBulkDelete);
        }

        let accounts: BTreeSet<_> = matched.iter().map(|t| t.account_id).collect();
        let invalidations = std::iter::once(CacheKey::Dashboard)
            .chain(accounts.into_iter().map(CacheKey::Account))
            .collect();

        Ok(MutationPlan {
            next_recurring_date: None,
            balance_updates: balance::bulk_delete_updates(matched),
            goal_updates: goal::bulk_delete_updates(matched),
            invalidations,
        })
    }

    fn project_recurrence(
        draft: &TransactionDraft,
    ) -> Result<Option<chrono::NaiveDate>, LedgerError> {
        match (draft.is_recurring, draft.recurring_interval) {
            (true, Some(interval)) => Ok(Some(next_occurrence(draft.date, interval)?)),
            _ => Ok(None),
        }
    }
}
