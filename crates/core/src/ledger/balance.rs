//! Account balance reconciliation.
//!
//! Keeps `Account.balance` equal to the account's initial balance plus the
//! signed sum of all transactions referencing it (income positive, expense
//! negative). Every mutation path produces the exact set of per-account
//! deltas the storage layer must apply; arithmetic is fixed-point decimal
//! throughout.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{TransactionKind, TransactionView};

/// A signed delta to apply to one account's cached balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceUpdate {
    /// The account to update.
    pub account_id: Uuid,
    /// The signed change to `balance`.
    pub delta: Decimal,
}

/// Returns the signed contribution of a transaction to its account balance.
#[must_use]
pub fn signed_delta(kind: TransactionKind, amount: Decimal) -> Decimal {
    match kind {
        TransactionKind::Income => amount,
        TransactionKind::Expense => -amount,
    }
}

/// Balance update for creating a transaction.
///
/// Returns `None` when the delta is zero (a zero increment is a no-op write).
#[must_use]
pub fn create_update(
    account_id: Uuid,
    kind: TransactionKind,
    amount: Decimal,
) -> Option<BalanceUpdate> {
    non_zero(account_id, signed_delta(kind, amount))
}

/// Balance updates for updating a transaction.
///
/// When the account is unchanged, one update carrying the net delta.
/// When the transaction moved to another account, the old contribution is
/// reversed on the old account and the new one applied on the new account
/// as two separate single-account updates, never netted into one.
#[must_use]
pub fn update_updates(
    original: &TransactionView,
    new_account_id: Uuid,
    new_kind: TransactionKind,
    new_amount: Decimal,
) -> Vec<BalanceUpdate> {
    let old_delta = signed_delta(original.kind, original.amount);
    let new_delta = signed_delta(new_kind, new_amount);

    if original.account_id == new_account_id {
        return non_zero(new_account_id, new_delta - old_delta)
            .into_iter()
            .collect();
    }

    non_zero(original.account_id, -old_delta)
        .into_iter()
        .chain(non_zero(new_account_id, new_delta))
        .collect()
}

/// Balance update for deleting a transaction: remove its prior contribution.
#[must_use]
pub fn delete_update(transaction: &TransactionView) -> Option<BalanceUpdate> {
    non_zero(
        transaction.account_id,
        -signed_delta(transaction.kind, transaction.amount),
    )
}

/// Balance updates for bulk-deleting transactions.
///
/// Reversed deltas are grouped by account and summed: one update per
/// distinct account, not one per transaction. Ordering is deterministic
/// (by account id) so the write order inside the atomic unit is stable.
#[must_use]
pub fn bulk_delete_updates(transactions: &[TransactionView]) -> Vec<BalanceUpdate> {
    let mut grouped: BTreeMap<Uuid, Decimal> = BTreeMap::new();

    for txn in transactions {
        *grouped.entry(txn.account_id).or_insert(Decimal::ZERO) -=
            signed_delta(txn.kind, txn.amount);
    }

    grouped
        .into_iter()
        .filter_map(|(account_id, delta)| non_zero(account_id, delta))
        .collect()
}

fn non_zero(account_id: Uuid, delta: Decimal) -> Option<BalanceUpdate> {
    if delta.is_zero() {
        None
    } else {
        Some(BalanceUpdate { account_id, delta })
    }
}
