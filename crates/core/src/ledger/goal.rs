//! Goal amount reconciliation.
//!
//! Keeps `Goal.current_amount` equal to the sum of linked INCOME transaction
//! amounts. Only income transactions participate: an expense never touches a
//! goal regardless of any `goal_id` it may carry, so a link on a non-income
//! transaction is treated as no link at all. That rule also makes kind flips
//! reconcile correctly (income-with-goal updated to expense removes the old
//! contribution).
//!
//! The update path is the explicit reassignment state machine:
//!
//! | old goal | new goal | action                              |
//! |----------|----------|-------------------------------------|
//! | none     | none     | no-op                               |
//! | none     | G        | G += new amount                     |
//! | G        | none     | G -= old amount                     |
//! | G        | G (same) | G += new - old (skip if zero)       |
//! | G1       | G2       | G1 -= old; G2 += new (two writes)   |

use rust_decimal::Decimal;
use uuid::Uuid;

use super::types::{TransactionKind, TransactionView};

/// A signed delta to apply to one goal's accumulated amount.
///
/// Decrements are not clamped at zero: the reconciler preserves the exact
/// sum invariant, and a decrement can only drive `current_amount` negative
/// if the stored state was already inconsistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalUpdate {
    /// The goal to update.
    pub goal_id: Uuid,
    /// The signed change to `current_amount`.
    pub delta: Decimal,
}

/// The five goal-reassignment cases of a transaction update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalReassignment {
    /// Neither side contributes to a goal.
    Unlinked,
    /// Newly linked to a goal.
    Linked(Uuid),
    /// Link removed.
    Removed(Uuid),
    /// Same goal on both sides.
    Unchanged(Uuid),
    /// Moved from one goal to another.
    Moved {
        /// Goal losing the old contribution.
        from: Uuid,
        /// Goal receiving the new contribution.
        to: Uuid,
    },
}

impl GoalReassignment {
    /// Classifies the transition between two effective goal links.
    #[must_use]
    pub fn classify(old: Option<Uuid>, new: Option<Uuid>) -> Self {
        match (old, new) {
            (None, None) => Self::Unlinked,
            (None, Some(goal)) => Self::Linked(goal),
            (Some(goal), None) => Self::Removed(goal),
            (Some(from), Some(to)) if from == to => Self::Unchanged(from),
            (Some(from), Some(to)) => Self::Moved { from, to },
        }
    }
}

/// The goal a transaction actually contributes to: its link, income only.
fn contributing_goal(kind: TransactionKind, goal_id: Option<Uuid>) -> Option<Uuid> {
    match kind {
        TransactionKind::Income => goal_id,
        TransactionKind::Expense => None,
    }
}

/// Goal update for creating a transaction.
#[must_use]
pub fn create_update(
    kind: TransactionKind,
    goal_id: Option<Uuid>,
    amount: Decimal,
) -> Option<GoalUpdate> {
    contributing_goal(kind, goal_id).and_then(|goal_id| non_zero(goal_id, amount))
}

/// Goal updates for updating a transaction, per the reassignment table.
///
/// The move case is two independent writes, not a netted one.
#[must_use]
pub fn update_updates(
    original: &TransactionView,
    new_kind: TransactionKind,
    new_goal_id: Option<Uuid>,
    new_amount: Decimal,
) -> Vec<GoalUpdate> {
    let old = contributing_goal(original.kind, original.goal_id);
    let new = contributing_goal(new_kind, new_goal_id);

    match GoalReassignment::classify(old, new) {
        GoalReassignment::Unlinked => vec![],
        GoalReassignment::Linked(goal) => non_zero(goal, new_amount).into_iter().collect(),
        GoalReassignment::Removed(goal) => {
            non_zero(goal, -original.amount).into_iter().collect()
        }
        GoalReassignment::Unchanged(goal) => {
            non_zero(goal, new_amount - original.amount).into_iter().collect()
        }
        GoalReassignment::Moved { from, to } => non_zero(from, -original.amount)
            .into_iter()
            .chain(non_zero(to, new_amount))
            .collect(),
    }
}

/// Goal update for deleting a transaction: remove its contribution.
#[must_use]
pub fn delete_update(transaction: &TransactionView) -> Option<GoalUpdate> {
    contributing_goal(transaction.kind, transaction.goal_id)
        .and_then(|goal_id| non_zero(goal_id, -transaction.amount))
}

/// Goal updates for bulk-deleting transactions.
///
/// One decrement per affected transaction, applied sequentially within the
/// same atomic unit. Unlike balance updates these are not batched per goal.
#[must_use]
pub fn bulk_delete_updates(transactions: &[TransactionView]) -> Vec<GoalUpdate> {
    transactions.iter().filter_map(delete_update).collect()
}

fn non_zero(goal_id: Uuid, delta: Decimal) -> Option<GoalUpdate> {
    if delta.is_zero() {
        None
    } else {
        Some(GoalUpdate { goal_id, delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn income(goal_id: Option<Uuid>, amount: Decimal) -> TransactionView {
        TransactionView {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            kind: TransactionKind::Income,
            amount,
            goal_id,
        }
    }

    #[test]
    fn test_classify_all_cases() {
        let g1 = Uuid::new_v4();
        let g2 = Uuid::new_v4();

        assert_eq!(
            GoalReassignment::classify(None, None),
            GoalReassignment::Unlinked
        );
        assert_eq!(
            GoalReassignment::classify(None, Some(g1)),
            GoalReassignment::Linked(g1)
        );
        assert_eq!(
            GoalReassignment::classify(Some(g1), None),
            GoalReassignment::Removed(g1)
        );
        assert_eq!(
            GoalReassignment::classify(Some(g1), Some(g1)),
            GoalReassignment::Unchanged(g1)
        );
        assert_eq!(
            GoalReassignment::classify(Some(g1), Some(g2)),
            GoalReassignment::Moved { from: g1, to: g2 }
        );
    }

    #[test]
    fn test_create_income_linked() {
        // Scenario: goal current 0, create INCOME 200 linked -> +200
        let goal = Uuid::new_v4();
        let update = create_update(TransactionKind::Income, Some(goal), dec!(200)).unwrap();
        assert_eq!(update, GoalUpdate { goal_id: goal, delta: dec!(200) });
    }

    #[test]
    fn test_create_expense_never_fires() {
        let goal = Uuid::new_v4();
        assert!(create_update(TransactionKind::Expense, Some(goal), dec!(200)).is_none());
    }

    #[test]
    fn test_create_unlinked_income() {
        assert!(create_update(TransactionKind::Income, None, dec!(200)).is_none());
    }

    #[test]
    fn test_update_same_goal_adjusts_by_difference() {
        // Scenario: INCOME 200 linked, updated to 150 -> -50
        let goal = Uuid::new_v4();
        let original = income(Some(goal), dec!(200));

        let updates = update_updates(&original, TransactionKind::Income, Some(goal), dec!(150));
        assert_eq!(updates, vec![GoalUpdate { goal_id: goal, delta: dec!(-50) }]);
    }

    #[test]
    fn test_update_same_goal_same_amount_skipped() {
        let goal = Uuid::new_v4();
        let original = income(Some(goal), dec!(200));

        let updates = update_updates(&original, TransactionKind::Income, Some(goal), dec!(200));
        assert!(updates.is_empty());
    }

    #[test]
    fn test_update_moved_is_two_independent_writes() {
        // Scenario: INCOME 100 on G1, moved to G2 -> G1 -100, G2 +100
        let g1 = Uuid::new_v4();
        let g2 = Uuid::new_v4();
        let original = income(Some(g1), dec!(100));

        let updates = update_updates(&original, TransactionKind::Income, Some(g2), dec!(100));
        assert_eq!(
            updates,
            vec![
                GoalUpdate { goal_id: g1, delta: dec!(-100) },
                GoalUpdate { goal_id: g2, delta: dec!(100) },
            ]
        );
    }

    #[test]
    fn test_update_newly_linked() {
        let goal = Uuid::new_v4();
        let original = income(None, dec!(80));

        let updates = update_updates(&original, TransactionKind::Income, Some(goal), dec!(80));
        assert_eq!(updates, vec![GoalUpdate { goal_id: goal, delta: dec!(80) }]);
    }

    #[test]
    fn test_update_unlinked_reverts_old_amount() {
        let goal = Uuid::new_v4();
        let original = income(Some(goal), dec!(80));

        let updates = update_updates(&original, TransactionKind::Income, None, dec!(120));
        assert_eq!(updates, vec![GoalUpdate { goal_id: goal, delta: dec!(-80) }]);
    }

    #[test]
    fn test_update_income_to_expense_removes_contribution() {
        let goal = Uuid::new_v4();
        let original = income(Some(goal), dec!(60));

        let updates = update_updates(&original, TransactionKind::Expense, Some(goal), dec!(60));
        assert_eq!(updates, vec![GoalUpdate { goal_id: goal, delta: dec!(-60) }]);
    }

    #[test]
    fn test_update_expense_to_income_applies_contribution() {
        let goal = Uuid::new_v4();
        let mut original = income(Some(goal), dec!(60));
        original.kind = TransactionKind::Expense;

        let updates = update_updates(&original, TransactionKind::Income, Some(goal), dec!(60));
        assert_eq!(updates, vec![GoalUpdate { goal_id: goal, delta: dec!(60) }]);
    }

    #[test]
    fn test_delete_linked_income() {
        let goal = Uuid::new_v4();
        let txn = income(Some(goal), dec!(45.50));
        assert_eq!(
            delete_update(&txn),
            Some(GoalUpdate { goal_id: goal, delta: dec!(-45.50) })
        );
    }

    #[test]
    fn test_bulk_delete_one_decrement_per_transaction() {
        let goal = Uuid::new_v4();
        let other = Uuid::new_v4();
        let txns = vec![
            income(Some(goal), dec!(10)),
            income(Some(other), dec!(20)),
            income(Some(goal), dec!(30)),
            income(None, dec!(99)),
        ];

        let updates = bulk_delete_updates(&txns);
        // Not batched per goal: one decrement per linked income transaction
        assert_eq!(
            updates,
            vec![
                GoalUpdate { goal_id: goal, delta: dec!(-10) },
                GoalUpdate { goal_id: other, delta: dec!(-20) },
                GoalUpdate { goal_id: goal, delta: dec!(-30) },
            ]
        );
    }
}
