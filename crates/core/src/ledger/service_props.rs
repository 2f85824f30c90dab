//! Property tests for mutation planning.
//!
//! Drives random create/update/delete sequences through the planner and
//! checks the two derived-field invariants after every step:
//! - account balance equals the signed sum of surviving transactions
//! - goal amount equals the sum of surviving linked income transactions

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::balance::BalanceUpdate;
use super::goal::GoalUpdate;
use super::recurrence::next_occurrence;
use super::service::LedgerService;
use super::types::{RecurringInterval, TransactionDraft, TransactionKind, TransactionView};

/// One step of a mutation sequence; indexes select among fixed pools.
#[derive(Debug, Clone)]
enum Op {
    Create {
        account: usize,
        kind: TransactionKind,
        amount_cents: i64,
        goal: Option<usize>,
    },
    Update {
        target: usize,
        account: usize,
        kind: TransactionKind,
        amount_cents: i64,
        goal: Option<usize>,
    },
    Delete {
        target: usize,
    },
}

fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Income),
        Just(TransactionKind::Expense)
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let goal = prop::option::of(0usize..3);
    prop_oneof![
        (0usize..2, kind_strategy(), 0i64..100_000, goal.clone()).prop_map(
            |(account, kind, amount_cents, goal)| Op::Create {
                account,
                kind,
                amount_cents,
                goal,
            }
        ),
        (
            any::<usize>(),
            0usize..2,
            kind_strategy(),
            0i64..100_000,
            goal
        )
            .prop_map(|(target, account, kind, amount_cents, goal)| Op::Update {
                target,
                account,
                kind,
                amount_cents,
                goal,
            }),
        any::<usize>().prop_map(|target| Op::Delete { target }),
    ]
}

fn draft_for(
    accounts: &[Uuid],
    goals: &[Uuid],
    account: usize,
    kind: TransactionKind,
    amount_cents: i64,
    goal: Option<usize>,
) -> TransactionDraft {
    TransactionDraft {
        account_id: accounts[account],
        kind,
        amount: Decimal::new(amount_cents, 2),
        category: "test".to_string(),
        description: None,
        date: chrono::NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        is_recurring: false,
        recurring_interval: None,
        goal_id: goal.map(|g| goals[g]),
    }
}

fn apply_balances(balances: &mut BTreeMap<Uuid, Decimal>, updates: &[BalanceUpdate]) {
    for update in updates {
        *balances.entry(update.account_id).or_insert(Decimal::ZERO) += update.delta;
    }
}

fn apply_goals(amounts: &mut BTreeMap<Uuid, Decimal>, updates: &[GoalUpdate]) {
    for update in updates {
        *amounts.entry(update.goal_id).or_insert(Decimal::ZERO) += update.delta;
    }
}

/// Recomputes the expected derived fields from the surviving transactions.
fn expected_state(
    live: &[TransactionView],
) -> (BTreeMap<Uuid, Decimal>, BTreeMap<Uuid, Decimal>) {
    let mut balances = BTreeMap::new();
    let mut goals = BTreeMap::new();

    for txn in live {
        let signed = super::balance::signed_delta(txn.kind, txn.amount);
        *balances.entry(txn.account_id).or_insert(Decimal::ZERO) += signed;

        if txn.kind == TransactionKind::Income {
            if let Some(goal_id) = txn.goal_id {
                *goals.entry(goal_id).or_insert(Decimal::ZERO) += txn.amount;
            }
        }
    }

    (balances, goals)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After every mutation, cached balances equal the signed sum of the
    /// surviving transactions and goal amounts equal the sum of surviving
    /// linked income amounts.
    #[test]
    fn prop_derived_fields_match_surviving_transactions(
        ops in prop::collection::vec(op_strategy(), 1..40)
    ) {
        let accounts = [Uuid::new_v4(), Uuid::new_v4()];
        let goals = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

        let mut balances: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        let mut goal_amounts: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        let mut live: Vec<TransactionView> = Vec::new();

        for op in ops {
            match op {
                Op::Create { account, kind, amount_cents, goal } => {
                    let draft = draft_for(&accounts, &goals, account, kind, amount_cents, goal);
                    let plan = LedgerService::plan_create(&draft).unwrap();
                    apply_balances(&mut balances, &plan.balance_updates);
                    apply_goals(&mut goal_amounts, &plan.goal_updates);

                    live.push(TransactionView {
                        id: Uuid::new_v4(),
                        account_id: draft.account_id,
                        kind: draft.kind,
                        amount: draft.amount,
                        goal_id: draft.goal_id,
                    });
                }
                Op::Update { target, account, kind, amount_cents, goal } => {
                    if live.is_empty() {
                        continue;
                    }
                    let index = target % live.len();
                    let original = live[index].clone();
                    let draft = draft_for(&accounts, &goals, account, kind, amount_cents, goal);

                    let plan = LedgerService::plan_update(&original, &draft).unwrap();
                    apply_balances(&mut balances, &plan.balance_updates);
                    apply_goals(&mut goal_amounts, &plan.goal_updates);

                    live[index] = TransactionView {
                        id: original.id,
                        account_id: draft.account_id,
                        kind: draft.kind,
                        amount: draft.amount,
                        goal_id: draft.goal_id,
                    };
                }
                Op::Delete { target } => {
                    if live.is_empty() {
                        continue;
                    }
                    let index = target % live.len();
                    let removed = live.remove(index);

                    let plan = LedgerService::plan_bulk_delete(std::slice::from_ref(&removed))
                        .unwrap();
                    apply_balances(&mut balances, &plan.balance_updates);
                    apply_goals(&mut goal_amounts, &plan.goal_updates);
                }
            }

            let (expected_balances, expected_goals) = expected_state(&live);
            for account_id in &accounts {
                let actual = balances.get(account_id).copied().unwrap_or(Decimal::ZERO);
                let expected = expected_balances
                    .get(account_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                prop_assert_eq!(actual, expected, "balance drift on account {}", account_id);
            }
            for goal_id in &goals {
                let actual = goal_amounts.get(goal_id).copied().unwrap_or(Decimal::ZERO);
                let expected = expected_goals.get(goal_id).copied().unwrap_or(Decimal::ZERO);
                prop_assert_eq!(actual, expected, "goal drift on goal {}", goal_id);
            }
        }
    }

    /// Bulk deleting everything returns every account to its initial balance.
    #[test]
    fn prop_bulk_delete_restores_initial_balance(
        creations in prop::collection::vec(
            (0usize..2, kind_strategy(), 0i64..100_000),
            1..20
        )
    ) {
        let accounts = [Uuid::new_v4(), Uuid::new_v4()];
        let mut balances: BTreeMap<Uuid, Decimal> = BTreeMap::new();
        let mut live: Vec<TransactionView> = Vec::new();

        for (account, kind, amount_cents) in creations {
            let draft = draft_for(&accounts, &[], account, kind, amount_cents, None);
            let plan = LedgerService::plan_create(&draft).unwrap();
            apply_balances(&mut balances, &plan.balance_updates);
            live.push(TransactionView {
                id: Uuid::new_v4(),
                account_id: draft.account_id,
                kind: draft.kind,
                amount: draft.amount,
                goal_id: None,
            });
        }

        let plan = LedgerService::plan_bulk_delete(&live).unwrap();
        apply_balances(&mut balances, &plan.balance_updates);

        for (_, balance) in balances {
            prop_assert_eq!(balance, Decimal::ZERO);
        }
    }

    /// The projector is a pure function of its inputs.
    #[test]
    fn prop_projector_is_pure(
        days_offset in 0u32..20_000,
        interval in prop_oneof![
            Just(RecurringInterval::Daily),
            Just(RecurringInterval::Weekly),
            Just(RecurringInterval::Monthly),
            Just(RecurringInterval::Yearly),
        ]
    ) {
        let base = chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let start = base + chrono::Days::new(u64::from(days_offset));

        let first = next_occurrence(start, interval).unwrap();
        let second = next_occurrence(start, interval).unwrap();
        prop_assert_eq!(first, second);
        prop_assert!(first > start, "next occurrence must be strictly later");
    }
}
