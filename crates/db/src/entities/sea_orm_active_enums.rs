//! `SeaORM` active enums mapping Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_kind")]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountKind {
    /// Everyday checking account.
    #[sea_orm(string_value = "CURRENT")]
    Current,
    /// Savings account.
    #[sea_orm(string_value = "SAVINGS")]
    Savings,
}

/// Transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Money coming into the account.
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Money leaving the account.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// Recurrence interval for recurring transactions.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recurring_interval")]
#[serde(rename_all = "UPPERCASE")]
pub enum RecurringInterval {
    /// Every day.
    #[sea_orm(string_value = "DAILY")]
    Daily,
    /// Every 7 days.
    #[sea_orm(string_value = "WEEKLY")]
    Weekly,
    /// Every calendar month.
    #[sea_orm(string_value = "MONTHLY")]
    Monthly,
    /// Every calendar year.
    #[sea_orm(string_value = "YEARLY")]
    Yearly,
}

impl From<TransactionKind> for centry_core::ledger::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<centry_core::ledger::TransactionKind> for TransactionKind {
    fn from(kind: centry_core::ledger::TransactionKind) -> Self {
        match kind {
            centry_core::ledger::TransactionKind::Income => Self::Income,
            centry_core::ledger::TransactionKind::Expense => Self::Expense,
        }
    }
}

impl From<RecurringInterval> for centry_core::ledger::RecurringInterval {
    fn from(interval: RecurringInterval) -> Self {
        match interval {
            RecurringInterval::Daily => Self::Daily,
            RecurringInterval::Weekly => Self::Weekly,
            RecurringInterval::Monthly => Self::Monthly,
            RecurringInterval::Yearly => Self::Yearly,
        }
    }
}

impl From<centry_core::ledger::RecurringInterval> for RecurringInterval {
    fn from(interval: centry_core::ledger::RecurringInterval) -> Self {
        match interval {
            centry_core::ledger::RecurringInterval::Daily => Self::Daily,
            centry_core::ledger::RecurringInterval::Weekly => Self::Weekly,
            centry_core::ledger::RecurringInterval::Monthly => Self::Monthly,
            centry_core::ledger::RecurringInterval::Yearly => Self::Yearly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_kind_round_trip() {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            let core: centry_core::ledger::TransactionKind = kind.clone().into();
            let back: TransactionKind = core.into();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_recurring_interval_round_trip() {
        for interval in [
            RecurringInterval::Daily,
            RecurringInterval::Weekly,
            RecurringInterval::Monthly,
            RecurringInterval::Yearly,
        ] {
            let core: centry_core::ledger::RecurringInterval = interval.clone().into();
            let back: RecurringInterval = core.into();
            assert_eq!(back, interval);
        }
    }
}
