//! Draft validation.
//!
//! Validation always runs before any write is attempted; a rejected draft
//! never reaches the storage layer.

use super::error::LedgerError;
use super::types::TransactionDraft;

/// Validates a transaction draft.
///
/// Rules:
/// - `amount` must be non-negative (zero is allowed; the kind carries the sign)
/// - `recurring_interval` must be present iff `is_recurring`
///
/// # Errors
///
/// Returns `LedgerError` describing the first violated rule.
pub fn validate_draft(draft: &TransactionDraft) -> Result<(), LedgerError> {
    if draft.amount.is_sign_negative() && !draft.amount.is_zero() {
        return Err(LedgerError::NegativeAmount);
    }

    if draft.is_recurring && draft.recurring_interval.is_none() {
        return Err(LedgerError::MissingRecurringInterval);
    }

    if !draft.is_recurring && draft.recurring_interval.is_some() {
        return Err(LedgerError::UnexpectedRecurringInterval);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{RecurringInterval, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            account_id: Uuid::new_v4(),
            kind: TransactionKind::Expense,
            amount: dec!(25.00),
            category: "groceries".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            is_recurring: false,
            recurring_interval: None,
            goal_id: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn test_zero_amount_allowed() {
        let mut d = draft();
        d.amount = dec!(0);
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut d = draft();
        d.amount = dec!(-0.01);
        assert_eq!(validate_draft(&d), Err(LedgerError::NegativeAmount));
    }

    #[test]
    fn test_negative_zero_allowed() {
        let mut d = draft();
        d.amount = dec!(-0.00);
        assert!(validate_draft(&d).is_ok());
    }

    #[test]
    fn test_recurring_without_interval_rejected() {
        let mut d = draft();
        d.is_recurring = true;
        assert_eq!(
            validate_draft(&d),
            Err(LedgerError::MissingRecurringInterval)
        );
    }

    #[test]
    fn test_interval_without_recurring_rejected() {
        let mut d = draft();
        d.recurring_interval = Some(RecurringInterval::Weekly);
        assert_eq!(
            validate_draft(&d),
            Err(LedgerError::UnexpectedRecurringInterval)
        );
    }

    #[test]
    fn test_recurring_with_interval_ok() {
        let mut d = draft();
        d.is_recurring = true;
        d.recurring_interval = Some(RecurringInterval::Monthly);
        assert!(validate_draft(&d).is_ok());
    }
}
