//! Recurring-transaction date projection.

use chrono::{Days, Months, NaiveDate};

use super::error::LedgerError;
use super::types::RecurringInterval;

/// Computes the next occurrence of a recurring transaction.
///
/// Pure: identical inputs always yield identical output.
///
/// Month and year additions preserve the day-of-month; when the target
/// month is shorter the result clamps to that month's last day, so
/// 2024-01-31 + MONTHLY = 2024-02-29.
///
/// # Errors
///
/// Returns `LedgerError::DateOutOfRange` if the projection leaves the
/// supported calendar range.
pub fn next_occurrence(
    start: NaiveDate,
    interval: RecurringInterval,
) -> Result<NaiveDate, LedgerError> {
    let next = match interval {
        RecurringInterval::Daily => start.checked_add_days(Days::new(1)),
        RecurringInterval::Weekly => start.checked_add_days(Days::new(7)),
        RecurringInterval::Monthly => start.checked_add_months(Months::new(1)),
        RecurringInterval::Yearly => start.checked_add_months(Months::new(12)),
    };

    next.ok_or(LedgerError::DateOutOfRange(start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(RecurringInterval::Daily, date(2026, 3, 14), date(2026, 3, 15))]
    #[case(RecurringInterval::Daily, date(2026, 12, 31), date(2027, 1, 1))]
    #[case(RecurringInterval::Weekly, date(2026, 3, 14), date(2026, 3, 21))]
    #[case(RecurringInterval::Weekly, date(2026, 2, 26), date(2026, 3, 5))]
    #[case(RecurringInterval::Monthly, date(2026, 3, 14), date(2026, 4, 14))]
    #[case(RecurringInterval::Yearly, date(2026, 3, 14), date(2027, 3, 14))]
    fn test_next_occurrence(
        #[case] interval: RecurringInterval,
        #[case] start: NaiveDate,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(next_occurrence(start, interval).unwrap(), expected);
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        // Jan 31 has no Feb 31; leap year 2024 clamps to Feb 29
        assert_eq!(
            next_occurrence(date(2024, 1, 31), RecurringInterval::Monthly).unwrap(),
            date(2024, 2, 29)
        );
        assert_eq!(
            next_occurrence(date(2025, 1, 31), RecurringInterval::Monthly).unwrap(),
            date(2025, 2, 28)
        );
        assert_eq!(
            next_occurrence(date(2026, 8, 31), RecurringInterval::Monthly).unwrap(),
            date(2026, 9, 30)
        );
    }

    #[test]
    fn test_yearly_clamps_leap_day() {
        assert_eq!(
            next_occurrence(date(2024, 2, 29), RecurringInterval::Yearly).unwrap(),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn test_purity() {
        let start = date(2026, 1, 31);
        let first = next_occurrence(start, RecurringInterval::Monthly).unwrap();
        let second = next_occurrence(start, RecurringInterval::Monthly).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_range() {
        let result = next_occurrence(NaiveDate::MAX, RecurringInterval::Daily);
        assert_eq!(result, Err(LedgerError::DateOutOfRange(NaiveDate::MAX)));
    }
}
