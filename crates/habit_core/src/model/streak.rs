//! Streak transition rules.
//!
//! Pure date arithmetic over `(last_completed, streak, today)`. The caller
//! supplies `today`; nothing here reads the wall clock.

use chrono::NaiveDate;

/// Result of applying one completion to a habit's streak state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// `last_completed == today`; nothing changes.
    AlreadyCompleted,
    /// First completion ever; streak becomes 1.
    Started,
    /// Completed the day after `last_completed`; streak grows by one.
    Extended(u32),
    /// Gap of two or more days, or `last_completed` after `today`.
    Restarted,
}

impl CompletionOutcome {
    /// New streak value, or `None` when the record must not change.
    pub fn streak(self) -> Option<u32> {
        match self {
            Self::AlreadyCompleted => None,
            Self::Started | Self::Restarted => Some(1),
            Self::Extended(streak) => Some(streak),
        }
    }

    /// Whether this outcome mutates the habit.
    pub fn is_change(self) -> bool {
        self.streak().is_some()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlreadyCompleted => "already_completed",
            Self::Started => "started",
            Self::Extended(_) => "extended",
            Self::Restarted => "restarted",
        }
    }
}

/// Computes the transition for a completion on `today`.
pub fn next_completion(
    last_completed: Option<NaiveDate>,
    streak: u32,
    today: NaiveDate,
) -> CompletionOutcome {
    let Some(last) = last_completed else {
        return CompletionOutcome::Started;
    };
    if last == today {
        return CompletionOutcome::AlreadyCompleted;
    }
    if last.succ_opt() == Some(today) {
        return CompletionOutcome::Extended(streak.saturating_add(1));
    }
    CompletionOutcome::Restarted
}

#[cfg(test)]
mod tests {
    use super::{next_completion, CompletionOutcome};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_completion_starts_at_one() {
        let outcome = next_completion(None, 0, day(2024, 1, 1));
        assert_eq!(outcome, CompletionOutcome::Started);
        assert_eq!(outcome.streak(), Some(1));
    }

    #[test]
    fn same_day_is_a_no_op() {
        let outcome = next_completion(Some(day(2024, 1, 1)), 4, day(2024, 1, 1));
        assert_eq!(outcome, CompletionOutcome::AlreadyCompleted);
        assert!(!outcome.is_change());
    }

    #[test]
    fn consecutive_day_extends() {
        let outcome = next_completion(Some(day(2024, 1, 1)), 4, day(2024, 1, 2));
        assert_eq!(outcome, CompletionOutcome::Extended(5));
    }

    #[test]
    fn consecutive_day_crosses_month_and_leap_day() {
        assert_eq!(
            next_completion(Some(day(2024, 2, 28)), 1, day(2024, 2, 29)),
            CompletionOutcome::Extended(2)
        );
        assert_eq!(
            next_completion(Some(day(2024, 2, 29)), 2, day(2024, 3, 1)),
            CompletionOutcome::Extended(3)
        );
        assert_eq!(
            next_completion(Some(day(2023, 12, 31)), 9, day(2024, 1, 1)),
            CompletionOutcome::Extended(10)
        );
    }

    #[test]
    fn gap_of_two_days_restarts() {
        let outcome = next_completion(Some(day(2024, 1, 1)), 7, day(2024, 1, 3));
        assert_eq!(outcome, CompletionOutcome::Restarted);
        assert_eq!(outcome.streak(), Some(1));
    }

    #[test]
    fn future_last_completed_restarts() {
        let outcome = next_completion(Some(day(2024, 1, 5)), 3, day(2024, 1, 4));
        assert_eq!(outcome, CompletionOutcome::Restarted);
    }

    #[test]
    fn extend_saturates_instead_of_overflowing() {
        let outcome = next_completion(Some(day(2024, 1, 1)), u32::MAX, day(2024, 1, 2));
        assert_eq!(outcome, CompletionOutcome::Extended(u32::MAX));
    }
}
