//! Inclusive calendar-day ranges for the demo time series

use crate::error::{BloomError, Result};
use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Longest range a series request may span, in days
pub const MAX_RANGE_DAYS: i64 = 366;

/// `[start, end]`, both inclusive, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validated range. Fails when `end < start` or the span exceeds
    /// [`MAX_RANGE_DAYS`].
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(BloomError::invalid_argument(format!(
                "end date {end} is before start date {start}"
            )));
        }
        let len = (end - start).num_days() + 1;
        if len > MAX_RANGE_DAYS {
            return Err(BloomError::invalid_argument(format!(
                "date range spans {len} days, at most {MAX_RANGE_DAYS} allowed"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` days ending on (and including) `end`
    pub fn ending_on(end: NaiveDate, days: i64) -> Result<Self> {
        let start = end
            .checked_sub_signed(TimeDelta::days(days.max(1) - 1))
            .ok_or_else(|| BloomError::invalid_argument(format!("date {end} out of range")))?;
        Self::new(start, end)
    }

    /// Fill in missing bounds.
    ///
    /// - neither: `default_days` ending `today`
    /// - start only: start through `today`
    /// - end only: `default_days` ending on `end`
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
        default_days: i64,
    ) -> Result<Self> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            (Some(start), None) => Self::new(start, today),
            (None, Some(end)) => Self::ending_on(end, default_days),
            (None, None) => Self::ending_on(today, default_days),
        }
    }

    #[inline]
    #[must_use]
    pub fn start(self) -> NaiveDate {
        self.start
    }

    #[inline]
    #[must_use]
    pub fn end(self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range (at least 1)
    #[inline]
    #[must_use]
    pub fn len(self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    /// Always false; a valid range holds at least one day
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        false
    }

    /// Each day in order
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_ending_on() {
        let range = DateRange::ending_on(d(2025, 10, 1), 7).unwrap();
        assert_eq!(range.start(), d(2025, 9, 25));
        assert_eq!(range.len(), 7);
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.first(), Some(&d(2025, 9, 25)));
        assert_eq!(days.last(), Some(&d(2025, 10, 1)));
    }

    #[test]
    fn test_single_day() {
        let range = DateRange::new(d(2025, 1, 1), d(2025, 1, 1)).unwrap();
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_rejects_reversed_and_oversized() {
        assert!(DateRange::new(d(2025, 1, 2), d(2025, 1, 1)).is_err());
        assert!(DateRange::new(d(2024, 1, 1), d(2024, 12, 31)).is_ok());
        assert!(DateRange::new(d(2024, 1, 1), d(2025, 1, 1)).is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let today = d(2025, 7, 15);
        let both = DateRange::resolve(None, None, today, 10).unwrap();
        assert_eq!((both.start(), both.end()), (d(2025, 7, 6), today));

        let start_only = DateRange::resolve(Some(d(2025, 7, 1)), None, today, 10).unwrap();
        assert_eq!(start_only.len(), 15);

        let end_only = DateRange::resolve(None, Some(d(2025, 3, 10)), today, 7).unwrap();
        assert_eq!(end_only.start(), d(2025, 3, 4));
    }
}
