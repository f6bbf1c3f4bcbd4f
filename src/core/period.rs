//! Calendar period handling.
//!
//! A [`Period`] is a (year, month) pair - the aggregation granularity used
//! throughout the crate. It provides the month boundaries for range queries,
//! the day clamping rule for recurring materialization (a template's
//! `day_of_month` beyond the month's length lands on the last valid day),
//! and the backwards month walk used by trend windows.

use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A calendar month in a specific year
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Calendar year
    pub year: i32,
    /// Calendar month, 1-12
    pub month: u32,
}

impl Period {
    /// Builds a period, rejecting months outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidPeriod { month });
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current calendar month (UTC)
    #[must_use]
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    /// First day of the month
    // Invariant: month is 1-12 and day 1 exists in every month
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Last day of the month (handles leap years)
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.next().first_day().pred_opt().unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        self.last_day().day()
    }

    /// The date for `day_of_month` within this period, clamped to the last
    /// valid day (e.g., day 31 in February yields Feb 28 or 29)
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn clamped_date(self, day_of_month: u32) -> NaiveDate {
        // The clamp keeps the day inside the month's valid range
        let day = day_of_month.clamp(1, self.days_in_month());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap()
    }

    /// Stable `"YYYY-MM"` key used by the materialization uniqueness index
    #[must_use]
    pub fn key(self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// The month as a signed integer, for storage columns
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn month_number(self) -> i32 {
        self.month as i32
    }

    /// Three-letter month abbreviation (e.g., "Jan")
    #[must_use]
    pub const fn month_name(self) -> &'static str {
        match self.month {
            1 => "Jan",
            2 => "Feb",
            3 => "Mar",
            4 => "Apr",
            5 => "May",
            6 => "Jun",
            7 => "Jul",
            8 => "Aug",
            9 => "Sep",
            10 => "Oct",
            11 => "Nov",
            _ => "Dec",
        }
    }

    /// The month before this one
    #[must_use]
    pub const fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The month after this one
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The `len` consecutive calendar months ending at `self`, oldest first
    #[must_use]
    pub fn window_ending_at(self, len: u32) -> Vec<Self> {
        let mut months = Vec::with_capacity(len as usize);
        let mut current = self;
        for _ in 0..len {
            months.push(current);
            current = current.prev();
        }
        months.reverse();
        months
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_month() {
        assert!(matches!(
            Period::new(2025, 0),
            Err(Error::InvalidPeriod { month: 0 })
        ));
        assert!(matches!(
            Period::new(2025, 13),
            Err(Error::InvalidPeriod { month: 13 })
        ));
    }

    #[test]
    fn test_month_boundaries() {
        let jan = period(2025, 1);
        assert_eq!(jan.first_day(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(jan.last_day(), NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(jan.days_in_month(), 31);
    }

    #[test]
    fn test_clamping_short_months() {
        // April has 30 days
        assert_eq!(
            period(2025, 4).clamped_date(31),
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap()
        );
        // February in a non-leap year
        assert_eq!(
            period(2025, 2).clamped_date(31),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        // February in a leap year
        assert_eq!(
            period(2024, 2).clamped_date(31),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        // In-range days pass through unchanged
        assert_eq!(
            period(2025, 2).clamped_date(15),
            NaiveDate::from_ymd_opt(2025, 2, 15).unwrap()
        );
    }

    #[test]
    fn test_key_is_zero_padded() {
        assert_eq!(period(2025, 3).key(), "2025-03");
        assert_eq!(period(2025, 11).key(), "2025-11");
    }

    #[test]
    fn test_prev_crosses_year_boundary() {
        assert_eq!(period(2025, 1).prev(), period(2024, 12));
        assert_eq!(period(2025, 7).prev(), period(2025, 6));
    }

    #[test]
    fn test_window_is_chronological_and_exact() {
        let window = period(2025, 2).window_ending_at(4);
        assert_eq!(
            window,
            vec![
                period(2024, 11),
                period(2024, 12),
                period(2025, 1),
                period(2025, 2),
            ]
        );
    }

    #[test]
    fn test_month_name() {
        assert_eq!(period(2025, 1).month_name(), "Jan");
        assert_eq!(period(2025, 12).month_name(), "Dec");
    }
}
