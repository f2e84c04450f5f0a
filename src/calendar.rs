//! Reporting-period calendar math
//!
//! Pure calendar computations for the target month: day count and the number
//! of Sundays, which is later subtracted from the raw leave tally.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ProcessError;

/// Year bounds accepted at the input boundary
const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// A validated reporting period (one calendar month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Validate and construct a reporting period
    pub fn new(year: i32, month: u32) -> Result<Self, ProcessError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ProcessError::InvalidPeriod(format!(
                "year {} outside {}-{}",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(ProcessError::InvalidPeriod(format!(
                "month {} outside 1-12",
                month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in the month
    pub fn days(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        match (
            NaiveDate::from_ymd_opt(self.year, self.month, 1),
            NaiveDate::from_ymd_opt(next_year, next_month, 1),
        ) {
            (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
            // Unreachable for a validated period.
            _ => 0,
        }
    }

    /// Number of Sundays in the month
    pub fn sundays(&self) -> u32 {
        (1..=self.days())
            .filter(|&day| {
                NaiveDate::from_ymd_opt(self.year, self.month, day)
                    .is_some_and(|date| date.weekday() == Weekday::Sun)
            })
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_period_validation() {
        assert!(Period::new(2025, 5).is_ok());
        assert!(matches!(
            Period::new(1999, 5),
            Err(ProcessError::InvalidPeriod(_))
        ));
        assert!(matches!(
            Period::new(2101, 1),
            Err(ProcessError::InvalidPeriod(_))
        ));
        assert!(matches!(
            Period::new(2025, 0),
            Err(ProcessError::InvalidPeriod(_))
        ));
        assert!(matches!(
            Period::new(2025, 13),
            Err(ProcessError::InvalidPeriod(_))
        ));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(Period::new(2025, 5).unwrap().days(), 31);
        assert_eq!(Period::new(2025, 4).unwrap().days(), 30);
        assert_eq!(Period::new(2025, 2).unwrap().days(), 28);
        assert_eq!(Period::new(2024, 2).unwrap().days(), 29);
        assert_eq!(Period::new(2025, 12).unwrap().days(), 31);
    }

    #[test]
    fn test_sunday_count() {
        // May 2025: Sundays fall on the 4th, 11th, 18th, and 25th.
        assert_eq!(Period::new(2025, 5).unwrap().sundays(), 4);
        // June 2025: 1st, 8th, 15th, 22nd, 29th.
        assert_eq!(Period::new(2025, 6).unwrap().sundays(), 5);
        // February 2026 starts on a Sunday: 1st, 8th, 15th, 22nd.
        assert_eq!(Period::new(2026, 2).unwrap().sundays(), 4);
    }
}
