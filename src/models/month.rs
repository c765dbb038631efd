//! Calendar month representation
//!
//! A month is the aggregation bucket of the revenue series. Its timestamp is
//! the first day of the month.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g., "2011-03")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, returning `None` if `month` is not in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Get the start date of this month
    pub fn start_date(&self) -> NaiveDate {
        // month is validated on construction, so day 1 always exists
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Get the next month
    pub fn next(&self) -> Self {
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

    /// Get the previous month
    pub fn prev(&self) -> Self {
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

    /// Months since year 0, used as a linear axis coordinate
    pub fn ordinal(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    /// Inverse of [`Month::ordinal`]
    pub fn from_ordinal(ordinal: i32) -> Self {
        Self {
            year: ordinal.div_euclid(12),
            month: ordinal.rem_euclid(12) as u32 + 1,
        }
    }

    /// Short label for chart axes ("2011-03")
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for Month {
    /// Month-start date, the row key of the exported tables
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start_date().format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_from_date() {
        let date = NaiveDate::from_ymd_opt(2011, 3, 17).unwrap();
        let month = Month::from_date(date);
        assert_eq!(month.year(), 2011);
        assert_eq!(month.month(), 3);
        assert_eq!(month.start_date(), NaiveDate::from_ymd_opt(2011, 3, 1).unwrap());
    }

    #[test]
    fn test_invalid_month() {
        assert!(Month::new(2011, 0).is_none());
        assert!(Month::new(2011, 13).is_none());
    }

    #[test]
    fn test_year_boundary() {
        let dec = Month::new(2010, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2011, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_ordinal_round_trip() {
        let month = Month::new(2011, 12).unwrap();
        assert_eq!(Month::from_ordinal(month.ordinal()), month);
        assert_eq!(month.next().ordinal(), month.ordinal() + 1);
    }

    #[test]
    fn test_display() {
        let month = Month::new(2011, 2).unwrap();
        assert_eq!(month.to_string(), "2011-02-01");
        assert_eq!(month.label(), "2011-02");
    }
}
