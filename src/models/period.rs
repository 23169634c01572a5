//! Calendar month periods
//!
//! Expense summaries and budgets are keyed by month. A record belongs to the
//! month in which it was created, judged in local time.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TrackerError, TrackerResult};

/// A single calendar month (e.g. "2026-03")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Create a month period, rejecting months outside 1-12
    pub fn new(year: i32, month: u32) -> TrackerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TrackerError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// A month, defaulting the year to the current one
    pub fn for_month(month: u32, year: Option<i32>) -> TrackerResult<Self> {
        let year = year.unwrap_or_else(|| Self::current().year);
        Self::new(year, month)
    }

    /// The month a timestamp falls in, in local time
    pub fn of(timestamp: &DateTime<Utc>) -> Self {
        let local = timestamp.with_timezone(&Local);
        Self {
            year: local.year(),
            month: local.month(),
        }
    }

    /// Check if a timestamp falls within this month (local time)
    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        Self::of(timestamp) == *self
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// A UTC timestamp at local noon on the given day of this month
    ///
    /// Mostly useful for building records in a known month.
    pub fn at_day(&self, day: u32) -> Option<DateTime<Utc>> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, day)?;
        let naive = date.and_hms_opt(12, 0, 0)?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Full month name with year ("March 2026")
    pub fn long_name(&self) -> String {
        self.start_date().format("%B %Y").to_string()
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
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthPeriod {
    type Err = TrackerError;

    /// Parse "YYYY-MM"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackerError::Validation(format!("Invalid month '{}', expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}
