//! Resolved date windows

use super::category::WindowName;
use super::errors::FeedError;
use super::result::Result;
use chrono::NaiveDate;
use std::fmt;

/// Date format used on the wire and in logs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar-date range with a name
///
/// Construction enforces `start <= end`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hotelfeed::domain::{DateWindow, WindowName};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 9).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 7, 7).unwrap();
/// let window = DateWindow::new(WindowName::Onhand, start, end).unwrap();
/// assert_eq!(window.to_string(), "onhand[2024-01-09..=2024-07-07]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    name: WindowName,
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(name: WindowName, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(FeedError::Configuration(format!(
                "{name} window start {} is after end {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self { name, start, end })
    }

    pub fn name(&self) -> WindowName {
        self.name
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start date formatted as `YYYY-MM-DD`
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// End date formatted as `YYYY-MM-DD`
    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Number of calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}..={}]",
            self.name,
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}
