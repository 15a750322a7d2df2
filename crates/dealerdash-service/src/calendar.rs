//! Source of "today" for date-ranged upstream queries.

use chrono::{Datelike, Duration, Local, NaiveDate};
use std::fmt::Debug;

/// Upstream date parameter format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub trait Calendar: Send + Sync + Debug {
    fn today(&self) -> NaiveDate;
}

/// The server's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCalendar;

impl Calendar for LocalCalendar {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always the same day.
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar(pub NaiveDate);

impl Calendar for FixedCalendar {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Formats a date the way the DMS expects it.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// January 1st of the year containing `date`.
#[must_use]
pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

/// First day of the month containing `date`.
#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// `days` days before `date`.
#[must_use]
pub fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_sub_signed(Duration::days(days)).unwrap_or(date)
}
