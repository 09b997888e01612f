//! Wall-clock source
//!
//! Week windows, default dates and budget rollover all depend on "today".
//! Services read it through a [`Clock`] carried by the storage coordinator so
//! tests can pin the date.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of the current date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Local system time
    #[default]
    System,
    /// A pinned date
    Fixed(NaiveDate),
}

impl Clock {
    /// Today's date
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::System => Local::now().date_naive(),
            Self::Fixed(date) => *date,
        }
    }

    /// Current local timestamp. A pinned clock reports midnight.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Self::System => Local::now().naive_local(),
            Self::Fixed(date) => date.and_time(NaiveTime::MIN),
        }
    }

    /// Today formatted as YYYY-MM-DD
    pub fn today_key(&self) -> String {
        self.today().format("%Y-%m-%d").to_string()
    }

    /// Current month formatted as YYYY-MM
    pub fn current_month(&self) -> String {
        self.today().format("%Y-%m").to_string()
    }
}
