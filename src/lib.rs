mod consts;
pub mod form;
pub mod notify;
mod prelude;
mod range;
mod types;
mod validator;

pub use consts::*;
pub use form::{BookingForm, CreateBookingRequest, FormAction, FormError, FormSession};
pub use notify::{LogNotifier, Notice, Notifier, RecordingNotifier};
pub use range::{NormalizedStay, StayError, StayRange};
pub use types::{Day, Month, Year};
pub use validator::{StayConfig, StayOutcome, StaySelection, validate_stay};

use crate::prelude::*;
use std::str::FromStr;
use types::{from_month_index, month_index};

/// A concrete calendar day, as picked on the booking calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{year}-{month}-{day}")]
pub struct CalendarDate {
    // Field order gives the derived ordering: year, then month, then day.
    year:  Year,
    month: Month,
    day:   Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl CalendarDate {
    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns the first component that fails validation.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(year, month, day)?;
        Ok(Self { year, month, day })
    }

    pub const fn year(&self) -> Year {
        self.year
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> Day {
        self.day
    }

    /// Returns (year, month, day) as plain integers
    pub const fn ymd(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }

    /// First calendar day of this date's month
    pub const fn first_of_month(&self) -> Self {
        Self {
            year:  self.year,
            month: self.month,
            day:   Day::FIRST,
        }
    }

    /// Last calendar day of this date's month
    pub const fn last_of_month(&self) -> Self {
        Self {
            year:  self.year,
            month: self.month,
            day:   Day::last_of(self.year, self.month),
        }
    }

    pub const fn is_first_of_month(&self) -> bool {
        self.day.get() == MIN_DAY
    }

    pub const fn is_last_of_month(&self) -> bool {
        self.day.get() == Day::last_of(self.year, self.month).get()
    }

    /// Shifts the date by `months` calendar months, clamping the day to the
    /// length of the target month (Jan 31 + 1 month is Feb 28/29).
    ///
    /// Returns `None` if the result falls outside years `1..=MAX_YEAR`.
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let index = month_index(self.year, self.month).checked_add(months)?;
        let (year, month) = from_month_index(index)?;
        let day = self.day.min(Day::last_of(year, month));
        Some(Self { year, month, day })
    }

    /// Number of whole months from `self` to `other`, negative when `other`
    /// is earlier. A trailing partial month only counts when `other` is the
    /// last day of its month.
    pub fn months_until(&self, other: &Self) -> i32 {
        if other < self {
            return -other.months_until(self);
        }
        let months = month_index(other.year, other.month) - month_index(self.year, self.month);
        if other.day < self.day && !other.is_last_of_month() {
            months - 1
        } else {
            months
        }
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, got {trimmed}"
            )));
        };

        Self::new(parse_component(year)?, parse_component(month)?, parse_component(day)?)
    }
}

/// Parses one numeric date component with a format error on failure
fn parse_component<T: FromStr>(s: &str) -> Result<T, DateError> {
    s.parse::<T>().map_err(|_| DateError::InvalidFormat(s.to_owned()))
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
