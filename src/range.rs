use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateError, RANGE_SEPARATOR};

/// A check-in/check-out pick from the range calendar.
/// Either end may still be missing while the user is selecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StayRange {
    pub from: Option<CalendarDate>,
    pub to:   Option<CalendarDate>,
}

/// A stay snapped to whole calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStay {
    from:   CalendarDate,
    to:     CalendarDate,
    #[serde(rename = "noOfMonths")]
    months: u32,
}

/// Error type for stay range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StayError {
    /// A complete pick that is reversed or longer than the allowed span.
    #[error("Stay duration should be within {max_span_months} months only.")]
    InvalidStayRange {
        from:            CalendarDate,
        to:              CalendarDate,
        max_span_months: u32,
    },

    /// Maximum span must allow at least one month.
    #[error("Invalid stay configuration: maximum span must be at least 1 month, got {0}")]
    InvalidConfig(u32),

    /// Error parsing one end of the range.
    #[error(transparent)]
    Date(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl StayRange {
    pub const fn new(from: Option<CalendarDate>, to: Option<CalendarDate>) -> Self {
        Self { from, to }
    }

    /// True once both ends have been picked
    pub const fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Both ends, if the pick is complete
    pub const fn ends(&self) -> Option<(CalendarDate, CalendarDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

impl std::fmt::Display for StayRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(from) = self.from {
            write!(f, "{from}")?;
        }
        write!(f, "{RANGE_SEPARATOR}")?;
        if let Some(to) = self.to {
            write!(f, "{to}")?;
        }
        Ok(())
    }
}

impl FromStr for StayRange {
    type Err = StayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(StayError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (from, to) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    StayError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;
                Ok(Self::new(parse_end(from)?, parse_end(to)?))
            },
            _ => Err(StayError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

/// An empty side means the user has not picked that end yet
fn parse_end(s: &str) -> Result<Option<CalendarDate>, DateError> {
    let s = s.trim();
    if s.is_empty() { Ok(None) } else { s.parse().map(Some) }
}

impl Serialize for StayRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StayRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl NormalizedStay {
    /// Builds a stay from ends that are already snapped to month edges.
    /// Only the validator calls this; `months` must match the span.
    pub(crate) const fn new(from: CalendarDate, to: CalendarDate, months: u32) -> Self {
        Self { from, to, months }
    }

    /// First day of the check-in month
    pub const fn from(&self) -> CalendarDate {
        self.from
    }

    /// Last day of the check-out month
    pub const fn to(&self) -> CalendarDate {
        self.to
    }

    /// Whole months covered, counting both end months
    pub const fn months(&self) -> u32 {
        self.months
    }

    /// The stay as a complete calendar range
    pub const fn as_range(&self) -> StayRange {
        StayRange::new(Some(self.from), Some(self.to))
    }
}

impl std::fmt::Display for NormalizedStay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = if self.months == 1 { "month" } else { "months" };
        write!(f, "{}{RANGE_SEPARATOR}{} ({} {unit})", self.from, self.to, self.months)
    }
}
