//! Whole-month stay validation.
//!
//! A calendar pick is snapped outwards to full months: the check-in date moves
//! to the first of its month and the check-out date to the last of its month.
//! The snapped stay is accepted when its end falls strictly before
//! `start + max_span_months` and not before its start. With the default span
//! of 6 months, Jan 1 - Jun 30 (6 months) is accepted and Jan 1 - Jul 31 is not.
//! A reversed pick is rejected even when both ends share a month.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_SPAN_MONTHS, NormalizedStay, StayError, StayRange};

/// Limits applied to stay picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawStayConfig")]
pub struct StayConfig {
    max_span_months: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStayConfig {
    #[serde(default = "default_max_span_months")]
    max_span_months: u32,
}

const fn default_max_span_months() -> u32 {
    DEFAULT_MAX_SPAN_MONTHS
}

impl StayConfig {
    /// # Errors
    /// Returns `StayError::InvalidConfig` for a zero span, which would reject every stay.
    pub const fn new(max_span_months: u32) -> Result<Self, StayError> {
        if max_span_months == 0 {
            return Err(StayError::InvalidConfig(max_span_months));
        }
        Ok(Self { max_span_months })
    }

    pub const fn max_span_months(&self) -> u32 {
        self.max_span_months
    }
}

impl Default for StayConfig {
    fn default() -> Self {
        Self {
            max_span_months: DEFAULT_MAX_SPAN_MONTHS,
        }
    }
}

impl TryFrom<RawStayConfig> for StayConfig {
    type Error = StayError;

    fn try_from(raw: RawStayConfig) -> Result<Self, Self::Error> {
        Self::new(raw.max_span_months)
    }
}

/// Result of validating a single calendar pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayOutcome {
    /// One or both ends still missing; nothing is normalized yet.
    Incomplete(StayRange),
    /// Both ends picked and the snapped stay is within limits.
    Normalized(NormalizedStay),
}

impl StayOutcome {
    /// Months covered; 0 until a complete, valid pick
    pub const fn months(&self) -> u32 {
        match self {
            Self::Incomplete(_) => 0,
            Self::Normalized(stay) => stay.months(),
        }
    }
}

/// Validates a calendar pick against `config`.
///
/// # Errors
/// Returns `StayError::InvalidStayRange` when both ends are picked and the
/// snapped stay is reversed or reaches `max_span_months` past its start.
pub fn validate_stay(range: &StayRange, config: &StayConfig) -> Result<StayOutcome, StayError> {
    let Some((from, to)) = range.ends() else {
        return Ok(StayOutcome::Incomplete(*range));
    };

    let start = from.first_of_month();
    let end = to.last_of_month();
    let max_span_months = config.max_span_months();

    // No representable limit past year 9999 means the span cannot be exceeded.
    let within_span = i32::try_from(max_span_months)
        .ok()
        .and_then(|months| start.add_months(months))
        .is_none_or(|limit| end < limit);

    if !within_span || to < from {
        log::warn!("rejected stay pick {range}: snapped to {start}/{end}, limit {max_span_months} months");
        return Err(StayError::InvalidStayRange {
            from,
            to,
            max_span_months,
        });
    }

    let months = (start.months_until(&end) + 1).unsigned_abs();
    Ok(StayOutcome::Normalized(NormalizedStay::new(start, end, months)))
}

/// The stay held by a booking form.
///
/// Any incomplete pick resets to `Incomplete`; a valid complete pick moves to
/// `Committed`. A rejected pick leaves the selection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "stay", rename_all = "camelCase")]
pub enum StaySelection {
    Incomplete(StayRange),
    Committed(NormalizedStay),
}

impl Default for StaySelection {
    fn default() -> Self {
        Self::Incomplete(StayRange::default())
    }
}

impl StaySelection {
    /// Validates `range` and replaces the selection with the result.
    ///
    /// # Errors
    /// On `StayError::InvalidStayRange` the previous selection is kept as is.
    pub fn apply(&mut self, range: &StayRange, config: &StayConfig) -> Result<(), StayError> {
        *self = match validate_stay(range, config)? {
            StayOutcome::Incomplete(partial) => Self::Incomplete(partial),
            StayOutcome::Normalized(stay) => {
                log::debug!("committed stay {stay}");
                Self::Committed(stay)
            },
        };
        Ok(())
    }

    pub const fn committed(&self) -> Option<&NormalizedStay> {
        match self {
            Self::Committed(stay) => Some(stay),
            Self::Incomplete(_) => None,
        }
    }

    pub const fn months(&self) -> u32 {
        match self {
            Self::Committed(stay) => stay.months(),
            Self::Incomplete(_) => 0,
        }
    }

    /// Range the calendar should highlight: the snapped stay once committed,
    /// the raw partial pick before that.
    pub const fn calendar_range(&self) -> StayRange {
        match self {
            Self::Committed(stay) => stay.as_range(),
            Self::Incomplete(partial) => *partial,
        }
    }

    /// Month counter shown under the calendar, empty until committed
    pub fn label(&self) -> String {
        match self.months() {
            0 => String::new(),
            1 => "1 month".to_owned(),
            n => format!("{n} months"),
        }
    }
}
