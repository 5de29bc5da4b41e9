//! Gregorian leap-year classification.
//!
//! The engine is three pure functions over a validated [`Year`]:
//! [`classify`], [`explain`] and [`leap_years_in_range`]. The [`api`] module
//! wraps them in a serverless-style JSON request handler.

pub mod api;
pub mod config;
mod consts;
mod prelude;
mod range;
mod types;

pub use consts::*;
pub use range::{LeapYears, YearRange};
pub use types::{Classification, LeapRule, Year, is_leap_year};

use std::convert::Infallible;
use tracing::debug;

/// Validation errors raised by the leap-year engine.
///
/// The display strings are fixed and are sent to API clients verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LeapYearError {
    /// Input is not an integer (fractional, non-finite, or not a number at all).
    #[error("year must be specified as an integer")]
    InvalidType,

    /// Input is an integer below 1.
    #[error("year must be 1 or greater")]
    InvalidRange,

    /// Range start is after range end.
    #[error("start year must be ≤ end year")]
    InvalidRangeOrder,
}

impl From<Infallible> for LeapYearError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Validates `year` and classifies it under the Gregorian rule.
///
/// Accepts anything convertible into a [`Year`]: integers, floats holding an
/// integer value, JSON values, or an already validated `Year`.
///
/// # Errors
/// `InvalidType` for non-integer input, `InvalidRange` for years below 1.
pub fn classify<Y>(year: Y) -> Result<Classification, LeapYearError>
where
    Y: TryInto<Year>,
    LeapYearError: From<Y::Error>,
{
    let year: Year = year.try_into()?;
    let classification = year.classify();
    debug!(%year, is_leap = classification.is_leap, rule = %classification.rule, "classified year");
    Ok(classification)
}

/// Validates `year` and returns a sentence explaining its classification.
///
/// # Errors
/// Same as [`classify`].
pub fn explain<Y>(year: Y) -> Result<String, LeapYearError>
where
    Y: TryInto<Year>,
    LeapYearError: From<Y::Error>,
{
    let year: Year = year.try_into()?;
    Ok(year.explain())
}

/// Returns every leap year in `[start, end]` in increasing order.
///
/// Nothing is returned on failure; an empty vector means the range is valid
/// but holds no leap year.
///
/// # Errors
/// Validates `start`, then `end` (see [`classify`]), then fails with
/// `InvalidRangeOrder` if `start > end`.
pub fn leap_years_in_range<S, E>(start: S, end: E) -> Result<Vec<Year>, LeapYearError>
where
    S: TryInto<Year>,
    E: TryInto<Year>,
    LeapYearError: From<S::Error> + From<E::Error>,
{
    let range = YearRange::try_new(start, end)?;
    let years: Vec<Year> = range.leap_years().collect();
    debug!(%range, count = years.len(), "enumerated leap years");
    Ok(years)
}
