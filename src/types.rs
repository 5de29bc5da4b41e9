use crate::LeapYearError;
use crate::consts::{CENTURY_CYCLE, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MIN_YEAR};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroU64;

/// A year value guaranteed to be `>= MIN_YEAR` (1) in the proleptic Gregorian calendar.
/// Uses `NonZeroU64` internally, so 0 is not a valid year. No upper bound is enforced
/// beyond the storage type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{}", _0)]
#[serde(try_from = "i128", into = "u64")]
pub struct Year(NonZeroU64);

impl Year {
    /// Creates a new Year, validating that it's `>= MIN_YEAR`
    ///
    /// # Errors
    /// Returns `LeapYearError::InvalidRange` if the value is 0.
    pub const fn new(value: u64) -> Result<Self, LeapYearError> {
        match NonZeroU64::new(value) {
            Some(non_zero) => Ok(Self(non_zero)),
            None => Err(LeapYearError::InvalidRange),
        }
    }

    #[inline]
    pub(crate) const fn from_non_zero(value: NonZeroU64) -> Self {
        Self(value)
    }

    /// Returns the year value as u64
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// Returns true if this year has 366 days
    #[inline]
    pub const fn is_leap(self) -> bool {
        is_leap_year(self.get())
    }

    /// Returns the divisibility rule that decides this year
    #[inline]
    pub const fn rule(self) -> LeapRule {
        LeapRule::for_year(self.get())
    }

    /// Classifies this year under the Gregorian rule
    pub const fn classify(self) -> Classification {
        Classification::of(self)
    }

    /// Human-readable sentence naming the year and the rule that fired.
    pub fn explain(self) -> String {
        self.rule().explain(self)
    }
}

macro_rules! impl_try_from_signed {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Year {
                type Error = LeapYearError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    if value < 1 {
                        return Err(LeapYearError::InvalidRange);
                    }
                    // positive but wider than the storage type
                    u64::try_from(value).map_or(Err(LeapYearError::InvalidType), Self::new)
                }
            }
        )*
    };
}

macro_rules! impl_try_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl TryFrom<$t> for Year {
                type Error = LeapYearError;

                fn try_from(value: $t) -> Result<Self, Self::Error> {
                    Self::new(u64::from(value))
                }
            }
        )*
    };
}

impl_try_from_signed!(i32, i64, i128);
impl_try_from_unsigned!(u32, u64);

impl TryFrom<f64> for Year {
    type Error = LeapYearError;

    /// Accepts floats that hold an exact integer (`2024.0`), rejects anything else.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(LeapYearError::InvalidType);
        }
        if value < MIN_YEAR as f64 {
            return Err(LeapYearError::InvalidRange);
        }
        // 2^64 and above saturate on the cast below
        if value >= u64::MAX as f64 {
            return Err(LeapYearError::InvalidType);
        }
        Self::new(value as u64)
    }
}

impl TryFrom<&Value> for Year {
    type Error = LeapYearError;

    /// Validates a dynamically typed JSON value. Only JSON numbers holding an
    /// integer are accepted; strings, booleans, null, arrays and objects are
    /// rejected with `InvalidType` even when they look numeric.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_u64() {
                    Self::new(v)
                } else if let Some(v) = n.as_i64() {
                    Self::try_from(v)
                } else {
                    n.as_f64().map_or(Err(LeapYearError::InvalidType), Self::try_from)
                }
            }
            _ => Err(LeapYearError::InvalidType),
        }
    }
}

impl TryFrom<Value> for Year {
    type Error = LeapYearError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl From<Year> for u64 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

/// The Gregorian divisibility rule that decided a classification.
/// Variants are listed in precedence order: the first one that matches wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum LeapRule {
    #[display(fmt = "divisible-by-400")]
    #[serde(rename = "divisible-by-400")]
    DivisibleBy400,
    #[display(fmt = "divisible-by-100-not-400")]
    #[serde(rename = "divisible-by-100-not-400")]
    DivisibleBy100Not400,
    #[display(fmt = "divisible-by-4")]
    #[serde(rename = "divisible-by-4")]
    DivisibleBy4,
    #[display(fmt = "not-divisible-by-4")]
    #[serde(rename = "not-divisible-by-4")]
    NotDivisibleBy4,
}

impl LeapRule {
    /// Selects the rule for a raw year value. Does not validate the year.
    pub const fn for_year(year: u64) -> Self {
        if year % GREGORIAN_CYCLE == 0 {
            Self::DivisibleBy400
        } else if year % CENTURY_CYCLE == 0 {
            Self::DivisibleBy100Not400
        } else if year % LEAP_YEAR_CYCLE == 0 {
            Self::DivisibleBy4
        } else {
            Self::NotDivisibleBy4
        }
    }

    /// Returns whether years decided by this rule are leap years
    pub const fn is_leap(self) -> bool {
        matches!(self, Self::DivisibleBy400 | Self::DivisibleBy4)
    }

    /// Sentence explaining why `year` is (or is not) a leap year under this rule
    pub fn explain(self, year: Year) -> String {
        match self {
            Self::DivisibleBy400 => {
                format!("{year} is a leap year because it is divisible by 400.")
            }
            Self::DivisibleBy100Not400 => format!(
                "{year} is not a leap year because it is divisible by 100 but not by 400."
            ),
            Self::DivisibleBy4 => format!("{year} is a leap year because it is divisible by 4."),
            Self::NotDivisibleBy4 => {
                format!("{year} is not a leap year because it is not divisible by 4.")
            }
        }
    }
}

/// Result of classifying a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub is_leap: bool,
    pub rule:    LeapRule,
}

impl Classification {
    pub const fn of(year: Year) -> Self {
        let rule = year.rule();
        Self {
            is_leap: rule.is_leap(),
            rule,
        }
    }
}

/// Gregorian leap-year predicate on a raw value.
///
/// This is the single source of the 4/100/400 rule: `Year`, `LeapRule` and any
/// client-side rendering code all go through it rather than restating it.
/// The value is not validated; callers wanting input checks use [`crate::classify`].
pub const fn is_leap_year(year: u64) -> bool {
    LeapRule::for_year(year).is_leap()
}
