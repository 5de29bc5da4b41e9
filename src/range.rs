use std::iter::FusedIterator;
use std::num::NonZeroU64;

use crate::consts::{CENTURY_CYCLE, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE};
use crate::{LeapYearError, Year, is_leap_year, prelude::*};

/// An inclusive range of years. The start year must be less than or equal to the end year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct YearRange {
    start: Year,
    end:   Year,
}

impl YearRange {
    /// Creates a new year range with validation.
    ///
    /// # Errors
    /// Returns `LeapYearError::InvalidRangeOrder` if start > end.
    pub fn new(start: Year, end: Year) -> Result<Self, LeapYearError> {
        if start > end {
            return Err(LeapYearError::InvalidRangeOrder);
        }
        Ok(Self { start, end })
    }

    /// Validates raw bounds and builds the range.
    /// `start` is validated first, then `end`, then their ordering, so the
    /// more specific single-year error always wins.
    ///
    /// # Errors
    /// Returns the first validation error encountered.
    pub fn try_new<S, E>(start: S, end: E) -> Result<Self, LeapYearError>
    where
        S: TryInto<Year>,
        E: TryInto<Year>,
        LeapYearError: From<S::Error> + From<E::Error>,
    {
        let start = start.try_into()?;
        let end = end.try_into()?;
        Self::new(start, end)
    }

    /// Returns the first year of the range
    pub const fn start(&self) -> Year {
        self.start
    }

    /// Returns the last year of the range (inclusive)
    pub const fn end(&self) -> Year {
        self.end
    }

    /// Number of years covered, counting both ends
    pub const fn span(&self) -> u64 {
        // start >= 1, so this cannot overflow
        self.end.get() - self.start.get() + 1
    }

    /// Checks if the range contains a given year
    pub fn contains(&self, year: Year) -> bool {
        self.start <= year && year <= self.end
    }

    /// Iterates the leap years of the range in increasing order.
    /// The iterator borrows nothing, so the range can be iterated again.
    pub const fn leap_years(&self) -> LeapYears {
        LeapYears::new(self.start.get(), self.end.get())
    }

    /// Counts the leap years of the range without walking it.
    pub const fn count_leap_years(&self) -> u64 {
        leap_years_through(self.end.get()) - leap_years_through(self.start.get() - 1)
    }
}

impl IntoIterator for YearRange {
    type Item = Year;
    type IntoIter = LeapYears;

    fn into_iter(self) -> Self::IntoIter {
        self.leap_years()
    }
}

impl IntoIterator for &YearRange {
    type Item = Year;
    type IntoIter = LeapYears;

    fn into_iter(self) -> Self::IntoIter {
        self.leap_years()
    }
}

/// Number of leap years in `1..=year`.
const fn leap_years_through(year: u64) -> u64 {
    year / LEAP_YEAR_CYCLE - year / CENTURY_CYCLE + year / GREGORIAN_CYCLE
}

/// Iterator over the leap years of a [`YearRange`].
///
/// Only multiples of 4 are visited; century years are then filtered through
/// [`is_leap_year`], so the output matches a plain year-by-year scan.
#[derive(Debug, Clone)]
pub struct LeapYears {
    /// Next multiple of 4 to inspect, `None` once exhausted
    cursor: Option<u64>,
    end:    u64,
}

impl LeapYears {
    const fn new(start: u64, end: u64) -> Self {
        Self {
            cursor: start.checked_next_multiple_of(LEAP_YEAR_CYCLE),
            end,
        }
    }
}

impl Iterator for LeapYears {
    type Item = Year;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let year = self.cursor?;
            if year > self.end {
                self.cursor = None;
                return None;
            }
            self.cursor = year.checked_add(LEAP_YEAR_CYCLE);
            if is_leap_year(year) {
                // cursor starts at a multiple of 4 >= start >= 1
                return NonZeroU64::new(year).map(Year::from_non_zero);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(year) if year <= self.end => {
                let upper = (self.end - year) / LEAP_YEAR_CYCLE + 1;
                (0, usize::try_from(upper).ok())
            }
            _ => (0, Some(0)),
        }
    }
}

impl FusedIterator for LeapYears {}
