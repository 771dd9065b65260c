//! Dates in the game follow a `year.month.day` format.

use std::fmt::{Display, Error, Formatter};
use std::str::FromStr;

use crate::token::Token;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Date {
    year: i16,
    month: i8,
    day: i8,
}

impl Date {
    pub fn new(year: i16, month: i8, day: i8) -> Self {
        Date { year, month, day }
    }

    pub fn year(self) -> i16 {
        self.year
    }

    pub fn month(self) -> i8 {
        self.month
    }

    pub fn day(self) -> i8 {
        self.day
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parse a date from a string. Missing month or day default to 1, and a
    /// trailing dot is accepted, so `1066`, `1066.1`, and `1066.1.1.` all
    /// parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut splits = s.trim_end().split('.');
        let year = splits.next().ok_or(Error)?;
        let month = splits.next().unwrap_or("1");
        let mut day = splits.next().unwrap_or("1");
        if day.is_empty() {
            day = "1";
        }
        // a trailing dot leaves one empty split behind; anything more is bad
        if let Some(trailing) = splits.next() {
            if !trailing.is_empty() || splits.next().is_some() {
                return Err(Error);
            }
        }
        let year = year.parse().map_err(|_| Error)?;
        let month = month.parse().map_err(|_| Error)?;
        let day = day.parse().map_err(|_| Error)?;
        Ok(Date::new(year, month, day))
    }
}

impl TryFrom<&Token> for Date {
    type Error = Error;

    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        token.as_str().parse()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}
