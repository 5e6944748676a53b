//! Tenors such as `3M` or `10Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenorUnit {
    /// Calendar days.
    Days,
    /// Weeks of seven days.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl TenorUnit {
    fn code(self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// A period of time expressed as an amount and a unit.
///
/// Serialized as its string form, e.g. `"18M"`.
///
/// ```rust
/// use curvebox_core::types::{Date, Tenor};
///
/// let tenor: Tenor = "6M".parse().unwrap();
/// let start = Date::from_ymd(2025, 1, 31).unwrap();
/// assert_eq!(tenor.add_to(start).unwrap(), Date::from_ymd(2025, 7, 31).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    amount: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor.
    #[must_use]
    pub const fn new(amount: i32, unit: TenorUnit) -> Self {
        Self { amount, unit }
    }

    /// A tenor of `n` days.
    #[must_use]
    pub const fn days(n: i32) -> Self {
        Self::new(n, TenorUnit::Days)
    }

    /// A tenor of `n` weeks.
    #[must_use]
    pub const fn weeks(n: i32) -> Self {
        Self::new(n, TenorUnit::Weeks)
    }

    /// A tenor of `n` months.
    #[must_use]
    pub const fn months(n: i32) -> Self {
        Self::new(n, TenorUnit::Months)
    }

    /// A tenor of `n` years.
    #[must_use]
    pub const fn years(n: i32) -> Self {
        Self::new(n, TenorUnit::Years)
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> i32 {
        self.amount
    }

    /// Returns the unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Shifts `date` forward by this tenor (backward if the amount is negative).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the shifted date is out of range.
    pub fn add_to(&self, date: Date) -> CoreResult<Date> {
        match self.unit {
            TenorUnit::Days => date.add_days(i64::from(self.amount)),
            TenorUnit::Weeks => date.add_days(7 * i64::from(self.amount)),
            TenorUnit::Months => date.add_months(self.amount),
            TenorUnit::Years => date.add_years(self.amount),
        }
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.code())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unit_chr = trimmed
            .chars()
            .last()
            .ok_or_else(|| CoreError::invalid_tenor(s, "empty string"))?;
        let unit = match unit_chr.to_ascii_uppercase() {
            'D' => TenorUnit::Days,
            'W' => TenorUnit::Weeks,
            'M' => TenorUnit::Months,
            'Y' => TenorUnit::Years,
            other => return Err(CoreError::invalid_tenor(s, format!("unknown unit '{other}'"))),
        };
        let number = &trimmed[..trimmed.len() - unit_chr.len_utf8()];
        let amount = number
            .parse::<i32>()
            .map_err(|e| CoreError::invalid_tenor(s, e.to_string()))?;
        Ok(Self::new(amount, unit))
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}
