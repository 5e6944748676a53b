//! Value type definitions for curve axes.
//!
//! A `ValueType` names what the numbers on a curve axis mean. Curve
//! definitions carry one for the x-axis and one for the y-axis; some
//! operations are only defined for particular axis types (node times, for
//! example, need a year-fraction x-axis).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes what the values on one curve axis represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValueType {
    /// Year fraction from the valuation date under a day count.
    YearFraction,

    /// Discount factor: P(t) where P(0) = 1.
    DiscountFactor,

    /// Continuously-compounded zero rate.
    ZeroRate,

    /// Forward rate.
    ForwardRate,

    /// Number of months.
    Months,

    /// Unspecified.
    #[default]
    Unknown,
}

impl ValueType {
    /// Returns true if this is a rate-based value type.
    #[must_use]
    pub fn is_rate_type(&self) -> bool {
        matches!(self, ValueType::ZeroRate | ValueType::ForwardRate)
    }

    /// Returns true if this value type measures time.
    #[must_use]
    pub fn is_time_type(&self) -> bool {
        matches!(self, ValueType::YearFraction | ValueType::Months)
    }

    /// Returns a short name for display purposes.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        match self {
            ValueType::YearFraction => "YF",
            ValueType::DiscountFactor => "DF",
            ValueType::ZeroRate => "Zero",
            ValueType::ForwardRate => "Fwd",
            ValueType::Months => "M",
            ValueType::Unknown => "?",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::YearFraction => write!(f, "Year Fraction"),
            ValueType::DiscountFactor => write!(f, "Discount Factor"),
            ValueType::ZeroRate => write!(f, "Zero Rate"),
            ValueType::ForwardRate => write!(f, "Forward Rate"),
            ValueType::Months => write!(f, "Months"),
            ValueType::Unknown => write!(f, "Unknown"),
        }
    }
}
