//! Error types for the core date and convention layer.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, tenors, conventions and reference data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid or out-of-range calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor string could not be parsed.
    #[error("Invalid tenor '{value}': {reason}")]
    InvalidTenor {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Calendar identifier not present in the reference data.
    #[error("Unknown calendar: {id}")]
    UnknownCalendar {
        /// The identifier that was looked up.
        id: String,
    },

    /// Day count name not recognised.
    #[error("Unknown day count convention: '{name}'")]
    UnknownDayCount {
        /// The unrecognised name.
        name: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown calendar error.
    #[must_use]
    pub fn unknown_calendar(id: impl Into<String>) -> Self {
        Self::UnknownCalendar { id: id.into() }
    }

    /// Creates an unknown day count error.
    #[must_use]
    pub fn unknown_day_count(name: impl Into<String>) -> Self {
        Self::UnknownDayCount { name: name.into() }
    }
}
