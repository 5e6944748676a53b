//! Error types for market data and curve definitions.
//!
//! Every error here is a setup or programming error: nothing is retried and
//! nothing is partially recovered. Silent node pruning under a drop policy is
//! not an error and never reaches this type.

use curvebox_core::types::Date;
use curvebox_core::CoreError;
use curvebox_math::MathError;
use thiserror::Error;

use crate::config::ConfigIssue;

/// A specialized Result type for market operations.
pub type MarketResult<T> = Result<T, MarketError>;

/// Error types for scenario boxes, node resolution and curve definitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// Scenario index is past the end of a per-scenario box.
    #[error("Scenario index {index} out of range for {count} scenarios")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of scenarios in the box.
        count: usize,
    },

    /// A box or scenario count has an invalid size.
    #[error("Invalid size: {reason}")]
    InvalidSize {
        /// Description of the size problem.
        reason: String,
    },

    /// Two per-scenario boxes with different scenario counts were combined.
    #[error("Incompatible scenario counts: {left} and {right}")]
    IncompatibleScenarios {
        /// Scenario count of the left-hand box.
        left: usize,
        /// Scenario count of the right-hand box.
        right: usize,
    },

    /// Two nodes resolved to dates closer than allowed.
    #[error(
        "Curve node dates clash, node '{first_label}' and '{second_label}' resolved to dates \
         '{first_date}' and '{second_date}' respectively"
    )]
    DateClash {
        /// Label of the earlier node.
        first_label: String,
        /// Label of the later node.
        second_label: String,
        /// Resolved date of the earlier node.
        first_date: Date,
        /// Resolved date of the later node.
        second_date: Date,
    },

    /// Parameter vector length differs from the definition's parameter count.
    #[error("Parameter count mismatch: expected {expected}, got {got}")]
    ParameterCountMismatch {
        /// Expected number of parameters.
        expected: usize,
        /// Number of parameters supplied.
        got: usize,
    },

    /// Curve parameter index is past the end of the parameter vector.
    #[error("Parameter index {index} out of range for {count} parameters")]
    ParameterIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of parameters.
        count: usize,
    },

    /// Year fractions were requested from a definition without a day count.
    #[error("Curve '{curve}' has no day count")]
    MissingDayCount {
        /// Curve name.
        curve: String,
    },

    /// Axis value type does not support the requested operation.
    #[error("Invalid axis type: expected {expected}, got {got}")]
    InvalidAxisType {
        /// Required value type.
        expected: String,
        /// Actual value type.
        got: String,
    },

    /// Too few nodes to define a curve.
    #[error("Insufficient nodes: need at least {required}, got {got}")]
    InsufficientNodes {
        /// Minimum required nodes.
        required: usize,
        /// Nodes available.
        got: usize,
    },

    /// A definition was built without a mandatory component.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// A configuration failed validation.
    #[error("Configuration error in '{field}': {message}")]
    Config {
        /// Field path that failed.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// A configuration failed validation in several places.
    #[error("Configuration has {} errors", .0.len())]
    ConfigIssues(Vec<ConfigIssue>),

    /// JSON could not be read or written.
    #[error("JSON error: {reason}")]
    Json {
        /// Underlying serde_json message.
        reason: String,
    },

    /// Error from the math layer.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Error from the core date and convention layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MarketError {
    /// Creates an index out of range error.
    #[must_use]
    pub fn index_out_of_range(index: usize, count: usize) -> Self {
        Self::IndexOutOfRange { index, count }
    }

    /// Creates an invalid size error.
    #[must_use]
    pub fn invalid_size(reason: impl Into<String>) -> Self {
        Self::InvalidSize {
            reason: reason.into(),
        }
    }

    /// Creates an incompatible scenarios error.
    #[must_use]
    pub fn incompatible_scenarios(left: usize, right: usize) -> Self {
        Self::IncompatibleScenarios { left, right }
    }

    /// Creates a date clash error.
    #[must_use]
    pub fn date_clash(
        first_label: impl Into<String>,
        second_label: impl Into<String>,
        first_date: Date,
        second_date: Date,
    ) -> Self {
        Self::DateClash {
            first_label: first_label.into(),
            second_label: second_label.into(),
            first_date,
            second_date,
        }
    }

    /// Creates a parameter count mismatch error.
    #[must_use]
    pub fn parameter_count_mismatch(expected: usize, got: usize) -> Self {
        Self::ParameterCountMismatch { expected, got }
    }

    /// Creates a missing day count error.
    #[must_use]
    pub fn missing_day_count(curve: impl Into<String>) -> Self {
        Self::MissingDayCount {
            curve: curve.into(),
        }
    }

    /// Creates an invalid axis type error.
    #[must_use]
    pub fn invalid_axis_type(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::InvalidAxisType {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Creates an insufficient nodes error.
    #[must_use]
    pub fn insufficient_nodes(required: usize, got: usize) -> Self {
        Self::InsufficientNodes { required, got }
    }

    /// Creates a config error.
    #[must_use]
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for MarketError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            reason: err.to_string(),
        }
    }
}
