//! Curve identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of a curve.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveName(String);

impl CurveName {
    /// Create a new curve name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CurveName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CurveName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Name of a group of curves calibrated together.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveGroupName(String);

impl CurveGroupName {
    /// Create a new curve group name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurveGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CurveGroupName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CurveGroupName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Market data identifier of a curve: its group and its name.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CurveId {
    /// Group the curve belongs to.
    pub group: CurveGroupName,
    /// Curve name within the group.
    pub name: CurveName,
}

impl CurveId {
    /// Creates an identifier from a group name and a curve name.
    pub fn of(group: impl Into<CurveGroupName>, name: impl Into<CurveName>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.name)
    }
}
