//! Filters selecting which curves a scenario perturbation applies to.

use std::fmt;

use crate::curve::ParameterizedFunctionalCurve;
use crate::ids::{CurveId, CurveName};
use crate::scenario::ScenarioValueBox;

/// Decides whether a curve in the market data matches.
pub trait CurveFilter: fmt::Debug + Send + Sync {
    /// Returns true if the curve identified by `id` with value `curve` matches.
    fn matches(&self, id: &CurveId, curve: &ScenarioValueBox<ParameterizedFunctionalCurve>) -> bool;
}

/// Matches every curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyCurveFilter;

impl CurveFilter for AnyCurveFilter {
    fn matches(&self, _id: &CurveId, _curve: &ScenarioValueBox<ParameterizedFunctionalCurve>) -> bool {
        true
    }
}

/// Matches curves by name, in any group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedCurveFilter {
    name: CurveName,
}

impl NamedCurveFilter {
    /// Creates a filter for one curve name.
    pub fn of(name: impl Into<CurveName>) -> Self {
        Self { name: name.into() }
    }
}

impl CurveFilter for NamedCurveFilter {
    fn matches(&self, id: &CurveId, _curve: &ScenarioValueBox<ParameterizedFunctionalCurve>) -> bool {
        id.name == self.name
    }
}
