//! Smith-Wilson curve definitions.
//!
//! Builds a [`FunctionalCurveDefinition`] whose parameters are the
//! Smith-Wilson weights, one per surviving node, and whose functions
//! evaluate the Smith-Wilson discount factor at node times measured as year
//! fractions from the valuation date. Node times are taken from the metadata
//! each curve is bound with, so the same definition serves any valuation date.

use std::sync::Arc;

use curvebox_core::daycounts::DayCountConvention;
use curvebox_core::reference_data::ReferenceData;
use curvebox_core::types::Date;
use curvebox_math::extrapolation::SmithWilsonCurveFunction;

use crate::curve::CurveFunctions;
use crate::definition::{CurveDefinition, FunctionalCurveDefinition};
use crate::error::MarketResult;
use crate::ids::CurveName;
use crate::node::CurveNode;
use crate::value_type::ValueType;

/// Default convergence speed.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Smith-Wilson curve function plus convergence speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmithWilsonCurveTemplate {
    function: SmithWilsonCurveFunction,
    alpha: f64,
}

impl SmithWilsonCurveTemplate {
    /// Creates a template from a simple annual ultimate forward rate and alpha.
    #[must_use]
    pub fn new(ufr: f64, alpha: f64) -> Self {
        Self::of(SmithWilsonCurveFunction::of(ufr), alpha)
    }

    /// Creates a template from an existing curve function.
    #[must_use]
    pub fn of(function: SmithWilsonCurveFunction, alpha: f64) -> Self {
        Self { function, alpha }
    }

    /// The curve function.
    pub fn function(&self) -> &SmithWilsonCurveFunction {
        &self.function
    }

    /// Convergence speed.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Curve functions over the given node times.
    pub fn functions(&self, times: Arc<[f64]>) -> CurveFunctions {
        let (function, alpha) = (self.function, self.alpha);
        let value_times = Arc::clone(&times);
        let derivative_times = Arc::clone(&times);

        // weight count is checked against the node times when the curve is bound
        CurveFunctions::new(
            move |weights, t| {
                function
                    .discount_factor(t, alpha, &value_times, weights)
                    .unwrap_or(f64::NAN)
            },
            move |weights, t| {
                function
                    .discount_factor_derivative(t, alpha, &derivative_times, weights)
                    .unwrap_or(f64::NAN)
            },
            move |weights, t| {
                function
                    .discount_factor_weight_sensitivity(t, alpha, &times, weights)
                    .unwrap_or_else(|_| vec![f64::NAN; weights.len()])
            },
        )
    }

    /// Builds a definition for the given nodes.
    ///
    /// The definition is filtered at `valuation_date`, keeps only the
    /// surviving nodes and starts from one zero weight per node.
    ///
    /// # Errors
    ///
    /// Propagates node date and clash errors, and returns
    /// `MarketError::InsufficientNodes` if fewer than two nodes survive.
    pub fn definition(
        &self,
        name: impl Into<CurveName>,
        day_count: DayCountConvention,
        nodes: &[Arc<dyn CurveNode>],
        valuation_date: Date,
        ref_data: &ReferenceData,
    ) -> MarketResult<FunctionalCurveDefinition> {
        let template = *self;
        let filtered = FunctionalCurveDefinition::builder()
            .name(name)
            .x_value_type(ValueType::YearFraction)
            .y_value_type(ValueType::DiscountFactor)
            .day_count(day_count)
            .nodes(nodes.to_vec())
            .initial_guess(vec![0.0; nodes.len()])
            .node_time_functions(move |times| template.functions(times))
            .build()?
            .filtered(valuation_date, ref_data)?;

        let metadata = filtered.metadata(valuation_date, ref_data)?;
        let times = filtered.node_times(valuation_date, &metadata)?;
        tracing::debug!(
            curve = %filtered.name(),
            nodes = times.len(),
            first = times.first().copied().unwrap_or_default(),
            last = times.last().copied().unwrap_or_default(),
            "Smith-Wilson node times"
        );

        Ok(filtered.with_initial_guess(vec![0.0; times.len()]))
    }
}

impl Default for SmithWilsonCurveTemplate {
    fn default() -> Self {
        Self::of(SmithWilsonCurveFunction::default(), DEFAULT_ALPHA)
    }
}
