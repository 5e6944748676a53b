//! Curve definitions.
//!
//! A definition is the authored, valuation-date-independent description of a
//! curve. Against a valuation date and reference data it is
//!
//! 1. [`filtered`](CurveDefinition::filtered): node dates are resolved and
//!    clashing nodes pruned,
//! 2. described by [`metadata`](CurveDefinition::metadata): one dated entry
//!    per node,
//! 3. bound to a parameter vector by [`curve`](CurveDefinition::curve).

use std::fmt;
use std::sync::Arc;

use curvebox_core::daycounts::DayCountConvention;
use curvebox_core::reference_data::ReferenceData;
use curvebox_core::types::Date;

use crate::curve::{
    CurveFunctions, NodeTimeFunctions, ParameterizedFunctionalCurve, SensitivityFunction,
    ValueFunction,
};
use crate::error::{MarketError, MarketResult};
use crate::ids::CurveName;
use crate::metadata::CurveMetadata;
use crate::node::CurveNode;
use crate::resolver::NodeDateResolver;
use crate::value_type::ValueType;

/// Minimum number of nodes in a curve definition.
pub const MIN_NODES: usize = 2;

/// The three operations the calibration pipeline drives a definition through.
pub trait CurveDefinition: fmt::Debug + Send + Sync {
    /// Curve produced by [`curve`](Self::curve).
    type Curve;

    /// Curve name.
    fn name(&self) -> &CurveName;

    /// Meaning of the curve's y values.
    fn y_value_type(&self) -> ValueType;

    /// Nodes in authored order.
    fn nodes(&self) -> &[Arc<dyn CurveNode>];

    /// Number of curve parameters.
    fn parameter_count(&self) -> usize;

    /// Returns a copy with clashing nodes pruned.
    fn filtered(&self, valuation_date: Date, ref_data: &ReferenceData) -> MarketResult<Self>
    where
        Self: Sized;

    /// Curve metadata with one entry per node.
    fn metadata(&self, valuation_date: Date, ref_data: &ReferenceData) -> MarketResult<CurveMetadata>;

    /// Binds a parameter vector into an evaluable curve.
    fn curve(
        &self,
        valuation_date: Date,
        metadata: &CurveMetadata,
        parameters: Vec<f64>,
    ) -> MarketResult<Self::Curve>;
}

/// Where a definition's curve functions come from.
#[derive(Clone)]
enum FunctionSource {
    /// The same functions for every bound curve.
    Fixed(CurveFunctions),
    /// Functions built from the node times of each bound curve.
    NodeTimes(NodeTimeFunctions),
}

/// A curve definition whose shape is given by functions of a parameter vector.
///
/// The value, derivative and sensitivity functions are shared between the
/// definition, its filtered copies and every curve bound from them. A
/// definition built with
/// [`node_time_functions`](FunctionalCurveDefinitionBuilder::node_time_functions)
/// instead derives its functions at bind time from
/// [`node_times`](Self::node_times) of the metadata and valuation date passed
/// to [`curve`](CurveDefinition::curve).
#[derive(Clone)]
pub struct FunctionalCurveDefinition {
    name: CurveName,
    x_value_type: ValueType,
    y_value_type: ValueType,
    day_count: Option<DayCountConvention>,
    nodes: Vec<Arc<dyn CurveNode>>,
    initial_guess: Vec<f64>,
    functions: FunctionSource,
}

impl FunctionalCurveDefinition {
    /// Starts a builder.
    pub fn builder() -> FunctionalCurveDefinitionBuilder {
        FunctionalCurveDefinitionBuilder::default()
    }

    /// Meaning of the curve's x values.
    pub fn x_value_type(&self) -> ValueType {
        self.x_value_type
    }

    /// Day count used for year-fraction x values.
    pub fn day_count(&self) -> Option<DayCountConvention> {
        self.day_count
    }

    /// Starting parameters for calibration.
    pub fn initial_guess(&self) -> &[f64] {
        &self.initial_guess
    }

    /// Returns a copy with a different initial guess, and so parameter count.
    #[must_use]
    pub fn with_initial_guess(&self, initial_guess: Vec<f64>) -> Self {
        Self {
            initial_guess,
            ..self.clone()
        }
    }

    /// Year fraction from the valuation date to each parameter date.
    ///
    /// Only defined when the metadata x-axis is [`ValueType::YearFraction`]
    /// and this definition carries a day count.
    pub fn node_times(&self, valuation_date: Date, metadata: &CurveMetadata) -> MarketResult<Vec<f64>> {
        if metadata.x_value_type != ValueType::YearFraction {
            return Err(MarketError::invalid_axis_type(
                ValueType::YearFraction.to_string(),
                metadata.x_value_type.to_string(),
            ));
        }
        let day_count = self
            .day_count
            .ok_or_else(|| MarketError::missing_day_count(self.name.as_str()))?;

        Ok(metadata
            .dates()
            .map(|date| day_count.year_fraction_f64(valuation_date, date))
            .collect())
    }
}

impl CurveDefinition for FunctionalCurveDefinition {
    type Curve = ParameterizedFunctionalCurve;

    fn name(&self) -> &CurveName {
        &self.name
    }

    fn y_value_type(&self) -> ValueType {
        self.y_value_type
    }

    fn nodes(&self) -> &[Arc<dyn CurveNode>] {
        &self.nodes
    }

    fn parameter_count(&self) -> usize {
        self.initial_guess.len()
    }

    /// Resolves node dates and prunes clashes.
    ///
    /// The initial guess and the functions are carried over unchanged, so once
    /// nodes are dropped the parameter count no longer follows the node count
    /// and [`metadata`](CurveDefinition::metadata) need not line up one entry
    /// per parameter. Definitions with one parameter per node resize the guess
    /// with [`with_initial_guess`](Self::with_initial_guess).
    fn filtered(&self, valuation_date: Date, ref_data: &ReferenceData) -> MarketResult<Self> {
        let resolved = NodeDateResolver::resolve_dates(&self.nodes, valuation_date, ref_data)?;
        let kept = NodeDateResolver::resolve(resolved)?;
        if kept.len() < MIN_NODES {
            return Err(MarketError::insufficient_nodes(MIN_NODES, kept.len()));
        }
        if kept.len() < self.nodes.len() {
            tracing::debug!(
                curve = %self.name,
                before = self.nodes.len(),
                after = kept.len(),
                "Curve nodes filtered"
            );
        }

        Ok(Self {
            nodes: kept.into_iter().map(|resolved| resolved.node).collect(),
            ..self.clone()
        })
    }

    fn metadata(&self, valuation_date: Date, ref_data: &ReferenceData) -> MarketResult<CurveMetadata> {
        let parameter_metadata = self
            .nodes
            .iter()
            .map(|node| node.metadata(valuation_date, ref_data))
            .collect::<MarketResult<Vec<_>>>()?;

        Ok(CurveMetadata {
            curve_name: self.name.clone(),
            x_value_type: self.x_value_type,
            y_value_type: self.y_value_type,
            day_count: self.day_count,
            parameter_metadata,
        })
    }

    /// Binds `parameters` into a curve.
    ///
    /// Node-time definitions measure the metadata dates from `valuation_date`
    /// and need one parameter per metadata entry.
    fn curve(
        &self,
        valuation_date: Date,
        metadata: &CurveMetadata,
        parameters: Vec<f64>,
    ) -> MarketResult<ParameterizedFunctionalCurve> {
        if parameters.len() != self.parameter_count() {
            return Err(MarketError::parameter_count_mismatch(
                self.parameter_count(),
                parameters.len(),
            ));
        }
        let functions = match &self.functions {
            FunctionSource::Fixed(functions) => functions.clone(),
            FunctionSource::NodeTimes(make) => {
                let times = self.node_times(valuation_date, metadata)?;
                if times.len() != parameters.len() {
                    return Err(MarketError::parameter_count_mismatch(
                        times.len(),
                        parameters.len(),
                    ));
                }
                make(times.into())
            }
        };
        Ok(functions.bind(metadata.clone(), parameters))
    }
}

impl fmt::Debug for FunctionalCurveDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionalCurveDefinition")
            .field("name", &self.name)
            .field("x_value_type", &self.x_value_type)
            .field("y_value_type", &self.y_value_type)
            .field("day_count", &self.day_count)
            .field("nodes", &self.nodes)
            .field("initial_guess", &self.initial_guess)
            .finish_non_exhaustive()
    }
}

/// Builder for [`FunctionalCurveDefinition`].
///
/// The x-axis defaults to year fractions and the y-axis to
/// [`ValueType::Unknown`]. The name, at least two nodes, the initial guess
/// and either all three functions or node-time functions are required.
#[derive(Default)]
pub struct FunctionalCurveDefinitionBuilder {
    name: Option<CurveName>,
    x_value_type: Option<ValueType>,
    y_value_type: Option<ValueType>,
    day_count: Option<DayCountConvention>,
    nodes: Vec<Arc<dyn CurveNode>>,
    initial_guess: Option<Vec<f64>>,
    value_function: Option<ValueFunction>,
    derivative_function: Option<ValueFunction>,
    sensitivity_function: Option<SensitivityFunction>,
    node_time_functions: Option<NodeTimeFunctions>,
}

impl FunctionalCurveDefinitionBuilder {
    /// Sets the curve name.
    #[must_use]
    pub fn name(mut self, name: impl Into<CurveName>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the x-axis value type.
    #[must_use]
    pub fn x_value_type(mut self, value_type: ValueType) -> Self {
        self.x_value_type = Some(value_type);
        self
    }

    /// Sets the y-axis value type.
    #[must_use]
    pub fn y_value_type(mut self, value_type: ValueType) -> Self {
        self.y_value_type = Some(value_type);
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the nodes.
    #[must_use]
    pub fn nodes(mut self, nodes: Vec<Arc<dyn CurveNode>>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Appends one node.
    #[must_use]
    pub fn node(mut self, node: impl CurveNode + 'static) -> Self {
        self.nodes.push(Arc::new(node));
        self
    }

    /// Sets the initial parameter guess.
    #[must_use]
    pub fn initial_guess(mut self, initial_guess: Vec<f64>) -> Self {
        self.initial_guess = Some(initial_guess);
        self
    }

    /// Sets the value function.
    #[must_use]
    pub fn value_function<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64], f64) -> f64 + Send + Sync + 'static,
    {
        self.value_function = Some(Arc::new(f));
        self
    }

    /// Sets the derivative function.
    #[must_use]
    pub fn derivative_function<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64], f64) -> f64 + Send + Sync + 'static,
    {
        self.derivative_function = Some(Arc::new(f));
        self
    }

    /// Sets the parameter sensitivity function.
    #[must_use]
    pub fn sensitivity_function<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64], f64) -> Vec<f64> + Send + Sync + 'static,
    {
        self.sensitivity_function = Some(Arc::new(f));
        self
    }

    /// Sets a factory building the three functions from node times.
    ///
    /// Takes precedence over the individual function setters and requires a
    /// year-fraction x-axis and a day count.
    #[must_use]
    pub fn node_time_functions<F>(mut self, f: F) -> Self
    where
        F: Fn(Arc<[f64]>) -> CurveFunctions + Send + Sync + 'static,
    {
        self.node_time_functions = Some(Arc::new(f));
        self
    }

    /// Builds the definition.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::MissingField` for an absent required component
    /// and `MarketError::InsufficientNodes` for fewer than two nodes. With
    /// node-time functions, returns `MarketError::InvalidAxisType` for a
    /// non-year-fraction x-axis and `MarketError::MissingDayCount` without a
    /// day count.
    pub fn build(self) -> MarketResult<FunctionalCurveDefinition> {
        let name = self.name.ok_or(MarketError::MissingField { field: "name" })?;
        if self.nodes.len() < MIN_NODES {
            return Err(MarketError::insufficient_nodes(MIN_NODES, self.nodes.len()));
        }
        let initial_guess = self
            .initial_guess
            .ok_or(MarketError::MissingField { field: "initial_guess" })?;
        let x_value_type = self.x_value_type.unwrap_or(ValueType::YearFraction);

        let functions = match self.node_time_functions {
            Some(make) => {
                if x_value_type != ValueType::YearFraction {
                    return Err(MarketError::invalid_axis_type(
                        ValueType::YearFraction.to_string(),
                        x_value_type.to_string(),
                    ));
                }
                if self.day_count.is_none() {
                    return Err(MarketError::missing_day_count(name.as_str()));
                }
                FunctionSource::NodeTimes(make)
            }
            None => FunctionSource::Fixed(CurveFunctions::from_parts(
                self.value_function
                    .ok_or(MarketError::MissingField { field: "value_function" })?,
                self.derivative_function
                    .ok_or(MarketError::MissingField { field: "derivative_function" })?,
                self.sensitivity_function
                    .ok_or(MarketError::MissingField { field: "sensitivity_function" })?,
            )),
        };

        Ok(FunctionalCurveDefinition {
            name,
            x_value_type,
            y_value_type: self.y_value_type.unwrap_or_default(),
            day_count: self.day_count,
            nodes: self.nodes,
            initial_guess,
            functions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ClashAction, FixedDateCurveNode, NodeDateOrder};
    use approx::assert_relative_eq;

    fn valuation() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    fn node(label: &str, days: i64, order: NodeDateOrder) -> FixedDateCurveNode {
        FixedDateCurveNode::new(label, valuation().add_days(days).unwrap()).with_date_order(order)
    }

    fn flat_builder() -> FunctionalCurveDefinitionBuilder {
        FunctionalCurveDefinition::builder()
            .name("Flat")
            .y_value_type(ValueType::ZeroRate)
            .day_count(DayCountConvention::Act365Fixed)
            .initial_guess(vec![0.03])
            .value_function(|p, _x| p[0])
            .derivative_function(|_p, _x| 0.0)
            .sensitivity_function(|_p, _x| vec![1.0])
    }

    fn definition() -> FunctionalCurveDefinition {
        flat_builder()
            .node(node("A", 365, NodeDateOrder::default()))
            .node(node("B", 370, NodeDateOrder::of(10, ClashAction::DropThis)))
            .node(node("C", 730, NodeDateOrder::default()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requirements() {
        let err = flat_builder().node(node("A", 1, NodeDateOrder::default())).build().unwrap_err();
        assert_eq!(err, MarketError::insufficient_nodes(2, 1));

        let err = FunctionalCurveDefinition::builder()
            .node(node("A", 1, NodeDateOrder::default()))
            .node(node("B", 2, NodeDateOrder::default()))
            .build()
            .unwrap_err();
        assert_eq!(err, MarketError::MissingField { field: "name" });
    }

    #[test]
    fn test_filtered_prunes_without_mutating() {
        let original = definition();
        let filtered = original.filtered(valuation(), &ReferenceData::empty()).unwrap();

        let labels: Vec<&str> = filtered.nodes().iter().map(|n| n.label()).collect();
        assert_eq!(labels, ["A", "C"]);
        assert_eq!(original.nodes().len(), 3);
        assert_eq!(filtered.initial_guess(), original.initial_guess());
        assert_eq!(filtered.name(), original.name());
    }

    #[test]
    fn test_filtered_requires_two_survivors() {
        let def = flat_builder()
            .node(node("A", 10, NodeDateOrder::default()))
            .node(node("B", 11, NodeDateOrder::of(5, ClashAction::DropThis)))
            .build()
            .unwrap();
        assert_eq!(
            def.filtered(valuation(), &ReferenceData::empty()).unwrap_err(),
            MarketError::insufficient_nodes(2, 1)
        );
    }

    #[test]
    fn test_metadata_aligned_with_nodes() {
        let def = definition().filtered(valuation(), &ReferenceData::empty()).unwrap();
        let meta = def.metadata(valuation(), &ReferenceData::empty()).unwrap();
        assert_eq!(meta.curve_name.as_str(), "Flat");
        assert_eq!(meta.x_value_type, ValueType::YearFraction);
        assert_eq!(meta.y_value_type, ValueType::ZeroRate);
        assert_eq!(meta.parameter_metadata.len(), 2);
        assert_eq!(meta.parameter_metadata[0].label, "A");
        assert_eq!(meta.parameter_metadata[1].date, valuation().add_days(730).unwrap());
    }

    #[test]
    fn test_node_times() {
        let def = definition();
        let meta = def.metadata(valuation(), &ReferenceData::empty()).unwrap();
        let times = def.node_times(valuation(), &meta).unwrap();
        assert_relative_eq!(times[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(times[1], 370.0 / 365.0, epsilon = 1e-12);
        assert_relative_eq!(times[2], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_node_times_preconditions() {
        let def = definition();
        let mut meta = def.metadata(valuation(), &ReferenceData::empty()).unwrap();
        meta.x_value_type = ValueType::Months;
        assert!(matches!(
            def.node_times(valuation(), &meta),
            Err(MarketError::InvalidAxisType { .. })
        ));

        let no_day_count = FunctionalCurveDefinition::builder()
            .name("NoDc")
            .initial_guess(vec![0.0])
            .value_function(|p, _x| p[0])
            .derivative_function(|_p, _x| 0.0)
            .sensitivity_function(|_p, _x| vec![1.0])
            .node(node("A", 30, NodeDateOrder::default()))
            .node(node("B", 60, NodeDateOrder::default()))
            .build()
            .unwrap();
        let meta = no_day_count.metadata(valuation(), &ReferenceData::empty()).unwrap();
        assert_eq!(
            no_day_count.node_times(valuation(), &meta).unwrap_err(),
            MarketError::missing_day_count("NoDc")
        );
    }

    #[test]
    fn test_curve_binds_parameters() {
        let def = definition();
        let meta = def.metadata(valuation(), &ReferenceData::empty()).unwrap();
        let curve = def.curve(valuation(), &meta, vec![0.045]).unwrap();
        assert_relative_eq!(curve.y_value(7.0), 0.045);
        assert_eq!(curve.y_value_parameter_sensitivity(7.0), vec![1.0]);
        assert_eq!(curve.first_derivative(7.0), 0.0);

        assert_eq!(
            def.curve(valuation(), &meta, vec![0.01, 0.02]).unwrap_err(),
            MarketError::parameter_count_mismatch(1, 2)
        );
    }

    /// y = x * sum_i p_i t_i over the node times t_i
    fn node_time_builder() -> FunctionalCurveDefinitionBuilder {
        FunctionalCurveDefinition::builder()
            .name("Times")
            .node(node("A", 365, NodeDateOrder::default()))
            .node(node("B", 730, NodeDateOrder::default()))
            .initial_guess(vec![0.0, 0.0])
            .node_time_functions(|times| {
                let value_times = Arc::clone(&times);
                CurveFunctions::new(
                    move |p, x| x * p.iter().zip(value_times.iter()).map(|(p, t)| p * t).sum::<f64>(),
                    |_p, _x| 0.0,
                    move |_p, x| times.iter().map(|t| t * x).collect(),
                )
            })
    }

    #[test]
    fn test_node_time_functions_use_binding_date() {
        let def = node_time_builder()
            .day_count(DayCountConvention::Act365Fixed)
            .build()
            .unwrap();
        let ref_data = ReferenceData::empty();

        let meta = def.metadata(valuation(), &ref_data).unwrap();
        let curve = def.curve(valuation(), &meta, vec![1.0, 1.0]).unwrap();
        assert_relative_eq!(curve.y_value(2.0), 6.0, epsilon = 1e-12);

        // a year on, node A sits at time zero
        let later = valuation().add_days(365).unwrap();
        let meta = def.metadata(later, &ref_data).unwrap();
        let curve = def.curve(later, &meta, vec![1.0, 1.0]).unwrap();
        assert_relative_eq!(curve.y_value(2.0), 2.0, epsilon = 1e-12);
        let sens = curve.y_value_parameter_sensitivity(2.0);
        assert_relative_eq!(sens[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(sens[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_node_time_functions_need_matching_metadata() {
        let def = node_time_builder()
            .day_count(DayCountConvention::Act365Fixed)
            .build()
            .unwrap();
        let three_nodes = definition().metadata(valuation(), &ReferenceData::empty()).unwrap();
        assert_eq!(
            def.curve(valuation(), &three_nodes, vec![1.0, 1.0]).unwrap_err(),
            MarketError::parameter_count_mismatch(3, 2)
        );
    }

    #[test]
    fn test_node_time_functions_build_requirements() {
        assert_eq!(
            node_time_builder().build().unwrap_err(),
            MarketError::missing_day_count("Times")
        );
        assert!(matches!(
            node_time_builder()
                .day_count(DayCountConvention::Act365Fixed)
                .x_value_type(ValueType::Months)
                .build(),
            Err(MarketError::InvalidAxisType { .. })
        ));
    }

    #[test]
    fn test_with_initial_guess() {
        let def = definition().with_initial_guess(vec![0.0; 3]);
        assert_eq!(def.parameter_count(), 3);
        assert_eq!(definition().parameter_count(), 1);
    }
}
