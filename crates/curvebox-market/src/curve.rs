//! Parameterized functional curves.

use std::fmt;
use std::sync::Arc;

use crate::error::{MarketError, MarketResult};
use crate::ids::CurveName;
use crate::metadata::CurveMetadata;

/// `f(parameters, x) -> y`, used for curve values and first derivatives.
pub type ValueFunction = Arc<dyn Fn(&[f64], f64) -> f64 + Send + Sync>;

/// `f(parameters, x) -> dy/dparameters`.
pub type SensitivityFunction = Arc<dyn Fn(&[f64], f64) -> Vec<f64> + Send + Sync>;

/// Builds curve functions from the node times of the curve being bound.
pub type NodeTimeFunctions = Arc<dyn Fn(Arc<[f64]>) -> CurveFunctions + Send + Sync>;

/// The value, derivative and sensitivity functions of a curve.
#[derive(Clone)]
pub struct CurveFunctions {
    value: ValueFunction,
    derivative: ValueFunction,
    sensitivity: SensitivityFunction,
}

impl CurveFunctions {
    /// Bundles the three functions.
    pub fn new<V, D, S>(value: V, derivative: D, sensitivity: S) -> Self
    where
        V: Fn(&[f64], f64) -> f64 + Send + Sync + 'static,
        D: Fn(&[f64], f64) -> f64 + Send + Sync + 'static,
        S: Fn(&[f64], f64) -> Vec<f64> + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(value),
            derivative: Arc::new(derivative),
            sensitivity: Arc::new(sensitivity),
        }
    }

    /// Bundles three shared functions.
    pub fn from_parts(
        value: ValueFunction,
        derivative: ValueFunction,
        sensitivity: SensitivityFunction,
    ) -> Self {
        Self {
            value,
            derivative,
            sensitivity,
        }
    }

    /// Binds the functions to metadata and parameters.
    pub fn bind(&self, metadata: CurveMetadata, parameters: Vec<f64>) -> ParameterizedFunctionalCurve {
        ParameterizedFunctionalCurve::of(
            metadata,
            parameters,
            Arc::clone(&self.value),
            Arc::clone(&self.derivative),
            Arc::clone(&self.sensitivity),
        )
    }
}

/// A curve defined by a parameter vector and three functions of
/// `(parameters, x)`: the value, its derivative in `x`, and its sensitivity
/// to each parameter.
#[derive(Clone)]
pub struct ParameterizedFunctionalCurve {
    metadata: CurveMetadata,
    parameters: Vec<f64>,
    value_function: ValueFunction,
    derivative_function: ValueFunction,
    sensitivity_function: SensitivityFunction,
}

impl ParameterizedFunctionalCurve {
    /// Binds parameters and functions into a curve.
    pub fn of(
        metadata: CurveMetadata,
        parameters: Vec<f64>,
        value_function: ValueFunction,
        derivative_function: ValueFunction,
        sensitivity_function: SensitivityFunction,
    ) -> Self {
        Self {
            metadata,
            parameters,
            value_function,
            derivative_function,
            sensitivity_function,
        }
    }

    /// Curve name.
    pub fn name(&self) -> &CurveName {
        &self.metadata.curve_name
    }

    /// Curve metadata.
    pub fn metadata(&self) -> &CurveMetadata {
        &self.metadata
    }

    /// Number of parameters.
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// All parameters.
    pub fn parameters(&self) -> &[f64] {
        &self.parameters
    }

    /// One parameter.
    pub fn parameter(&self, index: usize) -> MarketResult<f64> {
        self.parameters
            .get(index)
            .copied()
            .ok_or(MarketError::ParameterIndexOutOfRange {
                index,
                count: self.parameters.len(),
            })
    }

    /// Returns a copy with one parameter replaced.
    pub fn with_parameter(&self, index: usize, value: f64) -> MarketResult<Self> {
        let count = self.parameters.len();
        let mut parameters = self.parameters.clone();
        let slot = parameters
            .get_mut(index)
            .ok_or(MarketError::ParameterIndexOutOfRange { index, count })?;
        *slot = value;
        Ok(Self {
            parameters,
            ..self.clone()
        })
    }

    /// Returns a copy with all parameters replaced.
    pub fn with_parameters(&self, parameters: Vec<f64>) -> MarketResult<Self> {
        if parameters.len() != self.parameters.len() {
            return Err(MarketError::parameter_count_mismatch(
                self.parameters.len(),
                parameters.len(),
            ));
        }
        Ok(Self {
            parameters,
            ..self.clone()
        })
    }

    /// Curve value at `x`.
    pub fn y_value(&self, x: f64) -> f64 {
        (self.value_function)(&self.parameters, x)
    }

    /// First derivative of the curve value with respect to `x`.
    pub fn first_derivative(&self, x: f64) -> f64 {
        (self.derivative_function)(&self.parameters, x)
    }

    /// Sensitivity of the curve value at `x` to each parameter.
    pub fn y_value_parameter_sensitivity(&self, x: f64) -> Vec<f64> {
        (self.sensitivity_function)(&self.parameters, x)
    }
}

impl fmt::Debug for ParameterizedFunctionalCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterizedFunctionalCurve")
            .field("metadata", &self.metadata)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}
