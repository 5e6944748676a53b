//! Scenario-aware value container.
//!
//! A [`ScenarioValueBox`] holds either one value shared by every scenario or
//! one value per scenario. Market data lookups return boxes so the same code
//! serves a single deterministic run and a batch of what-if scenarios.
//!
//! # Example
//!
//! ```rust
//! use curvebox_market::scenario::ScenarioValueBox;
//!
//! let rate = ScenarioValueBox::of_single_value(5);
//! let shifts = ScenarioValueBox::of_scenario_values(vec![1, 2, 3]).unwrap();
//!
//! let combined = rate.combine_with(&shifts, |a, b| a + b).unwrap();
//! assert_eq!(combined, ScenarioValueBox::of_scenario_values(vec![6, 7, 8]).unwrap());
//! ```

use rayon::prelude::*;

use crate::error::{MarketError, MarketResult};

#[derive(Debug, Clone, PartialEq)]
enum Contents<T> {
    Single(T),
    Scenarios(Vec<T>),
}

/// One value, or one value per scenario.
///
/// A per-scenario box is never empty and its length is fixed at creation.
/// Boxes are immutable; every operation returns a new box.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioValueBox<T> {
    contents: Contents<T>,
}

impl<T> ScenarioValueBox<T> {
    /// Creates a box holding a value shared by all scenarios.
    #[must_use]
    pub fn of_single_value(value: T) -> Self {
        Self {
            contents: Contents::Single(value),
        }
    }

    /// Creates a box holding one value per scenario.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidSize` if `values` is empty.
    pub fn of_scenario_values(values: impl Into<Vec<T>>) -> MarketResult<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(MarketError::invalid_size(
                "a per-scenario box needs at least one value",
            ));
        }
        Ok(Self {
            contents: Contents::Scenarios(values),
        })
    }

    /// Returns true if this box holds a single shared value.
    #[must_use]
    pub fn is_single_value(&self) -> bool {
        matches!(self.contents, Contents::Single(_))
    }

    /// Returns true if this box holds per-scenario values.
    #[must_use]
    pub fn is_scenario_value(&self) -> bool {
        matches!(self.contents, Contents::Scenarios(_))
    }

    /// Number of scenarios, or `None` for a single-value box.
    #[must_use]
    pub fn scenario_count(&self) -> Option<usize> {
        match &self.contents {
            Contents::Single(_) => None,
            Contents::Scenarios(values) => Some(values.len()),
        }
    }

    /// The shared value, if this is a single-value box.
    #[must_use]
    pub fn single_value(&self) -> Option<&T> {
        match &self.contents {
            Contents::Single(value) => Some(value),
            Contents::Scenarios(_) => None,
        }
    }

    /// The per-scenario values, if this is a per-scenario box.
    #[must_use]
    pub fn scenario_values(&self) -> Option<&[T]> {
        match &self.contents {
            Contents::Single(_) => None,
            Contents::Scenarios(values) => Some(values),
        }
    }

    /// Returns the value for a scenario.
    ///
    /// A single-value box returns its value for any index.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::IndexOutOfRange` if the box holds per-scenario
    /// values and `scenario_index` is past the end.
    pub fn value(&self, scenario_index: usize) -> MarketResult<&T> {
        match &self.contents {
            Contents::Single(value) => Ok(value),
            Contents::Scenarios(values) => values
                .get(scenario_index)
                .ok_or_else(|| MarketError::index_out_of_range(scenario_index, values.len())),
        }
    }

    /// Iterates over the held values: one for a single box, one per scenario otherwise.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let slice: &[T] = match &self.contents {
            Contents::Single(value) => std::slice::from_ref(value),
            Contents::Scenarios(values) => values,
        };
        slice.iter()
    }

    /// Applies `f` to every held value, keeping the shape of the box.
    #[must_use]
    pub fn map<R, F>(&self, f: F) -> ScenarioValueBox<R>
    where
        F: Fn(&T) -> R,
    {
        let contents = match &self.contents {
            Contents::Single(value) => Contents::Single(f(value)),
            Contents::Scenarios(values) => Contents::Scenarios(values.iter().map(f).collect()),
        };
        ScenarioValueBox { contents }
    }

    /// Like [`map`](Self::map), evaluating per-scenario values on the rayon pool.
    #[must_use]
    pub fn map_par<R, F>(&self, f: F) -> ScenarioValueBox<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        let contents = match &self.contents {
            Contents::Single(value) => Contents::Single(f(value)),
            Contents::Scenarios(values) => Contents::Scenarios(values.par_iter().map(f).collect()),
        };
        ScenarioValueBox { contents }
    }

    /// Applies `f(scenario_index, value)` for each of `scenario_count` scenarios.
    ///
    /// A single value is expanded into `scenario_count` per-scenario results.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidSize` if `scenario_count` is zero, and
    /// `MarketError::IncompatibleScenarios` if this box holds a different
    /// number of scenarios.
    pub fn map_with_index<R, F>(&self, scenario_count: usize, f: F) -> MarketResult<ScenarioValueBox<R>>
    where
        F: Fn(usize, &T) -> R,
    {
        if scenario_count == 0 {
            return Err(MarketError::invalid_size("scenario count must be positive"));
        }
        let values: Vec<R> = match &self.contents {
            Contents::Single(value) => (0..scenario_count).map(|i| f(i, value)).collect(),
            Contents::Scenarios(values) => {
                if values.len() != scenario_count {
                    return Err(MarketError::incompatible_scenarios(values.len(), scenario_count));
                }
                values.iter().enumerate().map(|(i, v)| f(i, v)).collect()
            }
        };
        ScenarioValueBox::of_scenario_values(values)
    }

    /// Combines two boxes value by value.
    ///
    /// A single-value box on either side is broadcast across the other box's
    /// scenarios. Two single-value boxes produce a single-value box.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::IncompatibleScenarios` if both boxes hold
    /// per-scenario values of different lengths.
    pub fn combine_with<U, R, F>(
        &self,
        other: &ScenarioValueBox<U>,
        f: F,
    ) -> MarketResult<ScenarioValueBox<R>>
    where
        F: Fn(&T, &U) -> R,
    {
        let contents = match (&self.contents, &other.contents) {
            (Contents::Single(a), Contents::Single(b)) => Contents::Single(f(a, b)),
            (Contents::Single(a), Contents::Scenarios(bs)) => {
                Contents::Scenarios(bs.iter().map(|b| f(a, b)).collect())
            }
            (Contents::Scenarios(as_), Contents::Single(b)) => {
                Contents::Scenarios(as_.iter().map(|a| f(a, b)).collect())
            }
            (Contents::Scenarios(as_), Contents::Scenarios(bs)) => {
                if as_.len() != bs.len() {
                    return Err(MarketError::incompatible_scenarios(as_.len(), bs.len()));
                }
                Contents::Scenarios(as_.iter().zip(bs).map(|(a, b)| f(a, b)).collect())
            }
        };
        Ok(ScenarioValueBox { contents })
    }

    /// Expands the box into exactly `scenario_count` values.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::IncompatibleScenarios` if this box holds a
    /// different number of scenarios.
    pub fn into_scenario_values(self, scenario_count: usize) -> MarketResult<Vec<T>>
    where
        T: Clone,
    {
        match self.contents {
            Contents::Single(value) => Ok(vec![value; scenario_count]),
            Contents::Scenarios(values) if values.len() == scenario_count => Ok(values),
            Contents::Scenarios(values) => Err(MarketError::incompatible_scenarios(
                values.len(),
                scenario_count,
            )),
        }
    }
}

impl<T> From<T> for ScenarioValueBox<T> {
    fn from(value: T) -> Self {
        Self::of_single_value(value)
    }
}
