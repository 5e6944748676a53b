//! Curve and parameter metadata.

use curvebox_core::daycounts::DayCountConvention;
use curvebox_core::types::Date;
use serde::{Deserialize, Serialize};

use crate::ids::CurveName;
use crate::value_type::ValueType;

/// Metadata for one curve parameter anchored at a date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatedParameterMetadata {
    /// Resolved node date.
    pub date: Date,
    /// Node label.
    pub label: String,
}

impl DatedParameterMetadata {
    /// Creates parameter metadata.
    pub fn new(date: Date, label: impl Into<String>) -> Self {
        Self {
            date,
            label: label.into(),
        }
    }
}

/// Describes a curve: its name, its axes and one entry per parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveMetadata {
    /// Curve name.
    pub curve_name: CurveName,
    /// Meaning of x values.
    pub x_value_type: ValueType,
    /// Meaning of y values.
    pub y_value_type: ValueType,
    /// Day count used to turn dates into x values, if any.
    #[serde(default)]
    pub day_count: Option<DayCountConvention>,
    /// Parameter metadata, index-aligned with the curve parameters.
    #[serde(default)]
    pub parameter_metadata: Vec<DatedParameterMetadata>,
}

impl CurveMetadata {
    /// Creates metadata with no day count and no parameter metadata.
    pub fn new(curve_name: impl Into<CurveName>, x_value_type: ValueType, y_value_type: ValueType) -> Self {
        Self {
            curve_name: curve_name.into(),
            x_value_type,
            y_value_type,
            day_count: None,
            parameter_metadata: Vec::new(),
        }
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the parameter metadata.
    #[must_use]
    pub fn with_parameter_metadata(mut self, parameter_metadata: Vec<DatedParameterMetadata>) -> Self {
        self.parameter_metadata = parameter_metadata;
        self
    }

    /// Number of parameter metadata entries.
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.parameter_metadata.len()
    }

    /// Dates of the parameters in order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.parameter_metadata.iter().map(|m| m.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let d1 = Date::from_ymd(2026, 1, 5).unwrap();
        let d2 = Date::from_ymd(2027, 1, 5).unwrap();
        let meta = CurveMetadata::new("EUR", ValueType::YearFraction, ValueType::DiscountFactor)
            .with_day_count(DayCountConvention::Act365Fixed)
            .with_parameter_metadata(vec![
                DatedParameterMetadata::new(d1, "1Y"),
                DatedParameterMetadata::new(d2, "2Y"),
            ]);

        assert_eq!(meta.parameter_count(), 2);
        assert_eq!(meta.dates().collect::<Vec<_>>(), vec![d1, d2]);
        assert_eq!(meta.day_count, Some(DayCountConvention::Act365Fixed));
    }

    #[test]
    fn test_metadata_serde_defaults() {
        let json = r#"{"curve_name":"X","x_value_type":"YearFraction","y_value_type":"ZeroRate"}"#;
        let meta: CurveMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.day_count, None);
        assert!(meta.parameter_metadata.is_empty());
    }
}
