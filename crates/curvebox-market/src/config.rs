//! Curve definition configuration.
//!
//! A [`CurveDefinitionConfig`] is the JSON form of a Smith-Wilson curve: its
//! name, day count, extrapolation parameters and nodes. Validation collects
//! every problem rather than stopping at the first one.
//!
//! ```rust
//! use curvebox_market::config::CurveDefinitionConfig;
//!
//! let config = CurveDefinitionConfig::from_json(r#"{
//!     "name": "EUR-SW",
//!     "nodes": [
//!         { "label": "1Y", "tenor": "1Y" },
//!         { "label": "2Y", "tenor": "2Y" }
//!     ]
//! }"#).unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.smith_wilson.ufr, 0.042);
//! ```

use std::sync::Arc;

use curvebox_core::calendars::BusinessDayConvention;
use curvebox_core::daycounts::DayCountConvention;
use curvebox_core::reference_data::{ReferenceData, WEEKEND_CALENDAR};
use curvebox_core::types::{Date, Tenor, TenorUnit};
use curvebox_math::extrapolation::DEFAULT_UFR;
use serde::{Deserialize, Serialize};

use crate::definition::{FunctionalCurveDefinition, MIN_NODES};
use crate::error::{MarketError, MarketResult};
use crate::node::{CurveNode, FixedDateCurveNode, NodeDateOrder, TenorCurveNode};
use crate::smith_wilson::{SmithWilsonCurveTemplate, DEFAULT_ALPHA};

// =============================================================================
// VALIDATION
// =============================================================================

/// One configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigIssue {
    /// Field path, e.g. `nodes[2].tenor`.
    pub field: String,
    /// What is wrong.
    pub message: String,
}

impl ConfigIssue {
    /// Creates an issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// SMITH-WILSON PARAMETERS
// =============================================================================

/// Smith-Wilson extrapolation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmithWilsonConfig {
    /// Ultimate forward rate as a simple annual rate.
    #[serde(default = "default_ufr")]
    pub ufr: f64,

    /// Convergence speed.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

fn default_ufr() -> f64 {
    DEFAULT_UFR
}

fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

impl Default for SmithWilsonConfig {
    fn default() -> Self {
        Self {
            ufr: default_ufr(),
            alpha: default_alpha(),
        }
    }
}

impl SmithWilsonConfig {
    fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if !self.ufr.is_finite() || self.ufr <= -1.0 {
            issues.push(ConfigIssue::new("ufr", "UFR must be finite and above -100%"));
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            issues.push(ConfigIssue::new("alpha", "Alpha must be positive"));
        }
        issues
    }
}

// =============================================================================
// NODE CONFIGURATION
// =============================================================================

/// Configuration for one curve node.
///
/// Exactly one of `tenor` and `date` must be set. Tenor nodes are resolved
/// as spot (`spot_lag` business days on `calendar`) plus tenor, adjusted by
/// `convention`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node label.
    pub label: String,

    /// Tenor (e.g., "6M", "10Y").
    #[serde(default)]
    pub tenor: Option<String>,

    /// Explicit node date.
    #[serde(default)]
    pub date: Option<Date>,

    /// Calendar identifier in the reference data.
    #[serde(default = "default_calendar")]
    pub calendar: String,

    /// Spot lag in business days.
    #[serde(default = "default_spot_lag")]
    pub spot_lag: i32,

    /// Business-day adjustment of the maturity.
    #[serde(default)]
    pub convention: BusinessDayConvention,

    /// Clash policy.
    #[serde(default)]
    pub date_order: NodeDateOrder,
}

/// Longest node tenor a configuration may name, in years.
pub const MAX_TENOR_YEARS: i64 = 500;

fn tenor_in_range(tenor: Tenor) -> bool {
    let amount = i64::from(tenor.amount()).abs();
    match tenor.unit() {
        TenorUnit::Days => amount <= MAX_TENOR_YEARS * 366,
        TenorUnit::Weeks => amount <= MAX_TENOR_YEARS * 53,
        TenorUnit::Months => amount <= MAX_TENOR_YEARS * 12,
        TenorUnit::Years => amount <= MAX_TENOR_YEARS,
    }
}

fn default_calendar() -> String {
    WEEKEND_CALENDAR.to_string()
}

fn default_spot_lag() -> i32 {
    2
}

impl NodeConfig {
    /// A tenor node with default calendar, spot lag and convention.
    pub fn tenor(label: impl Into<String>, tenor: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tenor: Some(tenor.into()),
            date: None,
            calendar: default_calendar(),
            spot_lag: default_spot_lag(),
            convention: BusinessDayConvention::default(),
            date_order: NodeDateOrder::default(),
        }
    }

    /// A fixed-date node.
    pub fn fixed(label: impl Into<String>, date: Date) -> Self {
        Self {
            date: Some(date),
            tenor: None,
            ..Self::tenor(label, "")
        }
    }

    /// Sets the clash policy.
    #[must_use]
    pub fn with_date_order(mut self, date_order: NodeDateOrder) -> Self {
        self.date_order = date_order;
        self
    }

    fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.label.is_empty() {
            issues.push(ConfigIssue::new("label", "Label cannot be empty"));
        }

        match (&self.tenor, &self.date) {
            (Some(tenor), None) => match tenor.parse::<Tenor>() {
                Ok(parsed) if !tenor_in_range(parsed) => issues.push(ConfigIssue::new(
                    "tenor",
                    format!("Tenor must not exceed {MAX_TENOR_YEARS} years"),
                )),
                Ok(_) => {}
                Err(err) => issues.push(ConfigIssue::new("tenor", err.to_string())),
            },
            (None, Some(_)) => {}
            (Some(_), Some(_)) => {
                issues.push(ConfigIssue::new("tenor", "Set either tenor or date, not both"));
            }
            (None, None) => {
                issues.push(ConfigIssue::new("tenor", "One of tenor or date is required"));
            }
        }

        if !(0..=5).contains(&self.spot_lag) {
            issues.push(ConfigIssue::new("spot_lag", "Spot lag must be between 0 and 5 days"));
        }

        issues
    }

    /// Builds the node.
    ///
    /// Errors name the field relative to the node, as validation does;
    /// [`CurveDefinitionConfig::build_nodes`] prefixes the node index.
    pub fn to_node(&self) -> MarketResult<Arc<dyn CurveNode>> {
        match (&self.tenor, self.date) {
            (Some(tenor), None) => {
                let tenor: Tenor = tenor.parse()?;
                Ok(Arc::new(
                    TenorCurveNode::new(&self.label, tenor, &self.calendar)
                        .with_spot_lag(self.spot_lag)
                        .with_convention(self.convention)
                        .with_date_order(self.date_order),
                ))
            }
            (None, Some(date)) => Ok(Arc::new(
                FixedDateCurveNode::new(&self.label, date).with_date_order(self.date_order),
            )),
            (Some(_), Some(_)) => Err(MarketError::config(
                "tenor",
                "Set either tenor or date, not both",
            )),
            (None, None) => Err(MarketError::config(
                "tenor",
                "One of tenor or date is required",
            )),
        }
    }
}

// =============================================================================
// CURVE CONFIGURATION
// =============================================================================

/// Configuration for a Smith-Wilson curve definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDefinitionConfig {
    /// Curve name.
    pub name: String,

    /// Description of this configuration.
    #[serde(default)]
    pub description: Option<String>,

    /// Day count used for node times.
    #[serde(default = "default_day_count")]
    pub day_count: DayCountConvention,

    /// Extrapolation parameters.
    #[serde(default)]
    pub smith_wilson: SmithWilsonConfig,

    /// Nodes in ascending date order.
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
}

fn default_day_count() -> DayCountConvention {
    DayCountConvention::Act365Fixed
}

impl CurveDefinitionConfig {
    /// Creates a configuration with default parameters and no nodes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            day_count: default_day_count(),
            smith_wilson: SmithWilsonConfig::default(),
            nodes: Vec::new(),
        }
    }

    /// Appends a node.
    #[must_use]
    pub fn with_node(mut self, node: NodeConfig) -> Self {
        self.nodes.push(node);
        self
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> MarketResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> MarketResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns every validation problem, or an empty vector if valid.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.name.is_empty() {
            issues.push(ConfigIssue::new("name", "Name cannot be empty"));
        }

        if self.nodes.len() < MIN_NODES {
            issues.push(ConfigIssue::new(
                "nodes",
                format!("At least {MIN_NODES} nodes are required"),
            ));
        }

        for issue in self.smith_wilson.validate() {
            issues.push(ConfigIssue::new(
                format!("smith_wilson.{}", issue.field),
                issue.message,
            ));
        }

        for (i, node) in self.nodes.iter().enumerate() {
            for issue in node.validate() {
                issues.push(ConfigIssue::new(
                    format!("nodes[{}].{}", i, issue.field),
                    issue.message,
                ));
            }
        }

        issues
    }

    /// Returns true if the configuration is valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    pub fn validate_or_error(&self) -> MarketResult<()> {
        let mut issues = self.validate();
        match issues.len() {
            0 => Ok(()),
            1 => {
                let issue = issues.remove(0);
                Err(MarketError::config(issue.field, issue.message))
            }
            _ => Err(MarketError::ConfigIssues(issues)),
        }
    }

    /// The Smith-Wilson template described by this configuration.
    pub fn template(&self) -> SmithWilsonCurveTemplate {
        SmithWilsonCurveTemplate::new(self.smith_wilson.ufr, self.smith_wilson.alpha)
    }

    /// Builds the nodes in configured order.
    pub fn build_nodes(&self) -> MarketResult<Vec<Arc<dyn CurveNode>>> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                node.to_node().map_err(|err| match err {
                    MarketError::Config { field, message } => {
                        MarketError::config(format!("nodes[{i}].{field}"), message)
                    }
                    other => other,
                })
            })
            .collect()
    }

    /// Validates the configuration and builds the curve definition.
    pub fn build_definition(
        &self,
        valuation_date: Date,
        ref_data: &ReferenceData,
    ) -> MarketResult<FunctionalCurveDefinition> {
        self.validate_or_error()?;
        let nodes = self.build_nodes()?;
        self.template().definition(
            self.name.as_str(),
            self.day_count,
            &nodes,
            valuation_date,
            ref_data,
        )
    }
}
