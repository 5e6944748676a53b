//! # Curvebox Market
//!
//! Curve definitions and scenario-aware market data for the curvebox
//! term-structure library.
//!
//! This crate provides:
//!
//! - **Scenario boxes**: [`ScenarioValueBox`] holds one value or one value
//!   per scenario, with broadcasting combinators
//! - **Nodes**: [`CurveNode`] implementations with per-node clash policies
//! - **Resolution**: [`NodeDateResolver`] prunes or rejects clashing nodes
//! - **Definitions**: [`FunctionalCurveDefinition`] and the curves bound from it
//! - **Smith-Wilson**: a template building discount factor curve definitions
//! - **Configuration**: JSON curve definitions with validation
//!
//! ## Quick Start
//!
//! ```rust
//! use curvebox_market::prelude::*;
//!
//! let valuation = Date::from_ymd(2025, 1, 2).unwrap();
//! let config = CurveDefinitionConfig::new("EUR-SW")
//!     .with_node(NodeConfig::tenor("1Y", "1Y"))
//!     .with_node(NodeConfig::tenor("2Y", "2Y"));
//!
//! let definition = config
//!     .build_definition(valuation, &ReferenceData::standard())
//!     .unwrap();
//! let metadata = definition.metadata(valuation, &ReferenceData::standard()).unwrap();
//! let curve = definition.curve(valuation, &metadata, vec![0.5, -0.2]).unwrap();
//!
//! assert!((curve.y_value(0.0) - 1.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unreadable_literal)]

pub mod config;
pub mod curve;
pub mod definition;
pub mod error;
pub mod filter;
pub mod ids;
pub mod metadata;
pub mod node;
pub mod resolver;
pub mod scenario;
pub mod smith_wilson;
pub mod value_type;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ConfigIssue, CurveDefinitionConfig, NodeConfig, SmithWilsonConfig};
    pub use crate::curve::{
        CurveFunctions, NodeTimeFunctions, ParameterizedFunctionalCurve, SensitivityFunction,
        ValueFunction,
    };
    pub use crate::definition::{CurveDefinition, FunctionalCurveDefinition};
    pub use crate::error::{MarketError, MarketResult};
    pub use crate::filter::{AnyCurveFilter, CurveFilter, NamedCurveFilter};
    pub use crate::ids::{CurveGroupName, CurveId, CurveName};
    pub use crate::metadata::{CurveMetadata, DatedParameterMetadata};
    pub use crate::node::{ClashAction, CurveNode, FixedDateCurveNode, NodeDateOrder, TenorCurveNode};
    pub use crate::resolver::{NodeDateResolver, ResolvedNode};
    pub use crate::scenario::ScenarioValueBox;
    pub use crate::smith_wilson::SmithWilsonCurveTemplate;
    pub use crate::value_type::ValueType;

    pub use curvebox_core::prelude::*;
    pub use curvebox_math::extrapolation::SmithWilsonCurveFunction;
}

pub use definition::{CurveDefinition, FunctionalCurveDefinition};
pub use error::{MarketError, MarketResult};
pub use node::{ClashAction, CurveNode, NodeDateOrder};
pub use resolver::NodeDateResolver;
pub use scenario::ScenarioValueBox;
