//! Curve extrapolation kernels.
//!
//! - [`SmithWilsonCurveFunction`]: Wilson-function kernel converging to an
//!   Ultimate Forward Rate (UFR), used by Solvency II risk-free curves
//!
//! # Example
//!
//! ```rust
//! use curvebox_math::extrapolation::SmithWilsonCurveFunction;
//!
//! let sw = SmithWilsonCurveFunction::of(0.042);
//! let nodes = [1.0, 2.0];
//! let weights = [151.831920686776, -74.9406108441653];
//!
//! let df = sw.discount_factor(10.0, 0.070642, &nodes, &weights).unwrap();
//! assert!(df > 0.0 && df < 1.0);
//! ```

mod smith_wilson;

pub use smith_wilson::{split_index, SmithWilsonCurveFunction, WilsonBranch, DEFAULT_UFR};
