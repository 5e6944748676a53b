//! # Curvebox Math
//!
//! Numerical kernels for the curvebox term-structure library.
//!
//! This crate provides:
//!
//! - **Extrapolation**: the Smith-Wilson curve function, with discount
//!   factors, their time derivative and their sensitivity to node weights
//!
//! All kernels are pure functions over `f64` slices and are safe to call
//! concurrently.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod extrapolation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::extrapolation::{
        split_index, SmithWilsonCurveFunction, WilsonBranch, DEFAULT_UFR,
    };
}

pub use error::{MathError, MathResult};
pub use extrapolation::SmithWilsonCurveFunction;
