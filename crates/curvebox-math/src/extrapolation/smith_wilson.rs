//! Smith-Wilson curve function.
//!
//! The discount factor at time `t` is
//!
//! ```text
//! P(t) = exp(-ufr * t) + sum_i w_i * K(t, u_i)
//! ```
//!
//! where `u_i` are the node times, `w_i` the calibrated weights and `K` the
//! Wilson kernel scaled by `exp(-ufr * t)`. The kernel has two closed forms
//! depending on which side of the node `t` lies:
//!
//! ```text
//! right (t <  u): exp(-ufr * t) * (alpha * t - exp(-alpha * u) * sinh(alpha * t))
//! left  (t >= u): exp(-ufr * t) * (alpha * u - exp(-alpha * t) * sinh(alpha * u))
//! ```
//!
//! Both forms agree in value and first derivative at `t == u`.

use crate::error::{MathError, MathResult};

/// Default ultimate forward rate (eurozone), as a simple annual rate.
pub const DEFAULT_UFR: f64 = 0.042;

/// Which closed form of the Wilson kernel applies for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WilsonBranch {
    /// `t < node`.
    Right,
    /// `t >= node`.
    Left,
}

impl WilsonBranch {
    /// Selects the branch by direct comparison; `t == node` is `Left`.
    #[inline]
    #[must_use]
    pub fn select(t: f64, node: f64) -> Self {
        if t < node {
            WilsonBranch::Right
        } else {
            WilsonBranch::Left
        }
    }
}

/// Number of leading entries of an ascending `nodes` slice that are `<= t`.
///
/// Nodes before the returned index take the left branch, nodes at or after
/// it the right branch.
#[inline]
#[must_use]
pub fn split_index(nodes: &[f64], t: f64) -> usize {
    nodes.partition_point(|&node| node <= t)
}

/// Smith-Wilson curve function.
///
/// Holds only the continuously-compounded ultimate forward rate, derived from
/// a simple annual rate `r` as `ln(1 + r)`. All evaluation methods are pure
/// functions of `(t, alpha, nodes, weights)`, so one instance can be shared
/// across threads and scenarios.
///
/// # Node ordering
///
/// [`discount_factor`](Self::discount_factor) and
/// [`discount_factor_derivative`](Self::discount_factor_derivative) pick the
/// kernel branch per node by comparison and accept nodes in any order.
/// [`discount_factor_weight_sensitivity`](Self::discount_factor_weight_sensitivity)
/// splits the node vector once with [`split_index`] and requires ascending
/// nodes.
///
/// # Example
///
/// ```rust
/// use curvebox_math::extrapolation::SmithWilsonCurveFunction;
///
/// let sw = SmithWilsonCurveFunction::default();
/// let df = sw.discount_factor(0.0, 0.1, &[1.0, 2.0], &[0.5, -0.2]).unwrap();
/// assert!((df - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmithWilsonCurveFunction {
    /// Continuously-compounded ultimate forward rate.
    ufr: f64,
}

impl SmithWilsonCurveFunction {
    /// Creates the function from a simple annual ultimate forward rate.
    #[must_use]
    pub fn of(ufr: f64) -> Self {
        Self { ufr: ufr.ln_1p() }
    }

    /// Returns the continuously-compounded ultimate forward rate.
    #[must_use]
    pub fn ufr(&self) -> f64 {
        self.ufr
    }

    /// Discount factor at time `t`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::SizeMismatch` if `nodes` and `weights` differ in length.
    pub fn discount_factor(
        &self,
        t: f64,
        alpha: f64,
        nodes: &[f64],
        weights: &[f64],
    ) -> MathResult<f64> {
        check_sizes(nodes, weights)?;

        let base = (-self.ufr * t).exp();
        let kernel_sum: f64 = nodes
            .iter()
            .zip(weights)
            .map(|(&node, &weight)| weight * self.kernel(t, alpha, node, WilsonBranch::select(t, node)))
            .sum();

        Ok(base + kernel_sum)
    }

    /// First derivative of the discount factor with respect to `t`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::SizeMismatch` if `nodes` and `weights` differ in length.
    pub fn discount_factor_derivative(
        &self,
        t: f64,
        alpha: f64,
        nodes: &[f64],
        weights: &[f64],
    ) -> MathResult<f64> {
        check_sizes(nodes, weights)?;

        let base = -self.ufr * (-self.ufr * t).exp();
        let kernel_sum: f64 = nodes
            .iter()
            .zip(weights)
            .map(|(&node, &weight)| {
                weight * self.kernel_derivative(t, alpha, node, WilsonBranch::select(t, node))
            })
            .sum();

        Ok(base + kernel_sum)
    }

    /// Sensitivity of the discount factor at `t` to each weight.
    ///
    /// Entry `i` is the kernel value of node `i`; the `exp(-ufr * t)` term has
    /// no weight dependence. `nodes` must be ascending.
    ///
    /// Nodes at or before `t` take the left form and later nodes the right
    /// form, the same branch [`discount_factor`](Self::discount_factor) picks
    /// for each node, so the sensitivities dotted with the weights plus
    /// `exp(-ufr * t)` reproduce the discount factor exactly.
    ///
    /// # Errors
    ///
    /// Returns `MathError::SizeMismatch` if `nodes` and `weights` differ in length.
    pub fn discount_factor_weight_sensitivity(
        &self,
        t: f64,
        alpha: f64,
        nodes: &[f64],
        weights: &[f64],
    ) -> MathResult<Vec<f64>> {
        check_sizes(nodes, weights)?;
        debug_assert!(
            nodes.windows(2).all(|pair| pair[0] <= pair[1]),
            "nodes must be ascending"
        );

        let split = split_index(nodes, t);
        let (left, right) = nodes.split_at(split);
        let sensitivity = left
            .iter()
            .map(|&node| self.kernel(t, alpha, node, WilsonBranch::Left))
            .chain(
                right
                    .iter()
                    .map(|&node| self.kernel(t, alpha, node, WilsonBranch::Right)),
            )
            .collect();

        Ok(sensitivity)
    }

    #[inline]
    fn kernel(&self, t: f64, alpha: f64, node: f64, branch: WilsonBranch) -> f64 {
        let scale = (-self.ufr * t).exp();
        match branch {
            WilsonBranch::Right => {
                let alpha_t = alpha * t;
                scale * (alpha_t - (-alpha * node).exp() * alpha_t.sinh())
            }
            WilsonBranch::Left => {
                let alpha_node = alpha * node;
                scale * (alpha_node - (-alpha * t).exp() * alpha_node.sinh())
            }
        }
    }

    #[inline]
    fn kernel_derivative(&self, t: f64, alpha: f64, node: f64, branch: WilsonBranch) -> f64 {
        let scale = (-self.ufr * t).exp();
        let inner = match branch {
            WilsonBranch::Right => alpha * (1.0 - (-alpha * node).exp() * (alpha * t).cosh()),
            WilsonBranch::Left => alpha * (-alpha * t).exp() * (alpha * node).sinh(),
        };
        -self.ufr * self.kernel(t, alpha, node, branch) + scale * inner
    }
}

impl Default for SmithWilsonCurveFunction {
    fn default() -> Self {
        Self::of(DEFAULT_UFR)
    }
}

fn check_sizes(nodes: &[f64], weights: &[f64]) -> MathResult<()> {
    if nodes.len() == weights.len() {
        Ok(())
    } else {
        Err(MathError::size_mismatch(nodes.len(), weights.len()))
    }
}
