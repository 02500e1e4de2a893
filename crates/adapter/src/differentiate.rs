//! Jacobians of unary vector functions.
//!
//! Every strategy provides the same capability: given `g: ℝᵐ → ℝⁿ` and a
//! point `x`, return the `n × m` Jacobian of `g` at `x`. The adapter builds
//! `g` by holding one argument of the residual fixed (see [`StateSlice`] and
//! [`ParameterSlice`]).

mod central;
mod complex_step;
mod forward;
mod reverse;

pub use central::CentralDifference;
pub use complex_step::ComplexStep;
pub use forward::ForwardMode;
pub use reverse::ReverseMode;

use fcontin_core::{Residual, Scalar};
use nalgebra::DMatrix;

use crate::{DifferentiationMode, Error, UserFunctionError};

/// A vector function that can be evaluated with any [`Scalar`].
pub(crate) trait VectorFunction {
    /// Evaluates the function at `x`.
    ///
    /// Implementations validate the output length, so strategies can index
    /// the result by row without checking.
    fn call<T: Scalar>(&self, x: &[T]) -> Result<Vec<T>, Error>;

    /// Number of outputs.
    fn outputs(&self) -> usize;
}

/// Computes the Jacobian of a [`VectorFunction`].
pub(crate) trait Differentiate {
    fn jacobian<G: VectorFunction>(&self, g: &G, x: &[f64]) -> Result<DMatrix<f64>, Error>;
}

/// The differentiation strategy selected for an adapter.
///
/// Chosen once at construction and never re-dispatched by name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Forward(ForwardMode),
    Reverse(ReverseMode),
    Central(CentralDifference),
    ComplexStep(ComplexStep),
}

impl Strategy {
    /// The strategy for `mode` with default settings.
    #[must_use]
    pub fn for_mode(mode: DifferentiationMode) -> Self {
        match mode {
            DifferentiationMode::Forward => Self::Forward(ForwardMode),
            DifferentiationMode::Reverse => Self::Reverse(ReverseMode),
            DifferentiationMode::Numerical => Self::Central(CentralDifference::default()),
            DifferentiationMode::Complex => Self::ComplexStep(ComplexStep::default()),
        }
    }

    /// The mode this strategy implements.
    #[must_use]
    pub fn mode(&self) -> DifferentiationMode {
        match self {
            Self::Forward(_) => DifferentiationMode::Forward,
            Self::Reverse(_) => DifferentiationMode::Reverse,
            Self::Central(_) => DifferentiationMode::Numerical,
            Self::ComplexStep(_) => DifferentiationMode::Complex,
        }
    }

    /// Relative pivot size below which a Jacobian from this strategy is
    /// treated as singular.
    ///
    /// Exact derivatives leave rounding noise of order `ε` in the pivots.
    /// Central differences leave noise of order `ε^(2/3)`, so a rank-deficient
    /// Jacobian can show pivots far above `ε` and needs the looser `√ε`.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn pivot_tolerance(&self, dimension: usize) -> f64 {
        let scale = dimension.max(1) as f64;
        match self {
            Self::Central(_) => scale * f64::EPSILON.sqrt(),
            Self::Forward(_) | Self::Reverse(_) | Self::ComplexStep(_) => scale * f64::EPSILON,
        }
    }
}

impl Differentiate for Strategy {
    fn jacobian<G: VectorFunction>(&self, g: &G, x: &[f64]) -> Result<DMatrix<f64>, Error> {
        match self {
            Self::Forward(s) => s.jacobian(g, x),
            Self::Reverse(s) => s.jacobian(g, x),
            Self::Central(s) => s.jacobian(g, x),
            Self::ComplexStep(s) => s.jacobian(g, x),
        }
    }
}

/// `x ↦ F(x, λ)` with the parameter held fixed.
pub(crate) struct StateSlice<'a, R> {
    residual: &'a R,
    parameter: f64,
    dimension: usize,
}

impl<'a, R: Residual> StateSlice<'a, R> {
    pub(crate) fn new(residual: &'a R, parameter: f64, dimension: usize) -> Self {
        Self {
            residual,
            parameter,
            dimension,
        }
    }
}

impl<R: Residual> VectorFunction for StateSlice<'_, R> {
    fn call<T: Scalar>(&self, x: &[T]) -> Result<Vec<T>, Error> {
        let values = self
            .residual
            .residual(x, T::from_f64(self.parameter))
            .map_err(UserFunctionError::failed)?;
        check_length(values, self.dimension)
    }

    fn outputs(&self) -> usize {
        self.dimension
    }
}

/// `μ ↦ F(u, μ)` with the state held fixed, as a function of one variable.
pub(crate) struct ParameterSlice<'a, R> {
    residual: &'a R,
    state: &'a [f64],
}

impl<'a, R: Residual> ParameterSlice<'a, R> {
    pub(crate) fn new(residual: &'a R, state: &'a [f64]) -> Self {
        Self { residual, state }
    }
}

impl<R: Residual> VectorFunction for ParameterSlice<'_, R> {
    fn call<T: Scalar>(&self, x: &[T]) -> Result<Vec<T>, Error> {
        let state: Vec<T> = self.state.iter().map(|&v| T::from_f64(v)).collect();
        let values = self
            .residual
            .residual(&state, x[0])
            .map_err(UserFunctionError::failed)?;
        check_length(values, self.state.len())
    }

    fn outputs(&self) -> usize {
        self.state.len()
    }
}

/// Rejects residual outputs whose length differs from the state dimension.
pub(crate) fn check_length<T>(values: Vec<T>, expected: usize) -> Result<Vec<T>, Error> {
    if values.len() == expected {
        Ok(values)
    } else {
        Err(UserFunctionError::WrongLength {
            expected,
            actual: values.len(),
        }
        .into())
    }
}
