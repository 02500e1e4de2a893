use fcontin_core::{ContinuationProblem, Residual};
use nalgebra::{DMatrix, DVector};

use crate::cache::CacheSlot;
use crate::differentiate::{Differentiate, ParameterSlice, StateSlice, Strategy, check_length};
use crate::representation::Representation;
use crate::solve::lu_solve;
use crate::{DifferentiationMode, Error, UserFunctionError};

/// Presents a residual function to a continuation driver.
///
/// The adapter owns the residual `F(u, λ)` and derives everything else a
/// driver needs from it: the state Jacobian `∂F/∂u`, the parameter derivative
/// `∂F/∂λ`, linear solves with the Jacobian, and the inner product.
///
/// # Caching
///
/// The most recent Jacobian and the most recent parameter derivative are each
/// cached under the parameter value they were computed at. A request at the
/// same parameter (exact equality) returns the cached value; any other
/// parameter recomputes and overwrites it.
///
/// Both caches are keyed on the parameter alone even though the quantities
/// also depend on the state. A request at the cached parameter but a
/// different state returns the value computed at the earlier state. Drivers
/// that move the state at a fixed parameter (e.g. a natural-parameter
/// corrector) therefore iterate with a frozen Jacobian.
#[derive(Debug)]
pub struct ProblemAdapter<R> {
    residual: R,
    initial_state: DVector<f64>,
    initial_parameter: f64,
    strategy: Strategy,
    representation: Representation,
    state_jacobian: CacheSlot<DMatrix<f64>>,
    parameter_derivative: CacheSlot<DVector<f64>>,
}

impl<R: Residual> ProblemAdapter<R> {
    /// Creates an adapter using the default strategy for `mode`.
    ///
    /// The residual is not evaluated until a driver first asks for it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyState`] if `initial_state` has no components.
    pub fn new(
        residual: R,
        initial_state: DVector<f64>,
        initial_parameter: f64,
        mode: DifferentiationMode,
    ) -> Result<Self, Error> {
        Self::with_strategy(
            residual,
            initial_state,
            initial_parameter,
            Strategy::for_mode(mode),
        )
    }

    /// Creates an adapter with an explicitly configured strategy, e.g. a
    /// custom finite-difference step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyState`] if `initial_state` has no components.
    pub fn with_strategy(
        residual: R,
        initial_state: DVector<f64>,
        initial_parameter: f64,
        strategy: Strategy,
    ) -> Result<Self, Error> {
        if initial_state.is_empty() {
            return Err(Error::EmptyState);
        }

        Ok(Self {
            residual,
            initial_state,
            initial_parameter,
            strategy,
            representation: strategy.mode().representation(),
            state_jacobian: CacheSlot::empty(),
            parameter_derivative: CacheSlot::empty(),
        })
    }

    /// Number of state components.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.initial_state.len()
    }

    /// Returns the differentiation mode.
    #[must_use]
    pub fn mode(&self) -> DifferentiationMode {
        self.strategy.mode()
    }

    /// Returns the differentiation strategy, including its step settings.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns the representation plain residual evaluations use.
    #[must_use]
    pub fn representation(&self) -> Representation {
        self.representation
    }

    /// Returns `true` when residuals are evaluated with plain numbers.
    #[must_use]
    pub fn is_numeric_backend(&self) -> bool {
        self.representation.is_plain()
    }

    /// Returns the wrapped residual function.
    #[must_use]
    pub fn residual(&self) -> &R {
        &self.residual
    }

    /// Evaluates `F(state, parameter)`. Never cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateLength`] for a state of the wrong length, and
    /// [`Error::UserFunction`] if the residual fails or returns a vector of
    /// the wrong length.
    pub fn evaluate(&self, state: &DVector<f64>, parameter: f64) -> Result<DVector<f64>, Error> {
        self.check_state(state)?;

        let values = self
            .representation
            .evaluate(&self.residual, state.as_slice(), parameter)
            .map_err(UserFunctionError::failed)?;

        Ok(DVector::from_vec(check_length(values, self.dimension())?))
    }

    /// Returns `∂F/∂u` at `(state, parameter)`, cached by `parameter`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateLength`], [`Error::UserFunction`], or
    /// [`Error::DifferentiationBackend`] on a cache miss that fails.
    pub fn state_jacobian(
        &mut self,
        state: &DVector<f64>,
        parameter: f64,
    ) -> Result<&DMatrix<f64>, Error> {
        self.check_state(state)?;

        let strategy = &self.strategy;
        let slice = StateSlice::new(&self.residual, parameter, state.len());
        self.state_jacobian
            .get_or_try_insert_with(parameter, || strategy.jacobian(&slice, state.as_slice()))
    }

    /// Returns `∂F/∂λ` at `(state, parameter)`, cached by `parameter` only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateLength`], [`Error::UserFunction`], or
    /// [`Error::DifferentiationBackend`] on a cache miss that fails.
    pub fn parameter_derivative(
        &mut self,
        state: &DVector<f64>,
        parameter: f64,
    ) -> Result<&DVector<f64>, Error> {
        self.check_state(state)?;

        let strategy = &self.strategy;
        let slice = ParameterSlice::new(&self.residual, state.as_slice());
        self.parameter_derivative
            .get_or_try_insert_with(parameter, || {
                let column = strategy.jacobian(&slice, &[parameter])?;
                Ok(column.column(0).into_owned())
            })
    }

    /// Solves `∂F/∂u (state, parameter) · x = rhs`.
    ///
    /// Factorizes a copy of the (possibly cached) Jacobian, leaving the cache
    /// intact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RhsLength`] for a right-hand side of the wrong length,
    /// [`Error::SingularJacobian`] if the Jacobian cannot be factorized, or
    /// any error from [`Self::state_jacobian`].
    pub fn linear_solve(
        &mut self,
        state: &DVector<f64>,
        parameter: f64,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, Error> {
        if rhs.len() != self.dimension() {
            return Err(Error::RhsLength {
                expected: self.dimension(),
                actual: rhs.len(),
            });
        }

        let tolerance = self.strategy.pivot_tolerance(self.dimension());
        let matrix = self.state_jacobian(state, parameter)?.clone();
        lu_solve(matrix, rhs, tolerance)
    }

    /// The residual's inner product, [`Residual::inner`].
    #[must_use]
    pub fn inner_product(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        self.residual.inner(a, b)
    }

    /// `inner_product(a, a)`; no square root is taken.
    #[must_use]
    pub fn norm_squared(&self, a: &DVector<f64>) -> f64 {
        self.inner_product(a, a)
    }

    fn check_state(&self, state: &DVector<f64>) -> Result<(), Error> {
        if state.len() == self.dimension() {
            Ok(())
        } else {
            Err(Error::StateLength {
                expected: self.dimension(),
                actual: state.len(),
            })
        }
    }
}

impl<R: Residual> ContinuationProblem for ProblemAdapter<R> {
    type Error = Error;

    fn initial_state(&self) -> &DVector<f64> {
        &self.initial_state
    }

    fn initial_parameter(&self) -> f64 {
        self.initial_parameter
    }

    fn f(&mut self, u: &DVector<f64>, lambda: f64) -> Result<DVector<f64>, Error> {
        self.evaluate(u, lambda)
    }

    fn jac(&mut self, u: &DVector<f64>, lambda: f64) -> Result<&DMatrix<f64>, Error> {
        self.state_jacobian(u, lambda)
    }

    fn df_dlambda(&mut self, u: &DVector<f64>, lambda: f64) -> Result<&DVector<f64>, Error> {
        self.parameter_derivative(u, lambda)
    }

    fn jacobian_solver(
        &mut self,
        u: &DVector<f64>,
        lambda: f64,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, Error> {
        self.linear_solve(u, lambda, rhs)
    }

    fn inner(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        self.inner_product(a, b)
    }

    fn norm2_r(&self, a: &DVector<f64>) -> f64 {
        self.norm_squared(a)
    }
}
