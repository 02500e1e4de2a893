use nalgebra::{DMatrix, DVector};

/// The operations a continuation driver needs from a problem.
///
/// A driver traces solutions of `F(u, λ) = 0` by calling these methods
/// repeatedly. Derivative methods take `&mut self` so implementations can
/// cache what they compute; drivers call one method at a time and never share
/// a problem across runs.
pub trait ContinuationProblem {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The state the run starts from.
    fn initial_state(&self) -> &DVector<f64>;

    /// The parameter value the run starts from.
    fn initial_parameter(&self) -> f64;

    /// Evaluates the residual `F(u, λ)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual cannot be evaluated.
    fn f(&mut self, u: &DVector<f64>, lambda: f64) -> Result<DVector<f64>, Self::Error>;

    /// Returns the Jacobian `∂F/∂u` at `(u, λ)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Jacobian cannot be computed.
    fn jac(&mut self, u: &DVector<f64>, lambda: f64) -> Result<&DMatrix<f64>, Self::Error>;

    /// Returns the parameter derivative `∂F/∂λ` at `(u, λ)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn df_dlambda(&mut self, u: &DVector<f64>, lambda: f64) -> Result<&DVector<f64>, Self::Error>;

    /// Solves `∂F/∂u (u, λ) · x = rhs` for `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the Jacobian is singular or the solve fails.
    fn jacobian_solver(
        &mut self,
        u: &DVector<f64>,
        lambda: f64,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, Self::Error>;

    /// Inner product on the state space.
    ///
    /// The default is the unweighted dot product. Override it to weight by a
    /// discretization measure, e.g. the mesh width of a discretized PDE.
    fn inner(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        a.dot(b)
    }

    /// Squared norm in the range space, used to test corrector convergence.
    ///
    /// This is `inner(a, a)` with no square root.
    fn norm2_r(&self, a: &DVector<f64>) -> f64 {
        self.inner(a, a)
    }
}
