use nalgebra::DVector;

use crate::Scalar;

/// A parametrized nonlinear system `F(u, λ)`.
///
/// The residual maps a state vector `u` and a scalar parameter `λ` to a
/// residual vector with the same length as `u`. It is written once against
/// [`Scalar`] so that it can be evaluated with plain numbers, with forward or
/// reverse automatic differentiation, and with complex numbers for
/// complex-step differentiation.
///
/// Complex-step differentiation requires the residual to be analytic: avoid
/// branching on the sign or magnitude of intermediate values.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
///
/// use fcontin_core::{Residual, Scalar};
///
/// /// F(u, λ) = u² − λ
/// struct Parabola;
///
/// impl Residual for Parabola {
///     type Error = Infallible;
///
///     fn residual<T: Scalar>(&self, state: &[T], parameter: T) -> Result<Vec<T>, Infallible> {
///         Ok(state.iter().map(|&u| u * u - parameter).collect())
///     }
/// }
///
/// let r = Parabola.residual(&[2.0], 1.0).unwrap();
/// assert_eq!(r, vec![3.0]);
/// ```
pub trait Residual {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates `F(state, parameter)`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the residual cannot be evaluated.
    fn residual<T: Scalar>(&self, state: &[T], parameter: T) -> Result<Vec<T>, Self::Error>;

    /// Inner product on the state space.
    ///
    /// Drivers use it to normalize tangents and to measure residuals. The
    /// default is the unweighted dot product. Override it to weight by a
    /// discretization measure, e.g. the mesh width of a discretized PDE.
    fn inner(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        a.dot(b)
    }
}

impl<R: Residual + ?Sized> Residual for &R {
    type Error = R::Error;

    fn residual<T: Scalar>(&self, state: &[T], parameter: T) -> Result<Vec<T>, Self::Error> {
        (**self).residual(state, parameter)
    }

    fn inner(&self, a: &DVector<f64>, b: &DVector<f64>) -> f64 {
        (**self).inner(a, b)
    }
}
