//! Scalar problems with closed-form derivatives.

use fcontin_core::ContinuationProblem;
use nalgebra::{DMatrix, DVector};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub(crate) enum TestError {
    #[error("singular Jacobian")]
    Singular,

    #[error("parameter {0} is outside the domain")]
    OutOfDomain(f64),
}

/// A scalar problem `f(u, λ) = 0` given by its value and partial derivatives.
pub(crate) struct Analytic {
    f: fn(f64, f64) -> f64,
    df_du: fn(f64, f64) -> f64,
    df_dl: fn(f64, f64) -> f64,
    initial_state: DVector<f64>,
    initial_parameter: f64,
    max_parameter: f64,
    jac: DMatrix<f64>,
    dfdl: DVector<f64>,
    pub(crate) evaluations: usize,
}

impl Analytic {
    fn new(
        f: fn(f64, f64) -> f64,
        df_du: fn(f64, f64) -> f64,
        df_dl: fn(f64, f64) -> f64,
        u0: f64,
        lambda0: f64,
    ) -> Self {
        Self {
            f,
            df_du,
            df_dl,
            initial_state: DVector::from_element(1, u0),
            initial_parameter: lambda0,
            max_parameter: f64::INFINITY,
            jac: DMatrix::zeros(1, 1),
            dfdl: DVector::zeros(1),
            evaluations: 0,
        }
    }

    /// Residual evaluations fail beyond `max`.
    pub(crate) fn failing_above(mut self, max: f64) -> Self {
        self.max_parameter = max;
        self
    }

    fn check(&self, lambda: f64) -> Result<(), TestError> {
        if lambda > self.max_parameter {
            Err(TestError::OutOfDomain(lambda))
        } else {
            Ok(())
        }
    }
}

/// `u² − λ`, whose positive branch is `u = √λ`.
pub(crate) fn parabola(u0: f64, lambda0: f64) -> Analytic {
    Analytic::new(|u, l| u * u - l, |u, _| 2.0 * u, |_, _| -1.0, u0, lambda0)
}

/// `u² + λ − 1`, with a fold at `(0, 1)`.
pub(crate) fn fold(u0: f64, lambda0: f64) -> Analytic {
    Analytic::new(|u, l| u * u + l - 1.0, |u, _| 2.0 * u, |_, _| 1.0, u0, lambda0)
}

/// The constant `1`, which has no root.
pub(crate) fn no_root() -> Analytic {
    Analytic::new(|_, _| 1.0, |_, _| 1.0, |_, _| 0.0, 0.0, 0.0)
}

impl ContinuationProblem for Analytic {
    type Error = TestError;

    fn initial_state(&self) -> &DVector<f64> {
        &self.initial_state
    }

    fn initial_parameter(&self) -> f64 {
        self.initial_parameter
    }

    fn f(&mut self, u: &DVector<f64>, lambda: f64) -> Result<DVector<f64>, TestError> {
        self.check(lambda)?;
        self.evaluations += 1;
        Ok(DVector::from_element(1, (self.f)(u[0], lambda)))
    }

    fn jac(&mut self, u: &DVector<f64>, lambda: f64) -> Result<&DMatrix<f64>, TestError> {
        self.check(lambda)?;
        self.jac[(0, 0)] = (self.df_du)(u[0], lambda);
        Ok(&self.jac)
    }

    fn df_dlambda(&mut self, u: &DVector<f64>, lambda: f64) -> Result<&DVector<f64>, TestError> {
        self.check(lambda)?;
        self.dfdl[0] = (self.df_dl)(u[0], lambda);
        Ok(&self.dfdl)
    }

    fn jacobian_solver(
        &mut self,
        u: &DVector<f64>,
        lambda: f64,
        rhs: &DVector<f64>,
    ) -> Result<DVector<f64>, TestError> {
        let slope = self.jac(u, lambda)?[(0, 0)];
        if slope == 0.0 {
            return Err(TestError::Singular);
        }
        Ok(rhs / slope)
    }
}
