use nalgebra::DMatrix;
use num_complex::Complex64;

use crate::{DifferentiationError, Error};

use super::{Differentiate, VectorFunction};

/// Complex-step differentiation.
///
/// `∂g/∂x_j ≈ Im g(x + i·h·e_j) / h`. No difference of nearby values is
/// taken, so `h` can be tiny without cancellation error. Only valid for
/// residuals that are analytic in every component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexStep {
    pub step: f64,
}

impl Default for ComplexStep {
    fn default() -> Self {
        Self { step: 1e-20 }
    }
}

impl Differentiate for ComplexStep {
    fn jacobian<G: VectorFunction>(&self, g: &G, x: &[f64]) -> Result<DMatrix<f64>, Error> {
        let mut jac = DMatrix::zeros(g.outputs(), x.len());
        let mut perturbed: Vec<Complex64> = x.iter().map(|&v| Complex64::new(v, 0.0)).collect();

        for (column, &xj) in x.iter().enumerate() {
            if !xj.is_finite() {
                return Err(DifferentiationError::NonFiniteInput {
                    index: column,
                    value: xj,
                }
                .into());
            }

            perturbed[column].im = self.step;
            let values = g.call(&perturbed)?;
            perturbed[column].im = 0.0;

            for (row, value) in values.iter().enumerate() {
                let derivative = value.im / self.step;
                if !derivative.is_finite() {
                    return Err(DifferentiationError::NonFiniteDerivative { row, column }.into());
                }
                jac[(row, column)] = derivative;
            }
        }

        Ok(jac)
    }
}
