use nalgebra::DMatrix;

use crate::{DifferentiationError, Error};

use super::{Differentiate, VectorFunction};

/// Central finite differences.
///
/// Component `j` is perturbed by `h = relative_step · max(|x_j|, 1)`, so the
/// truncation error is `O(h²)`. The default step is `ε^(1/3)`, which balances
/// truncation against rounding for a second-order scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralDifference {
    pub relative_step: f64,
}

impl Default for CentralDifference {
    fn default() -> Self {
        Self {
            relative_step: f64::EPSILON.cbrt(),
        }
    }
}

impl Differentiate for CentralDifference {
    fn jacobian<G: VectorFunction>(&self, g: &G, x: &[f64]) -> Result<DMatrix<f64>, Error> {
        let mut jac = DMatrix::zeros(g.outputs(), x.len());
        let mut perturbed = x.to_vec();

        for (column, &xj) in x.iter().enumerate() {
            if !xj.is_finite() {
                return Err(DifferentiationError::NonFiniteInput {
                    index: column,
                    value: xj,
                }
                .into());
            }
            let h = self.relative_step * xj.abs().max(1.0);

            perturbed[column] = xj + h;
            let forward = g.call(&perturbed)?;
            perturbed[column] = xj - h;
            let backward = g.call(&perturbed)?;
            perturbed[column] = xj;

            for (row, (f, b)) in forward.iter().zip(&backward).enumerate() {
                let derivative = (f - b) / (2.0 * h);
                if !derivative.is_finite() {
                    return Err(DifferentiationError::NonFiniteDerivative { row, column }.into());
                }
                jac[(row, column)] = derivative;
            }
        }

        Ok(jac)
    }
}
