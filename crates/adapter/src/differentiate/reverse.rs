use std::cell::Cell;

use echidna::Reverse64;
use nalgebra::DMatrix;

use crate::Error;

use super::{Differentiate, VectorFunction};

/// Reverse-mode automatic differentiation with `echidna` tape variables.
///
/// Each output row is one recording plus one backward sweep, so the cost
/// scales with the number of outputs rather than inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReverseMode;

impl Differentiate for ReverseMode {
    fn jacobian<G: VectorFunction>(&self, g: &G, x: &[f64]) -> Result<DMatrix<f64>, Error> {
        let mut jac = DMatrix::zeros(g.outputs(), x.len());

        for row in 0..g.outputs() {
            let failure = Cell::new(None);
            let gradient = echidna::grad(
                |inputs: &[Reverse64]| match g.call(inputs) {
                    Ok(values) => values[row],
                    Err(err) => {
                        failure.set(Some(err));
                        inputs[0]
                    }
                },
                x,
            );

            if let Some(err) = failure.into_inner() {
                return Err(err);
            }
            for (column, partial) in gradient.into_iter().enumerate() {
                jac[(row, column)] = partial;
            }
        }

        Ok(jac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::differentiate::test_utils::{Coupled, coupled_state_jacobian};
    use crate::differentiate::{ParameterSlice, StateSlice};

    #[test]
    fn rows_match_closed_form() {
        let u = [1.1, 0.4];
        let slice = StateSlice::new(&Coupled, 0.3, 2);

        let jac = ReverseMode.jacobian(&slice, &u).expect("smooth residual");

        assert_relative_eq!(jac, coupled_state_jacobian(u, 0.3), epsilon = 1e-12);
    }

    #[test]
    fn vanishing_partial_gives_zero_entry() {
        // ∂F₀/∂λ = −1 and ∂F₁/∂λ = u₁³ = 0 at u₁ = 0.
        let u = [0.5, 0.0];
        let slice = ParameterSlice::new(&Coupled, &u);

        let jac = ReverseMode.jacobian(&slice, &[2.0]).expect("smooth residual");

        assert_relative_eq!(jac[(0, 0)], -1.0);
        assert_relative_eq!(jac[(1, 0)], 0.0);
    }
}
