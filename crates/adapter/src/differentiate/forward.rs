use nalgebra::DMatrix;
use num_dual::Dual64;

use crate::Error;

use super::{Differentiate, VectorFunction};

/// Forward-mode automatic differentiation with dual numbers.
///
/// Each pass seeds one input with a unit tangent and reads one Jacobian
/// column from the output tangents, so the cost is one evaluation per input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardMode;

impl Differentiate for ForwardMode {
    fn jacobian<G: VectorFunction>(&self, g: &G, x: &[f64]) -> Result<DMatrix<f64>, Error> {
        let mut jac = DMatrix::zeros(g.outputs(), x.len());

        for column in 0..x.len() {
            let seeded: Vec<Dual64> = x
                .iter()
                .enumerate()
                .map(|(i, &v)| Dual64::new(v, if i == column { 1.0 } else { 0.0 }))
                .collect();

            for (row, value) in g.call(&seeded)?.iter().enumerate() {
                jac[(row, column)] = value.eps;
            }
        }

        Ok(jac)
    }
}
