use fcontin_core::{Residual, Scalar};
use num_dual::Dual64;

/// The numeric type plain residual evaluations go through.
///
/// Automatic-differentiation modes evaluate with traced numbers so that a
/// residual that cannot be traced fails on the first evaluation rather than
/// the first derivative. Numerical modes evaluate with plain `f64`.
/// Either way the result is projected to `f64` storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Plain,
    Traced,
}

impl Representation {
    /// Returns `true` for the plain `f64` representation.
    #[must_use]
    pub fn is_plain(self) -> bool {
        matches!(self, Self::Plain)
    }

    /// Evaluates `residual` at `(state, parameter)` in this representation.
    pub(crate) fn evaluate<R: Residual>(
        self,
        residual: &R,
        state: &[f64],
        parameter: f64,
    ) -> Result<Vec<f64>, R::Error> {
        match self {
            Self::Plain => residual.residual(state, parameter),
            Self::Traced => {
                let traced: Vec<Dual64> = state
                    .iter()
                    .map(|&v| <Dual64 as Scalar>::from_f64(v))
                    .collect();
                let values = residual.residual(&traced, <Dual64 as Scalar>::from_f64(parameter))?;
                Ok(values.iter().map(|v| v.re).collect())
            }
        }
    }
}
