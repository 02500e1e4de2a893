use nalgebra::{DMatrix, DVector};

use crate::Error;

/// Solves `matrix · x = rhs` by LU decomposition with partial pivoting.
///
/// The matrix counts as singular when its smallest pivot is at most
/// `pivot_tolerance` times its largest, or when the solution is not finite.
/// Takes the matrix by value; the factorization overwrites it.
pub(crate) fn lu_solve(
    matrix: DMatrix<f64>,
    rhs: &DVector<f64>,
    pivot_tolerance: f64,
) -> Result<DVector<f64>, Error> {
    let lu = matrix.lu();

    let (smallest, largest) = lu
        .u()
        .diagonal()
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), pivot| {
            (lo.min(pivot.abs()), hi.max(pivot.abs()))
        });
    if smallest.is_nan() || smallest <= pivot_tolerance * largest {
        return Err(Error::SingularJacobian);
    }

    let x = lu.solve(rhs).ok_or(Error::SingularJacobian)?;

    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(Error::SingularJacobian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const TOL: f64 = 4.0 * f64::EPSILON;

    #[test]
    fn solves_nonsingular_system() {
        let m = DMatrix::from_row_slice(3, 3, &[4.0, -2.0, 1.0, -2.0, 4.0, -2.0, 1.0, -2.0, 4.0]);
        let b = DVector::from_vec(vec![11.0, -16.0, 17.0]);

        let x = lu_solve(m.clone(), &b, TOL).expect("nonsingular");

        assert_relative_eq!(m * x, b, epsilon = 1e-12);
    }

    #[test]
    fn needs_pivoting() {
        let m = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        let b = DVector::from_vec(vec![2.0, 3.0]);

        let x = lu_solve(m, &b, TOL).expect("permutation matrix");

        assert_relative_eq!(x, DVector::from_vec(vec![3.0, 2.0]));
    }

    #[test]
    fn rejects_singular_matrix() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![1.0, 1.0]);

        assert!(matches!(lu_solve(m, &b, TOL), Err(Error::SingularJacobian)));
    }

    #[test]
    fn rejects_zero_matrix() {
        let m = DMatrix::zeros(1, 1);
        let b = DVector::from_vec(vec![1.0]);

        assert!(matches!(lu_solve(m, &b, TOL), Err(Error::SingularJacobian)));
    }

    #[test]
    fn rejects_rank_deficiency_hidden_by_rounding() {
        // Second row is three times the first up to noise of order 1e-11.
        let m = DMatrix::from_row_slice(2, 2, &[0.1, 0.2, 0.3, 0.6 + 3e-11]);
        let b = DVector::from_vec(vec![-1.0, -1.0]);

        assert!(lu_solve(m.clone(), &b, TOL).is_ok());
        assert!(matches!(lu_solve(m, &b, 1e-8), Err(Error::SingularJacobian)));
    }

    #[test]
    fn well_conditioned_matrix_passes_loose_tolerance() {
        let m = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![3.0, 4.0]);

        let x = lu_solve(m, &b, 1e-8).expect("well conditioned");
        assert_relative_eq!(x, DVector::from_vec(vec![1.0, 1.0]), epsilon = 1e-12);
    }
}
