//! Pieces shared by both drivers: the fixed-parameter Newton corrector,
//! initial-point correction, and step halving.

use fcontin_core::ContinuationProblem;
use log::{debug, warn};
use nalgebra::DVector;

use crate::{Config, Error, Point};

/// Runs Newton's method on `F(·, λ) = 0` starting from `guess`.
///
/// Returns the converged state and the number of updates taken, or `None` if
/// the iteration did not converge within `config.max_newton_iters` or left
/// the finite range. Problem errors are returned as they are.
pub(crate) fn newton<P: ContinuationProblem>(
    problem: &mut P,
    guess: DVector<f64>,
    lambda: f64,
    config: &Config,
) -> Result<Option<(DVector<f64>, usize)>, P::Error> {
    let mut u = guess;

    for iter in 0..=config.max_newton_iters {
        let r = problem.f(&u, lambda)?;
        let norm = problem.norm2_r(&r).sqrt();

        if !norm.is_finite() {
            return Ok(None);
        }
        if norm < config.newton_tol {
            return Ok(Some((u, iter)));
        }
        if iter == config.max_newton_iters {
            break;
        }

        let du = problem.jacobian_solver(&u, lambda, &(-r))?;
        u += du;
    }

    Ok(None)
}

/// Corrects the problem's initial state at its initial parameter.
pub(crate) fn initial_point<P: ContinuationProblem>(
    problem: &mut P,
    config: &Config,
) -> Result<(Point, usize), Error<P::Error>> {
    let lambda = problem.initial_parameter();
    let guess = problem.initial_state().clone();

    match newton(problem, guess, lambda, config).map_err(Error::Problem)? {
        Some((state, iters)) => {
            debug!("initial point converged in {iters} Newton iterations at λ = {lambda}");
            Ok((Point::new(state, lambda), iters))
        }
        None => Err(Error::InitialPointNotConverged { parameter: lambda }),
    }
}

/// Halves `step` after a failed correction from `parameter`.
///
/// # Errors
///
/// Returns [`Error::StepTooSmall`] once the halved step drops below
/// `config.min_step` in magnitude.
pub(crate) fn halve_step<E>(step: f64, parameter: f64, config: &Config) -> Result<f64, Error<E>> {
    let halved = step / 2.0;
    if halved.abs() < config.min_step {
        return Err(Error::StepTooSmall {
            parameter,
            step: halved,
        });
    }

    warn!("corrector failed from λ = {parameter}, halving step to {halved}");
    Ok(halved)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::test_problems::{no_root, parabola};

    #[test]
    fn newton_converges_on_parabola() {
        let mut problem = parabola(1.5, 2.0);
        let guess = DVector::from_element(1, 1.5);
        let (u, iters) = newton(&mut problem, guess, 2.0, &Config::default())
            .expect("parabola never fails")
            .expect("converges");

        assert_relative_eq!(u[0], 2.0_f64.sqrt(), epsilon = 1e-10);
        assert!(iters > 0);
    }

    #[test]
    fn newton_reports_zero_iterations_at_a_root() {
        let mut problem = parabola(2.0, 4.0);
        let guess = DVector::from_element(1, 2.0);
        let (_, iters) = newton(&mut problem, guess, 4.0, &Config::default())
            .expect("parabola never fails")
            .expect("converges");

        assert_eq!(iters, 0);
    }

    #[test]
    fn newton_gives_up_without_a_root() {
        let mut problem = no_root();
        let guess = DVector::from_element(1, 0.0);
        let result =
            newton(&mut problem, guess, 0.0, &Config::default()).expect("no-root problem never fails");

        assert!(result.is_none());
    }

    #[test]
    fn initial_point_fails_without_a_root() {
        let mut problem = no_root();
        let err = initial_point(&mut problem, &Config::default()).unwrap_err();

        assert!(matches!(err, Error::InitialPointNotConverged { parameter } if parameter == 0.0));
    }

    #[test]
    fn halving_stops_at_min_step() {
        let config = Config {
            min_step: 0.1,
            ..Config::default()
        };

        let halved: f64 = halve_step::<()>(0.4, 1.0, &config).expect("above minimum");
        assert_relative_eq!(halved, 0.2);

        let err = halve_step::<()>(0.15, 1.0, &config).unwrap_err();
        assert!(matches!(err, Error::StepTooSmall { parameter, .. } if parameter == 1.0));
    }
}
