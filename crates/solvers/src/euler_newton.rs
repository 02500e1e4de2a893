//! Pseudo-arclength continuation with an Euler predictor and a Newton
//! corrector.
//!
//! Each step predicts along the unit tangent of the branch and corrects on
//! the hyperplane orthogonal to it:
//!
//! ```text
//! predictor:  (u_p, λ_p) = (u_k, λ_k) + Δs·(t_u, t_λ)
//! corrector:  F(u, λ) = 0
//!             ⟨t_u, u − u_p⟩ + t_λ·(λ − λ_p) = 0
//! ```
//!
//! The bordered corrector system stays regular at simple folds, so the run
//! can turn around them. Only `F`, its derivatives, and solves with `∂F/∂u`
//! are needed; the bordered system is eliminated with two solves per
//! iteration.

use fcontin_core::{ContinuationProblem, Observer};
use log::debug;
use nalgebra::DVector;

use crate::corrector::{halve_step, initial_point};
use crate::{Action, Config, Error, Event, Point, Solution, Status};

/// Unit tangent `(t_u, t_λ)` of a branch.
#[derive(Debug, Clone)]
struct Tangent {
    state: DVector<f64>,
    parameter: f64,
}

impl Tangent {
    /// Computes the tangent at `point` from `∂F/∂u · z = −∂F/∂λ`.
    ///
    /// The result is normalized with the problem's inner product and, given
    /// a `previous` tangent, oriented to continue in the same direction.
    fn at<P: ContinuationProblem>(
        problem: &mut P,
        point: &Point,
        previous: Option<&Tangent>,
    ) -> Result<Self, P::Error> {
        let dfdl = problem.df_dlambda(&point.state, point.parameter)?.clone();
        let z = problem.jacobian_solver(&point.state, point.parameter, &(-dfdl))?;

        let norm = (problem.inner(&z, &z) + 1.0).sqrt();
        let mut tangent = Self {
            state: z / norm,
            parameter: 1.0 / norm,
        };

        if let Some(previous) = previous {
            let alignment = problem.inner(&tangent.state, &previous.state)
                + tangent.parameter * previous.parameter;
            if alignment < 0.0 {
                tangent.state *= -1.0;
                tangent.parameter = -tangent.parameter;
            }
        }

        Ok(tangent)
    }
}

/// Traces a branch by pseudo-arclength continuation.
///
/// # Algorithm
///
/// 1. Correct the initial state at the initial parameter and emit it as
///    step 0.
/// 2. Until `config.max_steps` steps are accepted:
///    - Compute the unit tangent at the current point, oriented along the
///      previous one. The first tangent points towards increasing `λ`, so a
///      negative `config.step_size` starts towards decreasing `λ`.
///    - Predict `Δs` along the tangent and correct with Newton on the
///      bordered system.
///    - On convergence, accept the point and emit an [`Event`].
///    - Otherwise halve `Δs` and retry from the same point.
/// 3. Return the accepted branch.
///
/// # Observer
///
/// The observer receives an [`Event`] per accepted point and may return
/// [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Returns an error if the config is invalid, the initial point does not
/// converge, the step falls below `config.min_step`, or the problem fails.
pub fn solve<P, Obs>(
    problem: &mut P,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error<P::Error>>
where
    P: ContinuationProblem,
    Obs: Observer<Event, Action>,
{
    config.validate()?;

    let (mut current, newton_iters) = initial_point(problem, config)?;
    let mut branch = vec![current.clone()];

    let event = Event {
        step: 0,
        point: current.clone(),
        step_size: 0.0,
        newton_iters,
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            branch,
            steps: 0,
        });
    }

    let mut step_size = config.step_size;
    let mut tangent: Option<Tangent> = None;
    let mut step = 0;

    while step < config.max_steps {
        let direction =
            Tangent::at(problem, &current, tangent.as_ref()).map_err(Error::Problem)?;

        let corrected = loop {
            let predicted = Point::new(
                &current.state + &direction.state * step_size,
                current.parameter + direction.parameter * step_size,
            );

            match correct(problem, predicted, &direction, config).map_err(Error::Problem)? {
                Some(corrected) => break corrected,
                None => step_size = halve_step(step_size, current.parameter, config)?,
            }
        };

        let (point, newton_iters) = corrected;
        step += 1;
        current = point;
        tangent = Some(direction);
        branch.push(current.clone());
        debug!(
            "Euler-Newton step {step}: λ = {} after {newton_iters} Newton iterations",
            current.parameter
        );

        let event = Event {
            step,
            point: current.clone(),
            step_size,
            newton_iters,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                branch,
                steps: step,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        branch,
        steps: step,
    })
}

/// Traces a branch by pseudo-arclength continuation without observation.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<P: ContinuationProblem>(
    problem: &mut P,
    config: &Config,
) -> Result<Solution, Error<P::Error>> {
    solve(problem, config, ())
}

/// Runs Newton on the bordered system from `predicted`.
///
/// Each iteration solves
///
/// ```text
/// [ J    F_λ ] [du]   [−F]
/// [ t_uᵀ t_λ ] [dλ] = [−g]
/// ```
///
/// with `a = J⁻¹F`, `b = J⁻¹F_λ`, `dλ = (⟨t_u, a⟩ − g) / (t_λ − ⟨t_u, b⟩)`
/// and `du = −a − dλ·b`.
fn correct<P: ContinuationProblem>(
    problem: &mut P,
    predicted: Point,
    tangent: &Tangent,
    config: &Config,
) -> Result<Option<(Point, usize)>, P::Error> {
    let mut u = predicted.state.clone();
    let mut lambda = predicted.parameter;

    for iter in 0..=config.max_newton_iters {
        let r = problem.f(&u, lambda)?;
        let norm = problem.norm2_r(&r).sqrt();

        if !norm.is_finite() {
            return Ok(None);
        }
        if norm < config.newton_tol {
            return Ok(Some((Point::new(u, lambda), iter)));
        }
        if iter == config.max_newton_iters {
            break;
        }

        let g = problem.inner(&tangent.state, &(&u - &predicted.state))
            + tangent.parameter * (lambda - predicted.parameter);

        let a = problem.jacobian_solver(&u, lambda, &r)?;
        let dfdl = problem.df_dlambda(&u, lambda)?.clone();
        let b = problem.jacobian_solver(&u, lambda, &dfdl)?;

        let dlambda = (problem.inner(&tangent.state, &a) - g)
            / (tangent.parameter - problem.inner(&tangent.state, &b));
        if !dlambda.is_finite() {
            return Ok(None);
        }

        u -= a + b * dlambda;
        lambda += dlambda;
    }

    Ok(None)
}
