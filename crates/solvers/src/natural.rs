//! Natural-parameter continuation.
//!
//! Steps the parameter by a fixed amount and corrects the state with Newton's
//! method, using the previous state as the initial guess:
//!
//! ```text
//! λ_{k+1} = λ_k + Δλ
//! F(u_{k+1}, λ_{k+1}) = 0
//! ```
//!
//! The parameter is monotone along the traced branch, so the run cannot pass
//! a fold. Use [`euler_newton`](crate::euler_newton) for that.

use fcontin_core::{ContinuationProblem, Observer};
use log::debug;

use crate::corrector::{halve_step, initial_point, newton};
use crate::{Action, Config, Error, Event, Point, Solution, Status};

/// Traces a branch by natural-parameter continuation.
///
/// # Algorithm
///
/// 1. Correct the initial state at the initial parameter and emit it as
///    step 0.
/// 2. Until `config.max_steps` steps are accepted:
///    - Set `λ = λ_k + Δλ` and run Newton from `u_k`.
///    - On convergence, accept the point and emit an [`Event`].
///    - Otherwise halve `Δλ` and retry.
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
    let mut step = 0;

    while step < config.max_steps {
        let lambda = current.parameter + step_size;
        let corrected =
            newton(problem, current.state.clone(), lambda, config).map_err(Error::Problem)?;

        let Some((state, newton_iters)) = corrected else {
            step_size = halve_step(step_size, current.parameter, config)?;
            continue;
        };

        step += 1;
        current = Point::new(state, lambda);
        branch.push(current.clone());
        debug!("natural step {step}: λ = {lambda} after {newton_iters} Newton iterations");

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

/// Traces a branch by natural-parameter continuation without observation.
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
