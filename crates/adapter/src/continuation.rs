use fcontin_core::{Observer, Residual};
use fcontin_solvers::{Action, Event, Solution, euler_newton, natural};
use nalgebra::DVector;

use crate::{Config, ContinuationMethod, Error, ProblemAdapter};

/// A continuation run: a [`ProblemAdapter`] plus the settings forwarded to
/// the driver.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
///
/// use fcontin_adapter::{Config, Continuation, ContinuationMethod};
/// use fcontin_core::{Residual, Scalar};
/// use nalgebra::DVector;
///
/// /// F(u, λ) = u² − λ
/// struct Parabola;
///
/// impl Residual for Parabola {
///     type Error = Infallible;
///
///     fn residual<T: Scalar>(&self, u: &[T], lambda: T) -> Result<Vec<T>, Infallible> {
///         Ok(vec![u[0] * u[0] - lambda])
///     }
/// }
///
/// let config = Config {
///     continuation_method: ContinuationMethod::Natural,
///     ..Config::default()
/// };
/// let mut run = Continuation::new(Parabola, DVector::from_vec(vec![1.0]), 1.0, config)?;
/// let solution = run.solve_unobserved()?;
///
/// for point in &solution.branch {
///     assert!((point.state[0].powi(2) - point.parameter).abs() < 1e-9);
/// }
/// # Ok::<(), fcontin_adapter::Error>(())
/// ```
#[derive(Debug)]
pub struct Continuation<R> {
    adapter: ProblemAdapter<R>,
    config: Config,
}

impl<R: Residual> Continuation<R> {
    /// Validates `config` and builds the adapter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for out-of-range driver settings or
    /// [`Error::EmptyState`] for an empty initial state.
    pub fn new(
        residual: R,
        initial_state: DVector<f64>,
        initial_parameter: f64,
        config: Config,
    ) -> Result<Self, Error> {
        config.validate()?;
        let adapter = ProblemAdapter::new(
            residual,
            initial_state,
            initial_parameter,
            config.differentiation_mode,
        )?;

        Ok(Self { adapter, config })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn adapter(&self) -> &ProblemAdapter<R> {
        &self.adapter
    }

    /// Mutable access for callers that drive the adapter themselves.
    pub fn adapter_mut(&mut self) -> &mut ProblemAdapter<R> {
        &mut self.adapter
    }

    #[must_use]
    pub fn into_adapter(self) -> ProblemAdapter<R> {
        self.adapter
    }

    /// Runs the configured continuation driver.
    ///
    /// The observer is handed to the driver untouched and sees one [`Event`]
    /// per accepted point.
    ///
    /// # Errors
    ///
    /// Adapter failures are returned as they occurred (e.g.
    /// [`Error::SingularJacobian`]); failures of the driver itself are
    /// wrapped in [`Error::Driver`].
    pub fn solve<Obs>(&mut self, observer: Obs) -> Result<Solution, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let driver = self.config.driver_config();
        let result = match self.config.continuation_method {
            ContinuationMethod::EulerNewton => {
                euler_newton::solve(&mut self.adapter, &driver, observer)
            }
            ContinuationMethod::Natural => natural::solve(&mut self.adapter, &driver, observer),
        };

        result.map_err(|err| match err {
            fcontin_solvers::Error::Problem(err) => err,
            other => Error::Driver(Box::new(other)),
        })
    }

    /// Runs the configured continuation driver without observation.
    ///
    /// # Errors
    ///
    /// See [`Self::solve`].
    pub fn solve_unobserved(&mut self) -> Result<Solution, Error> {
        self.solve(())
    }
}
