use thiserror::Error;

/// Configuration shared by the continuation drivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Number of steps to take after the initial point.
    pub max_steps: usize,

    /// The corrector stops once `sqrt(norm2_r(F)) < newton_tol`.
    pub newton_tol: f64,

    /// Corrector iterations allowed per point.
    pub max_newton_iters: usize,

    /// Initial step length. Negative values continue towards smaller `λ`.
    pub step_size: f64,

    /// Smallest step length reached by halving before a run fails.
    pub min_step: f64,
}

/// Errors that can occur when validating a driver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_steps must be at least 1")]
    MaxSteps,

    #[error("newton_tol must be finite and positive")]
    NewtonTol,

    #[error("max_newton_iters must be at least 1")]
    MaxNewtonIters,

    #[error("step_size must be finite and at least min_step in magnitude")]
    StepSize,

    #[error("min_step must be finite and positive")]
    MinStep,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_steps: 10,
            newton_tol: 1e-10,
            max_newton_iters: 20,
            step_size: 0.1,
            min_step: 1e-8,
        }
    }
}

impl Config {
    /// Checks that every setting is in range.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == 0 {
            return Err(ConfigError::MaxSteps);
        }
        if !self.newton_tol.is_finite() || self.newton_tol <= 0.0 {
            return Err(ConfigError::NewtonTol);
        }
        if self.max_newton_iters == 0 {
            return Err(ConfigError::MaxNewtonIters);
        }
        if !self.min_step.is_finite() || self.min_step <= 0.0 {
            return Err(ConfigError::MinStep);
        }
        if !self.step_size.is_finite() || self.step_size.abs() < self.min_step {
            return Err(ConfigError::StepSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn negative_step_is_allowed() {
        let config = Config {
            step_size: -0.5,
            ..Config::default()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_settings() {
        let base = Config::default();

        let cases = [
            (Config { max_steps: 0, ..base }, ConfigError::MaxSteps),
            (Config { newton_tol: 0.0, ..base }, ConfigError::NewtonTol),
            (Config { newton_tol: f64::NAN, ..base }, ConfigError::NewtonTol),
            (Config { max_newton_iters: 0, ..base }, ConfigError::MaxNewtonIters),
            (Config { min_step: -1.0, ..base }, ConfigError::MinStep),
            (Config { step_size: 1e-9, ..base }, ConfigError::StepSize),
            (Config { step_size: f64::INFINITY, ..base }, ConfigError::StepSize),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected), "{config:?}");
        }
    }
}
