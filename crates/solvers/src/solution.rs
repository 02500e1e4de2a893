use crate::Point;

/// Indicates why a continuation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Took the configured number of steps.
    Complete,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a continuation run.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Final run status.
    pub status: Status,

    /// Accepted points in order, starting with the corrected initial point.
    pub branch: Vec<Point>,

    /// Number of accepted steps, not counting the initial point.
    pub steps: usize,
}

impl Solution {
    /// The last accepted point.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.branch.last()
    }
}
