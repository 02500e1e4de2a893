use crate::Point;

/// Emitted once per accepted point, starting with the corrected initial point
/// at step 0.
#[derive(Debug, Clone)]
pub struct Event {
    /// Number of accepted steps so far.
    pub step: usize,

    /// The accepted point.
    pub point: Point,

    /// Step length used to reach this point.
    pub step_size: f64,

    /// Corrector iterations spent on this point.
    pub newton_iters: usize,
}
