use nalgebra::DVector;

/// A point `(u, λ)` on a solution branch.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub state: DVector<f64>,
    pub parameter: f64,
}

impl Point {
    #[must_use]
    pub fn new(state: DVector<f64>, parameter: f64) -> Self {
        Self { state, parameter }
    }
}
