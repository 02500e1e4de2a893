/// Actions an observer can take during a continuation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run and return the branch traced so far.
    StopEarly,
}
