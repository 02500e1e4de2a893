/// Receives continuation events and decides how the run should proceed.
///
/// Observers are the progress callback of a continuation run. A driver calls
/// [`Observer::observe`] once per accepted point and never inspects what the
/// observer does with the event, so observers can record a branch, print
/// progress, or stop the run.
///
/// Returning `Some(action)` requests a driver-specific action and `None` lets
/// the driver continue unchanged.
///
/// Closures automatically implement `Observer`, and `()` is the no-op observer.
pub trait Observer<E, A> {
    /// Observes a driver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
