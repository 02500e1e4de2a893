/// A single cached value keyed by a parameter value.
///
/// The slot holds at most one `(key, value)` pair. A lookup with a key equal
/// to the stored one (exact `f64` equality, so NaN never matches) returns the
/// stored value; any other key recomputes and overwrites it.
#[derive(Debug, Clone)]
pub(crate) struct CacheSlot<V> {
    entry: Option<(f64, V)>,
}

impl<V> CacheSlot<V> {
    pub(crate) fn empty() -> Self {
        Self { entry: None }
    }

    /// The key of the stored value, if any.
    #[cfg(test)]
    fn key(&self) -> Option<f64> {
        self.entry.as_ref().map(|(key, _)| *key)
    }

    /// Returns the value stored for `key`, computing and storing it on a miss.
    ///
    /// If `compute` fails the previous entry is left in place.
    #[allow(clippy::float_cmp)]
    pub(crate) fn get_or_try_insert_with<E>(
        &mut self,
        key: f64,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<&V, E> {
        match self.entry.take() {
            Some((cached, value)) if cached == key => Ok(&self.entry.insert((cached, value)).1),
            previous => match compute() {
                Ok(value) => Ok(&self.entry.insert((key, value)).1),
                Err(err) => {
                    self.entry = previous;
                    Err(err)
                }
            },
        }
    }
}
