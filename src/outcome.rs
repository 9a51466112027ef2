//! The `(error, value)` pair every captured result is reshaped into.
//!
//! An [`Outcome`] always has exactly one meaningful side. Destructuring it with
//! [`Outcome::into_tuple`] gives `(None, Some(value))` on success and
//! `(Some(error), None)` on failure, so a caller checks the first slot and never
//! sees a stale value next to an error.
//!
//! ```rust
//! use trydo::Outcome;
//!
//! let (err, value) = Outcome::<&str, i32>::ok(7).into_tuple();
//! assert_eq!(err, None);
//! assert_eq!(value, Some(7));
//!
//! let (err, value) = Outcome::<&str, i32>::err("boom").into_tuple();
//! assert_eq!(err, Some("boom"));
//! assert_eq!(value, None);
//! ```

/// A captured result: either an error or a value, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "an outcome may carry an error that should be inspected"]
pub struct Outcome<E, V>(Result<V, E>);

impl<E, V> Outcome<E, V> {
    /// A successful outcome, `(None, value)`.
    #[inline]
    pub const fn ok(value: V) -> Self {
        Outcome(Ok(value))
    }

    /// A failed outcome, `(error, None)`.
    #[inline]
    pub const fn err(error: E) -> Self {
        Outcome(Err(error))
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.0.is_ok()
    }

    #[inline]
    pub const fn is_err(&self) -> bool {
        self.0.is_err()
    }

    /// The error slot.
    #[inline]
    pub fn error(&self) -> Option<&E> {
        self.0.as_ref().err()
    }

    /// The value slot. Always `None` when [`error`](Self::error) is set.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.0.as_ref().ok()
    }

    /// Split into the `(error, value)` pair.
    #[inline]
    pub fn into_tuple(self) -> (Option<E>, Option<V>) {
        match self.0 {
            Ok(value) => (None, Some(value)),
            Err(error) => (Some(error), None),
        }
    }

    #[inline]
    pub fn into_result(self) -> Result<V, E> {
        self.0
    }

    #[inline]
    pub fn as_ref(&self) -> Outcome<&E, &V> {
        Outcome(self.0.as_ref())
    }

    /// Maps the value slot, leaving an error untouched.
    ///
    /// ```rust
    /// use trydo::Outcome;
    ///
    /// let doubled = Outcome::<(), i32>::ok(21).map(|v| v * 2);
    /// assert_eq!(doubled.value(), Some(&42));
    /// ```
    #[inline]
    pub fn map<V2, F>(self, f: F) -> Outcome<E, V2>
    where
        F: FnOnce(V) -> V2,
    {
        Outcome(self.0.map(f))
    }

    /// Maps the error slot, leaving a value untouched.
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Outcome<E2, V>
    where
        F: FnOnce(E) -> E2,
    {
        Outcome(self.0.map_err(f))
    }
}

impl<E, V> From<Result<V, E>> for Outcome<E, V> {
    #[inline]
    fn from(result: Result<V, E>) -> Self {
        Outcome(result)
    }
}

impl<E, V> From<Outcome<E, V>> for Result<V, E> {
    #[inline]
    fn from(outcome: Outcome<E, V>) -> Self {
        outcome.0
    }
}

impl<E, V> From<Outcome<E, V>> for (Option<E>, Option<V>) {
    #[inline]
    fn from(outcome: Outcome<E, V>) -> Self {
        outcome.into_tuple()
    }
}
