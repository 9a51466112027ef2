//! Converting completion-callback style calls into a deferred outcome.
//!
//! Legacy APIs take a completion handle as their last argument and report
//! `(error, ...values)` through it. [`from_callback`] appends a [`Completion`] to
//! the arguments and returns a [`Pending`] future that resolves once the handle
//! is called.
//!
//! ```rust
//! use futures::executor::block_on;
//! use trydo::callback::{CallbackError, Completed, Completion, Lead, from_callback};
//!
//! fn read_config(path: &str, done: Completion<String, String>) {
//!     if path.ends_with(".toml") {
//!         done.call(Lead::Null, vec![format!("contents of {path}")]);
//!     } else {
//!         done.call(Lead::Error(format!("unsupported file: {path}")), vec![]);
//!     }
//! }
//!
//! let loaded = block_on(from_callback(|(path,), done| read_config(path, done), ("app.toml",)));
//! assert_eq!(loaded.into_tuple(), (None, Some(Completed::One("contents of app.toml".to_string()))));
//!
//! let failed = block_on(from_callback(|(path,), done| read_config(path, done), ("app.ini",)));
//! assert!(matches!(failed.error(), Some(CallbackError::Failed(msg)) if msg.contains("app.ini")));
//! ```

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;

use crate::outcome::Outcome;

/// The first argument a legacy completion callback receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lead<E, V> {
    /// No error was reported.
    Null,
    /// An error was reported.
    Error(E),
    /// A non-error value sits where the error would go.
    Value(V),
}

/// The values a completion callback reported on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completed<V> {
    Nothing,
    One(V),
    Many(Vec<V>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallbackError<E> {
    /// The callback reported this error.
    #[error("callback reported an error: {0}")]
    Failed(E),
    /// The completion handle was dropped without being called.
    #[error("completion callback was dropped without being called")]
    Abandoned,
}

/// Apply the legacy `(error, ...values)` rules to one callback invocation.
///
/// A lone non-error first argument counts as the result. Otherwise an error in
/// the first slot wins, and the remaining arguments become the value.
pub fn convert<E, V>(lead: Lead<E, V>, rest: Vec<V>) -> Outcome<E, Completed<V>> {
    match lead {
        Lead::Value(value) if rest.is_empty() => Outcome::ok(Completed::One(value)),
        Lead::Error(error) => Outcome::err(error),
        Lead::Null | Lead::Value(_) => Outcome::ok(completed(rest)),
    }
}

fn completed<V>(mut values: Vec<V>) -> Completed<V> {
    match values.len() {
        0 => Completed::Nothing,
        1 => values.pop().map_or(Completed::Nothing, Completed::One),
        _ => Completed::Many(values),
    }
}

/// Handle passed to a callback-style function to report completion.
///
/// Every method consumes the handle, so completion is reported at most once.
pub struct Completion<E, V> {
    tx: oneshot::Sender<Outcome<E, Completed<V>>>,
}

impl<E, V> Completion<E, V> {
    /// Report completion the legacy way: a first argument, then trailing values.
    pub fn call(self, lead: Lead<E, V>, rest: Vec<V>) {
        self.send(convert(lead, rest));
    }

    pub fn fail(self, error: E) {
        self.send(Outcome::err(error));
    }

    pub fn succeed(self, values: Vec<V>) {
        self.send(Outcome::ok(completed(values)));
    }

    fn send(self, outcome: Outcome<E, Completed<V>>) {
        if self.tx.send(outcome).is_err() {
            tracing::trace!("completion reported after the pending outcome was dropped");
        }
    }
}

/// Future returned by [`from_callback`].
#[must_use = "futures do nothing unless polled"]
pub struct Pending<E, V> {
    rx: oneshot::Receiver<Outcome<E, Completed<V>>>,
}

impl<E, V> Future for Pending<E, V> {
    type Output = Outcome<CallbackError<E>, Completed<V>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome.map_err(CallbackError::Failed)),
            Poll::Ready(Err(oneshot::Canceled)) => {
                tracing::debug!("completion callback dropped without being called");
                Poll::Ready(Outcome::err(CallbackError::Abandoned))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Call `func` with `args` and an appended [`Completion`], returning a future of its outcome.
pub fn from_callback<F, A, E, V>(func: F, args: A) -> Pending<E, V>
where
    F: FnOnce(A, Completion<E, V>),
{
    let (tx, rx) = oneshot::channel();
    func(args, Completion { tx });
    Pending { rx }
}
