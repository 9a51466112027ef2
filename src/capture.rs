//! Fail-stop wrappers that turn fallible results into [`Outcome`]s.
//!
//! - [`Captured`] wraps a [`Sequence`] and is itself an infallible [`Sans`]
//! - [`AsyncCaptured`] wraps an [`AsyncSequence`] and is itself an [`AsyncSans`]
//! - [`settle`] maps a fallible future onto a future of [`Outcome`]
//!
//! Both sequence wrappers are two-state machines: running while they own the
//! underlying sequence, done once they have dropped it. Every step of a running
//! wrapper advances the underlying sequence exactly once and forwards the step
//! input to it unchanged:
//!
//! | underlying step     | wrapper step                                |
//! |---------------------|---------------------------------------------|
//! | `Ok(Yielded(y))`    | `Yielded(Outcome::ok(y))`, still running    |
//! | `Ok(Complete(r))`   | `Complete(Some(Outcome::ok(r)))`, now done  |
//! | `Err(e)`            | `Complete(Some(Outcome::err(e)))`, now done |
//!
//! A done wrapper answers `Complete(None)` and never touches the sequence again,
//! even when the sequence could still be resumed after its failure.

use std::future::Future;

use futures::{
    FutureExt, Stream,
    future::{BoxFuture, Map},
    stream,
};

use crate::{
    async_sequence::AsyncSequence,
    outcome::Outcome,
    sans::{AsyncSans, Sans},
    sequence::Sequence,
    step::Step,
};

/// What a capture wrapper answers on each step.
///
/// `Complete(None)` means the wrapper already delivered its terminal outcome.
pub type Captive<E, Y, R> = Step<Outcome<E, Y>, Option<Outcome<E, R>>>;

fn settle_step<S, E, Y, R>(seq: &mut Option<S>, result: Result<Step<Y, R>, E>) -> Captive<E, Y, R> {
    match result {
        Ok(Step::Yielded(y)) => Step::Yielded(Outcome::ok(y)),
        Ok(Step::Complete(r)) => {
            *seq = None;
            Step::Complete(Some(Outcome::ok(r)))
        }
        Err(e) => {
            tracing::debug!("sequence step failed, stopping the captured sequence");
            *seq = None;
            Step::Complete(Some(Outcome::err(e)))
        }
    }
}

/// A synchronous sequence whose failures are captured as outcomes.
///
/// Created by [`capture`] or by invoking a callable that returns a sequence.
///
/// ```rust
/// use trydo::prelude::*;
///
/// let mut seq = capture(sequence::from_iter(vec![Ok(1), Err("boom"), Ok(3)]));
///
/// assert_eq!(seq.next(()), Step::Yielded(Outcome::ok(1)));
/// assert_eq!(seq.next(()), Step::Complete(Some(Outcome::err("boom"))));
/// assert_eq!(seq.next(()), Step::Complete(None));
/// ```
pub struct Captured<S> {
    seq: Option<S>,
}

/// Wrap a [`Sequence`] so that it never fails and stops after its first failure.
pub fn capture<S>(seq: S) -> Captured<S> {
    Captured { seq: Some(seq) }
}

impl<S> Captured<S> {
    /// `true` once the terminal outcome has been delivered.
    pub fn is_done(&self) -> bool {
        self.seq.is_none()
    }
}

impl<I, S> Sans<I, Outcome<S::Error, S::Yield>> for Captured<S>
where
    S: Sequence<I>,
{
    type Return = Option<Outcome<S::Error, S::Return>>;

    fn next(&mut self, input: I) -> Captive<S::Error, S::Yield, S::Return> {
        let result = match &mut self.seq {
            Some(seq) => seq.next(input),
            None => return Step::Complete(None),
        };
        settle_step(&mut self.seq, result)
    }
}

/// An asynchronous sequence whose failures are captured as outcomes.
///
/// Created by [`capture_async`] or by invoking a callable that returns an async sequence.
pub struct AsyncCaptured<S> {
    seq: Option<S>,
}

/// Wrap an [`AsyncSequence`] so that it never fails and stops after its first failure.
pub fn capture_async<S>(seq: S) -> AsyncCaptured<S> {
    AsyncCaptured { seq: Some(seq) }
}

impl<S> AsyncCaptured<S> {
    /// `true` once the terminal outcome has been delivered.
    pub fn is_done(&self) -> bool {
        self.seq.is_none()
    }

    /// Turn a unit-input wrapper into a stream of its steps.
    ///
    /// The stream yields every element step, then the terminal step, then ends.
    ///
    /// ```rust
    /// use futures::{StreamExt, executor::block_on, stream};
    /// use trydo::prelude::*;
    ///
    /// let seq = capture_async(async_sequence::from_stream(stream::iter(vec![Ok(1), Err("x")])));
    /// let steps: Vec<_> = block_on(seq.into_stream().collect());
    ///
    /// assert_eq!(steps, vec![Step::Yielded(Outcome::ok(1)), Step::Complete(Outcome::err("x"))]);
    /// ```
    pub fn into_stream(
        self,
    ) -> impl Stream<Item = Step<Outcome<S::Error, S::Yield>, Outcome<S::Error, S::Return>>>
    where
        S: AsyncSequence<()> + Send,
        S::Yield: Send,
        S::Return: Send,
        S::Error: Send,
    {
        stream::unfold(self, |mut captured| async move {
            match captured.next(()).await {
                Step::Yielded(outcome) => Some((Step::Yielded(outcome), captured)),
                Step::Complete(Some(outcome)) => Some((Step::Complete(outcome), captured)),
                Step::Complete(None) => None,
            }
        })
    }
}

impl<I, S> AsyncSans<I, Outcome<S::Error, S::Yield>> for AsyncCaptured<S>
where
    I: Send,
    S: AsyncSequence<I> + Send,
    S::Yield: Send,
    S::Return: Send,
    S::Error: Send,
{
    type Return = Option<Outcome<S::Error, S::Return>>;

    fn next<'a>(&'a mut self, input: I) -> BoxFuture<'a, Captive<S::Error, S::Yield, S::Return>>
    where
        I: 'a,
    {
        Box::pin(async move {
            let result = match &mut self.seq {
                Some(seq) => seq.next(input).await,
                None => return Step::Complete(None),
            };
            settle_step(&mut self.seq, result)
        })
    }
}

/// Future returned by [`settle`].
pub type Settle<F, E, V> = Map<F, fn(Result<V, E>) -> Outcome<E, V>>;

/// Map a fallible future onto one that always resolves to an [`Outcome`].
///
/// ```rust
/// use futures::executor::block_on;
/// use trydo::settle;
///
/// let failed = block_on(settle(async { Err::<u8, _>("rejected") }));
/// assert_eq!(failed.into_tuple(), (Some("rejected"), None));
/// ```
pub fn settle<F, E, V>(future: F) -> Settle<F, E, V>
where
    F: Future<Output = Result<V, E>>,
{
    future.map(Outcome::from as fn(Result<V, E>) -> Outcome<E, V>)
}
