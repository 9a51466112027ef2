//! Fallible asynchronous sequences.
//!
//! [`AsyncSequence`] mirrors [`Sequence`](crate::Sequence), except that advancing
//! a step returns a future. Two builders cover the common sources:
//!
//! - [`unfold`] threads an owned state through an async closure, one step at a time
//! - [`from_stream`] adapts a [`Stream`] of `Result`s
//!
//! ```rust
//! use futures::executor::block_on;
//! use trydo::{Step, async_sequence::{self, AsyncSequence}};
//!
//! let mut seq = async_sequence::unfold(0u32, |total: u32, add: u32| async move {
//!     let total = total + add;
//!     let step = if total < 10 { Ok(Step::Yielded(total)) } else { Ok(Step::Complete(total)) };
//!     (total, step)
//! });
//!
//! block_on(async {
//!     assert_eq!(seq.next(4).await, Ok::<_, ()>(Step::Yielded(4)));
//!     assert_eq!(seq.next(7).await, Ok(Step::Complete(11)));
//! });
//! ```

use std::{future::Future, pin::Pin};

use either::Either;
use futures::{Stream, StreamExt, future::BoxFuture};

use crate::step::Step;

/// An asynchronous sequence that yields elements, may fail, and returns a final value.
pub trait AsyncSequence<I = ()> {
    type Yield;
    type Return;
    type Error;

    /// Advance by one step, forwarding `input` to the resumption point.
    fn next<'a>(
        &'a mut self,
        input: I,
    ) -> BoxFuture<'a, Result<Step<Self::Yield, Self::Return>, Self::Error>>
    where
        I: 'a;
}

impl<I, S> AsyncSequence<I> for &'_ mut S
where
    S: AsyncSequence<I> + ?Sized,
{
    type Yield = S::Yield;
    type Return = S::Return;
    type Error = S::Error;

    fn next<'a>(
        &'a mut self,
        input: I,
    ) -> BoxFuture<'a, Result<Step<Self::Yield, Self::Return>, Self::Error>>
    where
        I: 'a,
    {
        (**self).next(input)
    }
}

impl<I, S> AsyncSequence<I> for Box<S>
where
    S: AsyncSequence<I> + ?Sized,
{
    type Yield = S::Yield;
    type Return = S::Return;
    type Error = S::Error;

    fn next<'a>(
        &'a mut self,
        input: I,
    ) -> BoxFuture<'a, Result<Step<Self::Yield, Self::Return>, Self::Error>>
    where
        I: 'a,
    {
        (**self).next(input)
    }
}

impl<I, L, R> AsyncSequence<I> for Either<L, R>
where
    L: AsyncSequence<I>,
    R: AsyncSequence<I, Yield = L::Yield, Return = L::Return, Error = L::Error>,
{
    type Yield = L::Yield;
    type Return = L::Return;
    type Error = L::Error;

    fn next<'a>(
        &'a mut self,
        input: I,
    ) -> BoxFuture<'a, Result<Step<Self::Yield, Self::Return>, Self::Error>>
    where
        I: 'a,
    {
        match self {
            Either::Left(l) => l.next(input),
            Either::Right(r) => r.next(input),
        }
    }
}

/// Sequence driven by an async closure over an owned state.
///
/// Created by [`unfold`].
pub struct Unfold<T, F, Fut> {
    state: Option<T>,
    pending: Option<Pin<Box<Fut>>>,
    f: F,
}

/// Create a sequence that hands its state and the step input to `f` on every step.
///
/// `f` returns a future resolving to the next state and the step result. The
/// state is moved into the future and put back once it resolves. The step future
/// is owned by the sequence, so dropping the future returned by
/// [`next`](AsyncSequence::next) before it resolves does not lose the state: the
/// following call resumes that step, and the input passed to it is discarded since
/// the interrupted step already took its own.
///
/// # Panics
///
/// Stepping again after `f` itself panicked panics, since the state went with it.
pub fn unfold<T, I, F, Fut>(init: T, f: F) -> Unfold<T, F, Fut>
where
    F: FnMut(T, I) -> Fut,
{
    Unfold {
        state: Some(init),
        pending: None,
        f,
    }
}

impl<I, T, F, Fut, Y, R, E> AsyncSequence<I> for Unfold<T, F, Fut>
where
    T: Send,
    F: FnMut(T, I) -> Fut + Send,
    Fut: Future<Output = (T, Result<Step<Y, R>, E>)> + Send,
{
    type Yield = Y;
    type Return = R;
    type Error = E;

    fn next<'a>(&'a mut self, input: I) -> BoxFuture<'a, Result<Step<Y, R>, E>>
    where
        I: 'a,
    {
        let Self { state, pending, f } = self;
        match state.take() {
            Some(value) => {
                // A panic in `f` must not leave the finished step behind.
                *pending = None;
                *pending = Some(Box::pin(f(value, input)));
            }
            None => tracing::debug!("resuming a step whose future was dropped before it resolved"),
        }
        let Some(step) = pending.as_mut() else {
            panic!("`Unfold` stepped after its closure panicked");
        };
        Box::pin(async move {
            let (value, result) = step.as_mut().await;
            *state = Some(value);
            result
        })
    }
}

/// Sequence over a stream of results. Completes with `()` when the stream ends.
pub struct FromStream<St>(St);

/// Create a sequence from a [`Stream`] of `Result`s.
pub fn from_stream<St>(stream: St) -> FromStream<St> {
    FromStream(stream)
}

impl<Y, E, St> AsyncSequence<()> for FromStream<St>
where
    St: Stream<Item = Result<Y, E>> + Unpin + Send,
{
    type Yield = Y;
    type Return = ();
    type Error = E;

    fn next<'a>(&'a mut self, (): ()) -> BoxFuture<'a, Result<Step<Y, ()>, E>>
    where
        (): 'a,
    {
        Box::pin(async move {
            match self.0.next().await {
                Some(item) => item.map(Step::Yielded),
                None => Ok(Step::Complete(())),
            }
        })
    }
}
