//! Fallible synchronous sequences.
//!
//! A [`Sequence`] is a resumable computation that is advanced one step at a time,
//! accepts an input on each resumption, and may fail on any step. It is the
//! synchronous shape [`invoke`](crate::invoke) knows how to capture.
//!
//! ```rust
//! use trydo::{Step, sequence::{self, Sequence}};
//!
//! let mut count = 0;
//! let mut seq = sequence::from_fn(move |()| {
//!     count += 1;
//!     match count {
//!         1 => Ok(Step::Yielded(1)),
//!         2 => Err("boom"),
//!         _ => Ok(Step::Complete("unreachable")),
//!     }
//! });
//!
//! assert_eq!(seq.next(()), Ok(Step::Yielded(1)));
//! assert_eq!(seq.next(()), Err("boom"));
//! ```

use either::Either;

use crate::step::Step;

/// A synchronous sequence that yields elements, may fail, and returns a final value.
///
/// The input passed to [`next`](Sequence::next) is the value injected at that
/// resumption point.
pub trait Sequence<I = ()> {
    type Yield;
    type Return;
    type Error;

    fn next(&mut self, input: I) -> Result<Step<Self::Yield, Self::Return>, Self::Error>;

    /// Transform elements before returning them.
    fn map_yield<Y2, F>(self, f: F) -> MapYield<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Yield) -> Y2,
    {
        MapYield { seq: self, f }
    }

    /// Transform the final value when the sequence completes.
    fn map_return<R2, F>(self, f: F) -> MapReturn<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Return) -> R2,
    {
        MapReturn { seq: self, f }
    }
}

impl<I, S> Sequence<I> for &'_ mut S
where
    S: Sequence<I> + ?Sized,
{
    type Yield = S::Yield;
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Result<Step<Self::Yield, Self::Return>, Self::Error> {
        (**self).next(input)
    }
}

impl<I, S> Sequence<I> for Box<S>
where
    S: Sequence<I> + ?Sized,
{
    type Yield = S::Yield;
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Result<Step<Self::Yield, Self::Return>, Self::Error> {
        (**self).next(input)
    }
}

impl<I, L, R> Sequence<I> for Either<L, R>
where
    L: Sequence<I>,
    R: Sequence<I, Yield = L::Yield, Return = L::Return, Error = L::Error>,
{
    type Yield = L::Yield;
    type Return = L::Return;
    type Error = L::Error;

    fn next(&mut self, input: I) -> Result<Step<Self::Yield, Self::Return>, Self::Error> {
        match self {
            Either::Left(l) => l.next(input),
            Either::Right(r) => r.next(input),
        }
    }
}

/// Transforms elements of the wrapped sequence. Failures pass through untouched.
pub struct MapYield<S, F> {
    seq: S,
    f: F,
}

impl<I, Y2, S, F> Sequence<I> for MapYield<S, F>
where
    S: Sequence<I>,
    F: FnMut(S::Yield) -> Y2,
{
    type Yield = Y2;
    type Return = S::Return;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Result<Step<Y2, S::Return>, S::Error> {
        let step = self.seq.next(input)?;
        Ok(step.map_yielded(&mut self.f))
    }
}

/// Transforms the final value of the wrapped sequence.
pub struct MapReturn<S, F> {
    seq: S,
    f: F,
}

impl<I, R2, S, F> Sequence<I> for MapReturn<S, F>
where
    S: Sequence<I>,
    F: FnMut(S::Return) -> R2,
{
    type Yield = S::Yield;
    type Return = R2;
    type Error = S::Error;

    fn next(&mut self, input: I) -> Result<Step<S::Yield, R2>, S::Error> {
        let step = self.seq.next(input)?;
        Ok(step.map_complete(&mut self.f))
    }
}

pub struct FromFn<F>(F);

impl<I, Y, R, E, F> Sequence<I> for FromFn<F>
where
    F: FnMut(I) -> Result<Step<Y, R>, E>,
{
    type Yield = Y;
    type Return = R;
    type Error = E;

    fn next(&mut self, input: I) -> Result<Step<Y, R>, E> {
        (self.0)(input)
    }
}

/// Create a sequence from a closure called once per step.
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// Sequence over an iterator of results. Completes with `()` when the iterator runs out.
pub struct FromIter<T>(T);

impl<Y, E, T> Sequence<()> for FromIter<T>
where
    T: Iterator<Item = Result<Y, E>>,
{
    type Yield = Y;
    type Return = ();
    type Error = E;

    fn next(&mut self, (): ()) -> Result<Step<Y, ()>, E> {
        match self.0.next() {
            Some(item) => item.map(Step::Yielded),
            None => Ok(Step::Complete(())),
        }
    }
}

/// Create a sequence from anything iterable over `Result`s.
///
/// ```rust
/// use trydo::{Step, sequence::{self, Sequence}};
///
/// let mut seq = sequence::from_iter(vec![Ok(1), Err("bad")]);
/// assert_eq!(seq.next(()), Ok(Step::Yielded(1)));
/// assert_eq!(seq.next(()), Err("bad"));
/// assert_eq!(seq.next(()), Ok(Step::Complete(())));
/// ```
pub fn from_iter<T>(iter: T) -> FromIter<T::IntoIter>
where
    T: IntoIterator,
{
    FromIter(iter.into_iter())
}
