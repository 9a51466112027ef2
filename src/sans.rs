//! Infallible bidirectional coroutines.
//!
//! A [`Sans`] takes an input on every step and answers with a [`Step`]. It has no
//! failure channel; the capture wrappers such as [`Captured`](crate::Captured) implement it so that
//! errors from an underlying [`Sequence`](crate::Sequence) arrive as data instead.
//!
//! [`AsyncSans`] is the same contract with a suspending step.
//!
//! ```rust
//! use trydo::prelude::*;
//!
//! let mut words = capture(sequence::from_iter(["a", "b"].map(Ok::<_, ()>)));
//! assert_eq!(words.next(()), Step::Yielded(Outcome::ok("a")));
//! assert_eq!(words.next(()), Step::Yielded(Outcome::ok("b")));
//! assert_eq!(words.next(()), Step::Complete(Some(Outcome::ok(()))));
//! ```

use futures::future::BoxFuture;

use crate::step::Step;

/// Stateful computation that processes an input per step and yields intermediate values.
pub trait Sans<I, O> {
    /// Type of final result when the computation completes.
    type Return;

    /// Process input, returning `Yielded` to continue or `Complete` to finish.
    fn next(&mut self, input: I) -> Step<O, Self::Return>;

    fn boxed<'a>(self) -> Box<dyn Sans<I, O, Return = Self::Return> + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<I, O, S> Sans<I, O> for &'_ mut S
where
    S: Sans<I, O> + ?Sized,
{
    type Return = S::Return;

    fn next(&mut self, input: I) -> Step<O, Self::Return> {
        (**self).next(input)
    }
}

impl<I, O, S> Sans<I, O> for Box<S>
where
    S: Sans<I, O> + ?Sized,
{
    type Return = S::Return;

    fn next(&mut self, input: I) -> Step<O, Self::Return> {
        (**self).next(input)
    }
}

/// Asynchronous [`Sans`]: each step may suspend before answering.
pub trait AsyncSans<I, O> {
    type Return;

    fn next<'a>(&'a mut self, input: I) -> BoxFuture<'a, Step<O, Self::Return>>
    where
        I: 'a;
}

impl<I, O, S> AsyncSans<I, O> for Box<S>
where
    S: AsyncSans<I, O> + ?Sized,
{
    type Return = S::Return;

    fn next<'a>(&'a mut self, input: I) -> BoxFuture<'a, Step<O, Self::Return>>
    where
        I: 'a,
    {
        (**self).next(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Doubler(u32);

    impl Sans<u32, u32> for Doubler {
        type Return = u32;

        fn next(&mut self, input: u32) -> Step<u32, u32> {
            if self.0 == 0 {
                Step::Complete(input)
            } else {
                self.0 -= 1;
                Step::Yielded(input * 2)
            }
        }
    }

    fn first_step<S: Sans<u32, u32>>(mut stage: S, input: u32) -> Step<u32, S::Return> {
        stage.next(input)
    }

    #[test]
    fn test_boxed_and_borrowed_forward_steps() {
        let mut inner = Doubler(2);
        assert_eq!(first_step(&mut inner, 3), Step::Yielded(6));

        let mut boxed = inner.boxed();
        assert_eq!(boxed.next(4), Step::Yielded(8));
        assert_eq!(boxed.next(5), Step::Complete(5));
    }
}
