//! Invoking a callable and reshaping whatever it returns into outcomes.
//!
//! A callable may hand back one of four shapes, listed here from most to least
//! involved:
//!
//! 1. an asynchronous sequence
//! 2. a synchronous sequence
//! 3. a deferred value (a future)
//! 4. an immediate value
//!
//! It states which one through the [`Returned`] variant it produces, and may fail
//! before producing anything at all by returning `Err`. [`invoke`] classifies the
//! result once and hands back the matching [`Carrier`]:
//!
//! ```rust
//! use trydo::prelude::*;
//!
//! fn check(text: &str) -> Result<Returned<'static, &'static str, String>, &'static str> {
//!     if text.is_empty() {
//!         return Err("the string must not be empty");
//!     }
//!     Ok(Returned::Immediate(text.to_uppercase()))
//! }
//!
//! let (err, value) = trydo(|(text,)| check(text), ("ok",)).into_outcome().unwrap().into_tuple();
//! assert_eq!((err, value.as_deref()), (None, Some("OK")));
//!
//! let (err, value) = trydo(|(text,)| check(text), ("",)).into_outcome().unwrap().into_tuple();
//! assert_eq!((err, value), (Some("the string must not be empty"), None));
//! ```

use std::{fmt, future::Future};

use futures::future::BoxFuture;

use crate::{
    async_sequence::AsyncSequence,
    capture::{AsyncCaptured, Captured, Settle, capture, capture_async, settle},
    outcome::Outcome,
    sequence::Sequence,
};

/// Boxed synchronous sequence held by [`Returned::Sequence`].
pub type DynSequence<'a, E, V, Y, I> =
    Box<dyn Sequence<I, Yield = Y, Return = V, Error = E> + Send + 'a>;

/// Boxed asynchronous sequence held by [`Returned::AsyncSequence`].
pub type DynAsyncSequence<'a, E, V, Y, I> =
    Box<dyn AsyncSequence<I, Yield = Y, Return = V, Error = E> + Send + 'a>;

/// Which of the four shapes a call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    AsyncSequence,
    Sequence,
    Deferred,
    Immediate,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::AsyncSequence => "async sequence",
            Kind::Sequence => "sequence",
            Kind::Deferred => "deferred",
            Kind::Immediate => "immediate",
        };
        f.write_str(name)
    }
}

/// The value a callable returned, tagged with its shape.
///
/// `V` is the value the call ultimately produces: the immediate value, the
/// resolved value, or a sequence's final return value. `Y` is the sequence
/// element type and `I` the sequence input type.
///
/// Boxed sequences and futures must be `Send`, so every [`Carrier`] can be moved
/// to another thread or handed to a multi-threaded executor. A callable whose
/// future would hold `!Send` state, such as an `Rc`, has to finish with that
/// state before building the `Returned` value.
pub enum Returned<'a, E, V, Y = V, I = ()> {
    AsyncSequence(DynAsyncSequence<'a, E, V, Y, I>),
    Sequence(DynSequence<'a, E, V, Y, I>),
    Deferred(BoxFuture<'a, Result<V, E>>),
    Immediate(V),
}

impl<'a, E, V, Y, I> Returned<'a, E, V, Y, I> {
    pub fn async_sequence<S>(seq: S) -> Self
    where
        S: AsyncSequence<I, Yield = Y, Return = V, Error = E> + Send + 'a,
    {
        Returned::AsyncSequence(Box::new(seq))
    }

    pub fn sequence<S>(seq: S) -> Self
    where
        S: Sequence<I, Yield = Y, Return = V, Error = E> + Send + 'a,
    {
        Returned::Sequence(Box::new(seq))
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<V, E>> + Send + 'a,
    {
        Returned::Deferred(Box::pin(future))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Returned::AsyncSequence(_) => Kind::AsyncSequence,
            Returned::Sequence(_) => Kind::Sequence,
            Returned::Deferred(_) => Kind::Deferred,
            Returned::Immediate(_) => Kind::Immediate,
        }
    }

    /// Wrap the returned value in the carrier matching its shape.
    pub fn into_carrier(self) -> Carrier<'a, E, V, Y, I> {
        match self {
            Returned::AsyncSequence(seq) => Carrier::AsyncSequence(capture_async(seq)),
            Returned::Sequence(seq) => Carrier::Sequence(capture(seq)),
            Returned::Deferred(future) => Carrier::Deferred(settle(future)),
            Returned::Immediate(value) => Carrier::Outcome(Outcome::ok(value)),
        }
    }
}

impl<E, V, Y, I> fmt::Debug for Returned<'_, E, V, Y, I>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Returned::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            other => f.debug_tuple("Returned").field(&other.kind()).finish(),
        }
    }
}

/// Return types [`invoke`] can classify.
///
/// Implemented for [`Returned`] itself, and for `Result<T, E>` where `Err` is a
/// failure that happened before the callable produced anything.
pub trait Classify<'a> {
    type Error;
    type Value;
    type Yield;
    type Input;

    fn classify(
        self,
    ) -> Result<Returned<'a, Self::Error, Self::Value, Self::Yield, Self::Input>, Self::Error>;
}

impl<'a, E, V, Y, I> Classify<'a> for Returned<'a, E, V, Y, I> {
    type Error = E;
    type Value = V;
    type Yield = Y;
    type Input = I;

    fn classify(self) -> Result<Returned<'a, E, V, Y, I>, E> {
        Ok(self)
    }
}

impl<'a, T, E> Classify<'a> for Result<T, E>
where
    T: Classify<'a, Error = E>,
{
    type Error = E;
    type Value = T::Value;
    type Yield = T::Yield;
    type Input = T::Input;

    fn classify(self) -> Result<Returned<'a, E, T::Value, T::Yield, T::Input>, E> {
        self.and_then(T::classify)
    }
}

/// What [`invoke`] hands back: an outcome, or something that produces outcomes.
///
/// The variant is fixed when the call is classified.
pub enum Carrier<'a, E, V, Y = V, I = ()> {
    AsyncSequence(AsyncCaptured<DynAsyncSequence<'a, E, V, Y, I>>),
    Sequence(Captured<DynSequence<'a, E, V, Y, I>>),
    Deferred(Settle<BoxFuture<'a, Result<V, E>>, E, V>),
    Outcome(Outcome<E, V>),
}

impl<'a, E, V, Y, I> Carrier<'a, E, V, Y, I> {
    pub fn into_outcome(self) -> Option<Outcome<E, V>> {
        match self {
            Carrier::Outcome(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn into_deferred(self) -> Option<Settle<BoxFuture<'a, Result<V, E>>, E, V>> {
        match self {
            Carrier::Deferred(deferred) => Some(deferred),
            _ => None,
        }
    }

    pub fn into_sequence(self) -> Option<Captured<DynSequence<'a, E, V, Y, I>>> {
        match self {
            Carrier::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn into_async_sequence(self) -> Option<AsyncCaptured<DynAsyncSequence<'a, E, V, Y, I>>> {
        match self {
            Carrier::AsyncSequence(seq) => Some(seq),
            _ => None,
        }
    }
}

impl<E, V, Y, I> fmt::Debug for Carrier<'_, E, V, Y, I>
where
    E: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Carrier::AsyncSequence(_) => f.write_str("AsyncSequence(..)"),
            Carrier::Sequence(_) => f.write_str("Sequence(..)"),
            Carrier::Deferred(_) => f.write_str("Deferred(..)"),
            Carrier::Outcome(outcome) => f.debug_tuple("Outcome").field(outcome).finish(),
        }
    }
}

/// A function bound to a receiver and an argument bundle, ready to be invoked once.
///
/// The receiver is `()` unless [`on`](Invocation::on) binds one.
pub struct Invocation<F, R, A> {
    func: F,
    receiver: R,
    args: A,
}

impl<F, A> Invocation<F, (), A> {
    pub fn new(func: F, args: A) -> Self {
        Invocation {
            func,
            receiver: (),
            args,
        }
    }
}

impl<F, R, A> Invocation<F, R, A> {
    /// Bind the receiver passed as the function's first parameter.
    pub fn on<R2>(self, receiver: R2) -> Invocation<F, R2, A> {
        Invocation {
            func: self.func,
            receiver,
            args: self.args,
        }
    }
}

/// Invoke the call and reshape its result into outcomes.
///
/// Nothing fails across this boundary: an `Err` from the call becomes
/// `Carrier::Outcome(Outcome::err(e))`, and every other shape is wrapped so that
/// its failures also arrive as outcomes.
pub fn invoke<'a, F, R, A, T>(
    call: Invocation<F, R, A>,
) -> Carrier<'a, T::Error, T::Value, T::Yield, T::Input>
where
    F: FnOnce(R, A) -> T,
    T: Classify<'a>,
{
    let Invocation {
        func,
        receiver,
        args,
    } = call;

    match func(receiver, args).classify() {
        Ok(returned) => {
            tracing::trace!(kind = %returned.kind(), "classified call result");
            returned.into_carrier()
        }
        Err(error) => {
            tracing::trace!("call failed before returning a result");
            Carrier::Outcome(Outcome::err(error))
        }
    }
}

/// Invoke `func` with `args` and no receiver.
pub fn trydo<'a, F, A, T>(func: F, args: A) -> Carrier<'a, T::Error, T::Value, T::Yield, T::Input>
where
    F: FnOnce(A) -> T,
    T: Classify<'a>,
{
    invoke(Invocation::new(move |(), args| func(args), args))
}

/// Invoke `func` as a method on `receiver`.
///
/// ```rust
/// use trydo::prelude::*;
///
/// struct Account { balance: u64 }
///
/// impl Account {
///     fn withdraw(&mut self, amount: u64) -> Result<Returned<'static, String, u64>, String> {
///         self.balance = self.balance.checked_sub(amount).ok_or("insufficient funds")?;
///         Ok(Returned::Immediate(self.balance))
///     }
/// }
///
/// let mut account = Account { balance: 10 };
/// let left = trydo_on(&mut account, |acc, (amount,)| acc.withdraw(amount), (4,));
/// assert_eq!(left.into_outcome(), Some(Outcome::ok(6)));
///
/// let refused = trydo_on(&mut account, |acc, (amount,)| acc.withdraw(amount), (7,));
/// assert_eq!(refused.into_outcome(), Some(Outcome::err("insufficient funds".to_string())));
/// ```
pub fn trydo_on<'a, F, R, A, T>(
    receiver: R,
    func: F,
    args: A,
) -> Carrier<'a, T::Error, T::Value, T::Yield, T::Input>
where
    F: FnOnce(R, A) -> T,
    T: Classify<'a>,
{
    invoke(Invocation::new(func, args).on(receiver))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        async_sequence,
        sans::{AsyncSans, Sans},
        sequence,
        step::Step,
    };
    use futures::executor::block_on;
    use tracing_test::traced_test;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Failure(&'static str);

    const EMPTY: Failure = Failure("the string must not be empty");

    fn check(text: &'static str) -> Result<Returned<'static, Failure, &'static str>, Failure> {
        if text.is_empty() {
            return Err(EMPTY);
        }
        Ok(Returned::Immediate(text))
    }

    fn check_async(text: &'static str) -> Returned<'static, Failure, &'static str> {
        Returned::deferred(async move {
            if text.is_empty() {
                return Err(EMPTY);
            }
            Ok(text)
        })
    }

    /// Spells `text` one char per step and returns "OK"; fails up front when empty.
    fn spell(text: &'static str) -> Returned<'static, Failure, String, String> {
        let mut chars = text.chars();
        let mut started = false;
        Returned::sequence(sequence::from_fn(move |()| {
            if !started && text.is_empty() {
                return Err(EMPTY);
            }
            started = true;
            Ok(match chars.next() {
                Some(c) => Step::Yielded(c.to_string()),
                None => Step::Complete("OK".to_string()),
            })
        }))
    }

    fn spell_async(text: &'static str) -> Returned<'static, Failure, String, String> {
        Returned::async_sequence(async_sequence::unfold(0, move |at: usize, ()| async move {
            if text.is_empty() {
                return (at, Err(EMPTY));
            }
            let step = match text.chars().nth(at) {
                Some(c) => Step::Yielded(c.to_string()),
                None => Step::Complete("OK".to_string()),
            };
            (at + 1, Ok(step))
        }))
    }

    fn drain<S>(mut seq: S) -> (String, Vec<Failure>)
    where
        S: Sans<(), Outcome<Failure, String>, Return = Option<Outcome<Failure, String>>>,
    {
        let mut text = String::new();
        let mut errors = Vec::new();
        loop {
            match seq.next(()) {
                Step::Yielded(outcome) => match outcome.into_tuple() {
                    (Some(err), _) => errors.push(err),
                    (None, value) => text.extend(value),
                },
                Step::Complete(terminal) => {
                    match terminal.map(Outcome::into_tuple) {
                        Some((Some(err), _)) => errors.push(err),
                        Some((None, value)) => text.extend(value),
                        None => {}
                    }
                    return (text, errors);
                }
            }
        }
    }

    #[test]
    fn test_immediate_value() {
        let carrier = trydo(|(text,)| check(text), ("Hello, World!",));
        assert_eq!(
            carrier.into_outcome().map(Outcome::into_tuple),
            Some((None, Some("Hello, World!")))
        );
    }

    #[test]
    fn test_immediate_failure() {
        let carrier = trydo(|(text,)| check(text), ("",));
        assert_eq!(
            carrier.into_outcome().map(Outcome::into_tuple),
            Some((Some(EMPTY), None))
        );
    }

    #[test]
    fn test_closure_wrapping_a_plain_value() {
        let carrier = trydo(|()| Returned::<'_, Failure, _>::Immediate("ok"), ());
        assert_eq!(carrier.into_outcome(), Some(Outcome::ok("ok")));
    }

    #[test]
    fn test_deferred_resolves_and_rejects_into_outcomes() {
        let resolved = trydo(|(text,)| check_async(text), ("Hello",))
            .into_deferred()
            .expect("deferred carrier");
        let rejected = trydo(|(text,)| check_async(text), ("",))
            .into_deferred()
            .expect("deferred carrier");

        assert_eq!(block_on(resolved), Outcome::ok("Hello"));
        assert_eq!(block_on(rejected), Outcome::err(EMPTY));
    }

    #[test]
    fn test_sequence_elements_then_return_value() {
        let seq = trydo(|(text,)| spell(text), ("Hello, World!",))
            .into_sequence()
            .expect("sequence carrier");

        assert_eq!(drain(seq), ("Hello, World!OK".to_string(), vec![]));
    }

    #[test]
    fn test_sequence_failing_first_step() {
        let seq = trydo(|(text,)| spell(text), ("",))
            .into_sequence()
            .expect("sequence carrier");

        assert_eq!(drain(seq), (String::new(), vec![EMPTY]));
    }

    #[test]
    fn test_sequence_receives_injected_values() {
        // Sums the values sent back at each resumption after the first element.
        fn tally(text: &'static str) -> Returned<'static, Failure, String, char, u32> {
            let mut chars = text.chars();
            let mut count = 0;
            let mut started = false;
            Returned::sequence(sequence::from_fn(move |sent: u32| {
                if started {
                    count += sent;
                }
                started = true;
                Ok(match chars.next() {
                    Some(c) => Step::Yielded(c),
                    None => Step::Complete(count.to_string()),
                })
            }))
        }

        let mut seq = trydo(|(text,)| tally(text), ("Hello, World!",))
            .into_sequence()
            .expect("sequence carrier");
        let mut text = String::new();
        loop {
            match seq.next(1) {
                Step::Yielded(outcome) => text.extend(outcome.value()),
                Step::Complete(terminal) => {
                    text.push_str(terminal.expect("terminal outcome").value().expect("value"));
                    break;
                }
            }
        }

        assert_eq!(text, "Hello, World!13");
    }

    #[test]
    fn test_async_sequence_elements_then_return_value() {
        let mut seq = trydo(|(text,)| spell_async(text), ("abc",))
            .into_async_sequence()
            .expect("async sequence carrier");

        block_on(async {
            assert_eq!(seq.next(()).await, Step::Yielded(Outcome::ok("a".to_string())));
            assert_eq!(seq.next(()).await, Step::Yielded(Outcome::ok("b".to_string())));
            assert_eq!(seq.next(()).await, Step::Yielded(Outcome::ok("c".to_string())));
            assert_eq!(
                seq.next(()).await,
                Step::Complete(Some(Outcome::ok("OK".to_string())))
            );
            assert_eq!(seq.next(()).await, Step::Complete(None));
        });
    }

    #[test]
    fn test_async_sequence_failure_is_terminal() {
        let mut seq = trydo(|(text,)| spell_async(text), ("",))
            .into_async_sequence()
            .expect("async sequence carrier");

        block_on(async {
            assert_eq!(seq.next(()).await, Step::Complete(Some(Outcome::err(EMPTY))));
            assert_eq!(seq.next(()).await, Step::Complete(None));
        });
    }

    #[test]
    fn test_numbers_then_done() {
        let mut seq = trydo(
            |()| {
                Returned::<'_, Failure, &str, u8>::sequence(sequence::from_fn({
                    let mut next = 1;
                    move |()| {
                        let step = if next <= 3 {
                            Step::Yielded(next)
                        } else {
                            Step::Complete("done")
                        };
                        next += 1;
                        Ok(step)
                    }
                }))
            },
            (),
        )
        .into_sequence()
        .expect("sequence carrier");

        assert_eq!(seq.next(()), Step::Yielded(Outcome::ok(1)));
        assert_eq!(seq.next(()), Step::Yielded(Outcome::ok(2)));
        assert_eq!(seq.next(()), Step::Yielded(Outcome::ok(3)));
        assert_eq!(seq.next(()), Step::Complete(Some(Outcome::ok("done"))));
    }

    #[test]
    fn test_one_then_boom() {
        let mut seq = trydo(
            |()| {
                Returned::<'_, Failure, (), u8>::sequence(sequence::from_iter(vec![
                    Ok(1),
                    Err(Failure("boom")),
                    Ok(2),
                ]))
            },
            (),
        )
        .into_sequence()
        .expect("sequence carrier");

        assert_eq!(seq.next(()), Step::Yielded(Outcome::ok(1)));
        assert_eq!(seq.next(()), Step::Complete(Some(Outcome::err(Failure("boom")))));
        assert_eq!(seq.next(()), Step::Complete(None));
    }

    #[test]
    fn test_receiver_is_passed_to_method_calls() {
        struct Counter {
            hits: u32,
        }

        let mut counter = Counter { hits: 0 };
        let carrier = invoke(
            Invocation::new(
                |counter: &mut Counter, (by,): (u32,)| {
                    counter.hits += by;
                    Ok::<_, Failure>(Returned::<'_, Failure, u32>::Immediate(counter.hits))
                },
                (2,),
            )
            .on(&mut counter),
        );

        assert_eq!(carrier.into_outcome(), Some(Outcome::ok(2)));
        assert_eq!(counter.hits, 2);
    }

    #[test]
    fn test_carriers_move_across_threads() {
        let deferred = trydo(|(text,)| check_async(text), ("sent",))
            .into_deferred()
            .expect("deferred carrier");
        let mut seq = trydo(|(text,)| spell(text), ("hi",))
            .into_sequence()
            .expect("sequence carrier");

        let resolved = std::thread::spawn(move || block_on(deferred))
            .join()
            .expect("thread finished");
        let first = std::thread::spawn(move || seq.next(()))
            .join()
            .expect("thread finished");

        assert_eq!(resolved, Outcome::ok("sent"));
        assert_eq!(first, Step::Yielded(Outcome::ok("h".to_string())));
    }

    #[test]
    fn test_kind_follows_the_variant() {
        assert_eq!(check("x").map(|r| r.kind()), Ok(Kind::Immediate));
        assert_eq!(check_async("x").kind(), Kind::Deferred);
        assert_eq!(spell("x").kind(), Kind::Sequence);
        assert_eq!(spell_async("x").kind(), Kind::AsyncSequence);
        assert_eq!(Kind::AsyncSequence.to_string(), "async sequence");
    }

    #[test]
    #[traced_test]
    fn test_classification_is_traced() {
        let _ = trydo(|(text,)| check_async(text), ("x",));
        assert!(logs_contain("classified call result"));
        assert!(logs_contain("kind=deferred"));

        let _ = trydo(|(text,)| check(text), ("",));
        assert!(logs_contain("call failed before returning a result"));
    }
}
