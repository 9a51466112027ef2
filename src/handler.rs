//! Functions for driving coroutines to completion.
//!
//! Each yielded value is handed to a responder whose answer becomes the input of
//! the next step, which is how values get injected back into a sequence.

use std::future::Future;

use crate::{
    sans::{AsyncSans, Sans},
    step::Step,
};

/// Drive a coroutine to completion with synchronous responses.
///
/// `input` is sent with the first step.
///
/// ```rust
/// use trydo::prelude::*;
///
/// let mut count = 0;
/// let seq = sequence::from_fn(move |sent: u32| {
///     count += sent;
///     if count < 3 { Ok::<_, ()>(Step::Yielded(count)) } else { Ok(Step::Complete(count)) }
/// });
///
/// let terminal = handle(capture(seq), 0, |_outcome| 1);
/// assert_eq!(terminal, Some(Outcome::ok(3)));
/// ```
pub fn handle<C, I, O, R>(mut stage: C, input: I, mut responder: R) -> C::Return
where
    C: Sans<I, O>,
    R: FnMut(O) -> I,
{
    let mut step = stage.next(input);
    loop {
        step = match step {
            Step::Yielded(output) => stage.next(responder(output)),
            Step::Complete(done) => return done,
        };
    }
}

/// Async version of [`handle`].
///
/// The responder returns a future that produces the next input.
pub async fn handle_async<C, I, O, R, Fut>(mut stage: C, input: I, mut responder: R) -> C::Return
where
    C: AsyncSans<I, O>,
    R: FnMut(O) -> Fut,
    Fut: Future<Output = I>,
{
    let mut step = stage.next(input).await;
    loop {
        step = match step {
            Step::Yielded(output) => {
                let reply = responder(output).await;
                stage.next(reply).await
            }
            Step::Complete(done) => return done,
        };
    }
}
