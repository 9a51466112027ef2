//! # trydo: errors as data, whatever a call returns
//!
//! Invoke a callable and get its failures back as [`Outcome`]s, `(error, value)`
//! pairs, instead of `Err` returns you have to branch on at every layer. The
//! callable may return any of four shapes and each is reshaped accordingly:
//!
//! | callable returns             | you get                                           |
//! |------------------------------|---------------------------------------------------|
//! | `Err(e)` before anything     | `Outcome::err(e)`                                 |
//! | an immediate value           | `Outcome::ok(v)`                                  |
//! | a future                     | a future resolving to an [`Outcome`]              |
//! | a [`Sequence`]               | a [`Captured`] sequence stepping through outcomes |
//! | an [`AsyncSequence`]         | an [`AsyncCaptured`] sequence, same but async     |
//!
//! Captured sequences forward every step input to the underlying sequence, keep
//! elements and the final return value apart through [`Step`], and stop after
//! the first failure.
//!
//! ## Example
//!
//! ```
//! use trydo::prelude::*;
//!
//! fn numbers() -> Returned<'static, &'static str, &'static str, u8> {
//!     Returned::sequence(sequence::from_iter([Ok(1), Err("boom"), Ok(2)]).map_return(|()| "done"))
//! }
//!
//! let mut seq = trydo(|()| numbers(), ()).into_sequence().unwrap();
//! assert_eq!(seq.next(()), Step::Yielded(Outcome::ok(1)));
//! assert_eq!(seq.next(()), Step::Complete(Some(Outcome::err("boom"))));
//! assert_eq!(seq.next(()), Step::Complete(None));
//! ```
//!
//! ## Common Functions
//!
//! **Invoking:**
//! - [`trydo(f, args)`] - Call `f` and capture its result
//! - [`trydo_on(receiver, f, args)`] - Same, for method-style calls
//! - [`invoke(invocation)`] - The general form both build on
//!
//! **Capturing directly:**
//! - [`capture(seq)`] / [`capture_async(seq)`] - Wrap a sequence
//! - [`settle(future)`] - Wrap a future
//! - [`callback::from_callback`] - Turn a completion-callback call into a future
//!
//! **Driving:**
//! - [`handle(stage, input, responder)`] - Step a coroutine to completion
//! - [`handle_async(stage, input, responder)`] - Async version
//!
//! [`trydo(f, args)`]: trydo
//! [`trydo_on(receiver, f, args)`]: trydo_on
//! [`invoke(invocation)`]: invoke
//! [`capture(seq)`]: capture
//! [`capture_async(seq)`]: capture_async
//! [`settle(future)`]: settle
//! [`handle(stage, input, responder)`]: handle
//! [`handle_async(stage, input, responder)`]: handle_async

pub mod async_sequence;
pub mod callback;
mod capture;
mod handler;
mod invoke;
mod iter;
mod outcome;
pub mod prelude;
mod sans;
pub mod sequence;
mod step;

pub use async_sequence::AsyncSequence;
pub use capture::*;
pub use handler::*;
pub use invoke::*;
pub use iter::*;
pub use outcome::*;
pub use sans::*;
pub use sequence::Sequence;
pub use step::*;
