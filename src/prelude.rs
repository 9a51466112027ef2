//! Commonly used imports
//!
//! Use `use trydo::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Carrier, Kind, Outcome, Returned, Step};

// Coroutine traits
pub use crate::{AsyncSans, AsyncSequence, Sans, Sequence};

// Sequence builders
pub use crate::{async_sequence, sequence};

// Invoking
pub use crate::{Invocation, invoke, trydo, trydo_on};

// Capturing directly
pub use crate::{capture, capture_async, settle};

// Execution
pub use crate::{handle, handle_async};
