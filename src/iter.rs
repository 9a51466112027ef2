//! Iterator adapter for captured sequences with unit input.
//!
//! [`OutcomeIter`] iterates the element outcomes of a [`Captured`] sequence and
//! keeps the terminal outcome aside, so the final value (or the failure that
//! stopped the sequence) can be read once iteration ends.
//!
//! ```rust
//! use trydo::prelude::*;
//!
//! let mut iter = capture(sequence::from_iter(vec![Ok(1), Ok(2), Err("bad")])).into_iter();
//! let values: Vec<_> = iter.by_ref().map(|o| o.into_tuple().1).collect();
//!
//! assert_eq!(values, vec![Some(1), Some(2)]);
//! assert_eq!(iter.into_terminal(), Some(Outcome::err("bad")));
//! ```

use crate::{
    capture::Captured,
    outcome::Outcome,
    sans::Sans,
    sequence::Sequence,
    step::Step,
};

/// Iterator over the element outcomes of a [`Captured`] sequence.
///
/// Both `OutcomeIter` and `&mut OutcomeIter` implement `Iterator`, so iteration
/// can stop early without losing access to the terminal outcome.
pub struct OutcomeIter<S>
where
    S: Sequence<()>,
{
    captured: Captured<S>,
    terminal: Option<Outcome<S::Error, S::Return>>,
}

impl<S> OutcomeIter<S>
where
    S: Sequence<()>,
{
    pub fn new(captured: Captured<S>) -> Self {
        Self {
            captured,
            terminal: None,
        }
    }

    /// `true` once the sequence has finished, successfully or not.
    pub fn is_complete(&self) -> bool {
        self.captured.is_done()
    }

    /// The final value or the stopping failure, once the sequence has finished.
    pub fn terminal(&self) -> Option<&Outcome<S::Error, S::Return>> {
        self.terminal.as_ref()
    }

    /// Consume the iterator and return the terminal outcome if the sequence finished.
    pub fn into_terminal(self) -> Option<Outcome<S::Error, S::Return>> {
        self.terminal
    }
}

impl<S> Iterator for OutcomeIter<S>
where
    S: Sequence<()>,
{
    type Item = Outcome<S::Error, S::Yield>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.captured.next(()) {
            Step::Yielded(outcome) => Some(outcome),
            Step::Complete(Some(terminal)) => {
                self.terminal = Some(terminal);
                None
            }
            Step::Complete(None) => None,
        }
    }
}

impl<S> IntoIterator for Captured<S>
where
    S: Sequence<()>,
{
    type Item = Outcome<S::Error, S::Yield>;
    type IntoIter = OutcomeIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        OutcomeIter::new(self)
    }
}
