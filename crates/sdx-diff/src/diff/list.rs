// Copyright (c) 2025-2026 Zensical and contributors

// SPDX-License-Identifier: MIT
// All contributions are certified under the DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Flat-list diff dialect.

use std::fmt;
use std::mem;

mod error;

pub use error::{Error, Result};

use super::interpreter::ListDiffInterpreter;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// List diff step.
///
/// One verb token of the flat-list dialect, generic over the element type.
/// Unlike the tree dialect, which is fixed to [`Node`][] elements, list
/// diffs can transform sequences of arbitrary comparable values.
///
/// [`Node`]: sdx_node::Node
///
/// # Examples
///
/// ```
/// use sdx_diff::list::{self, ListApplicator};
///
/// // Transform a sequence of strings by diff
/// let mut target = vec!["a1", "a2", "a3"];
/// ListApplicator::new(&mut target).consume([
///     list::del("a1"),
///     list::ins("b1"),
///     list::pick("a2"),
///     list::pick("a3"),
/// ])?;
/// assert_eq!(target, ["b1", "a2", "a3"]);
/// # Ok::<(), sdx_diff::list::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ListStep<E> {
    /// Append a new element.
    Ins(E),
    /// Consume and discard the current element.
    Del(E),
    /// Consume and emit the current element.
    Pick(E),
    /// Search forward, consume and emit the match.
    Find(E),
    /// Consume and discard the current element or hole.
    Skip(E),
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// List diff applicator.
///
/// Applies a sequence of [`ListStep`] tokens to a vector. On construction,
/// the previous content is swapped aside into a source buffer, and the new
/// sequence is rebuilt in place while the source is consumed element by
/// element. A `find` consumes its match out of order and leaves a hole,
/// which a later `skip` discards.
///
/// The applicator consumes the diff exactly once; any source element not
/// confirmed by the diff is reported as a conflict when consumption ends.
pub struct ListApplicator<'a, E> {
    /// Target sequence, rebuilt in place.
    seq: &'a mut Vec<E>,
    /// Swapped-aside source buffer, holes are `None`.
    src: Vec<Option<E>>,
    /// Source cursor.
    pos: usize,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<E> ListStep<E> {
    /// Returns the verb identifier.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Ins(_) => "ins",
            Self::Del(_) => "del",
            Self::Pick(_) => "pick",
            Self::Find(_) => "find",
            Self::Skip(_) => "skip",
        }
    }

    /// Returns the argument element.
    #[must_use]
    pub fn elm(&self) -> &E {
        match self {
            Self::Ins(elm)
            | Self::Del(elm)
            | Self::Pick(elm)
            | Self::Find(elm)
            | Self::Skip(elm) => elm,
        }
    }

    /// Applies the step to the given interpreter.
    ///
    /// # Errors
    ///
    /// This method returns whatever error the interpreter's handler raises.
    pub fn apply_to<I>(&self, interpreter: &mut I) -> Result<(), I::Error>
    where
        I: ListDiffInterpreter<E> + ?Sized,
    {
        match self {
            Self::Ins(elm) => interpreter.ins(elm),
            Self::Del(elm) => interpreter.del(elm),
            Self::Pick(elm) => interpreter.pick(elm),
            Self::Find(elm) => interpreter.find(elm),
            Self::Skip(elm) => interpreter.skip(elm),
        }
    }
}

// ----------------------------------------------------------------------------

impl<'a, E> ListApplicator<'a, E>
where
    E: Clone + PartialEq + fmt::Display,
{
    /// Creates an applicator, swapping the target content aside.
    pub fn new(seq: &'a mut Vec<E>) -> Self {
        let src = mem::take(seq).into_iter().map(Some).collect();
        Self { seq, src, pos: 0 }
    }

    /// Consumes the given diff, transforming the target sequence.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Conflict`], if the target sequence does
    /// not hold the elements the diff expects, and [`Error::Incomplete`], if
    /// source elements are left unconfirmed when the diff ends. The target
    /// is left in an intermediate state in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_diff::list::{self, ListApplicator};
    ///
    /// // Reorder a sequence using the find/skip hole protocol
    /// let mut target = vec![1, 2, 3];
    /// ListApplicator::new(&mut target).consume([
    ///     list::find(3),
    ///     list::pick(1),
    ///     list::pick(2),
    ///     list::skip(3),
    /// ])?;
    /// assert_eq!(target, [3, 1, 2]);
    /// # Ok::<(), sdx_diff::list::Error>(())
    /// ```
    pub fn consume<D>(mut self, diff: D) -> Result<()>
    where
        D: IntoIterator<Item = ListStep<E>>,
    {
        for step in diff {
            step.apply_to(&mut self)?;
        }

        // Every pre-existing element must have been confirmed by the diff,
        // only holes left by find are silently released
        match self.src[self.pos..].iter().flatten().next() {
            Some(elm) => Err(Error::Incomplete {
                found: elm.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Returns whether the source buffer is exhausted.
    fn end_of_src(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Renders the current source element for diagnostics.
    fn found_here(&self) -> String {
        match self.src.get(self.pos) {
            Some(Some(elm)) => elm.to_string(),
            // A hole left behind by find renders as falsum
            Some(None) => "⟂".to_string(),
            None => "end of sequence".to_string(),
        }
    }

    /// Raises a conflict for the given verb and element.
    fn conflict(&self, verb: &'static str, elm: &E) -> Error {
        Error::Conflict {
            verb,
            spec: elm.to_string(),
            found: self.found_here(),
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<E> ListDiffInterpreter<E> for ListApplicator<'_, E>
where
    E: Clone + PartialEq + fmt::Display,
{
    type Error = Error;

    /// Appends a new element at the current position.
    fn ins(&mut self, elm: &E) -> Result<()> {
        self.seq.push(elm.clone());
        Ok(())
    }

    /// Consumes the current element, which must match, and discards it.
    fn del(&mut self, elm: &E) -> Result<()> {
        match self.src.get_mut(self.pos) {
            Some(slot) if slot.as_ref() == Some(elm) => {
                *slot = None;
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.conflict("del", elm)),
        }
    }

    /// Consumes the current element, which must match, and emits it.
    fn pick(&mut self, elm: &E) -> Result<()> {
        match self.src.get_mut(self.pos) {
            Some(slot) if slot.as_ref() == Some(elm) => {
                if let Some(found) = slot.take() {
                    self.seq.push(found);
                }
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.conflict("pick", elm)),
        }
    }

    /// Searches forward for a match, consumes and emits it.
    fn find(&mut self, elm: &E) -> Result<()> {
        if self.end_of_src() {
            return Err(self.conflict("find", elm));
        }
        let slot = self.src[self.pos..]
            .iter_mut()
            .find(|slot| slot.as_ref() == Some(elm));
        match slot.and_then(Option::take) {
            Some(found) => {
                self.seq.push(found);
                Ok(())
            }
            None => Err(self.conflict("find", elm)),
        }
    }

    /// Consumes and discards the current element or hole.
    fn skip(&mut self, elm: &E) -> Result<()> {
        if self.end_of_src() {
            return Err(self.conflict("skip", elm));
        }
        self.src[self.pos] = None;
        self.pos += 1;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Creates an `ins` step, appending a new element.
#[inline]
pub fn ins<E>(elm: E) -> ListStep<E> {
    ListStep::Ins(elm)
}

/// Creates a `del` step, discarding the current element.
#[inline]
pub fn del<E>(elm: E) -> ListStep<E> {
    ListStep::Del(elm)
}

/// Creates a `pick` step, emitting the current element.
#[inline]
pub fn pick<E>(elm: E) -> ListStep<E> {
    ListStep::Pick(elm)
}

/// Creates a `find` step, emitting a match found further ahead.
#[inline]
pub fn find<E>(elm: E) -> ListStep<E> {
    ListStep::Find(elm)
}

/// Creates a `skip` step, discarding the current element or hole.
#[inline]
pub fn skip<E>(elm: E) -> ListStep<E> {
    ListStep::Skip(elm)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod consume {
        use crate::list::{self, Error, ListApplicator};

        #[test]
        fn handles_transformation() {
            let mut target = vec!["a1", "a2", "a3", "a4", "a5"];
            ListApplicator::new(&mut target)
                .consume([
                    list::del("a1"),
                    list::del("a2"),
                    list::ins("b1"),
                    list::pick("a3"),
                    list::find("a5"),
                    list::ins("b2"),
                    list::ins("b3"),
                    list::pick("a4"),
                    list::skip("a5"),
                    list::ins("b4"),
                ])
                .unwrap();
            assert_eq!(target, ["b1", "a3", "a5", "b2", "b3", "a4", "b4"]);
        }

        #[test]
        fn handles_empty_diff() {
            let mut target: Vec<i32> = Vec::new();
            ListApplicator::new(&mut target).consume([]).unwrap();
            assert!(target.is_empty());
        }

        #[test]
        fn rejects_mismatch() {
            let mut target = vec![1, 2];
            let result = ListApplicator::new(&mut target).consume([list::del(2)]);
            assert!(matches!(result, Err(Error::Conflict { verb: "del", .. })));
        }

        #[test]
        fn rejects_unconfirmed_rest() {
            let mut target = vec![1, 2];
            let result = ListApplicator::new(&mut target).consume([list::pick(1)]);
            assert!(matches!(result, Err(Error::Incomplete { .. })));
        }
    }
}
