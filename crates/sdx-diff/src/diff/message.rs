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

//! Mutation message.

use std::fmt;
use std::vec;

use super::DiffStep;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Mutation message.
///
/// An opaque transport capsule around a diff: a move-only, once-consumable
/// handle owning the producer of the step sequence. The consumer pulls steps
/// one at a time through the [`Iterator`] interface — "any more?" and "take
/// next" are the only operations — and the producer is dropped together with
/// the message.
///
/// Since production is driven lazily from the consumer's side, the producer
/// must be self-contained and [`Send`]: the pull may well happen on another
/// thread than the one that created the message. The message itself performs
/// no synchronisation; handing it across threads is the transport's concern.
///
/// Messages cannot be cloned. A consumed-in-flight copy sharing producer
/// state with its original is unrepresentable by construction; the only way
/// to look inside a message is [`MutationMessage::take_snapshot`].
///
/// # Examples
///
/// Create a message from a literal step sequence:
///
/// ```
/// use sdx_diff::{ins, MutationMessage};
/// use sdx_node::Node;
///
/// // Create message and pull the only step
/// let mut message = MutationMessage::from([ins(Node::named("α", 1))]);
/// assert!(message.next().is_some());
/// assert!(message.next().is_none());
/// ```
///
/// Create a message from an opaque producer:
///
/// ```
/// use sdx_diff::{ins, MutationMessage};
/// use sdx_node::Node;
///
/// // Create message over a lazy generator
/// let producer = (0..3).map(|n| ins(Node::anon(n)));
/// let message = MutationMessage::new(producer);
/// assert_eq!(message.count(), 3);
/// ```
pub struct MutationMessage {
    /// Producer of the step sequence.
    source: Source,
}

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Producer backing a mutation message.
enum Source {
    /// Opaque producer, pulled lazily.
    Live(Box<dyn Iterator<Item = DiffStep> + Send>),
    /// Materialised tail, retained for diagnostics.
    Snapshot(vec::IntoIter<DiffStep>),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl MutationMessage {
    /// Creates a message, taking ownership of the given producer.
    ///
    /// This is the general case: the producer is an arbitrary generation
    /// context yielding the diff on demand. It is boxed onto the heap and
    /// destroyed when the message is dropped.
    pub fn new<P>(producer: P) -> Self
    where
        P: Iterator<Item = DiffStep> + Send + 'static,
    {
        Self {
            source: Source::Live(Box::new(producer)),
        }
    }

    /// Creates an empty message.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(Vec::new())
    }

    /// Materialises the remaining steps for diagnostics.
    ///
    /// The not-yet-consumed tail of the sequence is pulled into a buffer,
    /// which replaces the producer; iteration continues over the buffer, and
    /// [`fmt::Display`] now renders the retained steps. The capture is
    /// destructive in the sense that only the remaining tail is kept, so
    /// repeated captures yield successively shorter renderings.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_diff::{del, ins, MutationMessage};
    /// use sdx_node::Node;
    ///
    /// // Snapshot after consuming the first step
    /// let mut message = MutationMessage::from([
    ///     ins(Node::named("α", 1)),
    ///     del(Node::named("β", 2i64)),
    /// ]);
    /// message.next();
    /// message.take_snapshot();
    /// assert!(message.to_string().starts_with("Diff--{del(β-"));
    /// ```
    pub fn take_snapshot(&mut self) {
        let steps: Vec<_> = match &mut self.source {
            Source::Live(producer) => producer.collect(),
            Source::Snapshot(rest) => rest.collect(),
        };
        self.source = Source::Snapshot(steps.into_iter());
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Iterator for MutationMessage {
    type Item = DiffStep;

    /// Takes the next step from the producer.
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Live(producer) => producer.next(),
            Source::Snapshot(rest) => rest.next(),
        }
    }
}

// ----------------------------------------------------------------------------

impl<const N: usize> From<[DiffStep; N]> for MutationMessage {
    /// Creates a message from a literal step sequence.
    #[inline]
    fn from(steps: [DiffStep; N]) -> Self {
        Self::from(Vec::from(steps))
    }
}

impl From<Vec<DiffStep>> for MutationMessage {
    /// Creates a message from a step sequence, taking ownership.
    #[inline]
    fn from(steps: Vec<DiffStep>) -> Self {
        Self {
            source: Source::Snapshot(steps.into_iter()),
        }
    }
}

impl From<&[DiffStep]> for MutationMessage {
    /// Creates a message from a step sequence, copying the steps.
    #[inline]
    fn from(steps: &[DiffStep]) -> Self {
        Self::from(steps.to_vec())
    }
}

impl FromIterator<DiffStep> for MutationMessage {
    /// Creates a message from an iterator, snapshotting the steps.
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = DiffStep>,
    {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for MutationMessage {
    /// Formats the message for display.
    ///
    /// A snapshotted message renders its remaining steps as
    /// `Diff--{v1, v2, …}`; a live producer is opaque and renders as
    /// `Diff--{…}`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Source::Live(_) => f.write_str("Diff--{…}"),
            Source::Snapshot(rest) => {
                f.write_str("Diff--{")?;
                for (pos, step) in rest.as_slice().iter().enumerate() {
                    if pos > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{step}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod next {
        use crate::{del, ins, set, MutationMessage};
        use sdx_node::Node;

        #[test]
        fn handles_literal_sequence() {
            let alpha = Node::named("α", 1);
            let mut message = MutationMessage::from([
                ins(&alpha),
                set(&alpha),
                del(&alpha),
            ]);
            assert_eq!(message.next(), Some(ins(&alpha)));
            assert_eq!(message.next(), Some(set(&alpha)));
            assert_eq!(message.next(), Some(del(&alpha)));
            assert_eq!(message.next(), None);
        }

        #[test]
        fn handles_opaque_producer() {
            struct Generator(i32);

            impl Iterator for Generator {
                type Item = crate::DiffStep;

                fn next(&mut self) -> Option<Self::Item> {
                    (self.0 > 0).then(|| {
                        self.0 -= 1;
                        ins(Node::named("α", self.0))
                    })
                }
            }

            let message = MutationMessage::new(Generator(3));
            assert_eq!(message.count(), 3);
        }
    }

    mod take_snapshot {
        use crate::{del, ins, MutationMessage};
        use sdx_node::Node;

        #[test]
        fn handles_remaining_tail() {
            let alpha = Node::named("α", 1);
            let beta = Node::named("β", 2i64);
            let mut message = MutationMessage::from([ins(&alpha), del(&beta)]);

            message.take_snapshot();
            let rendered = message.to_string();
            assert!(rendered.contains("ins(α-"));
            assert!(rendered.contains("del(β-"));

            // Only the tail is retained after consuming a step
            message.next();
            message.take_snapshot();
            let rendered = message.to_string();
            assert!(!rendered.contains("ins(α-"));
            assert!(rendered.contains("del(β-"));

            // Iteration continues over the captured tail
            assert_eq!(message.next(), Some(del(&beta)));
            message.take_snapshot();
            assert_eq!(message.to_string(), "Diff--{}");
        }

        #[test]
        fn handles_live_producer() {
            let message = MutationMessage::new(std::iter::empty());
            assert_eq!(message.to_string(), "Diff--{…}");
        }
    }
}
