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

//! Diff steps.

use std::fmt;

use sdx_node::Node;

pub mod interpreter;
pub mod list;
mod macros;
pub mod message;

use interpreter::TreeDiffInterpreter;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Diff step.
///
/// A diff step is one verb token of the tree diff language: the discriminant
/// selects the handler on the [`TreeDiffInterpreter`] capability set, while
/// the embedded [`Node`] is the single argument every verb carries. The verb
/// identifier returned by [`DiffStep::verb`] is used for diagnostics and
/// error reporting.
///
/// The meaning of the verbs, in terms of the scope a diff is currently
/// working through:
///
/// - `ins(e)` — append the new element `e` at the current position.
/// - `del(e)` — consume the current element, which must match `e`, and
///   discard it.
/// - `pick(e)` — consume the current element, which must match `e`, and
///   emit it unchanged.
/// - `find(e)` — search forward for an element matching `e`, consume and
///   emit it; the hole left behind is discarded by a later `skip`.
/// - `skip(e)` — consume and discard the current element; cleans up the
///   hole left by a preceding `find`.
/// - `set(e)` — locate the element with `e`'s identity and replace its
///   payload with `e`'s; ordering is unaffected.
/// - `after(m)` — accept everything up to and including the element
///   matching `m`; the markers `_ATTRIBS_` and `_END_` fast-forward to the
///   respective boundary.
/// - `mut(e)` — open the nested scope of the element identified by `e`;
///   subsequent verbs apply inside that scope.
/// - `emu(e)` — close the scope opened by the corresponding `mut(e)`.
///
/// # Examples
///
/// ```
/// use sdx_diff::{ins, DiffStep};
/// use sdx_node::Node;
///
/// // Create a step and inspect it
/// let step = ins(Node::named("α", 1));
/// assert_eq!(step.verb(), "ins");
/// assert_eq!(step.spec().id().sym(), Some("α"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum DiffStep {
    /// Append a new element.
    Ins(Node),
    /// Consume and discard the current element.
    Del(Node),
    /// Consume and emit the current element.
    Pick(Node),
    /// Search forward, consume and emit the match.
    Find(Node),
    /// Consume and discard the current element or hole.
    Skip(Node),
    /// Replace the payload of the addressed element.
    Set(Node),
    /// Accept everything up to and including the mark.
    After(Node),
    /// Open the nested scope of the addressed element.
    Mut(Node),
    /// Close the current nested scope.
    Emu(Node),
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl DiffStep {
    /// Returns the verb identifier.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Ins(_) => "ins",
            Self::Del(_) => "del",
            Self::Pick(_) => "pick",
            Self::Find(_) => "find",
            Self::Skip(_) => "skip",
            Self::Set(_) => "set",
            Self::After(_) => "after",
            Self::Mut(_) => "mut",
            Self::Emu(_) => "emu",
        }
    }

    /// Returns the argument node.
    #[must_use]
    pub fn spec(&self) -> &Node {
        match self {
            Self::Ins(node)
            | Self::Del(node)
            | Self::Pick(node)
            | Self::Find(node)
            | Self::Skip(node)
            | Self::Set(node)
            | Self::After(node)
            | Self::Mut(node)
            | Self::Emu(node) => node,
        }
    }

    /// Applies the step to the given interpreter.
    ///
    /// This is the second half of the double dispatch: the discriminant has
    /// already selected the handler, and the interpreter now supplies the
    /// implementation for its target context.
    ///
    /// # Errors
    ///
    /// This method returns whatever error the interpreter's handler raises.
    pub fn apply_to<I>(&self, interpreter: &mut I) -> Result<(), I::Error>
    where
        I: TreeDiffInterpreter + ?Sized,
    {
        match self {
            Self::Ins(node) => interpreter.ins(node),
            Self::Del(node) => interpreter.del(node),
            Self::Pick(node) => interpreter.pick(node),
            Self::Find(node) => interpreter.find(node),
            Self::Skip(node) => interpreter.skip(node),
            Self::Set(node) => interpreter.set(node),
            Self::After(node) => interpreter.after(node),
            Self::Mut(node) => interpreter.enter(node),
            Self::Emu(node) => interpreter.leave(node),
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Creates an `ins` step, appending a new element.
#[inline]
pub fn ins<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Ins(node.into())
}

/// Creates a `del` step, discarding the current element.
#[inline]
pub fn del<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Del(node.into())
}

/// Creates a `pick` step, emitting the current element.
#[inline]
pub fn pick<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Pick(node.into())
}

/// Creates a `find` step, emitting a match found further ahead.
#[inline]
pub fn find<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Find(node.into())
}

/// Creates a `skip` step, discarding the current element or hole.
#[inline]
pub fn skip<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Skip(node.into())
}

/// Creates a `set` step, replacing the payload of the addressed element.
#[inline]
pub fn set<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Set(node.into())
}

/// Creates an `after` step, accepting everything up to the mark.
#[inline]
pub fn after<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::After(node.into())
}

/// Creates a `mut` step, opening the addressed nested scope.
#[inline]
pub fn mutate<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Mut(node.into())
}

/// Creates an `emu` step, closing the current nested scope.
#[inline]
pub fn emu<N>(node: N) -> DiffStep
where
    N: Into<Node>,
{
    DiffStep::Emu(node.into())
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for DiffStep {
    /// Formats the step for display.
    ///
    /// Renders the diagnostic wire form `verb(id, kind, value)`, e.g.
    /// `ins(α-1a3f, int, 1)`. This rendering is for logs and error messages
    /// only, it is not a transport format.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.verb(), self.spec())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod verb {
        use crate::{emu, ins, mutate, set};
        use sdx_node::{Node, Record};

        #[test]
        fn handles_identifiers() {
            let sub = Record::builder().node();
            assert_eq!(ins(Node::named("α", 1)).verb(), "ins");
            assert_eq!(set(Node::named("γ", 3.45)).verb(), "set");
            assert_eq!(mutate(&sub).verb(), "mut");
            assert_eq!(emu(&sub).verb(), "emu");
        }

        #[test]
        fn handles_equality() {
            let alpha = Node::named("α", 1);
            assert_eq!(ins(&alpha), ins(&alpha));
            assert_ne!(ins(&alpha), set(&alpha));
        }
    }

    mod display {
        use crate::ins;
        use sdx_node::Node;

        #[test]
        fn handles_wire_form() {
            let rendered = ins(Node::named("α", 1)).to_string();
            assert!(rendered.starts_with("ins(α-"));
            assert!(rendered.ends_with(", int, 1)"));
        }
    }
}
