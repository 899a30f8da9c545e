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

//! Interpreter capability sets.

use sdx_node::Node;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// List diff interpreter.
///
/// The capability set of the flat-list dialect: five verbs describing how an
/// ordered sequence of elements of type `E` is transformed. Interpreters are
/// the receiving half of the double dispatch — a step selects one of these
/// handlers, the interpreter decides what the verb means for its target.
///
/// The associated `Error` type is surfaced unchanged through
/// [`ListStep::apply_to`][], so interpreters choose their own failure
/// representation.
///
/// [`ListStep::apply_to`]: crate::list::ListStep::apply_to
pub trait ListDiffInterpreter<E> {
    /// Error raised by the handlers.
    type Error;

    /// Appends a new element at the current position.
    fn ins(&mut self, elm: &E) -> Result<(), Self::Error>;

    /// Consumes the current element, which must match, and discards it.
    fn del(&mut self, elm: &E) -> Result<(), Self::Error>;

    /// Consumes the current element, which must match, and emits it.
    fn pick(&mut self, elm: &E) -> Result<(), Self::Error>;

    /// Searches forward for a match, consumes and emits it.
    fn find(&mut self, elm: &E) -> Result<(), Self::Error>;

    /// Consumes and discards the current element or hole.
    fn skip(&mut self, elm: &E) -> Result<(), Self::Error>;
}

/// Tree diff interpreter.
///
/// The capability set of the tree dialect: the list verbs instantiated at
/// [`Node`], plus assignment, fast-forwarding and nested scopes. The scope
/// bracketing handlers are named `enter` and `leave`, corresponding to the
/// verbs `mut` and `emu`.
///
/// Extending the vocabulary means adding a handler here and updating every
/// interpreter — intentional, since the vocabulary is small and stable.
pub trait TreeDiffInterpreter: ListDiffInterpreter<Node> {
    /// Replaces the payload of the element addressed by identity.
    fn set(&mut self, spec: &Node) -> Result<(), Self::Error>;

    /// Accepts everything up to and including the given mark.
    fn after(&mut self, marker: &Node) -> Result<(), Self::Error>;

    /// Opens the nested scope of the addressed element (verb `mut`).
    fn enter(&mut self, spec: &Node) -> Result<(), Self::Error>;

    /// Closes the current nested scope (verb `emu`).
    fn leave(&mut self, spec: &Node) -> Result<(), Self::Error>;
}
