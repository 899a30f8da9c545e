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

//! Scope markers.

use super::value::Value;
use super::Node;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Reserved symbol marking the end of the current scope.
pub(super) const END: &str = "_END_";

/// Reserved symbol marking the end of the attribute scope.
pub(super) const ATTRIBS: &str = "_ATTRIBS_";

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Scope markers.
///
/// Markers are payload-free nodes with reserved symbols, used as boundary
/// references where a change description needs to address a position rather
/// than an element: the end of the attribute scope and the end of the
/// current scope. Both are detectable on the identity via
/// [`Id::marks_attribs`][] and [`Id::marks_end`][].
///
/// [`Id::marks_attribs`]: crate::Id::marks_attribs
/// [`Id::marks_end`]: crate::Id::marks_end
///
/// # Examples
///
/// ```
/// use sdx_node::Marker;
///
/// // Create boundary markers
/// assert!(Marker::end().id().marks_end());
/// assert!(Marker::attribs().id().marks_attribs());
/// ```
pub struct Marker;

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Marker {
    /// Creates the end-of-scope marker node.
    #[must_use]
    pub fn end() -> Node {
        Node::named(END, Value::Key(0))
    }

    /// Creates the end-of-attributes marker node.
    #[must_use]
    pub fn attribs() -> Node {
        Node::named(ATTRIBS, Value::Key(0))
    }
}
