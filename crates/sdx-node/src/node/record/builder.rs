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

//! Record builder.

use super::Record;
use crate::node::value::Value;
use crate::node::Node;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Record builder.
///
/// # Examples
///
/// ```
/// use sdx_node::Record;
///
/// // Create record from builder
/// let record = Record::builder()
///     .type_tag("Y")
///     .attrib("β", 2i64)
///     .child('b')
///     .child('a')
///     .build();
/// assert_eq!(record.type_tag(), Some("Y"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// Record under construction.
    record: Record,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Builder {
    /// Sets the type tag.
    #[must_use]
    pub fn type_tag<T>(mut self, type_tag: T) -> Self
    where
        T: Into<String>,
    {
        self.record.set_type_tag(type_tag);
        self
    }

    /// Appends an attribute, constructed from symbol and payload.
    #[must_use]
    pub fn attrib<V>(mut self, sym: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        self.record.append_attrib(Node::named(sym, value));
        self
    }

    /// Appends a child node.
    ///
    /// Accepts anything convertible into a node; passing a node reference
    /// preserves its identity, passing a plain payload creates a fresh
    /// anonymous node.
    #[must_use]
    pub fn child<N>(mut self, node: N) -> Self
    where
        N: Into<Node>,
    {
        self.record.append_child(node.into());
        self
    }

    /// Builds the record.
    #[inline]
    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }

    /// Builds the record and wraps it into a fresh anonymous node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::{Kind, Record};
    ///
    /// // Create anonymous node holding an empty record
    /// let node = Record::builder().node();
    /// assert_eq!(node.id().kind(), Kind::Rec);
    /// assert!(!node.id().is_named());
    /// ```
    #[inline]
    #[must_use]
    pub fn node(self) -> Node {
        Node::anon(self.record)
    }

    /// Builds the record and wraps it into a named node.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Record;
    ///
    /// // Create named node holding an empty record
    /// let node = Record::builder().named_node("δ");
    /// assert_eq!(node.id().sym(), Some("δ"));
    /// ```
    #[inline]
    #[must_use]
    pub fn named_node(self, sym: &str) -> Node {
        Node::named(sym, self.record)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod child {
        use crate::{Node, Record};

        #[test]
        fn preserves_identity() {
            let child = Node::anon('b');
            let record = Record::builder().child(&child).build();
            assert_eq!(record.scope().next(), Some(&child));
        }
    }
}
