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

//! Record.

use std::fmt;
use std::slice::Iter;

mod builder;

pub use builder::Builder;

use super::Node;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Reserved attribute symbol carrying the type tag.
pub const TYPE_SYM: &str = "type";

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Record.
///
/// A record is the reference shape of an "object": an optional type tag, an
/// ordered sequence of _attributes_ (nodes with a symbolic name) and an
/// ordered sequence of _children_ (anonymous nodes, treated positionally).
/// The two sequences are kept strictly apart, with attributes preceding
/// children in traversal order.
///
/// Attribute symbols need not be unique; lookup via [`Record::get`] returns
/// the first match in order. The attribute symbol `type` is reserved: it is
/// stored as the type tag instead of an ordinary attribute.
///
/// Records implement [`PartialEq`] by structural comparison and can be node
/// payloads themselves, so trees of arbitrary depth can be expressed.
///
/// # Examples
///
/// ```
/// use sdx_node::Record;
///
/// // Create record with attributes and children
/// let record = Record::builder()
///     .type_tag("X")
///     .attrib("α", 1)
///     .child("a")
///     .build();
///
/// assert_eq!(record.type_tag(), Some("X"));
/// assert_eq!(record.get("α").unwrap().value().get::<i32>(), Some(1));
/// assert_eq!(record.scope().count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    /// Type tag, if any.
    type_tag: Option<String>,
    /// Ordered attribute nodes.
    attribs: Vec<Node>,
    /// Ordered child nodes.
    children: Vec<Node>,
}

/// Mutable access to the parts of a record.
///
/// This is the low-level surface used by mutation adapters, which need to
/// borrow the type tag, the attribute sequence and the child sequence at the
/// same time. The attribute/child distinction becomes the caller's
/// responsibility when going through this struct.
pub struct Parts<'a> {
    /// Type tag, if any.
    pub type_tag: &'a mut Option<String>,
    /// Ordered attribute nodes.
    pub attribs: &'a mut Vec<Node>,
    /// Ordered child nodes.
    pub children: &'a mut Vec<Node>,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Record {
    /// Creates an empty record.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Record;
    ///
    /// // Create record from builder
    /// let record = Record::builder().attrib("α", 1).build();
    /// assert_eq!(record.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Returns the type tag, if any.
    #[inline]
    #[must_use]
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    /// Sets the type tag.
    #[inline]
    pub fn set_type_tag<T>(&mut self, type_tag: T)
    where
        T: Into<String>,
    {
        self.type_tag = Some(type_tag.into());
    }

    /// Returns the first attribute with the given symbol, if any.
    ///
    /// Duplicate attribute symbols are permitted; this method returns the
    /// first match in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Record;
    ///
    /// // Lookup returns the first match in order
    /// let record = Record::builder()
    ///     .attrib("γ", 3.45)
    ///     .attrib("γ", 6.78)
    ///     .build();
    /// assert_eq!(record.get("γ").unwrap().value().get::<f64>(), Some(3.45));
    /// ```
    #[must_use]
    pub fn get(&self, sym: &str) -> Option<&Node> {
        self.attribs.iter().find(|node| node.id().sym() == Some(sym))
    }

    /// Creates an iterator over the attribute nodes.
    #[inline]
    pub fn attribs(&self) -> Iter<'_, Node> {
        self.attribs.iter()
    }

    /// Creates an iterator over the child nodes.
    #[inline]
    pub fn scope(&self) -> Iter<'_, Node> {
        self.children.iter()
    }

    /// Appends an attribute node.
    #[inline]
    pub fn append_attrib(&mut self, node: Node) {
        self.attribs.push(node);
    }

    /// Appends a child node.
    #[inline]
    pub fn append_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Returns the number of attribute and child nodes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.attribs.len() + self.children.len()
    }

    /// Returns whether the record holds no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attribs.is_empty() && self.children.is_empty()
    }

    /// Returns mutable access to the parts of the record.
    #[inline]
    pub fn parts_mut(&mut self) -> Parts<'_> {
        Parts {
            type_tag: &mut self.type_tag,
            attribs: &mut self.attribs,
            children: &mut self.children,
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Record {
    /// Formats the record for display.
    ///
    /// Renders as `Rec(type){attribs | children}`, omitting empty parts,
    /// e.g. `Rec(X){α = 1 | a, b}` or `Rec()` for an empty untyped record.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rec({})", self.type_tag.as_deref().unwrap_or_default())?;
        if self.is_empty() {
            return Ok(());
        }
        f.write_str("{")?;
        for (pos, node) in self.attribs.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", node.id().sym().unwrap_or("?"), node.value())?;
        }
        if !self.attribs.is_empty() && !self.children.is_empty() {
            f.write_str(" | ")?;
        }
        for (pos, node) in self.children.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", node.value())?;
        }
        f.write_str("}")
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
