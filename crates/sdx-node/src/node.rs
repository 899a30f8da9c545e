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

//! Node.

use std::fmt;

mod error;
mod id;
pub mod marker;
pub mod record;
pub mod time;
pub mod value;

pub use error::{Error, Result};
pub use id::Id;
use value::Value;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Node.
///
/// A node couples an immutable [`Id`] with a [`Value`] payload. The identity
/// is assigned at construction and never changes, while the payload can be
/// replaced by another payload of the same kind. Nodes are the atoms of all
/// structure descriptions: attributes and children of a [`Record`][] are
/// nodes, and a record is itself a possible node payload, which makes the
/// model recursive.
///
/// Two nodes _match_ when their identities are equal; full equality also
/// requires equal payloads. Since the identity folds the payload kind into
/// its hash, matching nodes always hold payloads of the same kind.
///
/// [`Record`]: crate::Record
///
/// # Examples
///
/// Create a named and an anonymous node:
///
/// ```
/// use sdx_node::Node;
///
/// // Create nodes with and without a symbol
/// let alpha = Node::named("α", 1);
/// let child = Node::from("a");
///
/// assert!(alpha.id().is_named());
/// assert!(!child.id().is_named());
/// ```
#[derive(Clone, Debug)]
pub struct Node {
    /// Identity, stable across payload change.
    id: Id,
    /// Payload.
    value: Value,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Node {
    /// Creates a named node from a symbol and payload.
    ///
    /// The identity is derived from the symbol and the payload kind, so two
    /// named nodes with the same symbol and payloads of the same kind always
    /// match, regardless of the payload values. This is what allows a change
    /// description to address an element it has never seen.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Node;
    ///
    /// // Create nodes with equal identity but different payloads
    /// let gamma = Node::named("γ", 3.45);
    /// let pi = Node::named("γ", 3.14159265);
    /// assert!(gamma.matches(&pi));
    /// assert_ne!(gamma, pi);
    /// ```
    #[must_use]
    pub fn named<V>(sym: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        let value = value.into();
        Self {
            id: Id::named(sym, value.kind()),
            value,
        }
    }

    /// Creates an anonymous node from a payload.
    ///
    /// Anonymous nodes receive a freshly generated hash-only identity, so no
    /// two separately constructed anonymous nodes ever match. Copies share
    /// the identity of their original.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Node;
    ///
    /// // Create two anonymous nodes with the same payload
    /// let a = Node::anon("a");
    /// let b = Node::anon("a");
    /// assert!(!a.matches(&b));
    /// assert!(a.matches(&a.clone()));
    /// ```
    #[must_use]
    pub fn anon<V>(value: V) -> Self
    where
        V: Into<Value>,
    {
        let value = value.into();
        Self {
            id: Id::anon(value.kind()),
            value,
        }
    }

    /// Returns the identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Returns a reference to the payload.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns a mutable reference to the payload.
    ///
    /// This deliberately hands out the payload in place, as nested records
    /// are mutated through it. The identity remains untouched.
    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Consumes the node, returning the payload.
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns whether this node matches the other node by identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Node;
    ///
    /// // Compare identities, not payloads
    /// let gamma = Node::named("γ", 3.45);
    /// assert!(gamma.matches(&Node::named("γ", 0.0)));
    /// assert!(!gamma.matches(&Node::named("δ", 3.45)));
    /// ```
    #[inline]
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Returns whether this node matches the given identity.
    #[inline]
    #[must_use]
    pub fn matches_id(&self, id: &Id) -> bool {
        self.id == *id
    }

    /// Replaces the payload, preserving the identity.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::WrongType`], if the new payload is of a
    /// different kind than the current payload. Identity is stable over the
    /// payload kind, so changing the kind would corrupt it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use sdx_node::{Node, Value};
    ///
    /// // Assign a new payload of the same kind
    /// let mut gamma = Node::named("γ", 3.45);
    /// gamma.assign(Value::Real(3.14159265))?;
    /// assert_eq!(gamma.value(), &Value::Real(3.14159265));
    ///
    /// // Payloads of a different kind are rejected
    /// assert!(gamma.assign(Value::Int(1)).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn assign(&mut self, value: Value) -> Result<()> {
        if self.value.kind() == value.kind() {
            self.value = value;
            Ok(())
        } else {
            Err(Error::WrongType {
                expected: self.value.kind(),
                actual: value.kind(),
            })
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<&Node> for Node {
    /// Creates a node as a copy, preserving the identity.
    #[inline]
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

// ----------------------------------------------------------------------------

impl PartialEq for Node {
    /// Compares two nodes for equality.
    ///
    /// Equality requires matching identities and equal payloads. Since the
    /// identity carries the payload kind, the payload comparison only ever
    /// reaches values of compatible variants.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.value == other.value
    }
}

// ----------------------------------------------------------------------------

impl fmt::Display for Node {
    /// Formats the node for display.
    ///
    /// The rendering is intended for diagnostics only and follows the form
    /// `sym-hash, kind, value`, e.g. `α-1a3f, int, 1`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}, {}", self.id, self.value.kind(), self.value)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod matches {
        use crate::{Node, Record};

        #[test]
        fn handles_named_identity() {
            let a = Node::named("α", 1);
            let b = Node::named("α", 42);
            let c = Node::named("β", 1);
            assert!(a.matches(&b));
            assert!(!a.matches(&c));
        }

        #[test]
        fn handles_kind_in_identity() {
            let int = Node::named("α", 1);
            let long = Node::named("α", 1i64);
            assert!(!int.matches(&long));
        }

        #[test]
        fn handles_anonymous_identity() {
            let a = Node::anon("a");
            let b = Node::anon("a");
            assert!(!a.matches(&b));
            assert!(a.matches(&Node::from(&a)));
        }

        #[test]
        fn handles_record_identity() {
            let sub = Record::builder().node();
            let copy = sub.clone();
            assert!(sub.matches(&copy));
            assert!(!sub.matches(&Record::builder().node()));
        }
    }

    mod assign {
        use crate::{Node, Value};

        #[test]
        fn preserves_identity() {
            let mut gamma = Node::named("γ", 3.45);
            let id = gamma.id().clone();
            gamma.assign(Value::Real(3.14159265)).unwrap();
            assert_eq!(gamma.id(), &id);
            assert_eq!(gamma.value(), &Value::Real(3.14159265));
        }

        #[test]
        fn rejects_kind_change() {
            let mut gamma = Node::named("γ", 3.45);
            assert!(gamma.assign(Value::Text("π".into())).is_err());
            assert_eq!(gamma.value(), &Value::Real(3.45));
        }
    }
}
