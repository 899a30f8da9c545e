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

//! Payload value conversions.

use std::time::Duration;

use super::Value;
use crate::node::record::Record;
use crate::node::time::Time;
use crate::node::Node;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Extraction of a typed value from a payload.
///
/// This trait is implemented for every leaf type of [`Value`], as well as
/// for [`Record`]. It backs [`Value::get`] and the typed setter closures of
/// mutation bindings, where the payload of an incoming node is converted
/// before it is handed to application data.
pub trait FromValue: Sized {
    /// Extracts a typed copy of the value, if the kind matches.
    fn from_value(value: &Value) -> Option<Self>;
}

// ----------------------------------------------------------------------------
// Macros
// ----------------------------------------------------------------------------

/// Implements the conversions for a leaf type.
macro_rules! leaf {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Value {
            /// Creates a payload value.
            #[inline]
            fn from(value: $type) -> Self {
                Self::$variant(value.into())
            }
        }

        impl From<$type> for Node {
            /// Creates an anonymous node from a payload.
            #[inline]
            fn from(value: $type) -> Self {
                Self::anon(Value::$variant(value.into()))
            }
        }

        impl FromValue for $type {
            /// Extracts a typed copy of the value, if the kind matches.
            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(value) => Some(value.clone()),
                    _ => None,
                }
            }
        }
    };
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

leaf!(i32, Int);
leaf!(i64, Long);
leaf!(u64, Uint);
leaf!(bool, Bool);
leaf!(f64, Real);
leaf!(char, Char);
leaf!(String, Text);
leaf!(Time, Time);
leaf!(Duration, Duration);
leaf!(Record, Rec);

// ----------------------------------------------------------------------------

impl From<&str> for Value {
    /// Creates a text payload value.
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<&str> for Node {
    /// Creates an anonymous text node.
    #[inline]
    fn from(value: &str) -> Self {
        Self::anon(Value::Text(value.into()))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod from_value {
        use crate::{Record, Value};

        #[test]
        fn handles_leaf_types() {
            assert_eq!(Value::from(1).get::<i32>(), Some(1));
            assert_eq!(Value::from(2i64).get::<i64>(), Some(2));
            assert_eq!(Value::from("a").get::<String>(), Some("a".into()));
            assert_eq!(Value::from('b').get::<char>(), Some('b'));
        }

        #[test]
        fn handles_records() {
            let record = Record::builder().attrib("α", 1).build();
            let value = Value::from(record.clone());
            assert_eq!(value.get::<Record>(), Some(record));
        }

        #[test]
        fn handles_mismatches() {
            assert_eq!(Value::from(1).get::<i64>(), None);
            assert_eq!(Value::from("a").get::<char>(), None);
        }
    }
}
