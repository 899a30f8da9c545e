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

//! Payload values.

use std::fmt;
use std::time::Duration;

mod convert;

pub use convert::FromValue;

use super::record::Record;
use super::time::Time;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Payload value.
///
/// The payload of a [`Node`][] is drawn from a fixed, closed set of leaf
/// variants, plus the [`Record`] variant for nested structure. The set is
/// deliberately closed: both sides of a change exchange must agree on the
/// possible payloads without negotiating a schema.
///
/// [`Node`]: crate::Node
///
/// # Examples
///
/// ```
/// use sdx_node::{Kind, Value};
///
/// // Create payload values via conversion
/// let value = Value::from(42);
/// assert_eq!(value.kind(), Kind::Int);
/// assert_eq!(value.get::<i32>(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 64-bit unsigned integer.
    Uint(u64),
    /// Boolean.
    Bool(bool),
    /// Double precision floating point.
    Real(f64),
    /// Single character.
    Char(char),
    /// Text.
    Text(String),
    /// Time-of-day value.
    Time(Time),
    /// Duration.
    Duration(Duration),
    /// Opaque hash key.
    Key(u64),
    /// Nested record.
    Rec(Record),
}

/// Payload kind.
///
/// The discriminant-only mirror of [`Value`], carried inside an identity so
/// equality comparison only reaches the payload for compatible variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 64-bit unsigned integer.
    Uint,
    /// Boolean.
    Bool,
    /// Double precision floating point.
    Real,
    /// Single character.
    Char,
    /// Text.
    Text,
    /// Time-of-day value.
    Time,
    /// Duration.
    Duration,
    /// Opaque hash key.
    Key,
    /// Nested record.
    Rec,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Value {
    /// Returns the kind of the value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Int(_) => Kind::Int,
            Self::Long(_) => Kind::Long,
            Self::Uint(_) => Kind::Uint,
            Self::Bool(_) => Kind::Bool,
            Self::Real(_) => Kind::Real,
            Self::Char(_) => Kind::Char,
            Self::Text(_) => Kind::Text,
            Self::Time(_) => Kind::Time,
            Self::Duration(_) => Kind::Duration,
            Self::Key(_) => Kind::Key,
            Self::Rec(_) => Kind::Rec,
        }
    }

    /// Extracts a typed copy of the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Value;
    ///
    /// // Extract values of matching and non-matching types
    /// let value = Value::from(3.45);
    /// assert_eq!(value.get::<f64>(), Some(3.45));
    /// assert_eq!(value.get::<i32>(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn get<T>(&self) -> Option<T>
    where
        T: FromValue,
    {
        T::from_value(self)
    }

    /// Returns a reference to the nested record, if any.
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Rec(record) => Some(record),
            _ => None,
        }
    }

    /// Returns a mutable reference to the nested record, if any.
    #[inline]
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Rec(record) => Some(record),
            _ => None,
        }
    }
}

// ----------------------------------------------------------------------------

impl Kind {
    /// Returns the name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Uint => "uint",
            Self::Bool => "bool",
            Self::Real => "real",
            Self::Char => "char",
            Self::Text => "text",
            Self::Time => "time",
            Self::Duration => "duration",
            Self::Key => "key",
            Self::Rec => "rec",
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Value {
    /// Formats the value for display.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(value) => value.fmt(f),
            Self::Long(value) => value.fmt(f),
            Self::Uint(value) => value.fmt(f),
            Self::Bool(value) => value.fmt(f),
            Self::Real(value) => value.fmt(f),
            Self::Char(value) => value.fmt(f),
            Self::Text(value) => value.fmt(f),
            Self::Time(value) => value.fmt(f),
            Self::Duration(value) => write!(f, "{}ms", value.as_millis()),
            Self::Key(value) => write!(f, "{value:016x}"),
            Self::Rec(value) => value.fmt(f),
        }
    }
}

impl fmt::Display for Kind {
    /// Formats the kind for display.
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod kind {
        use crate::{Record, Value};

        #[test]
        fn handles_all_variants() {
            let values = [
                Value::from(1),
                Value::from(2i64),
                Value::from(3u64),
                Value::from(true),
                Value::from(3.45),
                Value::from('b'),
                Value::from("a"),
                Value::from(crate::Time::new(12, 34, 56, 78)),
                Value::from(std::time::Duration::from_millis(25)),
                Value::Key(42),
                Value::from(Record::new()),
            ];
            for value in &values {
                assert_eq!(value.get::<i32>().is_some(), value.kind() == crate::Kind::Int);
            }
        }
    }
}
