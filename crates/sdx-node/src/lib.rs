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

//! Generic node and record abstractions.
//!
//! This crate provides the shared value model for describing hierarchical
//! data as "objects with attributes and ordered children", without binding
//! either side to a concrete data structure. A [`Node`] couples a stable
//! [`Id`] with a [`Value`] payload, and a [`Record`] groups nodes into an
//! ordered attribute sequence and an ordered child sequence, optionally
//! carrying a type tag. Records can themselves be node payloads, which
//! yields arbitrarily nested, tree-shaped data.

mod node;

pub use node::marker::Marker;
pub use node::record::{self, Record};
pub use node::time::Time;
pub use node::value::{FromValue, Kind, Value};
pub use node::{Error, Id, Node, Result};
