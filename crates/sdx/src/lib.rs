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

//! Structural diff exchange.
//!
//! A framework to describe, transport and apply structural changes to
//! hierarchical data as a linearised sequence of verb tokens. The producer
//! and the consumer of a change stay fully decoupled: neither needs to know
//! the other's data layout, only the abstract schema of "objects with
//! attributes and ordered children" is shared.
//!
//! The member crates cover the layers of the exchange:
//!
//! - [`sdx_node`] — the value model: nodes, identities, payloads, records.
//! - [`sdx_diff`] — the diff language: verbs, interpreters, messages.
//! - [`sdx_mutator`] — the binding side: mutators and the binding builder.
//! - [`sdx_apply`] — the application driver walking a diff into a target.
//!
//! # Examples
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use sdx::{diff, ins, DiffApplicator, Node, Record};
//!
//! // Describe a change and apply it to a record
//! let mut record = Record::new();
//! DiffApplicator::new(&mut record).consume(diff![
//!     ins(Node::named("type", "X")),
//!     ins(Node::named("α", 1)),
//!     ins(Node::anon('b')),
//! ])?;
//!
//! assert_eq!(record.type_tag(), Some("X"));
//! # Ok(())
//! # }
//! ```

pub use sdx_apply::DiffApplicator;
pub use sdx_diff::{
    after, del, diff, emu, find, ins, list, mutate, pick, set, skip, DiffStep,
    ListDiffInterpreter, MutationMessage, TreeDiffInterpreter,
};
pub use sdx_mutator::{
    builder, collection, Builder, DiffMutable, Error, Probe, Result, Scope,
    TreeMutator,
};
pub use sdx_node::{FromValue, Id, Kind, Marker, Node, Record, Time, Value};
