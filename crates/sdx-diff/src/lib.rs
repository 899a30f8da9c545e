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

//! Linearised diff language.
//!
//! Structural changes to hierarchical data are described as a finite sequence
//! of verb tokens, each carrying exactly one [`Node`][] as its argument. The
//! vocabulary is small and closed: five verbs describe flat-list changes,
//! four more handle value assignment, fast-forwarding and nested scopes.
//! Interpretation is a double dispatch — the verb selects the handler, the
//! concrete interpreter supplies the implementation — expressed here as a
//! single `match` over the [`DiffStep`] discriminant.
//!
//! [`Node`]: sdx_node::Node

mod diff;

pub use diff::interpreter::{ListDiffInterpreter, TreeDiffInterpreter};
pub use diff::message::MutationMessage;
pub use diff::{after, del, emu, find, ins, mutate, pick, set, skip};
pub use diff::{list, DiffStep};
