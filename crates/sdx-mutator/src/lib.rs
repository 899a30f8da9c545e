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

//! Tree mutator abstractions and binding builder.
//!
//! A [`TreeMutator`] is the polymorphic sink through which generic change
//! descriptions reach concrete application data: it exposes the mutation
//! primitives an interpreter invokes, while the data itself stays private to
//! its owner. Concrete mutators are assembled declaratively with the
//! [`Builder`] as a stack of layers, each claiming the verbs it is
//! responsible for and passing everything else further down. Targets
//! announce their ability to be reshaped by implementing [`DiffMutable`].

mod mutator;

pub use mutator::binding::collection::{collection, Collection, CollectionBinding, Opener};
pub use mutator::binding::field::Field;
pub use mutator::binding::ignore::Ignore;
pub use mutator::binding::listener::Listener;
pub use mutator::binding::object::Object;
pub use mutator::builder::Builder;
pub use mutator::probe::{Event, Probe, ProbeBinding};
pub use mutator::{builder, DiffMutable, Empty, Error, Result, Scope, TreeMutator};
