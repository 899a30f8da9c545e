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

//! Ignore sink.

use sdx_node::Node;

use crate::mutator::{Result, Scope, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Terminal ignore sink.
///
/// Accepts every verb with no effect, including nested scopes, which are
/// consumed against a fresh sink of the same kind. The inversion of the
/// terminal empty layer: where the empty layer makes a target reject every
/// change, the sink makes it swallow any change silently.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ignore;

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl TreeMutator for Ignore {
    /// Pretends that source elements remain.
    ///
    /// Verbs consuming source elements are preceded by this check, so the
    /// sink must never report exhaustion.
    fn has_src(&self) -> bool {
        true
    }

    /// Pretends the current source element matches the spec.
    fn match_src(&self, spec: &Node) -> bool {
        let _ = spec;
        true
    }

    /// Pretends to accept the current source element.
    fn accept_src(&mut self, spec: &Node) -> bool {
        let _ = spec;
        true
    }

    /// Pretends to relocate a source element.
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        let _ = spec;
        Ok(true)
    }

    /// Pretends to fast-forward to the mark.
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        let _ = marker;
        Ok(true)
    }

    /// Pretends to construct a new element.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        let _ = spec;
        Ok(true)
    }

    /// Pretends to assign the spec's payload.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        let _ = spec;
        Ok(true)
    }

    /// Consumes the nested scope against a fresh sink.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        let _ = spec;
        let mut child = Ignore;
        scope(&mut child)?;
        Ok(true)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod mutate_child {
        use crate::{builder, TreeMutator};
        use sdx_node::{Node, Record};

        #[test]
        fn handles_nested_scopes() {
            let mut mutator = builder().ignore_all_changes();
            mutator.init();

            let sub = Record::builder().node();
            assert_eq!(mutator.inject_new(&sub), Ok(true));
            let entered = mutator.mutate_child(&sub, &mut |child| {
                child.init();
                assert_eq!(child.inject_new(&Node::anon('b')), Ok(true));
                assert!(child.complete_scope());
                Ok(())
            });
            assert_eq!(entered, Ok(true));
            assert!(mutator.complete_scope());
        }
    }
}
