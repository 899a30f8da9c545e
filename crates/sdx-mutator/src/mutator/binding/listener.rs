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

//! Structural-change listener.

use sdx_node::Node;

use crate::mutator::{Result, Scope, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Structural-change listener layer.
///
/// Wraps a layer stack and observes the structural primitives passing
/// through: injection, skipping and relocation change the shape of the
/// scope, whereas assignment and pure confirmation do not. If any
/// structural primitive took effect, the listener fires once when the scope
/// completes, then rearms for the next cycle.
pub struct Listener<'a, L> {
    /// Listener invoked on structural change.
    listener: Box<dyn FnMut() + 'a>,
    /// Whether a structural change occurred in this cycle.
    dirty: bool,
    /// Next layer down the stack.
    next: L,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a, L> Listener<'a, L> {
    /// Creates a listener layer over the given stack.
    pub(crate) fn new<F>(listener: F, next: L) -> Self
    where
        F: FnMut() + 'a,
    {
        Self {
            listener: Box::new(listener),
            dirty: false,
            next,
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<L> TreeMutator for Listener<'_, L>
where
    L: TreeMutator,
{
    /// Initialises the layers below.
    fn init(&mut self) {
        self.next.init();
    }

    /// Returns whether source elements remain in the layers below.
    fn has_src(&self) -> bool {
        self.next.has_src()
    }

    /// Returns whether the current source element matches the spec.
    fn match_src(&self, spec: &Node) -> bool {
        self.next.match_src(spec)
    }

    /// Accepts the current source element, if it matches the spec.
    fn accept_src(&mut self, spec: &Node) -> bool {
        self.next.accept_src(spec)
    }

    /// Discards the current source element, which is a structural change.
    fn skip_src(&mut self, spec: &Node) -> Result {
        self.next.skip_src(spec)?;
        self.dirty = true;
        Ok(())
    }

    /// Relocates a source element, which is a structural change.
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        let found = self.next.find_src(spec)?;
        self.dirty |= found;
        Ok(found)
    }

    /// Accepts all source elements up to and including the mark.
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        self.next.accept_until(marker)
    }

    /// Injects a new element, which is a structural change.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        let injected = self.next.inject_new(spec)?;
        self.dirty |= injected;
        Ok(injected)
    }

    /// Assigns a payload, which is a pure value change.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        self.next.assign_elm(spec)
    }

    /// Opens the nested scope of the element addressed by the spec.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        self.next.mutate_child(spec, scope)
    }

    /// Completes the scope, firing the listener on structural change.
    fn complete_scope(&mut self) -> bool {
        let settled = self.next.complete_scope();
        if self.dirty {
            (self.listener)();
            self.dirty = false;
        }
        settled
    }

    /// Renders the current source element of the layers below.
    fn peek_src(&self) -> Option<String> {
        self.next.peek_src()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod complete_scope {
        use std::cell::Cell;

        use crate::{builder, collection, TreeMutator};
        use sdx_node::{Marker, Node};

        #[test]
        fn handles_structural_changes() {
            let fired = Cell::new(0);
            let mut target: Vec<String> = Vec::new();
            let val_a = Node::anon("a");
            let val_b = Node::anon("b");

            {
                let mut mutator = builder()
                    .attach(
                        collection(&mut target)
                            .construct_from(|spec| spec.value().to_string())
                            .match_element(|spec, elm| {
                                spec.value().get::<String>().as_ref() == Some(elm)
                            })
                            .assign_element(|elm, spec| {
                                *elm = spec.value().to_string();
                                Ok(true)
                            }),
                    )
                    .on_seq_change(|| fired.set(fired.get() + 1));
                mutator.init();

                // Insertions count as structural change, fired once
                mutator.inject_new(&val_a).unwrap();
                mutator.inject_new(&val_b).unwrap();
                assert!(mutator.complete_scope());
            }
            assert_eq!(fired.get(), 1);

            {
                let mut mutator = builder()
                    .attach(
                        collection(&mut target)
                            .construct_from(|spec| spec.value().to_string())
                            .match_element(|spec, elm: &String| {
                                // Case-insensitive, so a changed value still
                                // counts as the same element
                                spec.value().to_string().to_lowercase()
                                    == elm.to_lowercase()
                            })
                            .assign_element(|elm, spec| {
                                *elm = spec.value().to_string();
                                Ok(true)
                            }),
                    )
                    .on_seq_change(|| fired.set(fired.get() + 1));
                mutator.init();

                // Assignment is a pure value change, the listener stays quiet
                mutator.accept_until(&Marker::end()).unwrap();
                assert_eq!(mutator.assign_elm(&Node::anon("A")), Ok(true));
                assert!(mutator.complete_scope());
            }
            assert_eq!(fired.get(), 1);
            assert_eq!(target, ["A", "b"]);
        }
    }
}
