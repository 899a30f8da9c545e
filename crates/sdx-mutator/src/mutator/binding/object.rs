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

//! Object-valued attribute binding.

use sdx_node::Node;

use crate::mutator::{Error, Result, Scope, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Object-valued attribute binding.
///
/// Binds one named attribute to a factory for nested mutators, enabling
/// recursion into an object stored in a data field. When a `mut` verb
/// addresses the bound name, the factory builds a mutator over the nested
/// data and runs the scope continuation with it; the nested diff is applied
/// within that call.
///
/// Like the plain attribute field binding, this layer has no notion of
/// ordering; injection and acceptance of the bound name are no-ops, the
/// actual content arrives when the nested scope is mutated.
pub struct Object<'a, L> {
    /// Bound attribute symbol.
    sym: String,
    /// Factory running a nested mutator under the given continuation.
    factory: Box<dyn FnMut(Scope<'_>) -> Result + 'a>,
    /// Next layer down the stack.
    next: L,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a, L> Object<'a, L> {
    /// Creates an object attribute binding over the given factory.
    pub(crate) fn new<F>(sym: &str, factory: F, next: L) -> Self
    where
        F: FnMut(Scope<'_>) -> Result + 'a,
    {
        Self {
            sym: sym.to_string(),
            factory: Box::new(factory),
            next,
        }
    }

    /// Returns whether this layer is responsible for the spec.
    fn claims(&self, spec: &Node) -> bool {
        spec.id().sym() == Some(self.sym.as_str())
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<L> TreeMutator for Object<'_, L>
where
    L: TreeMutator,
{
    /// Initialises the layers below; the binding itself has no source state.
    fn init(&mut self) {
        self.next.init();
    }

    /// Returns whether source elements remain in the layers below.
    fn has_src(&self) -> bool {
        self.next.has_src()
    }

    /// Returns whether the spec addresses the bound attribute.
    fn match_src(&self, spec: &Node) -> bool {
        self.claims(spec) || self.next.match_src(spec)
    }

    /// Accepts the bound attribute as a no-op.
    fn accept_src(&mut self, spec: &Node) -> bool {
        self.claims(spec) || self.next.accept_src(spec)
    }

    /// Rejects skipping of the bound attribute.
    fn skip_src(&mut self, spec: &Node) -> Result {
        if self.claims(spec) {
            Err(Error::logic(format!(
                "attribute '{}' is a data field and cannot be skipped",
                self.sym
            )))
        } else {
            self.next.skip_src(spec)
        }
    }

    /// Rejects relocation of the bound attribute.
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        if self.claims(spec) {
            Err(Error::logic(format!(
                "attribute '{}' is a data field and cannot be reordered",
                self.sym
            )))
        } else {
            self.next.find_src(spec)
        }
    }

    /// Accepts the scope markers, rejects ordering on the bound attribute.
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        if marker.id().is_marker() {
            self.next.accept_until(marker)?;
            Ok(true)
        } else if self.claims(marker) {
            Err(Error::logic(format!(
                "attribute '{}' is a data field and exposes no ordering",
                self.sym
            )))
        } else {
            self.next.accept_until(marker)
        }
    }

    /// Accepts injection of the bound attribute as a no-op.
    ///
    /// The nested object materialises when its scope is mutated, so there
    /// is nothing to construct at this point.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        if self.claims(spec) {
            Ok(true)
        } else {
            self.next.inject_new(spec)
        }
    }

    /// Delegates assignment to the layers below.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        self.next.assign_elm(spec)
    }

    /// Opens the nested scope through the factory.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        if self.claims(spec) {
            (self.factory)(scope)?;
            Ok(true)
        } else {
            self.next.mutate_child(spec, scope)
        }
    }

    /// Completes the layers below; the binding itself is always consistent.
    fn complete_scope(&mut self) -> bool {
        self.next.complete_scope()
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

    mod mutate_child {
        use crate::{builder, Probe, TreeMutator};
        use sdx_node::{Node, Record};

        #[test]
        fn handles_nested_scope() {
            let mut delta = Probe::new();
            let attrib_node = Record::builder().named_node("δ");
            {
                let mut mutator = builder().mutate_attrib("δ", |scope| {
                    let mut child = builder().attach_probe(&mut delta).boxed();
                    scope(&mut *child)
                });
                mutator.init();

                assert_eq!(mutator.inject_new(&attrib_node), Ok(true));
                assert!(mutator.accept_src(&attrib_node));

                let entered = mutator.mutate_child(&attrib_node, &mut |child| {
                    child.init();
                    child.inject_new(&Node::named("β", 2i64))?;
                    child.inject_new(&Node::anon('b'))?;
                    assert!(child.complete_scope());
                    Ok(())
                });
                assert_eq!(entered, Ok(true));
            }
            assert_eq!(delta.render(), "β = 2, b");
        }

        #[test]
        fn rejects_unbound_names() {
            let mut mutator = builder().mutate_attrib("δ", |_scope| Ok(()));
            mutator.init();
            let other = Node::named("ε", 1);
            assert_eq!(mutator.mutate_child(&other, &mut |_child| Ok(())), Ok(false));
        }
    }
}
