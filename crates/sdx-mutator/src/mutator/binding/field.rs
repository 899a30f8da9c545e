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

//! Attribute field binding.

use sdx_node::{FromValue, Node, Value};

use crate::mutator::{Error, Result, Scope, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Attribute field binding.
///
/// Binds one named attribute to a setter working on a private data field.
/// The layer claims any verb whose spec is named accordingly; the payload is
/// converted to the setter's parameter type before it is applied.
///
/// A data field is fixed by definition: it exposes no ordering and thus no
/// sequence of application. Reordering verbs addressed at the bound name are
/// therefore a logic error, while the scope markers are accepted as no-ops
/// and forwarded to the layers below.
pub struct Field<'a, L> {
    /// Bound attribute symbol.
    sym: String,
    /// Type-erased setter.
    setter: Box<dyn FnMut(&Value) -> Result<bool> + 'a>,
    /// Next layer down the stack.
    next: L,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a, L> Field<'a, L> {
    /// Creates a field binding over the given setter.
    ///
    /// The typed setter is erased at construction: the stored closure
    /// converts the payload and reports a logic error on kind mismatch.
    pub(crate) fn new<T, F>(sym: &str, mut setter: F, next: L) -> Self
    where
        T: FromValue,
        F: FnMut(T) + 'a,
    {
        let sym_owned = sym.to_string();
        Self {
            sym: sym.to_string(),
            setter: Box::new(move |value| match value.get::<T>() {
                Some(value) => {
                    setter(value);
                    Ok(true)
                }
                None => Err(Error::logic(format!(
                    "attribute '{sym_owned}' rejects payload of kind '{}'",
                    value.kind()
                ))),
            }),
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

impl<L> TreeMutator for Field<'_, L>
where
    L: TreeMutator,
{
    /// Initialises the layers below; the field itself has no source state.
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

    /// Applies the payload through the setter.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        if self.claims(spec) {
            (self.setter)(spec.value())
        } else {
            self.next.inject_new(spec)
        }
    }

    /// Applies the payload through the setter.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        if self.claims(spec) {
            (self.setter)(spec.value())
        } else {
            self.next.assign_elm(spec)
        }
    }

    /// Delegates nested mutation to the layers below.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        self.next.mutate_child(spec, scope)
    }

    /// Completes the layers below; the field itself is always consistent.
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

    mod inject_new {
        use crate::{builder, Error, TreeMutator};
        use sdx_node::Node;

        #[test]
        fn handles_bound_attributes() {
            let mut alpha = -1;
            let mut gamma = -1.0;
            let mut mutator = builder()
                .change("α", |value: i32| alpha = value)
                .change("γ", |value: f64| gamma = value);
            mutator.init();

            assert_eq!(mutator.inject_new(&Node::named("α", 1)), Ok(true));
            assert_eq!(mutator.inject_new(&Node::named("γ", 3.45)), Ok(true));
            // No binding for β, so no layer claims it
            assert_eq!(mutator.inject_new(&Node::named("β", 2i64)), Ok(false));
            // Children are not attributes and fall through as well
            assert_eq!(mutator.inject_new(&Node::anon('b')), Ok(false));
            assert!(mutator.complete_scope());

            drop(mutator);
            assert_eq!(alpha, 1);
            assert_eq!(gamma, 3.45);
        }

        #[test]
        fn rejects_kind_mismatch() {
            let mut alpha = -1;
            let mut mutator = builder().change("α", |value: i32| alpha = value);
            mutator.init();
            assert!(matches!(
                mutator.inject_new(&Node::named("α", "one")),
                Err(Error::Logic { .. })
            ));
        }
    }

    mod accept_until {
        use crate::{builder, Error, TreeMutator};
        use sdx_node::{Marker, Node};

        #[test]
        fn handles_markers_and_rejects_ordering() {
            let mut gamma = -1.0;
            let mut mutator = builder().change("γ", |value: f64| gamma = value);
            mutator.init();

            assert_eq!(mutator.accept_until(&Marker::attribs()), Ok(true));
            assert_eq!(mutator.accept_until(&Marker::end()), Ok(true));
            // Ordering on the bound attribute is rejected
            assert!(matches!(
                mutator.accept_until(&Node::named("γ", 3.45)),
                Err(Error::Logic { .. })
            ));
            // Unbound names are nobody's responsibility
            assert_eq!(mutator.accept_until(&Node::named("β", 2i64)), Ok(false));
        }
    }

    mod assign_elm {
        use crate::{builder, TreeMutator};
        use sdx_node::Node;

        #[test]
        fn handles_reassignment() {
            let mut gamma = 3.45;
            let mut mutator = builder().change("γ", |value: f64| gamma = value);
            mutator.init();
            assert_eq!(mutator.assign_elm(&Node::named("γ", 3.14159265)), Ok(true));
            drop(mutator);
            assert_eq!(gamma, 3.14159265);
        }
    }
}
