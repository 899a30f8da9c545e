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

//! Record binding.

use sdx_node::record::TYPE_SYM;
use sdx_node::{Node, Record};

use crate::mutator::{builder, Error, Result, Scope};
use crate::{collection, DiffMutable, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Type tag layer of the record binding.
///
/// Claims the reserved `type` attribute: injection and assignment store the
/// payload as the record's type tag instead of an ordinary attribute.
struct TypeTag<'a, L> {
    /// Bound type tag.
    tag: &'a mut Option<String>,
    /// Next layer down the stack.
    next: L,
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Returns whether the spec addresses the reserved type attribute.
fn claims_type(spec: &Node) -> bool {
    spec.id().sym() == Some(TYPE_SYM)
}

/// Returns whether two nodes match by identity.
fn match_node(spec: &Node, elm: &Node) -> bool {
    elm.matches(spec)
}

/// Creates a node as a copy of the spec.
fn construct_node(spec: &Node) -> Node {
    spec.clone()
}

/// Assigns the spec's payload to a node, preserving its identity.
fn assign_node(elm: &mut Node, spec: &Node) -> Result<bool> {
    elm.assign(spec.value().clone())?;
    Ok(true)
}

/// Opens the nested scope of a record-valued node.
fn open_node(elm: &mut Node, _spec: &Node, scope: Scope<'_>) -> Result<bool> {
    match elm.value_mut().as_record_mut() {
        Some(record) => {
            let mut child = record.build_mutator();
            scope(&mut *child)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl DiffMutable for Record {
    /// Builds the pre-packaged mutator binding for a record.
    ///
    /// The binding is composed of two collection layers over the record's
    /// own sequences — attributes, selected by namedness, and children,
    /// selected by anonymity — under a thin layer claiming the reserved
    /// `type` attribute for the type tag. Nested records are entered
    /// recursively through the same binding.
    fn build_mutator(&mut self) -> Box<dyn TreeMutator + '_> {
        let parts = self.parts_mut();
        builder()
            .attach(
                collection(parts.attribs)
                    .match_element(match_node)
                    .construct_from(construct_node)
                    .assign_element(assign_node)
                    .build_child_mutator(open_node)
                    .applicable_if(|spec: &Node| {
                        spec.id().is_named() && !claims_type(spec)
                    })
                    .attribute_boundary(),
            )
            .attach(
                collection(parts.children)
                    .match_element(match_node)
                    .construct_from(construct_node)
                    .assign_element(assign_node)
                    .build_child_mutator(open_node)
                    .applicable_if(|spec: &Node| !spec.id().is_named()),
            )
            .wrap(|next| TypeTag { tag: parts.type_tag, next })
            .boxed()
    }
}

// ----------------------------------------------------------------------------

impl<L> TypeTag<'_, L> {
    /// Stores the spec's payload as the type tag.
    fn store(&mut self, spec: &Node) -> Result<bool> {
        match spec.value().get::<String>() {
            Some(tag) => {
                *self.tag = Some(tag);
                Ok(true)
            }
            None => Err(Error::logic(format!(
                "type tag rejects payload of kind '{}'",
                spec.value().kind()
            ))),
        }
    }
}

impl<L> TreeMutator for TypeTag<'_, L>
where
    L: TreeMutator,
{
    /// Initialises the layers below; the tag itself has no source state.
    fn init(&mut self) {
        self.next.init();
    }

    /// Returns whether source elements remain in the layers below.
    fn has_src(&self) -> bool {
        self.next.has_src()
    }

    /// Returns whether the spec addresses the type attribute.
    fn match_src(&self, spec: &Node) -> bool {
        claims_type(spec) || self.next.match_src(spec)
    }

    /// Accepts the type attribute as a no-op.
    fn accept_src(&mut self, spec: &Node) -> bool {
        claims_type(spec) || self.next.accept_src(spec)
    }

    /// Discards the current source element or hole in the layers below.
    fn skip_src(&mut self, spec: &Node) -> Result {
        self.next.skip_src(spec)
    }

    /// Searches the layers below for a source element matching the spec.
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        self.next.find_src(spec)
    }

    /// Accepts all source elements up to and including the mark.
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        self.next.accept_until(marker)
    }

    /// Stores the type tag, or constructs a new element further down.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        if claims_type(spec) {
            self.store(spec)
        } else {
            self.next.inject_new(spec)
        }
    }

    /// Stores the type tag, or assigns to an element further down.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        if claims_type(spec) {
            self.store(spec)
        } else {
            self.next.assign_elm(spec)
        }
    }

    /// Opens the nested scope of the element addressed by the spec.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        self.next.mutate_child(spec, scope)
    }

    /// Completes the layers below; the tag itself is always consistent.
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

    use sdx_node::{Node, Record};

    use crate::{DiffMutable, TreeMutator};

    /// Populates a record through its mutator binding.
    ///
    /// The child nodes are passed in, since anonymous identities are unique
    /// per construction — a diff can only address copies of them.
    fn populate(record: &mut Record, child_b: &Node, child_t: &Node) {
        let mut mutator = record.build_mutator();
        mutator.init();
        for spec in [
            &Node::named("α", 1),
            &Node::named("γ", 3.45),
            &Node::named("γ", 3.45),
            child_b,
            child_b,
            child_t,
        ] {
            assert_eq!(mutator.inject_new(spec), Ok(true));
        }
        assert!(mutator.complete_scope());
    }

    mod inject_new {
        use super::populate;
        use sdx_node::{Node, Record, Value};

        use crate::{DiffMutable, TreeMutator};

        #[test]
        fn handles_population() {
            let mut record = Record::new();
            let child_b = Node::anon('b');
            let child_t = Node::anon(sdx_node::Time::new(12, 34, 56, 78));
            populate(&mut record, &child_b, &child_t);

            assert_eq!(record.type_tag(), None);
            assert_eq!(record.get("α").unwrap().value(), &Value::Int(1));
            assert_eq!(record.attribs().count(), 3);
            assert_eq!(record.scope().count(), 3);
        }

        #[test]
        fn handles_type_tag() {
            let mut record = Record::new();
            let mut mutator = record.build_mutator();
            mutator.init();
            assert_eq!(mutator.inject_new(&Node::named("type", "ξ")), Ok(true));
            assert!(mutator.complete_scope());
            drop(mutator);

            // The reserved attribute lands in the tag, not in the sequence
            assert_eq!(record.type_tag(), Some("ξ"));
            assert_eq!(record.attribs().count(), 0);
        }
    }

    mod reorder {
        use super::populate;
        use sdx_node::{Marker, Node, Record, Time};

        use crate::{DiffMutable, TreeMutator};

        #[test]
        fn handles_restructuring() {
            let mut record = Record::new();
            let child_b = Node::anon('b');
            let child_t = Node::anon(Time::new(12, 34, 56, 78));
            populate(&mut record, &child_b, &child_t);

            let mut mutator = record.build_mutator();
            mutator.init();

            assert!(mutator.match_src(&Node::named("α", 1)));
            assert_eq!(mutator.accept_until(&Marker::attribs()), Ok(true));
            assert!(mutator.match_src(&child_b));

            // Inject another attribute after the fact
            assert_eq!(mutator.inject_new(&Node::named("β", 2i64)), Ok(true));

            // Skip the first b child, inject a nested record
            mutator.skip_src(&child_b).unwrap();
            let sub_node = Record::builder().node();
            assert_eq!(mutator.inject_new(&sub_node), Ok(true));

            // An unsuccessful find changes nothing
            assert_eq!(mutator.find_src(&Node::anon('a')), Ok(false));
            assert!(!mutator.accept_src(&Node::anon(Time::new(0, 0, 0, 0))));
            assert!(mutator.match_src(&child_b));

            // Relocate the time child, accept b, clean up the hole
            assert_eq!(mutator.find_src(&child_t), Ok(true));
            assert!(mutator.accept_src(&child_b));
            mutator.skip_src(&child_t).unwrap();
            assert!(!mutator.has_src());
            assert!(mutator.complete_scope());
            drop(mutator);

            let scope: Vec<_> = record.scope().cloned().collect();
            assert_eq!(scope, [sub_node.clone(), child_t, child_b]);
            assert_eq!(record.attribs().count(), 4);
        }
    }

    mod assign_elm {
        use super::populate;
        use sdx_node::{Marker, Node, Record, Value};

        use crate::{DiffMutable, TreeMutator};

        #[test]
        fn handles_first_match() {
            let mut record = Record::new();
            let child_b = Node::anon('b');
            let child_t = Node::anon(sdx_node::Time::new(12, 34, 56, 78));
            populate(&mut record, &child_b, &child_t);

            let mut mutator = record.build_mutator();
            mutator.init();
            assert_eq!(mutator.accept_until(&Marker::end()), Ok(true));
            assert_eq!(
                mutator.assign_elm(&Node::named("γ", 3.14159265)),
                Ok(true)
            );
            assert!(mutator.complete_scope());
            drop(mutator);

            // The first γ was assigned, its duplicate keeps the old value
            let gammas: Vec<_> = record
                .attribs()
                .filter(|node| node.id().sym() == Some("γ"))
                .collect();
            assert_eq!(gammas[0].value(), &Value::Real(3.14159265));
            assert_eq!(gammas[1].value(), &Value::Real(3.45));
        }
    }

    mod mutate_child {
        use sdx_node::{Node, Record, Value};

        use crate::{DiffMutable, TreeMutator};

        #[test]
        fn handles_nested_records() {
            let mut record = Record::new();
            let sub_node = Record::builder().node();

            let mut mutator = record.build_mutator();
            mutator.init();
            assert_eq!(mutator.inject_new(&sub_node), Ok(true));

            let entered = mutator.mutate_child(&sub_node, &mut |child| {
                child.init();
                child.inject_new(&Node::named("type", "ξ"))?;
                child.inject_new(&Node::named("β", 2i64))?;
                child.inject_new(&Node::anon('b'))?;
                assert!(child.complete_scope());
                Ok(())
            });
            assert_eq!(entered, Ok(true));
            assert!(mutator.complete_scope());
            drop(mutator);

            let nested = record.scope().next().unwrap().value().as_record();
            let nested = nested.unwrap();
            assert_eq!(nested.type_tag(), Some("ξ"));
            assert_eq!(nested.get("β").unwrap().value(), &Value::Long(2));
            assert_eq!(nested.scope().count(), 1);
        }

        #[test]
        fn handles_pending_source_children() {
            let mut record = Record::new();
            let sub_node = Record::builder().node();
            {
                let mut mutator = record.build_mutator();
                mutator.init();
                mutator.inject_new(&Node::named("α", 1)).unwrap();
                mutator.inject_new(&Node::anon('a')).unwrap();
                mutator.inject_new(&sub_node).unwrap();
                assert!(mutator.complete_scope());
            }

            // Enter the nested scope without confirming the siblings first;
            // everything up to the addressed child is accepted as-is
            let mut mutator = record.build_mutator();
            mutator.init();
            let entered = mutator.mutate_child(&sub_node, &mut |child| {
                child.init();
                child.inject_new(&Node::anon('x'))?;
                assert!(child.complete_scope());
                Ok(())
            });
            assert_eq!(entered, Ok(true));
            assert!(mutator.complete_scope());
            drop(mutator);

            assert_eq!(record.attribs().count(), 1);
            assert_eq!(record.scope().count(), 2);
        }
    }
}
