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

//! Collection binding.

use std::fmt;
use std::mem;

use sdx_node::{Marker, Node};

use crate::mutator::{Result, Scope, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Collection binding configuration.
///
/// Created by [`collection`] and refined through its sub-options before
/// being attached to a builder. The configuration ties an ordered container
/// of application elements to the diff vocabulary:
///
/// - the _matcher_ decides whether a spec addresses a given element,
/// - the _constructor_ builds a new element from a spec,
/// - the _setter_ assigns a spec's payload to an existing element,
/// - the _child-mutator factory_ opens an element's nested scope,
/// - the _selector_ decides whether the layer is responsible for a spec
///   at all (by default it is responsible for every spec).
///
/// Every part is optional; primitives without the closures they need simply
/// pass the verb on to the next layer down.
pub struct CollectionBinding<'a, E> {
    /// Bound collection, rebuilt in place.
    coll: &'a mut Vec<E>,
    /// Matcher comparing a spec against an element.
    matcher: Option<Box<dyn Fn(&Node, &E) -> bool + 'a>>,
    /// Constructor building an element from a spec.
    ctor: Option<Box<dyn FnMut(&Node) -> E + 'a>>,
    /// Setter assigning a spec's payload to an element.
    setter: Option<Box<dyn FnMut(&mut E, &Node) -> Result<bool> + 'a>>,
    /// Factory building a nested mutator over an element.
    opener: Option<Opener<'a, E>>,
    /// Selector deciding the layer's responsibility.
    selector: Option<Box<dyn Fn(&Node) -> bool + 'a>>,
    /// Whether this collection ends the attribute scope.
    boundary: bool,
}

/// Collection binding layer.
///
/// The runtime shape of an attached [`CollectionBinding`]: on
/// initialisation, the bound collection's contents are swapped aside into
/// the source buffer, and the new sequence is rebuilt in place while the
/// source is consumed. Holes left by find operations are `None` slots,
/// discarded by later skips and released at scope completion.
pub struct Collection<'a, E, L> {
    /// Binding configuration, including the bound collection.
    binding: CollectionBinding<'a, E>,
    /// Swapped-aside source buffer, holes are `None`.
    src: Vec<Option<E>>,
    /// Source cursor.
    pos: usize,
    /// Next layer down the stack.
    next: L,
}

// ----------------------------------------------------------------------------
// Type definitions
// ----------------------------------------------------------------------------

/// Factory opening the nested scope of a collection element.
///
/// Invoked with the located element, the addressing spec and the [`Scope`]
/// continuation: the factory builds a mutator over whatever nested data the
/// element exposes and runs the continuation with it, so all borrows stay
/// within the call. Returning `Ok(false)` states that the element cannot
/// host a nested scope.
pub type Opener<'a, E> = Box<dyn FnMut(&mut E, &Node, Scope<'_>) -> Result<bool> + 'a>;

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Creates a collection binding over the given container.
///
/// # Examples
///
/// ```
/// use sdx_mutator::{builder, collection, TreeMutator};
/// use sdx_node::Node;
///
/// // Bind a vector of strings and inject an element
/// let mut items: Vec<String> = Vec::new();
/// let mut mutator = builder().attach(
///     collection(&mut items)
///         .construct_from(|spec| spec.value().to_string())
///         .match_element(|spec, elm| {
///             spec.value().get::<String>().as_ref() == Some(elm)
///         }),
/// );
/// mutator.init();
/// assert_eq!(mutator.inject_new(&Node::anon("a")), Ok(true));
/// assert!(mutator.complete_scope());
/// drop(mutator);
/// assert_eq!(items, ["a"]);
/// ```
pub fn collection<E>(coll: &mut Vec<E>) -> CollectionBinding<'_, E> {
    CollectionBinding {
        coll,
        matcher: None,
        ctor: None,
        setter: None,
        opener: None,
        selector: None,
        boundary: false,
    }
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a, E> CollectionBinding<'a, E> {
    /// Sets the matcher comparing a spec against an element.
    #[must_use]
    pub fn match_element<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&Node, &E) -> bool + 'a,
    {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Sets the constructor building an element from a spec.
    #[must_use]
    pub fn construct_from<F>(mut self, ctor: F) -> Self
    where
        F: FnMut(&Node) -> E + 'a,
    {
        self.ctor = Some(Box::new(ctor));
        self
    }

    /// Sets the setter assigning a spec's payload to an element.
    #[must_use]
    pub fn assign_element<F>(mut self, setter: F) -> Self
    where
        F: FnMut(&mut E, &Node) -> Result<bool> + 'a,
    {
        self.setter = Some(Box::new(setter));
        self
    }

    /// Sets the factory opening the nested scope of an element.
    #[must_use]
    pub fn build_child_mutator<F>(mut self, opener: F) -> Self
    where
        F: FnMut(&mut E, &Node, Scope<'_>) -> Result<bool> + 'a,
    {
        self.opener = Some(Box::new(opener));
        self
    }

    /// Sets the selector deciding the layer's responsibility.
    #[must_use]
    pub fn applicable_if<F>(mut self, selector: F) -> Self
    where
        F: Fn(&Node) -> bool + 'a,
    {
        self.selector = Some(Box::new(selector));
        self
    }

    /// Marks this collection as the end of the attribute scope.
    ///
    /// Only the attribute sequence of the packaged record binding carries
    /// this, so the end-of-attributes marker fast-forwards it.
    #[must_use]
    pub(crate) fn attribute_boundary(mut self) -> Self {
        self.boundary = true;
        self
    }
}

// ----------------------------------------------------------------------------

impl<'a, E, L> Collection<'a, E, L> {
    /// Creates a collection layer over the given binding.
    pub(crate) fn new(binding: CollectionBinding<'a, E>, next: L) -> Self {
        Self {
            binding,
            src: Vec::new(),
            pos: 0,
            next,
        }
    }

    /// Returns whether this layer is responsible for the spec.
    fn applicable(&self, spec: &Node) -> bool {
        self.binding.selector.as_ref().is_none_or(|selector| selector(spec))
    }

    /// Returns whether the element at the given slot matches the spec.
    fn matched(&self, spec: &Node, slot: usize) -> bool {
        match (&self.binding.matcher, &self.src[slot]) {
            (Some(matcher), Some(elm)) => matcher(spec, elm),
            _ => false,
        }
    }

    /// Searches the source buffer for a match, starting at the cursor.
    fn position_in_src(&self, spec: &Node) -> Option<usize> {
        (self.pos..self.src.len()).find(|&slot| self.matched(spec, slot))
    }

    /// Searches the emitted contents for a match, first match in order.
    fn position_in_coll(&self, spec: &Node) -> Option<usize> {
        let matcher = self.binding.matcher.as_ref()?;
        self.binding.coll.iter().position(|elm| matcher(spec, elm))
    }

    /// Emits all source elements up to and including the given slot.
    fn emit_through(&mut self, slot: usize) {
        for taken in &mut self.src[self.pos..=slot] {
            if let Some(elm) = taken.take() {
                self.binding.coll.push(elm);
            }
        }
        self.pos = slot + 1;
    }

    /// Emits all remaining source elements, releasing holes.
    fn emit_rest(&mut self) {
        if self.pos < self.src.len() {
            self.emit_through(self.src.len() - 1);
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<E, L> TreeMutator for Collection<'_, E, L>
where
    E: fmt::Display,
    L: TreeMutator,
{
    /// Swaps the collection contents into the source buffer.
    fn init(&mut self) {
        self.src = mem::take(self.binding.coll).into_iter().map(Some).collect();
        self.pos = 0;
        self.next.init();
    }

    /// Returns whether source elements remain, including holes.
    fn has_src(&self) -> bool {
        self.pos < self.src.len() || self.next.has_src()
    }

    /// Returns whether the current source element matches the spec.
    fn match_src(&self, spec: &Node) -> bool {
        if self.applicable(spec) && self.pos < self.src.len() {
            self.matched(spec, self.pos)
        } else {
            self.next.match_src(spec)
        }
    }

    /// Accepts the current source element, if it matches the spec.
    fn accept_src(&mut self, spec: &Node) -> bool {
        if self.applicable(spec) && self.pos < self.src.len() && self.matched(spec, self.pos) {
            self.emit_through(self.pos);
            true
        } else if self.applicable(spec) && self.pos < self.src.len() {
            // Responsible, but the current element does not match
            false
        } else {
            self.next.accept_src(spec)
        }
    }

    /// Discards the current source element or hole.
    fn skip_src(&mut self, spec: &Node) -> Result {
        if self.applicable(spec) && self.pos < self.src.len() {
            self.src[self.pos] = None;
            self.pos += 1;
            Ok(())
        } else {
            self.next.skip_src(spec)
        }
    }

    /// Searches forward for a source element matching the spec.
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        if !self.applicable(spec) {
            return self.next.find_src(spec);
        }
        match self.position_in_src(spec) {
            Some(slot) => {
                // Consume out of order, the hole remains until skipped
                if let Some(elm) = self.src[slot].take() {
                    self.binding.coll.push(elm);
                }
                Ok(true)
            }
            None => self.next.find_src(spec),
        }
    }

    /// Accepts all source elements up to and including the mark.
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        if marker.id().marks_end() {
            self.emit_rest();
            self.next.accept_until(marker)?;
            Ok(true)
        } else if marker.id().marks_attribs() {
            if self.binding.boundary {
                self.emit_rest();
                self.next.accept_until(marker)?;
                Ok(true)
            } else {
                self.next.accept_until(marker)
            }
        } else if !self.applicable(marker) {
            self.next.accept_until(marker)
        } else {
            match self.position_in_src(marker) {
                Some(slot) => {
                    self.emit_through(slot);
                    // Content bound below this layer precedes this collection
                    // in traversal order, so it is settled alongside
                    self.next.accept_until(&Marker::end())?;
                    Ok(true)
                }
                None => self.next.accept_until(marker),
            }
        }
    }

    /// Constructs a new element from the spec and emits it.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        if self.applicable(spec) {
            if let Some(ctor) = self.binding.ctor.as_mut() {
                let elm = ctor(spec);
                self.binding.coll.push(elm);
                return Ok(true);
            }
        }
        self.next.inject_new(spec)
    }

    /// Assigns the spec's payload to the element with the spec's identity.
    ///
    /// The emitted contents are searched first, then the pending source
    /// elements, first match in order in both cases. In-place assignment to
    /// a pending element never disturbs ordering.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        if !self.applicable(spec)
            || self.binding.matcher.is_none()
            || self.binding.setter.is_none()
        {
            return self.next.assign_elm(spec);
        }
        if let Some(slot) = self.position_in_coll(spec) {
            if let Some(setter) = self.binding.setter.as_mut() {
                return setter(&mut self.binding.coll[slot], spec);
            }
        }
        if let Some(slot) = self.position_in_src(spec) {
            if let (Some(setter), Some(elm)) =
                (self.binding.setter.as_mut(), self.src[slot].as_mut())
            {
                return setter(elm, spec);
            }
        }
        self.next.assign_elm(spec)
    }

    /// Opens the nested scope of the element addressed by the spec.
    ///
    /// The emitted contents are searched first. A child still pending in
    /// the source buffer is fast-forwarded to, accepting all elements
    /// before it, which also settles the layers below.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        if !self.applicable(spec) || self.binding.opener.is_none() {
            return self.next.mutate_child(spec, scope);
        }
        let slot = match self.position_in_coll(spec) {
            Some(slot) => Some(slot),
            None => match self.position_in_src(spec) {
                Some(slot) => {
                    self.emit_through(slot);
                    self.next.accept_until(&Marker::end())?;
                    Some(self.binding.coll.len() - 1)
                }
                None => None,
            },
        };
        match slot {
            Some(slot) => match self.binding.opener.as_mut() {
                Some(opener) => opener(&mut self.binding.coll[slot], spec, scope),
                None => Ok(false),
            },
            None => self.next.mutate_child(spec, scope),
        }
    }

    /// Completes the scope, verifying that nothing is left pending.
    fn complete_scope(&mut self) -> bool {
        let settled = !self.src[self.pos..].iter().any(Option::is_some);
        if settled {
            // Release remaining holes
            self.pos = self.src.len();
        }
        // Lower layers are checked regardless, so their state settles too
        self.next.complete_scope() && settled
    }

    /// Renders the current source element for diagnostics, if any.
    fn peek_src(&self) -> Option<String> {
        if self.pos < self.src.len() {
            Some(match &self.src[self.pos] {
                Some(elm) => elm.to_string(),
                None => "⟂".to_string(),
            })
        } else {
            self.next.peek_src()
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use std::fmt;

    use crate::{builder, collection, Builder, Collection, Empty};
    use sdx_node::Node;

    /// Opaque element type bound in the tests below.
    #[derive(Clone, Debug, PartialEq)]
    struct Data {
        key: String,
        val: String,
    }

    impl fmt::Display for Data {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "≺{}∣{}≻", self.key, self.val)
        }
    }

    /// Creates a data element from a spec.
    fn construct(spec: &Node) -> Data {
        Data {
            key: spec.id().sym().unwrap_or_default().to_string(),
            val: spec.value().to_string(),
        }
    }

    /// Creates the binding used by most tests.
    fn bind(target: &mut Vec<Data>) -> Builder<Collection<'_, Data, Empty>> {
        builder().attach(
            collection(target)
                .construct_from(construct)
                .match_element(|spec, elm| {
                    spec.id().sym().unwrap_or_default() == elm.key
                }),
        )
    }

    mod inject_new {
        use super::{bind, Data};
        use crate::TreeMutator;
        use sdx_node::Node;

        #[test]
        fn handles_population() {
            let mut target: Vec<Data> = Vec::new();
            let mut mutator = bind(&mut target);
            mutator.init();

            assert_eq!(mutator.inject_new(&Node::named("α", 1)), Ok(true));
            assert_eq!(mutator.inject_new(&Node::named("γ", 3.45)), Ok(true));
            assert_eq!(mutator.inject_new(&Node::named("γ", 3.45)), Ok(true));
            assert!(mutator.complete_scope());

            drop(mutator);
            let contents: Vec<_> =
                target.iter().map(ToString::to_string).collect();
            assert_eq!(contents, ["≺α∣1≻", "≺γ∣3.45≻", "≺γ∣3.45≻"]);
        }
    }

    mod reorder {
        use super::{bind, Data};
        use crate::TreeMutator;
        use sdx_node::{Marker, Node};

        #[test]
        fn handles_find_and_skip() {
            let mut target: Vec<Data> = Vec::new();
            {
                let mut mutator = bind(&mut target);
                mutator.init();
                for spec in [
                    Node::named("α", 1),
                    Node::named("b", "b"),
                    Node::named("b", "b"),
                    Node::named("t", "t"),
                ] {
                    mutator.inject_new(&spec).unwrap();
                }
                assert!(mutator.complete_scope());
            }

            let mut mutator = bind(&mut target);
            mutator.init();

            assert!(mutator.match_src(&Node::named("α", 1)));
            assert_eq!(mutator.accept_until(&Node::named("α", 1)), Ok(true));

            // An unsuccessful find changes nothing
            assert_eq!(mutator.find_src(&Node::named("x", 0)), Ok(false));
            // Refusing to accept a non-matching element changes nothing
            assert!(!mutator.accept_src(&Node::named("t", "t")));
            assert!(mutator.match_src(&Node::named("b", "b")));

            // Relocate t before the two b elements, then clean up
            assert_eq!(mutator.find_src(&Node::named("t", "t")), Ok(true));
            assert!(mutator.accept_src(&Node::named("b", "b")));
            mutator.skip_src(&Node::named("b", "b")).unwrap();
            mutator.skip_src(&Node::named("t", "t")).unwrap();
            assert!(!mutator.has_src());
            assert!(mutator.complete_scope());

            drop(mutator);
            let contents: Vec<_> =
                target.iter().map(ToString::to_string).collect();
            assert_eq!(contents, ["≺α∣1≻", "≺t∣t≻", "≺b∣b≻"]);
        }

        #[test]
        fn handles_fast_forward() {
            let mut target: Vec<Data> = Vec::new();
            {
                let mut mutator = bind(&mut target);
                mutator.init();
                for sym in ["a", "b", "c"] {
                    mutator.inject_new(&Node::named(sym, sym)).unwrap();
                }
                assert!(mutator.complete_scope());
            }

            let mut mutator = bind(&mut target);
            mutator.init();
            assert_eq!(mutator.accept_until(&Node::named("b", "b")), Ok(true));
            assert!(!mutator.complete_scope());
            assert_eq!(mutator.accept_until(&Marker::end()), Ok(true));
            assert!(mutator.complete_scope());
        }
    }

    mod assign_elm {
        use super::{bind, construct, Data};
        use crate::{builder, collection, TreeMutator};
        use sdx_node::Node;

        #[test]
        fn handles_first_match() {
            let mut target: Vec<Data> = Vec::new();
            {
                let mut mutator = bind(&mut target);
                mutator.init();
                mutator.inject_new(&Node::named("γ", 3.45)).unwrap();
                mutator.inject_new(&Node::named("γ", 6.78)).unwrap();
                assert!(mutator.complete_scope());
            }

            let mut mutator = builder().attach(
                collection(&mut target)
                    .construct_from(construct)
                    .match_element(|spec, elm| {
                        spec.id().sym().unwrap_or_default() == elm.key
                    })
                    .assign_element(|elm, spec| {
                        elm.val = spec.value().to_string();
                        Ok(true)
                    }),
            );
            mutator.init();

            // Assignment reaches pending source elements in place
            assert_eq!(
                mutator.assign_elm(&Node::named("γ", 3.14159265)),
                Ok(true)
            );
            mutator.accept_until(&sdx_node::Marker::end()).unwrap();
            assert!(mutator.complete_scope());

            drop(mutator);
            assert_eq!(target[0].val, "3.14159265");
            assert_eq!(target[1].val, "6.78");
        }
    }

    mod mutate_child {
        use std::collections::HashMap;

        use super::{construct, Data};
        use crate::{builder, collection, TreeMutator};
        use sdx_node::{Node, Record};

        #[test]
        fn handles_declined_scopes() {
            let mut target: Vec<Data> = Vec::new();
            let sub_node = Record::builder().named_node("sub");

            let mut mutator = builder().attach(
                collection(&mut target)
                    .construct_from(construct)
                    .match_element(|spec, elm| {
                        spec.id().sym().unwrap_or_default() == elm.key
                    })
                    .build_child_mutator(|_elm, _spec, _scope| Ok(false)),
            );
            mutator.init();
            mutator.inject_new(&sub_node).unwrap();

            // The factory declined, so the scope cannot be opened
            let entered = mutator.mutate_child(&sub_node, &mut |_child| Ok(()));
            assert_eq!(entered, Ok(false));
        }

        #[test]
        fn handles_nested_scopes() {
            let mut target: Vec<Data> = Vec::new();
            let mut sub_scopes: HashMap<String, Vec<Data>> = HashMap::new();
            let sub_node = Record::builder().named_node("sub");

            {
                let mut mutator = builder().attach(
                    collection(&mut target)
                        .construct_from(construct)
                        .match_element(|spec, elm| {
                            spec.id().sym().unwrap_or_default() == elm.key
                        })
                        .build_child_mutator(|elm, _spec, scope| {
                            // Nested scopes are kept aside, keyed by element
                            let nested =
                                sub_scopes.entry(elm.key.clone()).or_default();
                            let mut child = builder()
                                .attach(
                                    collection(nested).construct_from(construct),
                                )
                                .boxed();
                            scope(&mut *child)?;
                            Ok(true)
                        }),
                );
                mutator.init();
                mutator.inject_new(&sub_node).unwrap();

                let entered = mutator.mutate_child(&sub_node, &mut |child| {
                    child.init();
                    child.inject_new(&Node::named("β", 2i64))?;
                    assert!(child.complete_scope());
                    Ok(())
                });
                assert_eq!(entered, Ok(true));
                assert!(mutator.complete_scope());
            }

            assert_eq!(sub_scopes["sub"].len(), 1);
            assert_eq!(sub_scopes["sub"][0].key, "β");
        }
    }
}
