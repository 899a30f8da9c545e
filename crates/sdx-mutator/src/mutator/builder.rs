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

//! Mutator builder.

use sdx_node::{FromValue, Node};

use super::binding::collection::{Collection, CollectionBinding};
use super::binding::field::Field;
use super::binding::ignore::Ignore;
use super::binding::listener::Listener;
use super::binding::object::Object;
use super::probe::{Probe, ProbeBinding};
use super::{Result, Scope, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Mutator builder.
///
/// Assembles a concrete [`TreeMutator`] as a stack of layers targeting
/// application data. Each call wraps a further layer around the current
/// stack, so the layer added last is consulted first; verbs propagate down
/// the stack until a layer claims them, and fall through to the terminal
/// empty layer otherwise.
///
/// The stack is composed statically — the builder's type parameter tracks
/// the layering — and erased into a boxed trait object by
/// [`Builder::boxed`], which is the shape consumed by scope frames during
/// application.
///
/// # Examples
///
/// ```
/// use sdx_mutator::{builder, collection};
///
/// // Bind a local field and a collection
/// let mut gamma = 0.0;
/// let mut items: Vec<String> = Vec::new();
/// let mutator = builder()
///     .change("γ", |value: f64| gamma = value)
///     .attach(
///         collection(&mut items)
///             .construct_from(|spec| spec.value().to_string()),
///     )
///     .boxed();
/// # let _ = mutator;
/// ```
pub struct Builder<L> {
    /// Stack of layers, innermost last.
    layers: L,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<L> Builder<L> {
    /// Creates a builder over the given layer stack.
    pub(crate) fn new(layers: L) -> Self {
        Self { layers }
    }

    /// Binds a named attribute to a setter.
    ///
    /// The layer claims verbs whose spec is a leaf named `sym` and forwards
    /// the payload, converted to `T`, into the setter — both on injection
    /// and on assignment. Since a data field has no notion of ordering,
    /// reordering verbs addressed at the bound name are a logic error,
    /// while the scope markers are accepted as no-ops.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_mutator::{builder, TreeMutator};
    /// use sdx_node::Node;
    ///
    /// // Bind local field and inject a new value
    /// let mut alpha = -1;
    /// let mut mutator = builder().change("α", |value: i32| alpha = value);
    /// mutator.init();
    /// assert_eq!(mutator.inject_new(&Node::named("α", 1)), Ok(true));
    /// drop(mutator);
    /// assert_eq!(alpha, 1);
    /// ```
    pub fn change<'a, T, F>(self, sym: &str, setter: F) -> Builder<Field<'a, L>>
    where
        T: FromValue,
        F: FnMut(T) + 'a,
    {
        Builder::new(Field::new(sym, setter, self.layers))
    }

    /// Binds a named attribute to a nested mutator factory.
    ///
    /// This enables recursion into an object stored in a data field: when a
    /// `mut` verb addresses the bound name, the factory builds a mutator
    /// over the nested data and runs the given [`Scope`] continuation with
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_mutator::{builder, Probe};
    ///
    /// // Bind an object-valued attribute δ
    /// let mut delta = Probe::new();
    /// let mutator = builder().mutate_attrib("δ", |scope| {
    ///     let mut child = builder().attach_probe(&mut delta).boxed();
    ///     scope(&mut *child)
    /// });
    /// # let _ = mutator;
    /// ```
    pub fn mutate_attrib<'a, F>(self, sym: &str, factory: F) -> Builder<Object<'a, L>>
    where
        F: FnMut(Scope<'_>) -> Result + 'a,
    {
        Builder::new(Object::new(sym, factory, self.layers))
    }

    /// Binds an ordered collection of elements.
    ///
    /// The binding is configured through the sub-options of
    /// [`CollectionBinding`], created by [`collection`][]: a matcher to
    /// compare specs against elements, a constructor to build elements from
    /// specs, a setter for assignment, a child-mutator factory for nested
    /// scopes, and a selector deciding the layer's responsibility.
    ///
    /// [`collection`]: crate::collection
    pub fn attach<'a, E>(self, binding: CollectionBinding<'a, E>) -> Builder<Collection<'a, E, L>> {
        Builder::new(Collection::new(binding, self.layers))
    }

    /// Installs a structural-change listener.
    ///
    /// The listener fires once per scope, at completion, if any structural
    /// primitive — injection, skipping or relocation — took effect below
    /// this layer. Pure assignment and confirmation do not fire it.
    pub fn on_seq_change<'a, F>(self, listener: F) -> Builder<Listener<'a, L>>
    where
        F: FnMut() + 'a,
    {
        Builder::new(Listener::new(listener, self.layers))
    }

    /// Installs the terminal ignore sink.
    ///
    /// The resulting mutator accepts every verb, including nested scopes,
    /// without any effect. Lower layers become unreachable, so this is only
    /// useful as the sole "binding" of a target that deliberately discards
    /// changes.
    #[must_use]
    pub fn ignore_all_changes(self) -> Builder<Ignore> {
        Builder::new(Ignore)
    }

    /// Attaches a diagnostic probe.
    ///
    /// Binds the given [`Probe`] as a uniform node sequence and records
    /// every primitive into its event log. Intended for tests and for
    /// verifying bindings during development.
    pub fn attach_probe(self, probe: &mut Probe) -> Builder<ProbeBinding<'_, L>> {
        Builder::new(ProbeBinding::new(probe, self.layers))
    }

    /// Wraps the stack into a further layer.
    pub(crate) fn wrap<M, F>(self, wrap: F) -> Builder<M>
    where
        M: TreeMutator,
        F: FnOnce(L) -> M,
    {
        Builder::new(wrap(self.layers))
    }

    /// Erases the layer stack into a boxed mutator.
    #[must_use]
    pub fn boxed<'a>(self) -> Box<dyn TreeMutator + 'a>
    where
        L: TreeMutator + 'a,
    {
        Box::new(self.layers)
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<L> TreeMutator for Builder<L>
where
    L: TreeMutator,
{
    /// Initialises the layer stack.
    #[inline]
    fn init(&mut self) {
        self.layers.init();
    }

    /// Returns whether source elements remain, including holes.
    #[inline]
    fn has_src(&self) -> bool {
        self.layers.has_src()
    }

    /// Returns whether the current source element matches the spec.
    #[inline]
    fn match_src(&self, spec: &Node) -> bool {
        self.layers.match_src(spec)
    }

    /// Accepts the current source element, if it matches the spec.
    #[inline]
    fn accept_src(&mut self, spec: &Node) -> bool {
        self.layers.accept_src(spec)
    }

    /// Discards the current source element or hole.
    #[inline]
    fn skip_src(&mut self, spec: &Node) -> Result {
        self.layers.skip_src(spec)
    }

    /// Searches forward for a source element matching the spec.
    #[inline]
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        self.layers.find_src(spec)
    }

    /// Accepts all source elements up to and including the mark.
    #[inline]
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        self.layers.accept_until(marker)
    }

    /// Constructs a new element from the spec and emits it.
    #[inline]
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        self.layers.inject_new(spec)
    }

    /// Assigns the spec's payload to the element with the spec's identity.
    #[inline]
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        self.layers.assign_elm(spec)
    }

    /// Opens the nested scope of the element addressed by the spec.
    #[inline]
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        self.layers.mutate_child(spec, scope)
    }

    /// Completes the scope, verifying that nothing is left pending.
    #[inline]
    fn complete_scope(&mut self) -> bool {
        self.layers.complete_scope()
    }

    /// Renders the current source element for diagnostics, if any.
    #[inline]
    fn peek_src(&self) -> Option<String> {
        self.layers.peek_src()
    }
}
