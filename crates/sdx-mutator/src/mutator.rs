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

//! Tree mutator.

use sdx_node::Node;

pub mod binding;
pub mod builder;
mod error;
pub mod probe;

pub use builder::Builder;
pub use error::{Error, Result};

// ----------------------------------------------------------------------------
// Type definitions
// ----------------------------------------------------------------------------

/// Continuation driving a nested scope.
///
/// When a mutator is asked to open the nested scope of a child element, the
/// responsible layer builds a child mutator over the child's private data
/// and hands it to this continuation, which initialises the child and then
/// interprets the remainder of the nested diff against it. The child mutator
/// — and with it the borrow of the child's data — lives exactly as long as
/// the call. Note that the continuation owns the
/// [`init`](TreeMutator::init) call: factories hand the child over fresh.
pub type Scope<'s> = &'s mut dyn FnMut(&mut dyn TreeMutator) -> Result;

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// Tree mutator.
///
/// The polymorphic sink for change application: one mutator is constructed
/// per target scope and translates the mutation primitives invoked by an
/// interpreter into operations on otherwise undisclosed application data.
///
/// Conceptually, a mutator works through its scope like a tape: on
/// [`init`](TreeMutator::init), the pre-existing contents are snapshot into
/// a _source buffer_ with a cursor at its start, and the new contents are
/// built up in their place. Primitives either consume source elements
/// (accepting, skipping or relocating them) or inject new ones, until
/// [`complete_scope`](TreeMutator::complete_scope) confirms that nothing is
/// left pending.
///
/// Concrete mutators are stacks of layers. Each primitive is offered to the
/// top layer first; a layer not responsible for the given element passes the
/// call further down. The default method bodies implement the terminal layer
/// below all bindings, which claims nothing: predicates report `false`,
/// claim-style primitives report `Ok(false)`, and only the two scope markers
/// are accepted by [`accept_until`](TreeMutator::accept_until), since
/// fast-forwarding an empty binding trivially succeeds. A caller receiving
/// `Ok(false)` knows that no layer felt responsible, which the application
/// driver turns into a conflict.
///
/// The distinction between `Ok(false)` and `Err(…)` matters: the former
/// means "unclaimed", the latter means a responsible layer rejected the
/// operation, e.g. a payload of the wrong kind.
pub trait TreeMutator {
    /// Initialises the mutator before any primitive is invoked.
    ///
    /// Snapshots the current scope contents into the source buffer and
    /// places the cursor at its start. Invoked exactly once.
    fn init(&mut self) {}

    /// Returns whether source elements remain, including holes.
    fn has_src(&self) -> bool {
        false
    }

    /// Returns whether the current source element matches the spec.
    ///
    /// Non-destructive: neither the cursor nor any content is touched.
    fn match_src(&self, spec: &Node) -> bool {
        let _ = spec;
        false
    }

    /// Accepts the current source element, if it matches the spec.
    ///
    /// On success the element is emitted into the new scope contents and
    /// the cursor advances. A non-matching element is left untouched.
    fn accept_src(&mut self, spec: &Node) -> bool {
        let _ = spec;
        false
    }

    /// Discards the current source element or hole.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Logic`], if a layer claims the spec but
    /// does not support ordering, e.g. an attribute field binding.
    fn skip_src(&mut self, spec: &Node) -> Result {
        let _ = spec;
        Ok(())
    }

    /// Searches forward for a source element matching the spec.
    ///
    /// On success the element is consumed out of order and emitted at the
    /// current output position, leaving a hole to be discarded by a later
    /// [`skip_src`](TreeMutator::skip_src).
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Logic`], if a layer claims the spec but
    /// does not support ordering.
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        let _ = spec;
        Ok(false)
    }

    /// Accepts all source elements up to and including the mark.
    ///
    /// The end-of-scope and end-of-attributes markers fast-forward to the
    /// respective boundary; any other mark is searched among the remaining
    /// source elements.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Logic`], if a layer claims the mark but
    /// does not support ordering.
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        Ok(marker.id().is_marker())
    }

    /// Constructs a new element from the spec and emits it.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Logic`], if a layer claims the spec but
    /// cannot construct an element from its payload.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        let _ = spec;
        Ok(false)
    }

    /// Assigns the spec's payload to the element with the spec's identity.
    ///
    /// The element is located among the already-emitted contents first, then
    /// among the pending source elements; in-place assignment never changes
    /// ordering.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Logic`], if the addressed element holds
    /// a payload of a different kind.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        let _ = spec;
        Ok(false)
    }

    /// Opens the nested scope of the element addressed by the spec.
    ///
    /// The responsible layer locates the child, builds a mutator over its
    /// private data and runs the given continuation with it. Locating the
    /// child considers the already-emitted contents first; a child still
    /// pending in the source buffer is fast-forwarded to, accepting all
    /// elements before it.
    ///
    /// # Errors
    ///
    /// This method propagates whatever the continuation raises while the
    /// nested scope is interpreted.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        let _ = (spec, scope);
        Ok(false)
    }

    /// Completes the scope, verifying that nothing is left pending.
    ///
    /// Returns `true` iff no source elements remain unconfirmed in any
    /// layer. Holes left behind by find operations are released.
    fn complete_scope(&mut self) -> bool {
        true
    }

    /// Renders the current source element for diagnostics, if any.
    fn peek_src(&self) -> Option<String> {
        None
    }
}

/// Target that can be reshaped through diff messages.
///
/// This is the single operation the consumer side implements: given mutable
/// access to itself, the target assembles a [`TreeMutator`] binding its
/// private data, typically using the [`Builder`]. Everything else — pulling
/// verbs, dispatching primitives, recursing into nested scopes — is handled
/// by the application driver.
///
/// # Examples
///
/// ```
/// use sdx_mutator::{builder, collection, DiffMutable, TreeMutator};
///
/// struct Flags {
///     labels: Vec<String>,
/// }
///
/// impl DiffMutable for Flags {
///     fn build_mutator(&mut self) -> Box<dyn TreeMutator + '_> {
///         builder()
///             .attach(
///                 collection(&mut self.labels)
///                     .construct_from(|spec| spec.value().to_string()),
///             )
///             .boxed()
///     }
/// }
/// ```
pub trait DiffMutable {
    /// Builds the mutator binding the target's private data.
    fn build_mutator(&mut self) -> Box<dyn TreeMutator + '_>;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Terminal empty layer.
///
/// The bottom of every layer stack: claims nothing and accepts only the
/// scope markers, entirely through the default method bodies of
/// [`TreeMutator`]. A mutator consisting of this layer alone rejects every
/// verb, which surfaces as a conflict on the first one applied.
#[derive(Clone, Copy, Debug, Default)]
pub struct Empty;

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Creates a mutator builder.
///
/// # Examples
///
/// ```
/// use sdx_mutator::{builder, TreeMutator};
///
/// // Bind a local field as attribute α
/// let mut alpha = 0;
/// let mut mutator = builder()
///     .change("α", |value: i32| alpha = value)
///     .boxed();
///
/// mutator.init();
/// # let _ = &mutator;
/// ```
#[must_use]
pub fn builder() -> Builder<Empty> {
    Builder::new(Empty)
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl TreeMutator for Empty {}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod empty {
        use crate::{Empty, TreeMutator};
        use sdx_node::{Marker, Node};

        #[test]
        fn rejects_everything() {
            let mut mutator = Empty;
            let alpha = Node::named("α", 1);
            mutator.init();
            assert!(!mutator.has_src());
            assert!(!mutator.match_src(&alpha));
            assert!(!mutator.accept_src(&alpha));
            assert_eq!(mutator.inject_new(&alpha), Ok(false));
            assert_eq!(mutator.find_src(&alpha), Ok(false));
            assert_eq!(mutator.assign_elm(&alpha), Ok(false));
            assert!(mutator.complete_scope());
        }

        #[test]
        fn handles_markers() {
            let mut mutator = Empty;
            assert_eq!(mutator.accept_until(&Marker::end()), Ok(true));
            assert_eq!(mutator.accept_until(&Marker::attribs()), Ok(true));
            assert_eq!(mutator.accept_until(&Node::named("α", 1)), Ok(false));
        }
    }
}
