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

//! Diagnostic probe.

use std::mem;

use sdx_node::Node;

use crate::mutator::{DiffMutable, Result, Scope, TreeMutator};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Diagnostic mutation target.
///
/// A probe is a trivial target holding a uniform node sequence — no
/// attribute/child distinction is enforced — together with a log of every
/// mutation primitive that reached it. It exists to observe and verify
/// bindings: attach it via [`Builder::attach_probe`][] and inspect the
/// [`Probe::log`] and [`Probe::render`] afterwards.
///
/// [`Builder::attach_probe`]: crate::Builder::attach_probe
///
/// # Examples
///
/// ```
/// use sdx_mutator::{builder, Probe, TreeMutator};
/// use sdx_node::Node;
///
/// // Attach a probe and inject an element
/// let mut probe = Probe::new();
/// {
///     let mut mutator = builder().attach_probe(&mut probe);
///     mutator.init();
///     mutator.inject_new(&Node::named("α", 1)).unwrap();
///     assert!(mutator.complete_scope());
/// }
/// assert_eq!(probe.render(), "α = 1");
/// ```
#[derive(Debug, Default)]
pub struct Probe {
    /// Uniform node sequence.
    content: Vec<Node>,
    /// Log of observed primitives.
    log: Vec<Event>,
}

/// Observed mutation primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    /// Name of the primitive.
    pub op: &'static str,
    /// Rendered detail, e.g. the element worked on.
    pub detail: String,
}

/// Probe binding layer.
///
/// Binds a [`Probe`] as the target of mutation, recording every primitive
/// into its event log. The layer claims everything, so layers below it are
/// only reached through the shared lifecycle calls.
pub struct ProbeBinding<'a, L> {
    /// Bound probe.
    probe: &'a mut Probe,
    /// Swapped-aside source buffer, holes are `None`.
    src: Vec<Option<Node>>,
    /// Source cursor.
    pos: usize,
    /// Next layer down the stack.
    next: L,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Probe {
    /// Creates an empty probe.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current contents.
    #[inline]
    #[must_use]
    pub fn content(&self) -> &[Node] {
        &self.content
    }

    /// Returns the log of observed primitives.
    #[inline]
    #[must_use]
    pub fn log(&self) -> &[Event] {
        &self.log
    }

    /// Returns whether the probe holds no nodes.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Renders the current contents for inspection.
    ///
    /// Named nodes render as `sym = value`, anonymous nodes by their value
    /// alone, joined with commas.
    #[must_use]
    pub fn render(&self) -> String {
        let parts: Vec<_> = self.content.iter().map(render).collect();
        parts.join(", ")
    }

    /// Records an observed primitive.
    fn record<D>(&mut self, op: &'static str, detail: D)
    where
        D: Into<String>,
    {
        self.log.push(Event { op, detail: detail.into() });
    }
}

// ----------------------------------------------------------------------------

impl<'a, L> ProbeBinding<'a, L> {
    /// Creates a probe binding layer.
    pub(crate) fn new(probe: &'a mut Probe, next: L) -> Self {
        Self {
            probe,
            src: Vec::new(),
            pos: 0,
            next,
        }
    }

    /// Returns whether the element at the given slot matches the spec.
    ///
    /// Named specs match by symbol, anonymous specs by identity. Matching
    /// by symbol deliberately disregards the payload kind, so assignment
    /// across kinds is observable as a logic error.
    fn matched(&self, spec: &Node, slot: usize) -> bool {
        match &self.src[slot] {
            Some(elm) => match spec.id().sym() {
                Some(sym) => elm.id().sym() == Some(sym),
                None => elm.matches(spec),
            },
            None => false,
        }
    }

    /// Emits all source elements up to and including the given slot.
    fn emit_through(&mut self, slot: usize) {
        for taken in &mut self.src[self.pos..=slot] {
            if let Some(elm) = taken.take() {
                self.probe.content.push(elm);
            }
        }
        self.pos = slot + 1;
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Renders a node for the probe log.
fn render(node: &Node) -> String {
    match node.id().sym() {
        Some(sym) => format!("{sym} = {}", node.value()),
        None => node.value().to_string(),
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl DiffMutable for Probe {
    /// Builds the probe's own mutator binding.
    fn build_mutator(&mut self) -> Box<dyn TreeMutator + '_> {
        crate::mutator::builder().attach_probe(self).boxed()
    }
}

// ----------------------------------------------------------------------------

impl<L> TreeMutator for ProbeBinding<'_, L>
where
    L: TreeMutator,
{
    /// Swaps the probe contents into the source buffer.
    fn init(&mut self) {
        self.src = mem::take(&mut self.probe.content)
            .into_iter()
            .map(Some)
            .collect();
        self.pos = 0;
        self.probe.record("init", "");
        self.next.init();
    }

    /// Returns whether source elements remain, including holes.
    fn has_src(&self) -> bool {
        self.pos < self.src.len()
    }

    /// Returns whether the current source element matches the spec.
    fn match_src(&self, spec: &Node) -> bool {
        self.pos < self.src.len() && self.matched(spec, self.pos)
    }

    /// Accepts the current source element, if it matches the spec.
    fn accept_src(&mut self, spec: &Node) -> bool {
        if self.pos < self.src.len() && self.matched(spec, self.pos) {
            self.emit_through(self.pos);
            self.probe.record("accept_src", render(spec));
            true
        } else {
            false
        }
    }

    /// Discards the current source element or hole.
    fn skip_src(&mut self, spec: &Node) -> Result {
        let _ = spec;
        if self.pos < self.src.len() {
            let detail = match self.src[self.pos].take() {
                Some(elm) => render(&elm),
                None => "⟂".to_string(),
            };
            self.pos += 1;
            self.probe.record("skip_src", detail);
        }
        Ok(())
    }

    /// Searches forward for a source element matching the spec.
    fn find_src(&mut self, spec: &Node) -> Result<bool> {
        let found = (self.pos..self.src.len()).find(|&slot| self.matched(spec, slot));
        match found {
            Some(slot) => {
                if let Some(elm) = self.src[slot].take() {
                    self.probe.content.push(elm);
                }
                self.probe.record("find_src", render(spec));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Accepts all source elements up to and including the mark.
    ///
    /// The end-of-attributes marker accepts the leading named elements,
    /// since the probe keeps no separate attribute sequence.
    fn accept_until(&mut self, marker: &Node) -> Result<bool> {
        if marker.id().marks_end() {
            if self.pos < self.src.len() {
                self.emit_through(self.src.len() - 1);
            }
            self.probe.record("accept_until", "_END_");
            Ok(true)
        } else if marker.id().marks_attribs() {
            while self.pos < self.src.len()
                && self.src[self.pos]
                    .as_ref()
                    .is_some_and(|elm| elm.id().is_named())
            {
                self.emit_through(self.pos);
            }
            self.probe.record("accept_until", "_ATTRIBS_");
            Ok(true)
        } else {
            match (self.pos..self.src.len()).find(|&slot| self.matched(marker, slot)) {
                Some(slot) => {
                    self.emit_through(slot);
                    self.probe.record("accept_until", render(marker));
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    /// Constructs a new element from the spec and emits it.
    fn inject_new(&mut self, spec: &Node) -> Result<bool> {
        self.probe.content.push(spec.clone());
        self.probe.record("inject_new", render(spec));
        Ok(true)
    }

    /// Assigns the spec's payload to the element with the spec's identity.
    fn assign_elm(&mut self, spec: &Node) -> Result<bool> {
        // Emitted contents first, then pending source elements in place
        let target = self
            .probe
            .content
            .iter_mut()
            .find(|elm| match spec.id().sym() {
                Some(sym) => elm.id().sym() == Some(sym),
                None => elm.matches(spec),
            });
        if let Some(elm) = target {
            elm.assign(spec.value().clone())?;
            self.probe.record("assign_elm", render(spec));
            return Ok(true);
        }
        for slot in self.pos..self.src.len() {
            if self.matched(spec, slot) {
                if let Some(elm) = self.src[slot].as_mut() {
                    elm.assign(spec.value().clone())?;
                }
                self.probe.record("assign_elm", render(spec));
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Opens the nested scope of a record-valued element.
    fn mutate_child(&mut self, spec: &Node, scope: Scope<'_>) -> Result<bool> {
        let slot = self
            .probe
            .content
            .iter()
            .position(|elm| match spec.id().sym() {
                Some(sym) => elm.id().sym() == Some(sym),
                None => elm.matches(spec),
            });
        let slot = match slot {
            Some(slot) => Some(slot),
            None => {
                match (self.pos..self.src.len()).find(|&n| self.matched(spec, n)) {
                    Some(found) => {
                        self.emit_through(found);
                        Some(self.probe.content.len() - 1)
                    }
                    None => None,
                }
            }
        };
        match slot {
            Some(slot) => {
                self.probe.record("mutate_child", render(spec));
                match self.probe.content[slot].value_mut().as_record_mut() {
                    Some(record) => {
                        let mut child = record.build_mutator();
                        scope(&mut *child)?;
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }
            None => Ok(false),
        }
    }

    /// Completes the scope, verifying that nothing is left pending.
    fn complete_scope(&mut self) -> bool {
        let waste = self.src.len() - self.pos;
        let settled = !self.src[self.pos..].iter().any(Option::is_some);
        if settled {
            self.pos = self.src.len();
            self.probe
                .record("complete_scope", format!("scope completed / {waste} waste"));
        } else {
            self.probe.record("complete_scope", "scope NOT completed");
        }
        self.next.complete_scope() && settled
    }

    /// Renders the current source element for diagnostics, if any.
    fn peek_src(&self) -> Option<String> {
        (self.pos < self.src.len()).then(|| match &self.src[self.pos] {
            Some(elm) => render(elm),
            None => "⟂".to_string(),
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use sdx_node::Node;

    use crate::{builder, Probe, TreeMutator};

    /// Populates a probe with the shared fixture contents.
    fn populate(probe: &mut Probe, child_b: &Node, child_t: &Node) {
        let mut mutator = builder().attach_probe(probe);
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
        use crate::Probe;
        use sdx_node::{Node, Time};

        #[test]
        fn handles_population() {
            let mut probe = Probe::new();
            let child_b = Node::anon('b');
            let child_t = Node::anon(Time::new(12, 34, 56, 78));
            populate(&mut probe, &child_b, &child_t);

            assert_eq!(
                probe.render(),
                "α = 1, γ = 3.45, γ = 3.45, b, b, 12:34:56.078"
            );
            assert!(probe
                .log()
                .iter()
                .any(|event| event.op == "inject_new" && event.detail == "α = 1"));
        }
    }

    mod reorder {
        use super::populate;
        use crate::{builder, Probe, TreeMutator};
        use sdx_node::{Marker, Node, Record, Time};

        #[test]
        fn handles_restructuring() {
            let mut probe = Probe::new();
            let child_b = Node::anon('b');
            let child_t = Node::anon(Time::new(12, 34, 56, 78));
            populate(&mut probe, &child_b, &child_t);

            let mut mutator = builder().attach_probe(&mut probe);
            mutator.init();

            assert!(mutator.match_src(&Node::named("α", 1)));
            assert_eq!(mutator.accept_until(&Marker::attribs()), Ok(true));
            assert!(mutator.match_src(&child_b));

            assert_eq!(mutator.inject_new(&Node::named("β", 2i64)), Ok(true));
            mutator.skip_src(&child_b).unwrap();
            assert_eq!(mutator.inject_new(&Record::builder().node()), Ok(true));
            assert_eq!(mutator.find_src(&Node::anon('a')), Ok(false));
            assert!(!mutator.accept_src(&child_t));
            assert_eq!(mutator.find_src(&child_t), Ok(true));
            assert!(mutator.accept_src(&child_b));
            mutator.skip_src(&child_t).unwrap();
            assert!(!mutator.has_src());
            assert!(mutator.complete_scope());
            drop(mutator);

            assert_eq!(
                probe.render(),
                "α = 1, γ = 3.45, γ = 3.45, β = 2, Rec(), 12:34:56.078, b"
            );
        }
    }

    mod assign_elm {
        use super::populate;
        use crate::{builder, Error, Probe, TreeMutator};
        use sdx_node::{Marker, Node, Time};

        #[test]
        fn handles_assignment_and_kind_mismatch() {
            let mut probe = Probe::new();
            let child_b = Node::anon('b');
            let child_t = Node::anon(Time::new(12, 34, 56, 78));
            populate(&mut probe, &child_b, &child_t);

            let mut mutator = builder().attach_probe(&mut probe);
            mutator.init();
            assert_eq!(mutator.accept_until(&Marker::end()), Ok(true));
            assert_eq!(
                mutator.assign_elm(&Node::named("γ", 3.14159265)),
                Ok(true)
            );

            // Matching by symbol with a payload of a different kind
            assert!(matches!(
                mutator.assign_elm(&Node::named("γ", "π")),
                Err(Error::Logic { .. })
            ));
            assert!(mutator.complete_scope());
            drop(mutator);

            assert!(probe.render().contains("γ = 3.14159265"));
            assert!(probe.render().contains("γ = 3.45"));
        }
    }
}
