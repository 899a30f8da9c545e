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

//! Diff applicator.

use std::iter;

use sdx_diff::{DiffStep, ListDiffInterpreter, TreeDiffInterpreter};
use sdx_mutator::{DiffMutable, Error, Result, TreeMutator};
use sdx_node::{Id, Node};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Diff applicator.
///
/// Applies diff streams to a target implementing [`DiffMutable`]. For every
/// consumed diff, a fresh mutator is built over the target's current state —
/// mutators are one-shot — and the verbs are pulled from the stream one at a
/// time, strictly in order, each dispatching onto a mutation primitive. A
/// `mut` verb recurses depth-first into the addressed child scope, whose
/// frame lives on the call stack until the matching `emu` closes it.
///
/// Failures are terminal for the current application: the target may be left
/// in an intermediate state, and no rollback is attempted. The producer is
/// expected to respond with a full resync rather than retrying.
///
/// # Examples
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use sdx_apply::DiffApplicator;
/// use sdx_diff::{diff, ins};
/// use sdx_node::{Node, Record};
///
/// // Populate an empty record by diff
/// let mut record = Record::new();
/// DiffApplicator::new(&mut record).consume(diff![
///     ins(Node::named("α", 1)),
///     ins(Node::anon('b')),
/// ])?;
///
/// assert_eq!(record.get("α").unwrap().value().get::<i32>(), Some(1));
/// assert_eq!(record.scope().count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct DiffApplicator<'t, T: ?Sized> {
    /// Target receiving the changes.
    target: &'t mut T,
}

/// Scope walker.
///
/// The interpreter driving one scope: it holds the active mutator, the
/// shared diff stream and the identity of the scope being worked. Nested
/// scopes are walked by fresh walkers on the call stack, so a scope frame
/// is simply an activation record of the recursion.
struct Walker<'m, 's, S> {
    /// Active mutator of this scope.
    mutator: &'m mut dyn TreeMutator,
    /// Shared diff stream.
    stream: &'s mut S,
    /// Identity of this scope, or `None` at the root.
    scope: Option<Id>,
    /// Whether this scope was closed by its `emu`.
    closed: bool,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'t, T> DiffApplicator<'t, T>
where
    T: DiffMutable + ?Sized,
{
    /// Creates an applicator for the given target.
    ///
    /// The target is borrowed exclusively: the core assumes sole access for
    /// the duration of an application, any further synchronisation is the
    /// caller's concern.
    pub fn new(target: &'t mut T) -> Self {
        Self { target }
    }

    /// Consumes the given diff, applying it to the target.
    ///
    /// The stream is consumed exactly once; an empty diff is a no-op and
    /// does not even build a mutator. When the stream is exhausted at the
    /// root, the root scope must complete, i.e. every pre-existing element
    /// must have been confirmed by the diff.
    ///
    /// # Errors
    ///
    /// This method returns [`Error::Conflict`], if the target's shape does
    /// not match what the diff expects, [`Error::Structure`], if the diff
    /// itself is malformed (unbalanced or incomplete scopes), and
    /// [`Error::Logic`], if an assignment crosses payload kinds.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "debug", skip_all))]
    pub fn consume<D>(&mut self, diff: D) -> Result
    where
        D: IntoIterator<Item = DiffStep>,
    {
        let mut stream = diff.into_iter();
        let Some(first) = stream.next() else {
            // The empty diff is a no-op
            return Ok(());
        };

        let mut mutator = self.target.build_mutator();
        mutator.init();

        let mut stream = iter::once(first).chain(stream);
        run_scope(&mut *mutator, &mut stream, None)
    }
}

// ----------------------------------------------------------------------------

impl<S> Walker<'_, '_, S> {
    /// Raises a conflict for the given verb and spec.
    fn conflict(&self, verb: &'static str, spec: &Node) -> Error {
        Error::Conflict {
            verb,
            spec: spec.to_string(),
            found: self
                .mutator
                .peek_src()
                .unwrap_or_else(|| "end of scope".to_string()),
            scope: self
                .scope
                .as_ref()
                .map_or_else(|| "(root)".to_string(), ToString::to_string),
        }
    }

    /// Requires further source elements for the given verb.
    fn expect_src(&self, verb: &'static str, spec: &Node) -> Result {
        if self.mutator.has_src() {
            Ok(())
        } else {
            Err(self.conflict(verb, spec))
        }
    }
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Walks one scope of the diff stream.
///
/// Pulls steps until the scope is closed by its `emu`, or the stream ends.
/// At the root, stream end requires the root mutator to complete; inside a
/// nested scope, stream end means the diff is malformed.
fn run_scope<S>(
    mutator: &mut dyn TreeMutator,
    stream: &mut S,
    scope: Option<Id>,
) -> Result
where
    S: Iterator<Item = DiffStep>,
{
    let mut walker = Walker {
        mutator,
        stream,
        scope,
        closed: false,
    };
    while let Some(step) = walker.stream.next() {
        step.apply_to(&mut walker)?;
        if walker.closed {
            return Ok(());
        }
    }

    // The stream is exhausted: inside a nested scope this is a malformed
    // diff, at the root the target must have settled completely
    let Walker { mutator, scope, .. } = walker;
    match scope {
        Some(id) => Err(Error::Structure {
            detail: format!("diff ended while scope {id} was still open"),
        }),
        None => {
            if mutator.complete_scope() {
                Ok(())
            } else {
                Err(Error::Structure {
                    detail: "diff ended with source elements unconfirmed \
                             in the root scope"
                        .to_string(),
                })
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl<S> ListDiffInterpreter<Node> for Walker<'_, '_, S>
where
    S: Iterator<Item = DiffStep>,
{
    type Error = Error;

    /// Injects a new element at the current position.
    fn ins(&mut self, spec: &Node) -> Result {
        if self.mutator.inject_new(spec)? {
            Ok(())
        } else {
            Err(self.conflict("ins", spec))
        }
    }

    /// Discards the current source element, which must match.
    fn del(&mut self, spec: &Node) -> Result {
        self.expect_src("del", spec)?;
        if self.mutator.match_src(spec) {
            self.mutator.skip_src(spec)
        } else {
            Err(self.conflict("del", spec))
        }
    }

    /// Accepts the current source element, which must match.
    fn pick(&mut self, spec: &Node) -> Result {
        if self.mutator.accept_src(spec) {
            Ok(())
        } else {
            Err(self.conflict("pick", spec))
        }
    }

    /// Relocates a source element to the current position.
    fn find(&mut self, spec: &Node) -> Result {
        self.expect_src("find", spec)?;
        if self.mutator.find_src(spec)? {
            Ok(())
        } else {
            Err(self.conflict("find", spec))
        }
    }

    /// Discards the current source element or hole.
    fn skip(&mut self, spec: &Node) -> Result {
        // The content is assumed to have been moved away by a prior find
        self.expect_src("skip", spec)?;
        self.mutator.skip_src(spec)
    }
}

impl<S> TreeDiffInterpreter for Walker<'_, '_, S>
where
    S: Iterator<Item = DiffStep>,
{
    /// Assigns the spec's payload to the addressed element.
    fn set(&mut self, spec: &Node) -> Result {
        if self.mutator.assign_elm(spec)? {
            Ok(())
        } else {
            Err(self.conflict("set", spec))
        }
    }

    /// Fast-forwards up to and including the mark.
    fn after(&mut self, marker: &Node) -> Result {
        if self.mutator.accept_until(marker)? {
            Ok(())
        } else {
            Err(self.conflict("after", marker))
        }
    }

    /// Opens the addressed nested scope and walks it to its `emu`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(scope = %spec.id()))
    )]
    fn enter(&mut self, spec: &Node) -> Result {
        let id = spec.id().clone();
        let Self { mutator, stream, .. } = self;
        let entered = mutator.mutate_child(spec, &mut |child| {
            child.init();
            run_scope(child, &mut **stream, Some(id.clone()))
        })?;
        if entered {
            Ok(())
        } else {
            Err(self.conflict("mut", spec))
        }
    }

    /// Closes the current scope, which must match and be complete.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(level = "trace", skip_all, fields(scope = %spec.id()))
    )]
    fn leave(&mut self, spec: &Node) -> Result {
        match &self.scope {
            None => Err(Error::Structure {
                detail: format!("emu({}) attempts to pop the root scope", spec.id()),
            }),
            Some(id) if id != spec.id() => Err(Error::Structure {
                detail: format!(
                    "unbalanced bracketing: emu({}) closes open scope {id}",
                    spec.id()
                ),
            }),
            Some(id) => {
                if self.mutator.complete_scope() {
                    self.closed = true;
                    Ok(())
                } else {
                    Err(Error::Structure {
                        detail: format!(
                            "leaving scope {id} with source elements still pending"
                        ),
                    })
                }
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use sdx_diff::{after, del, diff, emu, find, ins, mutate, pick, set, skip};
    use sdx_diff::MutationMessage;
    use sdx_mutator::Result;
    use sdx_node::{Marker, Node, Record, Time};

    use crate::DiffApplicator;

    /// Shared nodes acting as templates within the diffs.
    ///
    /// Everything in the diff language is by-value; anonymous identities are
    /// unique per construction, so the fixture hands out copies.
    struct Fixture {
        type_x: Node,
        type_y: Node,
        alpha: Node,
        beta: Node,
        gamma: Node,
        gamma_pi: Node,
        child_a: Node,
        child_b: Node,
        child_t: Node,
        sub: Node,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                type_x: Node::named("type", "X"),
                type_y: Node::named("type", "Y"),
                alpha: Node::named("α", 1),
                beta: Node::named("β", 2i64),
                gamma: Node::named("γ", 3.45),
                gamma_pi: Node::named("γ", 3.14159265),
                child_a: Node::anon("a"),
                child_b: Node::anon('b'),
                child_t: Node::anon(Time::new(12, 34, 56, 78)),
                sub: Record::builder().node(),
            }
        }

        /// Populates an empty record, including a nested scope.
        fn populate(&self) -> MutationMessage {
            diff![
                ins(&self.type_x),
                ins(&self.alpha),
                ins(&self.beta),
                ins(&self.gamma),
                ins(&self.child_a),
                ins(&self.child_t),
                ins(&self.child_t),
                ins(&self.sub),
                mutate(&self.sub),
                ins(&self.child_b),
                ins(&self.child_a),
                emu(&self.sub),
            ]
        }

        /// Reorders the children, consuming one time value.
        fn reorder(&self) -> MutationMessage {
            diff![
                after(Marker::attribs()),
                find(&self.child_t),
                pick(&self.child_a),
                skip(&self.child_t),
                del(&self.child_t),
                after(Marker::end()),
            ]
        }

        /// Assigns a changed attribute value out of order.
        fn assign(&self) -> MutationMessage {
            diff![after(Marker::end()), set(&self.gamma_pi)]
        }

        /// Mutates the nested scope.
        fn mutation(&self) -> MutationMessage {
            diff![
                mutate(&self.sub),
                ins(&self.type_y),
                ins(&self.beta),
                del(&self.child_b),
                del(&self.child_a),
                ins(&self.child_a),
                emu(&self.sub),
            ]
        }
    }

    /// Applies a diff to the given record.
    fn apply(record: &mut Record, diff: MutationMessage) -> Result {
        DiffApplicator::new(record).consume(diff)
    }

    /// Builds the record state after population, reorder and assignment.
    fn prepared(fixture: &Fixture) -> Record {
        let mut record = Record::new();
        apply(&mut record, fixture.populate()).unwrap();
        apply(&mut record, fixture.reorder()).unwrap();
        apply(&mut record, fixture.assign()).unwrap();
        record
    }

    mod consume {
        use super::{apply, prepared, Fixture};
        use sdx_diff::{diff, del, emu, ins, mutate, pick, after};
        use sdx_mutator::Error;
        use sdx_node::{Marker, Node, Record, Value};

        use crate::DiffApplicator;

        #[test]
        fn handles_population() {
            let fixture = Fixture::new();
            let mut subject = Record::new();
            apply(&mut subject, fixture.populate()).unwrap();

            assert_eq!(subject.type_tag(), Some("X"));
            assert_eq!(subject.get("α").unwrap().value(), &Value::Int(1));
            assert_eq!(subject.get("β").unwrap().value(), &Value::Long(2));
            assert_eq!(subject.get("γ").unwrap().value(), &Value::Real(3.45));

            let scope: Vec<_> = subject.scope().collect();
            assert_eq!(scope[0], &fixture.child_a);
            assert_eq!(scope[1], &fixture.child_t);
            assert_eq!(scope[2], &fixture.child_t);

            // The nested scope was populated behind the sub node's identity
            let expected = Record::builder()
                .child(&fixture.child_b)
                .child(&fixture.child_a)
                .build();
            assert!(scope[3].matches(&fixture.sub));
            assert_eq!(scope[3].value().as_record(), Some(&expected));
        }

        #[test]
        fn handles_reordering() {
            let fixture = Fixture::new();
            let mut subject = Record::new();
            apply(&mut subject, fixture.populate()).unwrap();
            apply(&mut subject, fixture.reorder()).unwrap();

            // One time value was consumed by find, the other deleted
            let scope: Vec<_> = subject.scope().collect();
            assert_eq!(scope.len(), 3);
            assert_eq!(scope[0], &fixture.child_t);
            assert_eq!(scope[1], &fixture.child_a);
            assert!(scope[2].matches(&fixture.sub));

            // The attributes were not altered
            let keys: Vec<_> = subject
                .attribs()
                .filter_map(|node| node.id().sym())
                .collect();
            assert_eq!(keys, ["α", "β", "γ"]);
        }

        #[test]
        fn handles_assignment() {
            let fixture = Fixture::new();
            let subject = prepared(&fixture);

            // The payload changed, the identity did not
            let gamma = subject.get("γ").unwrap();
            assert_eq!(gamma.value(), &Value::Real(3.14159265));
            assert!(gamma.matches(&fixture.gamma));

            let scope: Vec<_> = subject.scope().collect();
            assert_eq!(scope[0], &fixture.child_t);
        }

        #[test]
        fn handles_nested_mutation() {
            let fixture = Fixture::new();
            let mut subject = prepared(&fixture);
            apply(&mut subject, fixture.mutation()).unwrap();

            let nested = subject
                .scope()
                .find(|node| node.matches(&fixture.sub))
                .and_then(|node| node.value().as_record())
                .unwrap();
            assert_eq!(nested.type_tag(), Some("Y"));
            assert_eq!(nested.get("β").unwrap().value(), &Value::Long(2));

            let scope: Vec<_> = nested.scope().collect();
            assert_eq!(scope.len(), 1);
            assert_eq!(scope[0], &fixture.child_a);

            // Siblings in the parent scope are unaffected
            assert_eq!(subject.scope().count(), 3);
        }

        #[test]
        fn handles_empty_diff() {
            let fixture = Fixture::new();
            let mut subject = prepared(&fixture);
            let before = subject.clone();

            apply(&mut subject, diff![]).unwrap();
            assert_eq!(subject, before);
        }

        #[test]
        fn handles_attribs_marker_without_attributes() {
            let child = Node::anon('b');
            let mut subject = Record::new();
            apply(&mut subject, diff![ins(&child)]).unwrap();

            // Fast-forwarding an empty attribute scope is a no-op, the
            // cursor rests at the first child
            apply(
                &mut subject,
                diff![after(Marker::attribs()), pick(&child)],
            )
            .unwrap();
            assert_eq!(subject.scope().count(), 1);
        }

        #[test]
        fn rejects_conflicts() {
            let fixture = Fixture::new();
            let mut subject = prepared(&fixture);

            // A foreign identity with the same payload is still a mismatch
            let stranger = Node::anon("a");
            let result = apply(&mut subject, diff![del(&stranger)]);
            match result {
                Err(Error::Conflict { verb, found, .. }) => {
                    assert_eq!(verb, "del");
                    assert!(found.contains("12:34:56.078"));
                }
                other => panic!("expected conflict, got {other:?}"),
            }
        }

        #[test]
        fn rejects_unbalanced_scopes() {
            let fixture = Fixture::new();
            let mut subject = prepared(&fixture);

            // The nested scope is never closed, which must not settle
            let result = apply(
                &mut subject,
                diff![mutate(&fixture.sub), ins(&fixture.child_a)],
            );
            assert!(matches!(result, Err(Error::Structure { .. })));
        }

        #[test]
        fn rejects_mismatched_scope_brackets() {
            let fixture = Fixture::new();
            let mut subject = prepared(&fixture);

            let result = apply(
                &mut subject,
                diff![mutate(&fixture.sub), emu(&fixture.child_a)],
            );
            assert!(matches!(result, Err(Error::Structure { .. })));
        }

        #[test]
        fn rejects_pop_of_root() {
            let fixture = Fixture::new();
            let mut subject = prepared(&fixture);

            let result = apply(&mut subject, diff![emu(&fixture.sub)]);
            assert!(matches!(result, Err(Error::Structure { .. })));
        }

        #[test]
        fn rejects_unconfirmed_rest() {
            let fixture = Fixture::new();
            let mut subject = prepared(&fixture);

            // Only one of three children is confirmed
            let result = apply(&mut subject, diff![pick(&fixture.child_t)]);
            assert!(matches!(result, Err(Error::Structure { .. })));
        }

        #[test]
        fn handles_ignoring_targets() {
            use sdx_mutator::{builder, DiffMutable, Empty, TreeMutator};

            /// Target that either rejects or swallows everything.
            struct BlackHole {
                grumpy: bool,
            }

            impl DiffMutable for BlackHole {
                fn build_mutator(&mut self) -> Box<dyn TreeMutator + '_> {
                    if self.grumpy {
                        Box::new(Empty)
                    } else {
                        builder().ignore_all_changes().boxed()
                    }
                }
            }

            let fixture = Fixture::new();
            let mut subject = BlackHole { grumpy: true };

            let result = DiffApplicator::new(&mut subject).consume(fixture.populate());
            assert!(matches!(result, Err(Error::Conflict { .. })));

            subject.grumpy = false;
            let mut applicator = DiffApplicator::new(&mut subject);
            applicator.consume(fixture.populate()).unwrap();
            applicator.consume(fixture.reorder()).unwrap();
            applicator.consume(fixture.mutation()).unwrap();
        }
    }

    mod round_trip {
        use super::apply;
        use sdx_diff::{del, ins, DiffStep, MutationMessage};
        use sdx_node::{Node, Record};

        /// Produces a full-resync diff turning one record into another.
        ///
        /// Producers are responsible for emitting sequences consistent with
        /// the current target state; this reference producer simply retracts
        /// everything and rebuilds the goal state wholesale.
        fn resync(from: &Record, to: &Record) -> MutationMessage {
            let mut steps: Vec<DiffStep> = Vec::new();
            for node in from.attribs() {
                steps.push(del(node));
            }
            for node in from.scope() {
                steps.push(del(node));
            }
            if let Some(tag) = to.type_tag() {
                steps.push(ins(Node::named("type", tag)));
            }
            for node in to.attribs() {
                steps.push(ins(node));
            }
            for node in to.scope() {
                steps.push(ins(node));
            }
            MutationMessage::from(steps)
        }

        #[test]
        fn handles_generated_diffs() {
            let from = Record::builder()
                .attrib("α", 1)
                .child("a")
                .child(Record::builder().attrib("β", 2i64).build())
                .build();
            let to = Record::builder()
                .type_tag("X")
                .attrib("β", 2i64)
                .attrib("γ", 3.45)
                .child('b')
                .child(Node::anon(sdx_node::Time::new(1, 2, 3, 4)))
                .build();

            let mut subject = from.clone();
            apply(&mut subject, resync(&from, &to)).unwrap();
            assert_eq!(subject, to);
        }
    }
}
