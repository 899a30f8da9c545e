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

//! Identity.

use ahash::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::marker;
use super::value::Kind;

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

/// Deterministic seeds for identity hashing.
///
/// Identities must be reproducible across processes, since a change producer
/// and a change consumer independently reconstruct the identity of a named
/// element from its symbol and payload kind. The default randomized state
/// would break this, so hashing is pinned to fixed seeds.
const SEEDS: (u64, u64, u64, u64) = (
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
);

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Identity.
///
/// An identity is the stable key of a [`Node`][]: a symbolic name plus a
/// precomputed 64-bit hash, which also folds in the kind of the payload the
/// node was constructed with. Named identities are fully reproducible, i.e.
/// constructing a node with the same symbol and a payload of the same kind
/// yields the same identity. Anonymous identities are freshly generated and
/// hash-only, so they are unique per construction and only shared by copies.
///
/// Identities implement [`Eq`] and [`Hash`] over the precomputed hash, which
/// makes comparison and hash-map use constant time, and are immutable after
/// construction.
///
/// [`Node`]: crate::Node
#[derive(Clone, Debug)]
pub struct Id {
    /// Symbolic name, if any.
    sym: Option<Arc<str>>,
    /// Payload kind folded into the identity.
    kind: Kind,
    /// Precomputed hash.
    hash: u64,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Id {
    /// Creates a named identity from a symbol and payload kind.
    pub(crate) fn named(sym: &str, kind: Kind) -> Self {
        let state = RandomState::with_seeds(SEEDS.0, SEEDS.1, SEEDS.2, SEEDS.3);
        let hash = state.hash_one((0u8, sym, kind));
        Self {
            sym: Some(Arc::from(sym)),
            kind,
            hash,
        }
    }

    /// Creates a fresh anonymous identity for a payload kind.
    pub(crate) fn anon(kind: Kind) -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        let state = RandomState::with_seeds(SEEDS.0, SEEDS.1, SEEDS.2, SEEDS.3);
        let hash = state.hash_one((1u8, COUNTER.fetch_add(1, Ordering::Relaxed)));
        Self { sym: None, kind, hash }
    }

    /// Returns the symbolic name, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdx_node::Node;
    ///
    /// // Only named nodes carry a symbol
    /// assert_eq!(Node::named("α", 1).id().sym(), Some("α"));
    /// assert_eq!(Node::anon(1).id().sym(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn sym(&self) -> Option<&str> {
        self.sym.as_deref()
    }

    /// Returns whether the identity carries a symbolic name.
    #[inline]
    #[must_use]
    pub fn is_named(&self) -> bool {
        self.sym.is_some()
    }

    /// Returns the payload kind carried by the identity.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns whether this is the end-of-scope marker.
    #[inline]
    #[must_use]
    pub fn marks_end(&self) -> bool {
        self.sym.as_deref() == Some(marker::END)
    }

    /// Returns whether this is the end-of-attributes marker.
    #[inline]
    #[must_use]
    pub fn marks_attribs(&self) -> bool {
        self.sym.as_deref() == Some(marker::ATTRIBS)
    }

    /// Returns whether this is one of the scope markers.
    #[inline]
    #[must_use]
    pub fn is_marker(&self) -> bool {
        self.marks_end() || self.marks_attribs()
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl Hash for Id {
    /// Hashes the identity.
    ///
    /// Since identities are immutable, the precomputed hash is used, so
    /// hashing is constant time regardless of symbol length.
    #[inline]
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        state.write_u64(self.hash);
    }
}

// ----------------------------------------------------------------------------

impl PartialEq for Id {
    /// Compares two identities for equality.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Id {}

// ----------------------------------------------------------------------------

impl fmt::Display for Id {
    /// Formats the identity for display.
    ///
    /// Named identities render as `sym-hash`, anonymous identities as
    /// `-hash`, with the hash abbreviated to its low 16 bits.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(sym) = &self.sym {
            write!(f, "{sym}-{:04x}", self.hash & 0xFFFF)
        } else {
            write!(f, "-{:04x}", self.hash & 0xFFFF)
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
