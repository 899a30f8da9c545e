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

//! Mutation errors.

use thiserror::Error;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Mutation error.
///
/// The failure taxonomy of change application. All three kinds are terminal
/// for the current application run: no rollback is attempted, the target may
/// be left in an intermediate state, and the producer is expected to resync
/// rather than retry the same diff.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Target shape contradicts what the diff expects.
    #[error(
        "unable to {verb} element {spec} in scope {scope}, found {found} instead"
    )]
    Conflict {
        /// Verb that could not be satisfied.
        verb: &'static str,
        /// Element the diff expected.
        spec: String,
        /// Element actually found at the cursor.
        found: String,
        /// Identity of the scope being worked.
        scope: String,
    },
    /// Diff is internally malformed, i.e. scope bracketing is unbalanced.
    #[error("malformed diff: {detail}")]
    Structure {
        /// Description of the malformation.
        detail: String,
    },
    /// Operation contradicts the binding, e.g. a payload kind mismatch.
    #[error("logic error: {detail}")]
    Logic {
        /// Description of the violation.
        detail: String,
    },
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Error {
    /// Creates a logic error from the given detail.
    pub(crate) fn logic<D>(detail: D) -> Self
    where
        D: Into<String>,
    {
        Self::Logic { detail: detail.into() }
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl From<sdx_node::Error> for Error {
    /// Creates a logic error from a payload kind mismatch.
    #[inline]
    fn from(error: sdx_node::Error) -> Self {
        Self::logic(error.to_string())
    }
}

// ----------------------------------------------------------------------------
// Type definitions
// ----------------------------------------------------------------------------

/// Mutation result.
pub type Result<T = (), E = Error> = std::result::Result<T, E>;
