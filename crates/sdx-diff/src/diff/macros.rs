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

//! Macros for message creation.

// ----------------------------------------------------------------------------
// Macros
// ----------------------------------------------------------------------------

/// Creates a mutation message from the given steps.
///
/// This macro creates a [`MutationMessage`][] from a literal step sequence,
/// mirroring the builder functions of the diff language. It's primarily
/// intended for tests and hard-wired messages.
///
/// [`MutationMessage`]: crate::MutationMessage
///
/// # Examples
///
/// ```
/// use sdx_diff::{diff, ins};
/// use sdx_node::Node;
///
/// // Create message from steps
/// let message = diff![
///     ins(Node::named("α", 1)),
///     ins(Node::named("β", 2i64)),
/// ];
/// assert_eq!(message.count(), 2);
/// ```
#[macro_export]
macro_rules! diff {
    ($($step:expr),* $(,)?) => {
        $crate::MutationMessage::from(vec![$($step),*])
    };
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod diff {
        use crate::{del, ins};
        use sdx_node::Node;

        #[test]
        fn handles_steps() {
            let alpha = Node::named("α", 1);
            let mut message = diff![ins(&alpha), del(&alpha)];
            assert_eq!(message.next(), Some(ins(&alpha)));
            assert_eq!(message.next(), Some(del(&alpha)));
            assert_eq!(message.next(), None);
        }

        #[test]
        fn handles_empty() {
            let message = diff![];
            assert_eq!(message.count(), 0);
        }
    }
}
