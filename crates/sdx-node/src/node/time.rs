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

//! Time values.

use std::fmt;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Time-of-day value.
///
/// A compact time value with millisecond resolution, used as one of the leaf
/// payload kinds. It is an opaque quantity as far as change application is
/// concerned; only equality matters there.
///
/// # Examples
///
/// ```
/// use sdx_node::Time;
///
/// // Create time value and render it
/// let time = Time::new(12, 34, 56, 78);
/// assert_eq!(time.to_string(), "12:34:56.078");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time {
    /// Milliseconds since the zero point.
    millis: u64,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl Time {
    /// Creates a time value from hours, minutes, seconds and milliseconds.
    #[must_use]
    pub fn new(hours: u64, mins: u64, secs: u64, millis: u64) -> Self {
        Self {
            millis: ((hours * 60 + mins) * 60 + secs) * 1000 + millis,
        }
    }

    /// Creates a time value from milliseconds.
    #[inline]
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Returns the time value in milliseconds.
    #[inline]
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.millis
    }
}

// ----------------------------------------------------------------------------
// Trait implementations
// ----------------------------------------------------------------------------

impl fmt::Display for Time {
    /// Formats the time value as `h:mm:ss.mmm`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let secs = self.millis / 1000;
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            secs / 3600,
            secs / 60 % 60,
            secs % 60,
            self.millis % 1000
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    mod display {
        use crate::Time;

        #[test]
        fn handles_rendering() {
            assert_eq!(Time::new(0, 0, 0, 0).to_string(), "0:00:00.000");
            assert_eq!(Time::new(1, 2, 3, 4).to_string(), "1:02:03.004");
            assert_eq!(Time::from_millis(3_723_004), Time::new(1, 2, 3, 4));
        }
    }
}
