// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt;

/// An 8-bit counter that clamps instead of wrapping.
///
/// Incrementing at 255 leaves it at 255 and decrementing at 0 leaves it at 0.
///
/// # Examples
///
/// ```
/// use approxset::counting::Counter8;
///
/// assert_eq!(Counter8::MAX.increment(), Counter8::MAX);
/// assert_eq!(Counter8::ZERO.decrement(), Counter8::ZERO);
/// assert_eq!(Counter8::new(41).increment().get(), 42);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Counter8(u8);

impl Counter8 {
    /// The empty counter.
    pub const ZERO: Counter8 = Counter8(0);
    /// The saturated counter.
    pub const MAX: Counter8 = Counter8(u8::MAX);

    /// Wraps a raw value.
    pub const fn new(value: u8) -> Self {
        Counter8(value)
    }

    /// Returns the raw value.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the counter plus one, saturating at [`Counter8::MAX`].
    #[must_use]
    pub const fn increment(self) -> Self {
        Counter8(self.0.saturating_add(1))
    }

    /// Returns the counter minus one, flooring at [`Counter8::ZERO`].
    #[must_use]
    pub const fn decrement(self) -> Self {
        Counter8(self.0.saturating_sub(1))
    }

    /// Returns true if the counter is 0.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the counter can no longer grow.
    pub const fn is_saturated(self) -> bool {
        self.0 == u8::MAX
    }
}

impl From<Counter8> for u8 {
    fn from(counter: Counter8) -> u8 {
        counter.0
    }
}

impl fmt::Display for Counter8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
