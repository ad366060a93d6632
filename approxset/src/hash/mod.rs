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

//! Hashing and index derivation shared by every filter in this crate.
//!
//! Filters never run `k` separate hash functions. Instead a [`DoubleHash`] produces two
//! independent 64-bit values `h1` and `h2` per item, and [`IndexGenerator`] combines them as
//!
//! ```text
//! index_i = (h1 + i * h2) mod m,    i in [0, k)
//! ```
//!
//! (Kirsch-Mitzenmacher double hashing).

use std::hash::Hash;

mod indices;
mod murmurhash;

pub use self::indices::HashIndices;
pub use self::indices::IndexGenerator;
pub use self::murmurhash::DEFAULT_SEED;
pub use self::murmurhash::MurmurDoubleHash;

/// A source of two independent 64-bit hashes per item.
///
/// Implementations must be deterministic: the same item always yields the same pair.
/// The second hash must not be a trivial function of the first, otherwise the derived
/// indices are correlated and the false positive rate suffers.
pub trait DoubleHash {
    /// Returns `(h1, h2)` for `item`.
    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64);
}

impl<H: DoubleHash> DoubleHash for &H {
    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64) {
        (**self).hash_pair(item)
    }
}
