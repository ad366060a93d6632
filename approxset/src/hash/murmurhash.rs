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

use std::hash::Hash;
use std::hash::Hasher;

use super::DoubleHash;

/// Seed used by filters that are not given one explicitly.
pub const DEFAULT_SEED: u32 = 9001;

// Fed to the second hasher ahead of the item so h2 is not derived from h1.
const SALT: u64 = 0x73616c74_0000_007b;

/// MurmurHash3 (x64, 128-bit) based [`DoubleHash`].
///
/// `h1` is the low word of the item's hash; `h2` is the low word of the hash of a fixed salt
/// followed by the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MurmurDoubleHash {
    seed: u32,
}

impl MurmurDoubleHash {
    /// Creates a hasher with a custom seed.
    ///
    /// Filters built with different seeds place the same item at different indices and
    /// cannot be combined.
    pub fn with_seed(seed: u32) -> Self {
        MurmurDoubleHash { seed }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for MurmurDoubleHash {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl DoubleHash for MurmurDoubleHash {
    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64) {
        let mut first = mur3::Hasher128::with_seed(self.seed);
        item.hash(&mut first);
        let (h1, _) = first.finish128();

        let mut second = mur3::Hasher128::with_seed(self.seed);
        second.write_u64(SALT);
        item.hash(&mut second);
        let (h2, _) = second.finish128();

        (h1, h2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remainder() {
        // remainder > 8
        let key = "The quick brown fox jumps over the lazy dog";
        let (h1, h2) = mur3::murmurhash3_x64_128(key.as_bytes(), 0);
        assert_eq!(h1, 0xe34bbc7bbc071b6c);
        assert_eq!(h2, 0x7a433ca9c49a9347);

        // test a remainder = 0
        let key = "The quick brown fox jumps over t";
        let (h1, h2) = mur3::murmurhash3_x64_128(key.as_bytes(), 0);
        assert_eq!(h1, 0xdf6af91bb29bdacf);
        assert_eq!(h2, 0x91a341c58df1f3a6);
    }

    #[test]
    fn test_hash_pair_is_deterministic() {
        let hasher = MurmurDoubleHash::default();
        assert_eq!(hasher.hash_pair("alice"), hasher.hash_pair("alice"));
        assert_eq!(hasher.hash_pair(&42_u64), hasher.hash_pair(&42_u64));
        assert_eq!(
            MurmurDoubleHash::default().hash_pair("bob"),
            MurmurDoubleHash::with_seed(DEFAULT_SEED).hash_pair("bob")
        );
    }

    #[test]
    fn test_halves_differ() {
        let hasher = MurmurDoubleHash::default();
        for i in 0..1000_u32 {
            let (h1, h2) = hasher.hash_pair(&i);
            assert_ne!(h1, h2, "item {i}");
        }
    }

    #[test]
    fn test_seed_changes_hashes() {
        let a = MurmurDoubleHash::with_seed(1).hash_pair("alice");
        let b = MurmurDoubleHash::with_seed(2).hash_pair("alice");
        assert_ne!(a, b);
    }

    #[test]
    fn test_unsized_items() {
        let hasher = MurmurDoubleHash::default();
        let owned = String::from("carol");
        assert_eq!(hasher.hash_pair(owned.as_str()), hasher.hash_pair("carol"));
        assert_eq!(
            hasher.hash_pair(&[1_u8, 2, 3][..]),
            hasher.hash_pair(&vec![1_u8, 2, 3][..])
        );
    }
}
