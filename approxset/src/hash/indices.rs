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
use std::iter::FusedIterator;

use super::DoubleHash;
use crate::params::FilterParameters;

/// Maps an item to `num_hashes` indices in `[0, address_space_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexGenerator {
    address_space_size: u64,
    num_hashes: u32,
}

impl IndexGenerator {
    /// Creates a generator for the given filter sizing.
    pub fn new(params: &FilterParameters) -> Self {
        IndexGenerator {
            address_space_size: params.address_space_size(),
            num_hashes: params.num_hashes(),
        }
    }

    /// Returns the indices for `item` hashed with `hasher`.
    ///
    /// # Examples
    ///
    /// ```
    /// use approxset::hash::{IndexGenerator, MurmurDoubleHash};
    /// use approxset::params::FilterParameters;
    ///
    /// let params = FilterParameters::compute(100, 0.01).unwrap();
    /// let generator = IndexGenerator::new(&params);
    /// let hasher = MurmurDoubleHash::default();
    ///
    /// let indices: Vec<u64> = generator.indices_for(&hasher, "alice").collect();
    /// assert_eq!(indices.len(), 7);
    /// assert!(indices.iter().all(|&i| i < 959));
    /// ```
    pub fn indices_for<H, T>(&self, hasher: &H, item: &T) -> HashIndices
    where
        H: DoubleHash,
        T: Hash + ?Sized,
    {
        let (h1, h2) = hasher.hash_pair(item);
        self.indices(h1, h2)
    }

    /// Returns the indices `(h1 + i * h2) mod m` for `i` in `[0, num_hashes)`.
    ///
    /// The sum is computed exactly rather than with wrapping 64-bit arithmetic. If `h2` is a
    /// multiple of `m` every index would equal `h1 mod m`; in that case the step is forced
    /// to 1 so the item still touches `num_hashes` distinct slots (when `m >= num_hashes`).
    pub fn indices(&self, h1: u64, h2: u64) -> HashIndices {
        let m = self.address_space_size;
        let mut step = h2 % m;
        if step == 0 {
            tracing::trace!(
                h2,
                address_space_size = m,
                "second hash collapses, using step 1"
            );
            step = 1 % m;
        }

        HashIndices {
            next: h1 % m,
            step,
            address_space_size: m,
            remaining: self.num_hashes,
        }
    }

    /// Returns the number of addressable slots.
    pub fn address_space_size(&self) -> u64 {
        self.address_space_size
    }

    /// Returns the number of indices produced per item.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }
}

/// Iterator over the slot indices of one item. Created by [`IndexGenerator`].
#[derive(Debug, Clone)]
pub struct HashIndices {
    next: u64,
    step: u64,
    address_space_size: u64,
    remaining: u32,
}

impl Iterator for HashIndices {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let index = self.next;
        // index + step without leaving [0, m) or overflowing u64
        let gap = self.address_space_size - index;
        self.next = if self.step >= gap {
            self.step - gap
        } else {
            index + self.step
        };
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HashIndices {}

impl FusedIterator for HashIndices {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::MurmurDoubleHash;

    fn generator(m: u64, k: u32) -> IndexGenerator {
        IndexGenerator {
            address_space_size: m,
            num_hashes: k,
        }
    }

    #[test]
    fn test_double_hashing_formula() {
        let indices: Vec<u64> = generator(100, 5).indices(7, 30).collect();
        assert_eq!(indices, vec![7, 37, 67, 97, 27]);
    }

    #[test]
    fn test_matches_unreduced_formula() {
        let m = 9586_u64;
        let (h1, h2) = (0xdead_beef_1234_5678_u64, 0x0bad_cafe_8765_4321_u64);
        let expected: Vec<u64> = (0..7_u128)
            .map(|i| ((h1 as u128 + i * h2 as u128) % m as u128) as u64)
            .collect();
        let actual: Vec<u64> = generator(m, 7).indices(h1, h2).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_large_address_space_does_not_overflow() {
        let m = u64::MAX - 1;
        let indices: Vec<u64> = generator(m, 3).indices(m - 1, m - 2).collect();
        assert_eq!(indices, vec![m - 1, m - 3, m - 5]);
    }

    #[test]
    fn test_collapsing_step_is_replaced() {
        let indices: Vec<u64> = generator(64, 4).indices(10, 128).collect();
        assert_eq!(indices, vec![10, 11, 12, 13]);

        let indices: Vec<u64> = generator(64, 3).indices(63, 0).collect();
        assert_eq!(indices, vec![63, 0, 1]);
    }

    #[test]
    fn test_single_slot() {
        let indices: Vec<u64> = generator(1, 3).indices(u64::MAX, 17).collect();
        assert_eq!(indices, vec![0, 0, 0]);
    }

    #[test]
    fn test_exact_size() {
        let mut iter = generator(10, 3).indices(1, 2);
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
        iter.next();
        iter.next();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_indices_for_is_deterministic_and_in_range() {
        let params = FilterParameters::compute(1000, 0.01).unwrap();
        let generator = IndexGenerator::new(&params);
        let hasher = MurmurDoubleHash::default();

        for i in 0..500_u32 {
            let first: Vec<u64> = generator.indices_for(&hasher, &i).collect();
            let second: Vec<u64> = generator.indices_for(&hasher, &i).collect();
            assert_eq!(first, second);
            assert_eq!(first.len(), 7);
            assert!(first.iter().all(|&index| index < 9586));
        }
    }
}
