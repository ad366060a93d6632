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

//! Packed single-bit slots for the insert-only filter.
//!
//! Slot `i` lives in word `i / 64` at bit `i % 64`. Bits are only ever set; there is no
//! way to clear one.

use crate::error::Error;

/// Fixed-size array of bits packed into `u64` words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    num_bits: u64,
    /// Length = ceil(num_bits / 64)
    words: Box<[u64]>,
}

impl BitArray {
    /// Allocates `num_bits` cleared bits.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// the backing words cannot be allocated on this platform.
    pub fn new(num_bits: u64) -> Result<Self, Error> {
        let num_words = usize::try_from(num_bits.div_ceil(64))
            .map_err(|_| Error::address_space_too_large(num_bits))?;
        let mut words = Vec::new();
        words
            .try_reserve_exact(num_words)
            .map_err(|_| Error::address_space_too_large(num_bits))?;
        words.resize(num_words, 0u64);
        Ok(BitArray {
            num_bits,
            words: words.into_boxed_slice(),
        })
    }

    /// Sets the bit at `index`, returning whether it was previously unset.
    ///
    /// Idempotent. `index` must be below [`len()`](Self::len).
    #[inline]
    pub fn set(&mut self, index: u64) -> bool {
        debug_assert!(index < self.num_bits, "bit index {index} out of range");
        let (word_index, mask) = Self::locate(index);
        let word = &mut self.words[word_index];
        let newly_set = *word & mask == 0;
        *word |= mask;
        newly_set
    }

    /// Returns whether the bit at `index` is set.
    #[inline]
    pub fn test(&self, index: u64) -> bool {
        debug_assert!(index < self.num_bits, "bit index {index} out of range");
        let (word_index, mask) = Self::locate(index);
        self.words[word_index] & mask != 0
    }

    /// Returns the number of addressable bits.
    pub fn len(&self) -> u64 {
        self.num_bits
    }

    /// Returns true if the array has no addressable bits.
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|word| word.count_ones() as u64).sum()
    }

    /// Sets every bit that is set in `other`.
    ///
    /// # Panics
    ///
    /// Panics if the arrays have different lengths.
    pub fn union_with(&mut self, other: &BitArray) {
        assert_eq!(
            self.num_bits, other.num_bits,
            "Cannot union bit arrays of different lengths"
        );
        for (word, other_word) in self.words.iter_mut().zip(other.words.iter()) {
            *word |= *other_word;
        }
    }

    /// Returns the size of the backing storage in bytes.
    pub fn size_bytes(&self) -> usize {
        self.words.len() * size_of::<u64>()
    }

    #[inline]
    fn locate(index: u64) -> (usize, u64) {
        ((index / 64) as usize, 1u64 << (index % 64))
    }
}
