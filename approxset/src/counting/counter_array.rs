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

//! Packed 8-bit saturating counters, eight per `u64` word.
//!
//! Counter `i` lives in word `i / 8` at bit offset `(i % 8) * 8`:
//!
//! ```text
//! word:    | c7 | c6 | c5 | c4 | c3 | c2 | c1 | c0 |
//! bits:     63 ..                             .. 0
//! ```

use crate::counting::Counter8;
use crate::error::Error;

const COUNTERS_PER_WORD: u64 = 8;
const COUNTER_BITS: u64 = 8;
const COUNTER_MASK: u64 = 0xFF;

/// Fixed-size array of [`Counter8`] slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterArray {
    num_counters: u64,
    /// Length = ceil(num_counters / 8)
    words: Box<[u64]>,
}

impl CounterArray {
    /// Allocates `num_counters` zeroed counters.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// the backing words cannot be allocated on this platform.
    pub fn new(num_counters: u64) -> Result<Self, Error> {
        let num_words = usize::try_from(num_counters.div_ceil(COUNTERS_PER_WORD))
            .map_err(|_| Error::address_space_too_large(num_counters))?;
        let mut words = Vec::new();
        words
            .try_reserve_exact(num_words)
            .map_err(|_| Error::address_space_too_large(num_counters))?;
        words.resize(num_words, 0u64);
        Ok(CounterArray {
            num_counters,
            words: words.into_boxed_slice(),
        })
    }

    /// Returns the counter at `index`.
    #[inline]
    pub fn get(&self, index: u64) -> Counter8 {
        debug_assert!(
            index < self.num_counters,
            "counter index {index} out of range"
        );
        let (word_index, shift) = Self::locate(index);
        Counter8::new(((self.words[word_index] >> shift) & COUNTER_MASK) as u8)
    }

    /// Adds one to the counter at `index` unless it is saturated; returns the new value.
    #[inline]
    pub fn increment(&mut self, index: u64) -> Counter8 {
        let counter = self.get(index).increment();
        self.put(index, counter);
        counter
    }

    /// Subtracts one from the counter at `index` unless it is zero; returns the new value.
    #[inline]
    pub fn decrement(&mut self, index: u64) -> Counter8 {
        let counter = self.get(index).decrement();
        self.put(index, counter);
        counter
    }

    /// Returns whether the counter at `index` is greater than zero.
    #[inline]
    pub fn is_nonzero(&self, index: u64) -> bool {
        !self.get(index).is_zero()
    }

    /// Returns the number of counters.
    pub fn len(&self) -> u64 {
        self.num_counters
    }

    /// Returns true if the array holds no counters.
    pub fn is_empty(&self) -> bool {
        self.num_counters == 0
    }

    /// Returns the number of counters greater than zero.
    pub fn count_nonzero(&self) -> u64 {
        self.words
            .iter()
            .map(|&word| {
                (0..COUNTERS_PER_WORD)
                    .filter(|slot| (word >> (slot * COUNTER_BITS)) & COUNTER_MASK != 0)
                    .count() as u64
            })
            .sum()
    }

    /// Returns the size of the backing storage in bytes.
    pub fn size_bytes(&self) -> usize {
        self.words.len() * size_of::<u64>()
    }

    #[inline]
    fn put(&mut self, index: u64, counter: Counter8) {
        let (word_index, shift) = Self::locate(index);
        let word = &mut self.words[word_index];
        *word &= !(COUNTER_MASK << shift);
        *word |= (counter.get() as u64) << shift;
    }

    #[inline]
    fn locate(index: u64) -> (usize, u64) {
        (
            (index / COUNTERS_PER_WORD) as usize,
            (index % COUNTERS_PER_WORD) * COUNTER_BITS,
        )
    }
}
