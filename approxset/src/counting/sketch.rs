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

use crate::counting::Counter8;
use crate::counting::CounterArray;
use crate::error::Error;
use crate::hash::DoubleHash;
use crate::hash::HashIndices;
use crate::hash::IndexGenerator;
use crate::hash::MurmurDoubleHash;
use crate::params::FilterParameters;

/// A counting Bloom filter: a Bloom filter whose slots are 8-bit saturating counters, so
/// items can be removed as well as inserted.
///
/// Sizing and indexing are identical to [`BloomFilter`](crate::bloom::BloomFilter); each slot
/// costs one byte instead of one bit.
///
/// # Removal contract
///
/// Only remove items that were inserted, and no more times than they were inserted.
/// Counters are shared between items, so an unmatched removal decrements slots that belong
/// to other items and can make them report absent. The filter cannot detect this.
#[derive(Debug, Clone, PartialEq)]
pub struct CountingBloomFilter<H = MurmurDoubleHash> {
    params: FilterParameters,
    indexer: IndexGenerator,
    hasher: H,
    /// Count of counters greater than zero
    num_nonzero: u64,
    counters: CounterArray,
}

impl CountingBloomFilter {
    /// Creates a filter sized for `capacity` distinct items at the target false positive rate.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// `capacity` is 0, if `false_positive_rate` is not in `(0.0, 1.0)`, or if the derived
    /// address space cannot be allocated on this platform.
    ///
    /// # Examples
    ///
    /// ```
    /// use approxset::counting::CountingBloomFilter;
    ///
    /// let mut filter = CountingBloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("x");
    /// assert!(filter.contains("x"));
    /// filter.remove("x");
    /// assert!(!filter.contains("x"));
    /// ```
    pub fn new(capacity: u64, false_positive_rate: f64) -> Result<Self, Error> {
        Self::with_hasher(capacity, false_positive_rate, MurmurDoubleHash::default())
    }

    /// Like [`new`](Self::new) with a custom MurmurHash3 seed.
    pub fn with_seed(capacity: u64, false_positive_rate: f64, seed: u32) -> Result<Self, Error> {
        Self::with_hasher(
            capacity,
            false_positive_rate,
            MurmurDoubleHash::with_seed(seed),
        )
    }
}

impl<H: DoubleHash> CountingBloomFilter<H> {
    /// Creates a filter that derives item indices from `hasher`.
    ///
    /// # Errors
    ///
    /// Same as [`CountingBloomFilter::new`].
    pub fn with_hasher(capacity: u64, false_positive_rate: f64, hasher: H) -> Result<Self, Error> {
        let params = FilterParameters::compute(capacity, false_positive_rate)?;
        let counters = CounterArray::new(params.address_space_size())?;

        tracing::debug!(
            capacity,
            false_positive_rate,
            address_space_size = params.address_space_size(),
            num_hashes = params.num_hashes(),
            size_bytes = counters.size_bytes(),
            "created counting bloom filter"
        );

        Ok(CountingBloomFilter {
            params,
            indexer: IndexGenerator::new(&params),
            hasher,
            num_nonzero: 0,
            counters,
        })
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// True iff every counter the item maps to is greater than zero.
    pub fn contains<T: Hash + ?Sized>(&self, item: &T) -> bool {
        self.indices_for(item).all(|index| self.counters.is_nonzero(index))
    }

    /// Returns the smallest counter over the item's slots.
    ///
    /// Zero means the item is absent. Otherwise the value is an upper bound on how many times
    /// the item is currently inserted, as long as none of its counters has saturated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::counting::CountingBloomFilter;
    /// let mut filter = CountingBloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("x");
    /// filter.insert("x");
    /// assert!(filter.count_estimate("x") >= 2);
    /// assert_eq!(filter.count_estimate("never inserted"), 0); // probably
    /// ```
    pub fn count_estimate<T: Hash + ?Sized>(&self, item: &T) -> u8 {
        self.indices_for(item)
            .map(|index| self.counters.get(index))
            .min()
            .map_or(0, Counter8::get)
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion.
    pub fn contains_and_insert<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        let was_present = self.contains(item);
        self.insert(item);
        was_present
    }

    /// Returns the slot indices the filter derives for `item`.
    pub fn indices_for<T: Hash + ?Sized>(&self, item: &T) -> HashIndices {
        self.indexer.indices_for(&self.hasher, item)
    }

    /// Inserts an item, incrementing each of its counters.
    ///
    /// Saturated counters stay at 255.
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        for index in self.indices_for(item) {
            let before = self.counters.get(index);
            let after = self.counters.increment(index);
            if before.is_zero() && !after.is_zero() {
                self.num_nonzero += 1;
            }
        }
    }

    /// Removes one occurrence of an item, decrementing each of its counters.
    ///
    /// Counters already at zero stay at zero. See the removal contract on
    /// [`CountingBloomFilter`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::counting::CountingBloomFilter;
    /// let mut filter = CountingBloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("x");
    /// filter.insert("x");
    ///
    /// filter.remove("x");
    /// assert!(filter.contains("x")); // still inserted once
    /// filter.remove("x");
    /// assert!(!filter.contains("x"));
    /// ```
    pub fn remove<T: Hash + ?Sized>(&mut self, item: &T) {
        for index in self.indices_for(item) {
            let before = self.counters.get(index);
            let after = self.counters.decrement(index);
            if !before.is_zero() && after.is_zero() {
                self.num_nonzero -= 1;
            }
        }
    }

    /// Returns whether every counter is zero.
    pub fn is_empty(&self) -> bool {
        self.num_nonzero == 0
    }

    /// Returns the number of counters greater than zero.
    pub fn counters_in_use(&self) -> u64 {
        self.num_nonzero
    }

    /// Returns the fraction of counters greater than zero.
    pub fn load_factor(&self) -> f64 {
        self.num_nonzero as f64 / self.params.address_space_size() as f64
    }

    /// Estimates the current false positive probability as `load_factor^k`.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powi(self.params.num_hashes() as i32)
    }

    /// Returns the parameters this filter was sized with.
    pub fn parameters(&self) -> &FilterParameters {
        &self.params
    }

    /// Returns the expected number of distinct items.
    pub fn capacity(&self) -> u64 {
        self.params.capacity()
    }

    /// Returns the target false positive rate.
    pub fn false_positive_rate(&self) -> f64 {
        self.params.false_positive_rate()
    }

    /// Returns the number of counters in the filter (m).
    pub fn address_space_size(&self) -> u64 {
        self.params.address_space_size()
    }

    /// Returns the number of hash functions used (k).
    pub fn num_hashes(&self) -> u32 {
        self.params.num_hashes()
    }

    /// Returns the hasher.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<'a, T, H> Extend<&'a T> for CountingBloomFilter<H>
where
    T: Hash + ?Sized + 'a,
    H: DoubleHash,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
