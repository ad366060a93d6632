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

use crate::bloom::BitArray;
use crate::error::Error;
use crate::hash::DoubleHash;
use crate::hash::HashIndices;
use crate::hash::IndexGenerator;
use crate::hash::MurmurDoubleHash;
use crate::params::FilterParameters;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (inserted items always return `true`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// Items can be inserted but never removed; see
/// [`CountingBloomFilter`](crate::counting::CountingBloomFilter) for removal.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter<H = MurmurDoubleHash> {
    params: FilterParameters,
    indexer: IndexGenerator,
    hasher: H,
    /// Count of bits set to 1 (for statistics)
    num_bits_set: u64,
    bits: BitArray,
}

impl BloomFilter {
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
    /// use approxset::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("alice");
    /// assert!(filter.contains("alice"));
    ///
    /// assert!(BloomFilter::new(0, 0.01).is_err());
    /// ```
    pub fn new(capacity: u64, false_positive_rate: f64) -> Result<Self, Error> {
        Self::with_hasher(capacity, false_positive_rate, MurmurDoubleHash::default())
    }

    /// Like [`new`](Self::new) with a custom MurmurHash3 seed.
    ///
    /// **Important**: Filters with different seeds cannot be merged.
    pub fn with_seed(capacity: u64, false_positive_rate: f64, seed: u32) -> Result<Self, Error> {
        Self::with_hasher(
            capacity,
            false_positive_rate,
            MurmurDoubleHash::with_seed(seed),
        )
    }
}

impl<H: DoubleHash> BloomFilter<H> {
    /// Creates a filter that derives item indices from `hasher`.
    ///
    /// # Errors
    ///
    /// Same as [`BloomFilter::new`].
    pub fn with_hasher(capacity: u64, false_positive_rate: f64, hasher: H) -> Result<Self, Error> {
        let params = FilterParameters::compute(capacity, false_positive_rate)?;
        let bits = BitArray::new(params.address_space_size())?;

        tracing::debug!(
            capacity,
            false_positive_rate,
            address_space_size = params.address_space_size(),
            num_hashes = params.num_hashes(),
            size_bytes = bits.size_bytes(),
            "created bloom filter"
        );

        Ok(BloomFilter {
            params,
            indexer: IndexGenerator::new(&params),
            hasher,
            num_bits_set: 0,
            bits,
        })
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** inserted (or false positive)
    /// - `false`: Item was **definitely not** inserted
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.insert("apple");
    ///
    /// assert!(filter.contains("apple")); // true - was inserted
    /// assert!(!filter.contains("grape")); // false - never inserted (probably)
    /// ```
    pub fn contains<T: Hash + ?Sized>(&self, item: &T) -> bool {
        self.indices_for(item).all(|index| self.bits.test(index))
    }

    /// Tests and inserts an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    ///
    /// assert!(!filter.contains_and_insert("apple")); // First insertion
    /// assert!(filter.contains_and_insert("apple")); // Now it's in the set
    /// ```
    pub fn contains_and_insert<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        let mut was_present = true;
        for index in self.indices_for(item) {
            if self.bits.set(index) {
                self.num_bits_set += 1;
                was_present = false;
            }
        }
        was_present
    }

    /// Returns the slot indices the filter derives for `item`.
    ///
    /// The sequence depends only on the item, the filter parameters and the hasher.
    pub fn indices_for<T: Hash + ?Sized>(&self, item: &T) -> HashIndices {
        self.indexer.indices_for(&self.hasher, item)
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Inserts an item into the filter.
    ///
    /// After insertion, `contains(item)` will always return `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    ///
    /// filter.insert("apple");
    /// filter.insert(&42_u64);
    /// filter.insert(&[1, 2, 3]);
    ///
    /// assert!(filter.contains("apple"));
    /// assert!(filter.contains(&42_u64));
    /// ```
    pub fn insert<T: Hash + ?Sized>(&mut self, item: &T) {
        for index in self.indices_for(item) {
            if self.bits.set(index) {
                self.num_bits_set += 1;
            }
        }
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether the filter is empty (no items inserted).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_set(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// A filter filled to its capacity sits close to 0.5.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.params.address_space_size() as f64
    }

    /// Estimates the current false positive probability from the bits actually set.
    ///
    /// A random absent item is reported present only if all of its `k` slots are set, so
    /// the estimate is `load_factor^k`. Assumes uniform bit distribution.
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

    /// Returns the total number of bits in the filter (m).
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

impl<H: DoubleHash + PartialEq> BloomFilter<H> {
    /// Checks if two filters are compatible for merging.
    ///
    /// Filters are compatible if they have the same:
    /// - Capacity and false positive rate (hence the same number of bits and hashes)
    /// - Hasher (including its seed)
    pub fn is_compatible(&self, other: &BloomFilter<H>) -> bool {
        self.params == other.params && self.hasher == other.hasher
    }

    /// Merges another filter into this one via bitwise OR (union).
    ///
    /// After merging, this filter will recognize items from either filter
    /// (plus any false positives from either).
    ///
    /// # Panics
    ///
    /// Panics if the filters are not compatible.
    /// Use [`is_compatible()`](Self::is_compatible) to check first.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::bloom::BloomFilter;
    /// let mut f1 = BloomFilter::with_seed(100, 0.01, 123).unwrap();
    /// let mut f2 = BloomFilter::with_seed(100, 0.01, 123).unwrap();
    ///
    /// f1.insert("a");
    /// f2.insert("b");
    ///
    /// f1.union(&f2);
    /// assert!(f1.contains("a"));
    /// assert!(f1.contains("b"));
    /// ```
    pub fn union(&mut self, other: &BloomFilter<H>) {
        assert!(
            self.is_compatible(other),
            "Cannot union incompatible Bloom filters"
        );

        self.bits.union_with(&other.bits);
        self.num_bits_set = self.bits.count_ones();
    }
}

impl<'a, T, H> Extend<&'a T> for BloomFilter<H>
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::hash::DEFAULT_SEED;

    #[test]
    fn test_new_sizes_from_accuracy() {
        let filter = BloomFilter::new(1000, 0.01).unwrap();
        assert_eq!(filter.address_space_size(), 9586);
        assert_eq!(filter.num_hashes(), 7);
        assert_eq!(filter.capacity(), 1000);
        assert_eq!(filter.false_positive_rate(), 0.01);
        assert_eq!(filter.hasher().seed(), DEFAULT_SEED);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        let err = BloomFilter::new(0, 0.01).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);

        let err = BloomFilter::new(100, 1.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn test_insert_and_contains() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();

        assert!(!filter.contains("apple"));
        filter.insert("apple");
        assert!(filter.contains("apple"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_insert_sets_at_most_k_bits() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        filter.insert("apple");
        assert!(filter.bits_set() >= 1);
        assert!(filter.bits_set() <= filter.num_hashes() as u64);

        let before = filter.bits_set();
        filter.insert("apple");
        assert_eq!(filter.bits_set(), before);
    }

    #[test]
    fn test_contains_and_insert() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();

        let was_present = filter.contains_and_insert(&42_u64);
        assert!(!was_present);

        let was_present = filter.contains_and_insert(&42_u64);
        assert!(was_present);
        assert!(filter.contains(&42_u64));
    }

    #[test]
    fn test_indices_are_stable_across_instances() {
        let f1 = BloomFilter::new(1000, 0.01).unwrap();
        let f2 = BloomFilter::new(1000, 0.01).unwrap();
        let a: Vec<u64> = f1.indices_for("alice").collect();
        let b: Vec<u64> = f2.indices_for("alice").collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_extend() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        let names = ["alice", "bob", "carol"];
        filter.extend(names.iter().copied());
        assert!(names.iter().all(|name| filter.contains(*name)));
    }

    #[test]
    fn test_union() {
        let mut f1 = BloomFilter::with_seed(100, 0.01, 123).unwrap();
        let mut f2 = BloomFilter::with_seed(100, 0.01, 123).unwrap();

        f1.insert("a");
        f2.insert("b");

        f1.union(&f2);
        assert!(f1.contains("a"));
        assert!(f1.contains("b"));
        assert_eq!(f1.bits_set(), f1.bits.count_ones());
    }

    #[test]
    fn test_is_compatible() {
        let f1 = BloomFilter::with_seed(100, 0.01, 123).unwrap();
        let f2 = BloomFilter::with_seed(100, 0.01, 123).unwrap();
        let f3 = BloomFilter::with_seed(100, 0.01, 456).unwrap();
        let f4 = BloomFilter::with_seed(200, 0.01, 123).unwrap();

        assert!(f1.is_compatible(&f2));
        assert!(!f1.is_compatible(&f3));
        assert!(!f1.is_compatible(&f4));
    }

    #[test]
    #[should_panic(expected = "Cannot union incompatible Bloom filters")]
    fn test_union_incompatible() {
        let mut f1 = BloomFilter::with_seed(100, 0.01, 1).unwrap();
        let f2 = BloomFilter::with_seed(100, 0.01, 2).unwrap();
        f1.union(&f2);
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(1000, 0.01).unwrap();
        assert_eq!(filter.bits_set(), 0);
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.estimated_fpp(), 0.0);

        for i in 0..1000_u32 {
            filter.insert(&i);
        }
        let load = filter.load_factor();
        assert!(load > 0.4 && load < 0.6, "load factor {load}");
        let fpp = filter.estimated_fpp();
        assert!(fpp > 0.001 && fpp < 0.05, "estimated fpp {fpp}");
    }
}
