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

use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use approxset::bloom::BloomFilter;
use approxset::error::ErrorKind;
use approxset::hash::DoubleHash;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use googletest::prelude::eq;
use googletest::prelude::ge;
use googletest::prelude::gt;
use googletest::prelude::le;

fn false_positive_rate(filter: &BloomFilter, probes: std::ops::Range<u64>) -> f64 {
    let num_probes = probes.end - probes.start;
    let hits = probes.filter(|i| filter.contains(i)).count();
    hits as f64 / num_probes as f64
}

#[test]
fn test_alice() {
    let mut filter = BloomFilter::new(100, 0.01).unwrap();
    filter.insert("alice");

    assert!(filter.contains("alice"));
    assert!(!filter.contains("unrelated-key-not-inserted"));
}

#[test]
fn test_no_false_negatives() {
    let mut filter = BloomFilter::new(10_000, 0.001).unwrap();
    for i in 0..10_000_u64 {
        filter.insert(&i);
    }
    for i in 0..10_000_u64 {
        assert!(filter.contains(&i), "false negative for {i}");
    }
}

#[test]
fn test_no_false_negatives_when_overfilled() {
    let mut filter = BloomFilter::new(10, 0.1).unwrap();
    let keys: Vec<String> = (0..1_000).map(|i| format!("user-{i}")).collect();
    for key in &keys {
        filter.insert(key.as_str());
    }
    for key in &keys {
        assert!(filter.contains(key.as_str()));
    }
}

#[test]
fn test_false_positive_rate_at_capacity() {
    for seed in [1, 2, 3, 4, 5] {
        let mut filter = BloomFilter::with_seed(1000, 0.01, seed).unwrap();
        for i in 0..1000_u64 {
            filter.insert(&i);
        }

        let rate = false_positive_rate(&filter, 1_000_000..1_010_000);
        assert_that!(rate, ge(0.005));
        assert_that!(rate, le(0.02));
    }
}

#[test]
fn test_false_positive_rate_degrades_past_capacity() {
    let mut filter = BloomFilter::new(1000, 0.01).unwrap();
    for i in 0..5000_u64 {
        filter.insert(&i);
    }

    let rate = false_positive_rate(&filter, 1_000_000..1_010_000);
    assert_that!(rate, gt(0.1));
    assert_that!(filter.estimated_fpp(), gt(0.1));
}

#[test]
fn test_index_sequence_is_deterministic() {
    let f1 = BloomFilter::with_seed(5000, 0.02, 77).unwrap();
    let f2 = BloomFilter::with_seed(5000, 0.02, 77).unwrap();

    for key in ["alice", "bob", "carol", ""] {
        let a: Vec<u64> = f1.indices_for(key).collect();
        let b: Vec<u64> = f1.indices_for(key).collect();
        let c: Vec<u64> = f2.indices_for(key).collect();
        assert_that!(a.len(), eq(f1.num_hashes() as usize));
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(a.iter().all(|&index| index < f1.address_space_size()));
    }
}

#[test]
fn test_invalid_parameter_message() {
    let err = BloomFilter::new(0, 0.01).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidParameter));
    assert_that!(err.message(), contains_substring("capacity"));

    let err = BloomFilter::new(100, 1.0).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidParameter));
    assert_that!(
        err.to_string(),
        contains_substring("false_positive_rate: 1")
    );
}

#[test]
fn test_oversized_address_space_rejected() {
    let err = BloomFilter::new(u64::MAX, 0.5).unwrap_err();
    assert_that!(err.kind(), eq(ErrorKind::InvalidParameter));
    assert_that!(err.message(), contains_substring("does not fit in memory"));
}

/// Returns the same second hash for every item, one that is a multiple of any small
/// address space, to exercise the collapse guard.
#[derive(Debug, Clone, PartialEq)]
struct DegenerateHash;

impl DoubleHash for DegenerateHash {
    fn hash_pair<T: Hash + ?Sized>(&self, item: &T) -> (u64, u64) {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        (hasher.finish(), 0)
    }
}

#[test]
fn test_custom_hasher_with_collapsing_step() {
    let mut filter = BloomFilter::with_hasher(100, 0.01, DegenerateHash).unwrap();
    filter.insert("alice");

    let indices: Vec<u64> = filter.indices_for("alice").collect();
    let mut distinct = indices.clone();
    distinct.sort_unstable();
    distinct.dedup();
    assert_that!(distinct.len(), eq(indices.len()));
    assert_that!(filter.bits_set(), eq(filter.num_hashes() as u64));
    assert!(filter.contains("alice"));
}
