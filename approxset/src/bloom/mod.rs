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

//! Bloom filter for approximate set membership.
//!
//! A Bloom filter answers "possibly present" or "definitely absent". It never reports a
//! false negative, and its false positive rate approaches the configured target once the
//! number of distinct inserted items reaches the configured capacity. Inserting
//! substantially more than the capacity raises the false positive rate.
//!
//! # Usage
//!
//! ```rust
//! use approxset::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(10_000, 0.01).unwrap();
//!
//! filter.insert("apple");
//! filter.insert(&42_u64);
//!
//! assert!(filter.contains("apple"));
//! assert!(filter.contains(&42_u64));
//! assert!(!filter.contains("grape")); // probably
//! ```
//!
//! # Concurrency
//!
//! Updates go through `&mut self`. To share one filter between threads, wrap it in a lock.

mod bit_array;
mod sketch;

pub use self::bit_array::BitArray;
pub use self::sketch::BloomFilter;
