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

//! Counting Bloom filter: approximate set membership with removal.
//!
//! Each slot holds an 8-bit [`Counter8`] instead of a bit. Inserting an item increments its
//! counters, removing it decrements them, and an item is reported present while all of its
//! counters are non-zero.
//!
//! Counters saturate at 255 and floor at 0. Saturation loses precision for extremely hot
//! slots (a saturated counter may later be decremented below the true number of items
//! using it) in exchange for never wrapping around to zero.
//!
//! # Usage
//!
//! ```rust
//! use approxset::counting::CountingBloomFilter;
//!
//! let mut filter = CountingBloomFilter::new(1000, 0.01).unwrap();
//!
//! filter.insert("session-1");
//! filter.insert("session-2");
//! filter.remove("session-1");
//!
//! assert!(filter.contains("session-2"));
//! assert!(!filter.contains("session-1")); // probably
//! ```

mod counter;
mod counter_array;
mod sketch;

pub use self::counter::Counter8;
pub use self::counter_array::CounterArray;
pub use self::sketch::CountingBloomFilter;
