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

//! # approxset
//!
//! Space-efficient approximate set membership. A filter answers "has this value been
//! inserted?" with no false negatives and a bounded, tunable false positive rate.
//!
//! - [`bloom::BloomFilter`]: insert-only, one bit per slot.
//! - [`counting::CountingBloomFilter`]: insert and remove, one 8-bit saturating counter per
//!   slot.
//!
//! Both are sized by [`params::FilterParameters`] from an expected capacity and a target
//! false positive rate, and both derive slot indices with the double hashing scheme in
//! [`hash`].
//!
//! Filters are single-threaded: updates take `&mut self` and nothing is synchronized
//! internally.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod counting;
pub mod error;
pub mod hash;
pub mod params;
