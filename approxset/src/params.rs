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

//! Sizing of membership filters from a target capacity and false positive rate.
//!
//! The optimal number of slots is
//!
//! ```text
//! m = ceil(-n * ln(p) / (ln 2)^2)
//! ```
//!
//! and the optimal number of hash functions is
//!
//! ```text
//! k = ceil((m / n) * ln 2)
//! ```
//!
//! where `n` is the expected number of distinct items and `p` the target false positive
//! rate. As a rule of thumb, `p = 0.1` costs ~4.8 slots per item, `p = 0.01` ~9.6,
//! `p = 0.001` ~14.4 and `p = 0.0001` ~19.2.

use crate::error::Error;

/// Derived sizing of a membership filter.
///
/// Computed once when a filter is built and immutable afterwards.
///
/// # Examples
///
/// ```
/// use approxset::params::FilterParameters;
///
/// let params = FilterParameters::compute(1000, 0.01).unwrap();
/// assert_eq!(params.address_space_size(), 9586);
/// assert_eq!(params.num_hashes(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParameters {
    /// Expected number of distinct items (n)
    capacity: u64,
    /// Target false positive rate (p)
    false_positive_rate: f64,
    /// Number of addressable slots (m)
    address_space_size: u64,
    /// Number of indices derived per item (k)
    num_hashes: u32,
}

impl FilterParameters {
    const LN_2: f64 = std::f64::consts::LN_2;
    const LN_2_SQUARED: f64 = Self::LN_2 * Self::LN_2;

    /// Computes the slot count and hash count for `capacity` items at the target rate.
    ///
    /// The result is not capped: a very small `false_positive_rate` relative to `capacity`
    /// yields a very large address space.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// `capacity` is 0 or if `false_positive_rate` is not in `(0.0, 1.0)`.
    pub fn compute(capacity: u64, false_positive_rate: f64) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::invalid_capacity(capacity));
        }
        // Written so that NaN is rejected too.
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(Error::invalid_false_positive_rate(false_positive_rate));
        }

        let n = capacity as f64;
        let m = (-(n * false_positive_rate.ln()) / Self::LN_2_SQUARED).ceil();
        // Float-to-int casts saturate, so an absurd request lands on u64::MAX.
        let address_space_size = (m as u64).max(1);

        let k = ((address_space_size as f64 / n) * Self::LN_2).ceil();
        let num_hashes = (k as u32).max(1);

        Ok(FilterParameters {
            capacity,
            false_positive_rate,
            address_space_size,
            num_hashes,
        })
    }

    /// Returns the expected number of distinct items.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the target false positive rate.
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Returns the number of addressable slots (m).
    pub fn address_space_size(&self) -> u64 {
        self.address_space_size
    }

    /// Returns the number of indices derived per item (k).
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the number of slots allotted per expected item.
    pub fn bits_per_item(&self) -> f64 {
        self.address_space_size as f64 / self.capacity as f64
    }

    /// Theoretical false positive rate after `num_items` distinct insertions.
    ///
    /// Formula: `(1 - e^(-k*n/m))^k`
    ///
    /// # Examples
    ///
    /// ```
    /// # use approxset::params::FilterParameters;
    /// let params = FilterParameters::compute(1000, 0.01).unwrap();
    /// let at_capacity = params.expected_fpp(1000);
    /// assert!(at_capacity > 0.005 && at_capacity < 0.011);
    /// assert_eq!(params.expected_fpp(0), 0.0);
    /// ```
    pub fn expected_fpp(&self, num_items: u64) -> f64 {
        let k = self.num_hashes as f64;
        let exponent = -k * num_items as f64 / self.address_space_size as f64;
        (1.0 - exponent.exp()).powf(k)
    }
}
