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

//! Command line front end for approxset filters.
//!
//! ```text
//! approxset --capacity 1000 --fpp 0.01 --insert alice --insert bob --query alice --query eve
//! ```

use std::process::ExitCode;

use approxset::bloom::BloomFilter;
use approxset::counting::CountingBloomFilter;
use approxset::error::Error;
use approxset::hash::DEFAULT_SEED;
use approxset::params::FilterParameters;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const DEFAULT_CAPACITY: u64 = 1000;
const DEFAULT_FPP: f64 = 0.01;

/// Build a membership filter, load it, and query it.
#[derive(Parser, Debug)]
#[command(name = "approxset", version)]
#[command(about = "Approximate set membership with Bloom filters")]
struct Args {
    /// Expected number of distinct values
    #[arg(short = 'n', long, default_value_t = DEFAULT_CAPACITY)]
    capacity: u64,

    /// Target false positive rate, strictly between 0 and 1
    #[arg(short = 'p', long, default_value_t = DEFAULT_FPP)]
    fpp: f64,

    /// Hash seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u32,

    /// Use a counting filter, which also supports --remove
    #[arg(long)]
    counting: bool,

    /// Value to insert (repeatable)
    #[arg(short, long = "insert", value_name = "VALUE")]
    inserts: Vec<String>,

    /// Value to remove after all inserts (repeatable)
    #[arg(short, long = "remove", value_name = "VALUE", requires = "counting")]
    removes: Vec<String>,

    /// Value to look up (repeatable)
    #[arg(short, long = "query", value_name = "VALUE")]
    queries: Vec<String>,
}

enum Filter {
    Plain(BloomFilter),
    Counting(CountingBloomFilter),
}

impl Filter {
    fn build(args: &Args) -> Result<Self, Error> {
        if args.counting {
            CountingBloomFilter::with_seed(args.capacity, args.fpp, args.seed).map(Filter::Counting)
        } else {
            BloomFilter::with_seed(args.capacity, args.fpp, args.seed).map(Filter::Plain)
        }
    }

    fn parameters(&self) -> &FilterParameters {
        match self {
            Filter::Plain(filter) => filter.parameters(),
            Filter::Counting(filter) => filter.parameters(),
        }
    }

    fn insert(&mut self, value: &str) {
        match self {
            Filter::Plain(filter) => filter.insert(value),
            Filter::Counting(filter) => filter.insert(value),
        }
    }

    fn remove(&mut self, value: &str) {
        if let Filter::Counting(filter) = self {
            filter.remove(value);
        }
    }

    fn contains(&self, value: &str) -> bool {
        match self {
            Filter::Plain(filter) => filter.contains(value),
            Filter::Counting(filter) => filter.contains(value),
        }
    }

    fn load_factor(&self) -> f64 {
        match self {
            Filter::Plain(filter) => filter.load_factor(),
            Filter::Counting(filter) => filter.load_factor(),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut filter = match Filter::build(&args) {
        Ok(filter) => filter,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let params = filter.parameters();
    println!("capacity: {}", params.capacity());
    println!("false positive rate: {}", params.false_positive_rate());
    println!("address space size: {}", params.address_space_size());
    println!("hash count: {}", params.num_hashes());

    for value in &args.inserts {
        filter.insert(value);
    }
    for value in &args.removes {
        filter.remove(value);
    }
    tracing::info!(
        inserted = args.inserts.len(),
        removed = args.removes.len(),
        load_factor = filter.load_factor(),
        "filter loaded"
    );

    for value in &args.queries {
        let verdict = if filter.contains(value) {
            "present"
        } else {
            "absent"
        };
        println!("{value}: {verdict}");
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["approxset"]).unwrap();
        assert_eq!(args.capacity, 1000);
        assert_eq!(args.fpp, 0.01);
        assert_eq!(args.seed, DEFAULT_SEED);
        assert!(!args.counting);
    }

    #[test]
    fn test_remove_requires_counting() {
        assert!(Args::try_parse_from(["approxset", "--remove", "x"]).is_err());
        assert!(Args::try_parse_from(["approxset", "--counting", "--remove", "x"]).is_ok());
    }

    #[test]
    fn test_non_numeric_capacity_rejected() {
        assert!(Args::try_parse_from(["approxset", "--capacity", "lots"]).is_err());
        assert!(Args::try_parse_from(["approxset", "--capacity", "-5"]).is_err());
    }

    #[test]
    fn test_invalid_parameter_is_reported() {
        let args = Args::try_parse_from(["approxset", "--capacity", "0"]).unwrap();
        let err = Filter::build(&args).err().unwrap();
        assert!(err.to_string().contains("capacity must be greater than 0"));
    }

    #[test]
    fn test_counting_round_trip() {
        let args = Args::try_parse_from(["approxset", "--counting", "-n", "100"]).unwrap();
        let mut filter = Filter::build(&args).unwrap();
        filter.insert("alice");
        assert!(filter.contains("alice"));
        filter.remove("alice");
        assert!(!filter.contains("alice"));
    }
}
