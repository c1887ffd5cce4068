//! HashBits as a pre-check in front of a slow exact lookup.
//!
//! Run with: cargo run --example prefilter

use hashbits::hash::StdHashDescriptor;
use hashbits::HashBits;
use std::collections::HashMap;

type Keys = StdHashDescriptor<str, 8192>;

struct SlowStore {
    rows: HashMap<String, u64>,
    lookups: usize,
}

impl SlowStore {
    fn get(&mut self, key: &str) -> Option<u64> {
        self.lookups += 1;
        self.rows.get(key).copied()
    }
}

fn main() {
    let mut store = SlowStore {
        rows: HashMap::new(),
        lookups: 0,
    };
    let mut filter = HashBits::<Keys>::new();

    for i in 0..500u64 {
        let key = format!("user:{}", i);
        filter.insert_value(&key);
        store.rows.insert(key, i);
    }

    let mut hits = 0;
    let mut skipped = 0;
    for i in 0..2_000u64 {
        let key = format!("user:{}", i);
        if !filter.contains(&key) {
            skipped += 1;
            continue;
        }
        if store.get(&key).is_some() {
            hits += 1;
        }
    }

    println!(
        "Filter: {} of {} bits set ({:.1}% full)",
        filter.count_ones(),
        filter.bit_count(),
        filter.fill_ratio() * 100.0
    );
    println!(
        "Estimated false positive rate: {:.2}%",
        filter.estimated_false_positive_rate() * 100.0
    );
    println!(
        "Queries: 2000, hits: {}, skipped by filter: {}, store lookups: {}",
        hits, skipped, store.lookups
    );
    println!("Wasted lookups (false positives): {}", store.lookups - hits);
}
