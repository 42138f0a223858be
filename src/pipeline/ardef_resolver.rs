//! ARDEF resolver (spec.md §3, §4.4): filter, dedupe, and sort raw ARDEF
//! rows into a disjoint-interval index, then bind each transaction's
//! 9-digit truncated PAN to the interval containing it.

use crate::types::ardef::{ArdefIndex, ArdefRecord};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Builds the disjoint-interval index from raw metadata rows, applying the
/// filter/dedupe/sort/overlap-elimination pipeline described in spec.md §3.
pub fn build_index(records: Vec<ArdefRecord>, processing_date: NaiveDate) -> ArdefIndex {
    let live: Vec<ArdefRecord> = records
        .into_iter()
        .filter(|r| r.delete_indicator == ' ')
        .filter(|r| {
            let valid_until = r.valid_until.unwrap_or(processing_date);
            r.effective_date <= processing_date && processing_date <= valid_until
        })
        .collect();

    let newest_per_table_key = dedup_newest_by_table_key(live);

    let mut sorted = newest_per_table_key;
    sorted.sort_by(|a, b| {
        a.table_key
            .cmp(&b.table_key)
            .then(b.effective_date.cmp(&a.effective_date))
            .then(a.low_key.cmp(&b.low_key))
    });

    let first_per_low_key = dedup_first_by_low_key(sorted);

    let mut disjoint = Vec::with_capacity(first_per_low_key.len());
    let mut prev_table_key: Option<i64> = None;
    for record in first_per_low_key {
        if let Some(prev) = prev_table_key {
            if record.low_key <= prev {
                continue;
            }
        }
        prev_table_key = Some(record.table_key);
        disjoint.push(record);
    }

    ArdefIndex::new(disjoint)
}

fn dedup_newest_by_table_key(records: Vec<ArdefRecord>) -> Vec<ArdefRecord> {
    let mut newest: HashMap<i64, ArdefRecord> = HashMap::new();
    for record in records {
        match newest.get(&record.table_key) {
            Some(existing) if existing.effective_date >= record.effective_date => {}
            _ => {
                newest.insert(record.table_key, record);
            }
        }
    }
    newest.into_values().collect()
}

fn dedup_first_by_low_key(sorted: Vec<ArdefRecord>) -> Vec<ArdefRecord> {
    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .filter(|r| seen.insert(r.low_key))
        .collect()
}

/// Truncates a PAN (or retrieval reference number) to its 9 most
/// significant digits, replacing `*` masking characters with `0`, as the
/// ARDEF binding key.
pub fn account9(pan: &str) -> i64 {
    let normalized: String = pan.chars().map(|c| if c == '*' { '0' } else { c }).collect();
    let digits: String = normalized.chars().filter(|c| c.is_ascii_digit()).take(9).collect();
    digits.parse().unwrap_or(0)
}
