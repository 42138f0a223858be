//! Field extractor (spec.md §4.2): slice framer sub-records into named
//! string columns via a declarative field-definition table.

use crate::types::field_def::FieldDefinition;
use crate::types::{Cell, Table};
use std::collections::BTreeMap;

fn slice_chars(source: &str, position: usize, length: usize) -> String {
    source
        .chars()
        .skip(position.saturating_sub(1))
        .take(length)
        .collect()
}

fn matches_secondary(line: &str, fd: &FieldDefinition) -> bool {
    match &fd.secondary_identifier {
        None => true,
        Some(sec) => slice_chars(line, sec.pos, sec.len) == sec.literal,
    }
}

/// Extracts one row per transaction into one string column per field
/// definition. `field_defs` need not be pre-sorted; this function applies
/// `FieldDefinition::sort_key` itself so callers can pass metadata reads
/// straight through.
pub fn extract(framer_output: &Table, field_defs: &[FieldDefinition]) -> Table {
    let row_count = framer_output.row_count();
    let mut sorted: Vec<&FieldDefinition> = field_defs.iter().collect();
    sorted.sort_by_key(|fd| fd.sort_key());

    let mut columns: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut column_order: Vec<String> = Vec::new();

    for fd in sorted {
        let Some(source_column) = framer_output.column(&fd.sub_record_id) else {
            continue;
        };

        let entry = columns.entry(fd.column_name.clone()).or_insert_with(|| {
            column_order.push(fd.column_name.clone());
            vec![String::new(); row_count]
        });

        for row in 0..row_count {
            if !entry[row].is_empty() {
                continue;
            }
            let line = source_column[row].as_str().unwrap_or("");
            if !matches_secondary(line, fd) {
                continue;
            }
            let value = slice_chars(line, fd.position, fd.length);
            if !value.is_empty() {
                entry[row] = value;
            }
        }
    }

    let mut table = Table::with_row_count(row_count);
    for name in column_order {
        let values = columns
            .remove(&name)
            .expect("column_order entries always have a backing column")
            .into_iter()
            .map(Cell::Str)
            .collect();
        table.push_column(name, values);
    }
    table
}
