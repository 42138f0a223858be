//! Record framer (spec.md §4.1): normalize line length, select record-class
//! lines, multiplex sequence numbers into per-transaction rows.

use crate::types::{Cell, Table};
use tracing::{error, info, warn};

/// Allow-lists that distinguish one record family's lines from another's.
/// BASE II drafts are the fully specified family; SMS and VSS are the same
/// shape with narrower sequence ranges (`transform_vss_records` /
/// `transform_sms_messages` in the Python source).
pub struct RecordFamily {
    pub name: &'static str,
    pub valid_transaction_codes: &'static [&'static str],
    pub valid_sequence_chars: &'static [char],
}

impl RecordFamily {
    pub const BASE_II_DRAFT: RecordFamily = RecordFamily {
        name: "baseii_draft",
        valid_transaction_codes: &["05", "06", "07", "25", "26", "27"],
        valid_sequence_chars: &['0', '1', '2', '3', '4', '5', '6', '7'],
    };

    pub const VSS_SETTLEMENT: RecordFamily = RecordFamily {
        name: "vss_settlement",
        valid_transaction_codes: &["46"],
        valid_sequence_chars: &['0', '1'],
    };

    pub const SMS_AUTHORIZATION: RecordFamily = RecordFamily {
        name: "sms_authorization",
        valid_transaction_codes: &["33"],
        valid_sequence_chars: &['0'],
    };

    fn sequence_columns(&self) -> Vec<String> {
        self.valid_sequence_chars.iter().map(|c| c.to_string()).collect()
    }
}

const CTF_LENGTH: usize = 168;
const EXPANDED_LENGTH: usize = 170;

/// Strips the 2-character prefix an expanded-format line carries at offsets
/// 2-4, leaving the canonical 168-char Compact Transaction Format line.
/// Returns `None` for any other header length (spec.md §3).
pub fn normalize_ctf(lines: &[String]) -> Option<Vec<String>> {
    let header = lines.first()?;
    match header.chars().count() {
        CTF_LENGTH => Some(lines.to_vec()),
        EXPANDED_LENGTH => Some(
            lines
                .iter()
                .map(|line| {
                    let chars: Vec<char> = line.chars().collect();
                    let mut out: String = chars[..2].iter().collect();
                    out.extend(&chars[4..]);
                    out
                })
                .collect(),
        ),
        _ => None,
    }
}

/// Frames raw lines into one row per transaction, columns named by sequence
/// character. Returns an empty table (never an error) when the header
/// length is unrecognized, matching the Python source's recovery behavior.
pub fn frame(lines: &[String], family: &RecordFamily) -> Table {
    let columns = family.sequence_columns();

    let Some(ctf_lines) = normalize_ctf(lines) else {
        error!(
            family = family.name,
            "the Visa interchange file has an unknown line length"
        );
        let mut table = Table::with_row_count(0);
        for col in &columns {
            table.push_column(col.clone(), Vec::new());
        }
        return table;
    };

    info!(family = family.name, lines = ctf_lines.len(), "normalized to CTF");

    let selected: Vec<&String> = ctf_lines
        .iter()
        .filter(|line| line.chars().count() >= 4)
        .filter(|line| {
            let tc: String = line.chars().take(2).collect();
            family.valid_transaction_codes.contains(&tc.as_str())
        })
        .filter(|line| {
            let seq_char = line.chars().nth(3).unwrap();
            family.valid_sequence_chars.contains(&seq_char)
        })
        .collect();

    let mut transactions: Vec<Vec<Option<String>>> = Vec::new();
    let mut prev_seq: Option<u32> = None;

    for line in selected {
        let seq_char = line.chars().nth(3).unwrap();
        let seq = match seq_char.to_digit(10) {
            Some(d) => d,
            None => {
                warn!(seq_char = %seq_char, "non-numeric sequence character, skipping line");
                continue;
            }
        };

        let starts_new = match prev_seq {
            None => true,
            Some(prev) => seq < prev,
        };

        if starts_new {
            transactions.push(vec![None; columns.len()]);
        }

        let current = transactions.last_mut().expect("just pushed or already open");
        if let Some(slot) = columns.iter().position(|c| c == &seq_char.to_string()) {
            current[slot] = Some(line.clone());
        }
        prev_seq = Some(seq);
    }

    info!(family = family.name, transactions = transactions.len(), "grouped transactions");

    let mut table = Table::with_row_count(transactions.len());
    for (idx, col) in columns.iter().enumerate() {
        let values = transactions
            .iter()
            .map(|row| Cell::Str(row[idx].clone().unwrap_or_default()))
            .collect();
        table.push_column(col.clone(), values);
    }
    table
}
