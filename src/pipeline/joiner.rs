//! Artifact joiner (spec.md §4.7): join clean + calculated + interchange
//! frames by row position into the operational artifact.

use crate::errors::{AppError, AppResult};
use crate::types::Table;

const LEFT_SUFFIX: &str = "_clean";

/// Joins `clean`, `calculated`, and `interchange` by row position.
/// Duplicate column names are resolved by suffixing the already-present
/// (left-hand) column, matching `Table::join_left`'s collision policy.
pub fn join(clean: &Table, calculated: &Table, interchange: &Table) -> AppResult<Table> {
    let row_count = clean.row_count();
    if calculated.row_count() != row_count || interchange.row_count() != row_count {
        return Err(AppError::InvalidRecord {
            row: 0,
            reason: "stage outputs have mismatched row counts for the positional join".to_string(),
        });
    }

    let mut joined = clean.clone();
    joined.join_left(calculated, LEFT_SUFFIX);
    joined.join_left(interchange, LEFT_SUFFIX);
    Ok(joined)
}
