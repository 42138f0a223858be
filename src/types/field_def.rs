//! Field definitions: the declarative table that drives the extractor and
//! the cleaner (`visa_fields` in the metadata store).

/// Semantic type a raw extracted column is coerced to during cleaning.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    Str,
    Int,
    /// Fixed-point decimal with the zoned-decimal (overpunch) fixup applied
    /// before scaling. `scale` must be positive.
    Decimal { scale: u32 },
    /// `format` is either a `%`-prefixed chrono format, or one of the
    /// non-standard encodings `!MMDD`, `!YDDD`, `!YYYYDDD`.
    Date { format: String },
}

/// An optional secondary discriminator that further partitions a sub-record:
/// only rows whose slice at `[pos, pos+len)` equals `literal` contribute a
/// value for this field.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryIdentifier {
    pub pos: usize,
    pub len: usize,
    pub literal: String,
}

/// A `(record_family, sub_record_id, field_name)` field definition.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub record_family: String,
    /// Sub-record sequence number, as the string key used to select the
    /// framer's `"0".."7"` columns (e.g. `"0"`, `"1"`).
    pub sub_record_id: String,
    pub column_name: String,
    /// 1-based starting position within the sub-record line.
    pub position: usize,
    pub length: usize,
    pub column_type: ColumnType,
    pub secondary_identifier: Option<SecondaryIdentifier>,
}

impl FieldDefinition {
    /// Sort key used by the extractor: `(sub_record_id, position,
    /// secondary_identifier_len desc)`. Definitions sharing a column name
    /// are processed in this order and merged first-non-blank-wins, so the
    /// longer (more specific) secondary identifier is tried first and wins
    /// any row it restricts to.
    pub fn sort_key(&self) -> (String, usize, std::cmp::Reverse<usize>) {
        let sec_len = self
            .secondary_identifier
            .as_ref()
            .map(|s| s.len)
            .unwrap_or(0);
        (
            self.sub_record_id.clone(),
            self.position,
            std::cmp::Reverse(sec_len),
        )
    }
}
