//! `visa_fields` table reads: the declarative field-definition table that
//! drives both the extractor and the cleaner.

use crate::errors::{AppError, AppResult};
use crate::metadata::MetadataStore;
use crate::types::field_def::{ColumnType, FieldDefinition, SecondaryIdentifier};

impl MetadataStore {
    /// Read every field definition for a record family (e.g. `"draft"`),
    /// sorted `(sub_record_id, position, secondary_identifier_len desc)` —
    /// the order the extractor relies on.
    pub fn read_field_definitions(&self, type_record: &str) -> AppResult<Vec<FieldDefinition>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(
            "SELECT type_record, tcsn, position, length, column_name, \
             secondary_identifier_pos, secondary_identifier_len, secondary_identifier, \
             column_type, float_decimals, date_format \
             FROM visa_fields WHERE type_record = ?1",
        )?;
        let rows = stmt.query_map(rusqlite::params![type_record], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<i64>>(5)?,
                row.get::<_, Option<i64>>(6)?,
                row.get::<_, Option<String>>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, Option<i64>>(9)?,
                row.get::<_, Option<String>>(10)?,
            ))
        })?;

        let mut defs = Vec::new();
        for row in rows {
            let (
                record_family,
                sub_record_id,
                position,
                length,
                column_name,
                sec_pos,
                sec_len,
                sec_literal,
                column_type_raw,
                float_decimals,
                date_format,
            ) = row?;

            let secondary_identifier = match (sec_pos, sec_len, sec_literal) {
                (Some(pos), Some(len), Some(literal)) if !literal.is_empty() => {
                    Some(SecondaryIdentifier {
                        pos: pos as usize,
                        len: len as usize,
                        literal,
                    })
                }
                _ => None,
            };

            let column_type = match column_type_raw.as_str() {
                "str" => ColumnType::Str,
                "int" => ColumnType::Int,
                "decimal" | "float" => {
                    let scale = float_decimals.ok_or_else(|| {
                        AppError::Config(format!(
                            "decimal field {column_name} is missing float_decimals"
                        ))
                    })?;
                    if scale <= 0 {
                        return Err(AppError::Config(format!(
                            "decimal field {column_name} has non-positive scale {scale}"
                        )));
                    }
                    ColumnType::Decimal {
                        scale: scale as u32,
                    }
                }
                "date" => {
                    let format = date_format.ok_or_else(|| {
                        AppError::Config(format!("date field {column_name} is missing date_format"))
                    })?;
                    ColumnType::Date { format }
                }
                other => {
                    return Err(AppError::Config(format!(
                        "unknown column_type {other} for field {column_name}"
                    )))
                }
            };

            defs.push(FieldDefinition {
                record_family,
                sub_record_id,
                column_name,
                position: position as usize,
                length: length as usize,
                column_type,
                secondary_identifier,
            });
        }

        defs.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(defs)
    }
}
