//! Field cleaner (spec.md §4.3): coerce each extracted string column to its
//! declared semantic type.

use crate::errors::{AppError, AppResult};
use crate::pipeline::{dates, overpunch};
use crate::types::field_def::{ColumnType, FieldDefinition};
use crate::types::{Cell, Table};
use chrono::NaiveDate;

/// Cleans every column named by `field_defs`, leaving columns with no
/// matching definition untouched. `processing_date` anchors the
/// non-standard date formats.
pub fn clean(
    extracted: &Table,
    field_defs: &[FieldDefinition],
    processing_date: NaiveDate,
) -> AppResult<Table> {
    let mut table = extracted.clone();
    for fd in field_defs {
        let Some(raw_column) = extracted.column(&fd.column_name) else {
            continue;
        };
        let cleaned = clean_column(raw_column, &fd.column_type, processing_date)?;
        table.push_column(fd.column_name.clone(), cleaned);
    }
    Ok(table)
}

fn clean_column(
    raw_column: &[Cell],
    column_type: &ColumnType,
    processing_date: NaiveDate,
) -> AppResult<Vec<Cell>> {
    match column_type {
        ColumnType::Str => Ok(raw_column.iter().map(clean_str_cell).collect()),
        ColumnType::Int => Ok(raw_column.iter().map(clean_int_cell).collect()),
        ColumnType::Decimal { scale } => {
            if *scale == 0 {
                return Err(AppError::Config(
                    "decimal column type requires a positive scale".to_string(),
                ));
            }
            Ok(raw_column
                .iter()
                .map(|c| clean_decimal_cell(c, *scale))
                .collect())
        }
        ColumnType::Date { format } => Ok(raw_column
            .iter()
            .map(|c| clean_date_cell(c, format, processing_date))
            .collect()),
    }
}

fn raw_str(cell: &Cell) -> &str {
    cell.as_str().unwrap_or("")
}

fn clean_str_cell(cell: &Cell) -> Cell {
    let trimmed = raw_str(cell).trim();
    if trimmed.is_empty() {
        Cell::Str(" ".to_string())
    } else {
        Cell::Str(trimmed.to_string())
    }
}

fn clean_int_cell(cell: &Cell) -> Cell {
    match raw_str(cell).trim().parse::<i64>() {
        Ok(v) => Cell::Int(v),
        Err(_) => Cell::Null,
    }
}

fn clean_decimal_cell(cell: &Cell, scale: u32) -> Cell {
    match overpunch::parse_decimal(raw_str(cell), scale) {
        Some(v) => Cell::Decimal(v),
        None => Cell::Null,
    }
}

fn clean_date_cell(cell: &Cell, format: &str, processing_date: NaiveDate) -> Cell {
    match dates::parse_date(raw_str(cell), format, processing_date) {
        Some(d) => Cell::Date(d),
        None => Cell::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_column(name: &str, raw: &str) -> Table {
        let mut t = Table::empty();
        t.push_column(name, vec![Cell::Str(raw.to_string())]);
        t
    }

    fn fd(name: &str, column_type: ColumnType) -> FieldDefinition {
        FieldDefinition {
            record_family: "baseii_draft".to_string(),
            sub_record_id: "0".to_string(),
            column_name: name.to_string(),
            position: 1,
            length: 1,
            column_type,
            secondary_identifier: None,
        }
    }

    #[test]
    fn blank_string_becomes_single_space() {
        let table = single_column("merchant_name", "   ");
        let out = clean(&table, &[fd("merchant_name", ColumnType::Str)], NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()).unwrap();
        assert_eq!(out.get("merchant_name", 0).as_str(), Some(" "));
    }

    #[test]
    fn invalid_int_becomes_null() {
        let table = single_column("field", "abc");
        let out = clean(&table, &[fd("field", ColumnType::Int)], NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()).unwrap();
        assert_eq!(out.get("field", 0), &Cell::Null);
    }

    #[test]
    fn decimal_applies_overpunch_and_scale() {
        let table = single_column("amount", "12A");
        let out = clean(
            &table,
            &[fd("amount", ColumnType::Decimal { scale: 2 })],
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        )
        .unwrap();
        assert_eq!(out.get("amount", 0).as_decimal(), Some(1.21));
    }

    #[test]
    fn non_positive_scale_is_a_configuration_error() {
        let table = single_column("amount", "1234");
        let result = clean(
            &table,
            &[fd("amount", ColumnType::Decimal { scale: 0 })],
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        assert!(result.is_err());
    }
}
