//! `Table` <-> Arrow `RecordBatch` <-> Parquet file conversion.
//!
//! The Python source treats this as `DataFrame.to_parquet`/`read_parquet`
//! (`persistence/files.py`); here the column's Arrow type is inferred from
//! the `Cell` variant its non-null values share.

use crate::errors::{AppError, AppResult};
use crate::types::{Cell, Table};
use arrow::array::{
    Array, ArrayRef, Date32Array, Float64Array, Int64Array, StringArray,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
    Some(d) => d,
    None => unreachable!(),
};

fn column_data_type(cells: &[Cell]) -> DataType {
    for cell in cells {
        match cell {
            Cell::Str(_) => return DataType::Utf8,
            Cell::Int(_) => return DataType::Int64,
            Cell::Decimal(_) => return DataType::Float64,
            Cell::Date(_) => return DataType::Date32,
            Cell::Null => continue,
        }
    }
    DataType::Utf8
}

fn column_to_array(cells: &[Cell], data_type: &DataType) -> AppResult<ArrayRef> {
    let array: ArrayRef = match data_type {
        DataType::Utf8 => Arc::new(StringArray::from(
            cells
                .iter()
                .map(|c| match c {
                    Cell::Str(s) => Some(s.clone()),
                    Cell::Null => None,
                    other => Some(other.to_comparable_string()),
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Int64 => Arc::new(Int64Array::from(
            cells
                .iter()
                .map(|c| match c {
                    Cell::Int(v) => Some(*v),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Float64 => Arc::new(Float64Array::from(
            cells
                .iter()
                .map(|c| match c {
                    Cell::Decimal(v) => Some(*v),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        DataType::Date32 => Arc::new(Date32Array::from(
            cells
                .iter()
                .map(|c| match c {
                    Cell::Date(d) => Some((*d - EPOCH).num_days() as i32),
                    _ => None,
                })
                .collect::<Vec<_>>(),
        )),
        other => {
            return Err(AppError::Config(format!(
                "unsupported artifact column type {other:?}"
            )))
        }
    };
    Ok(array)
}

pub fn table_to_record_batch(table: &Table) -> AppResult<RecordBatch> {
    let mut fields = Vec::new();
    let mut arrays = Vec::new();
    for (name, cells) in table.iter_columns() {
        let data_type = column_data_type(cells);
        fields.push(Field::new(name, data_type.clone(), true));
        arrays.push(column_to_array(cells, &data_type)?);
    }
    let schema = Arc::new(Schema::new(fields));
    Ok(RecordBatch::try_new(schema, arrays)?)
}

pub fn record_batch_to_table(batch: &RecordBatch) -> AppResult<Table> {
    let mut table = Table::with_row_count(batch.num_rows());
    for field in batch.schema().fields() {
        let column = batch
            .column_by_name(field.name())
            .expect("schema field must have a matching column");
        let cells = array_to_cells(column)?;
        table.push_column(field.name().clone(), cells);
    }
    Ok(table)
}

fn array_to_cells(array: &ArrayRef) -> AppResult<Vec<Cell>> {
    match array.data_type() {
        DataType::Utf8 => {
            let a = array
                .as_any()
                .downcast_ref::<StringArray>()
                .expect("Utf8 array downcast");
            Ok((0..a.len())
                .map(|i| {
                    if a.is_null(i) {
                        Cell::Null
                    } else {
                        Cell::Str(a.value(i).to_string())
                    }
                })
                .collect())
        }
        DataType::Int64 => {
            let a = array
                .as_any()
                .downcast_ref::<Int64Array>()
                .expect("Int64 array downcast");
            Ok((0..a.len())
                .map(|i| if a.is_null(i) { Cell::Null } else { Cell::Int(a.value(i)) })
                .collect())
        }
        DataType::Float64 => {
            let a = array
                .as_any()
                .downcast_ref::<Float64Array>()
                .expect("Float64 array downcast");
            Ok((0..a.len())
                .map(|i| {
                    if a.is_null(i) {
                        Cell::Null
                    } else {
                        Cell::Decimal(a.value(i))
                    }
                })
                .collect())
        }
        DataType::Date32 => {
            let a = array
                .as_any()
                .downcast_ref::<Date32Array>()
                .expect("Date32 array downcast");
            Ok((0..a.len())
                .map(|i| {
                    if a.is_null(i) {
                        Cell::Null
                    } else {
                        Cell::Date(EPOCH + Duration::days(a.value(i) as i64))
                    }
                })
                .collect())
        }
        other => Err(AppError::Config(format!(
            "unsupported parquet column type {other:?}"
        ))),
    }
}

pub fn write_table(table: &Table, path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let batch = table_to_record_batch(table)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

pub fn read_table(path: &Path) -> AppResult<Table> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut table = Table::empty();
    for batch in reader {
        let batch = batch?;
        let chunk = record_batch_to_table(&batch)?;
        if table.column_count() == 0 {
            table = chunk;
        } else {
            append_rows(&mut table, &chunk);
        }
    }
    Ok(table)
}

fn append_rows(table: &mut Table, chunk: &Table) {
    for (name, values) in chunk.iter_columns() {
        let mut merged = table.column(name).map(|c| c.to_vec()).unwrap_or_default();
        merged.extend(values.iter().cloned());
        table.push_column(name.to_string(), merged);
    }
}
