//! Core value and table types shared by every pipeline stage.
//!
//! A `Table` is the in-memory form of the columnar artifact described in the
//! data model: named columns, each holding one `Cell` per transaction row, in
//! the same row order the artifact had when it was read.

pub mod ardef;
pub mod field_def;
pub mod rule;

use chrono::NaiveDate;
use std::fmt;

/// A single cleaned/extracted value. Extraction produces only `Str`; cleaning
/// narrows each column to the type its field definition declares.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Str(String),
    Int(i64),
    Decimal(f64),
    Date(NaiveDate),
    Null,
}

impl Cell {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Cell::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Render the value the way the rule engine and calculators compare
    /// against criterion tokens: the empty string for null/blank string.
    pub fn to_comparable_string(&self) -> String {
        match self {
            Cell::Str(s) => s.clone(),
            Cell::Int(v) => v.to_string(),
            Cell::Decimal(v) => v.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Null => String::new(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_comparable_string())
    }
}

/// A columnar batch of transaction rows. Column order is insertion order;
/// every column has exactly `row_count()` entries.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<(String, Vec<Cell>)>,
    rows: usize,
}

impl Table {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: 0,
        }
    }

    pub fn with_row_count(rows: usize) -> Self {
        Self {
            columns: Vec::new(),
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn get(&self, name: &str, row: usize) -> &Cell {
        self.column(name)
            .and_then(|c| c.get(row))
            .unwrap_or(&Cell::Null)
    }

    /// Insert or replace a column. Panics if `values.len() != row_count()`,
    /// unless this is the first column pushed into an empty table, in which
    /// case the table adopts its length.
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Cell>) {
        if self.columns.is_empty() && self.rows == 0 {
            self.rows = values.len();
        }
        assert_eq!(
            values.len(),
            self.rows,
            "column length must match table row count"
        );
        let name = name.into();
        if let Some(existing) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = values;
        } else {
            self.columns.push((name, values));
        }
    }

    /// Iterate `(name, column)` pairs in insertion order.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Row-position join: append every column of `other` to `self`,
    /// suffixing a colliding name. `other` must have the same row count.
    pub fn join_left(&mut self, other: &Table, left_suffix: &str) {
        assert_eq!(
            self.rows, other.rows,
            "row-position join requires equal row counts"
        );
        for (name, values) in &other.columns {
            let target_name = if self.has_column(name) {
                self.rename_collision(name, left_suffix)
            } else {
                name.clone()
            };
            self.push_column(target_name, values.clone());
        }
    }

    fn rename_collision(&mut self, name: &str, left_suffix: &str) -> String {
        if let Some(entry) = self.columns.iter_mut().find(|(n, _)| n == name) {
            entry.0 = format!("{name}{left_suffix}");
        }
        name.to_string()
    }
}
