//! Fee rules and the criterion predicates parsed from their DSL cells.

use chrono::NaiveDate;
use std::collections::HashSet;

/// Column names that belong to numeric-range criterion matching.
pub const NUMERIC_RANGE_COLUMNS: &[&str] = &["surcharge_amount", "timeliness"];

/// Column names that belong to amount-currency criterion matching.
pub const AMOUNT_CURRENCY_COLUMNS: &[&str] = &["source_amount"];

/// A parsed numeric comparison, inclusive on both ends of `Between`.
#[derive(Debug, Clone, PartialEq)]
pub enum RangePredicate {
    Lt(f64),
    Le(f64),
    Gt(f64),
    Ge(f64),
    Eq(f64),
    Between(f64, f64),
}

impl RangePredicate {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangePredicate::Lt(n) => value < *n,
            RangePredicate::Le(n) => value <= *n,
            RangePredicate::Gt(n) => value > *n,
            RangePredicate::Ge(n) => value >= *n,
            RangePredicate::Eq(n) => value == *n,
            RangePredicate::Between(lo, hi) => value >= *lo && value <= *hi,
        }
    }
}

/// A single criterion cell, parsed once at rule-load time into the typed
/// predicate its column dispatches to.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionPredicate {
    Numeric(RangePredicate),
    AmountCurrency {
        target_currency: String,
        range: RangePredicate,
    },
    Default {
        positive: HashSet<String>,
        negative: HashSet<String>,
    },
}

/// A `(region_country_code, intelica_id)`-keyed fee rule.
#[derive(Debug, Clone)]
pub struct FeeRule {
    pub region_country_code: String,
    /// Priority key; lower binds first.
    pub intelica_id: i64,
    pub valid_from: NaiveDate,
    pub valid_until: Option<NaiveDate>,
    pub fee_descriptor: String,
    pub fee_currency: String,
    pub fee_variable: f64,
    pub fee_fixed: f64,
    pub fee_min: f64,
    pub fee_cap: f64,
    /// Non-blank criteria, in the column order they were read from the
    /// metadata store. Blank cells are omitted entirely (no-op).
    pub criteria: Vec<(String, CriterionPredicate)>,
}

impl FeeRule {
    pub fn is_valid_on(&self, processing_date: NaiveDate) -> bool {
        let until = self.valid_until.unwrap_or(processing_date);
        self.valid_from <= processing_date && processing_date <= until
    }
}

/// The bound-rule outcome the interchange stage writes per transaction.
#[derive(Debug, Clone)]
pub struct InterchangeBinding {
    pub region_country_code: String,
    /// `-1` when no rule matched.
    pub intelica_id: i64,
    pub fee_descriptor: String,
    pub fee_currency: String,
    pub fee_variable: f64,
    pub fee_fixed: f64,
    pub fee_min: f64,
    pub fee_cap: f64,
}

impl InterchangeBinding {
    pub fn unbound() -> Self {
        Self {
            region_country_code: String::new(),
            intelica_id: -1,
            fee_descriptor: String::new(),
            fee_currency: String::new(),
            fee_variable: 0.0,
            fee_fixed: 0.0,
            fee_min: 0.0,
            fee_cap: 0.0,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.intelica_id != -1
    }
}
