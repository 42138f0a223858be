//! `visa_rules` table reads: rule identity columns plus the criterion cells,
//! parsed once into typed predicates as spec.md §9 recommends.
//!
//! Criterion cells are stored as a `criteria_json` column (`{"column_name":
//! "cell text", ...}`) rather than one physical SQL column per criterion —
//! the rule table has dozens of criterion columns and a flat map serves the
//! same read contract without a sprawling fixed schema (see DESIGN.md).

use crate::errors::{AppError, AppResult};
use crate::metadata::MetadataStore;
use crate::pipeline::criteria::parse_criterion;
use crate::types::rule::FeeRule;
use chrono::NaiveDate;
use std::collections::BTreeMap;

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl MetadataStore {
    /// Read every fee rule valid on `processing_date`
    /// (`valid_from <= processing_date <= valid_until`, null `valid_until`
    /// defaulting to `processing_date`), sorted `(region_country_code,
    /// intelica_id ascending)`.
    pub fn read_fee_rules(&self, processing_date: NaiveDate) -> AppResult<Vec<FeeRule>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(
            "SELECT region_country_code, intelica_id, valid_from, valid_until, fee_descriptor, \
             fee_currency, fee_variable, fee_fixed, fee_min, fee_cap, criteria_json \
             FROM visa_rules",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, f64>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, f64>(8)?,
                row.get::<_, f64>(9)?,
                row.get::<_, String>(10)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (
                region_country_code,
                intelica_id,
                valid_from_raw,
                valid_until_raw,
                fee_descriptor,
                fee_currency,
                fee_variable,
                fee_fixed,
                fee_min,
                fee_cap,
                criteria_json,
            ) = row?;

            let valid_from = parse_date(&valid_from_raw).ok_or_else(|| {
                AppError::Config(format!("invalid valid_from on rule {intelica_id}"))
            })?;
            let valid_until = valid_until_raw.and_then(|s| parse_date(&s));

            let cells: BTreeMap<String, String> = serde_json::from_str(&criteria_json)
                .map_err(|e| {
                    AppError::Config(format!("invalid criteria_json on rule {intelica_id}: {e}"))
                })?;

            let mut criteria = Vec::new();
            for (column, raw_cell) in cells {
                if let Some(predicate) = parse_criterion(&column, &raw_cell)
                    .map_err(|e| AppError::RuleDsl(format!("rule {intelica_id}: {e}")))?
                {
                    criteria.push((column, predicate));
                }
            }

            let rule = FeeRule {
                region_country_code,
                intelica_id,
                valid_from,
                valid_until,
                fee_descriptor,
                fee_currency,
                fee_variable,
                fee_fixed,
                fee_min,
                fee_cap,
                criteria,
            };

            if rule.is_valid_on(processing_date) {
                out.push(rule);
            }
        }

        out.sort_by(|a, b| {
            a.region_country_code
                .cmp(&b.region_country_code)
                .then(a.intelica_id.cmp(&b.intelica_id))
        });
        Ok(out)
    }
}
