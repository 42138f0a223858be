//! The interchange rule criterion DSL: cell normalization and parsing into
//! the typed predicates defined in `types::rule`.
//!
//! Criteria are parsed once, at rule-load time, rather than per
//! transaction — see spec.md §9's design note on parsing cost.

use crate::errors::{AppError, AppResult};
use crate::types::rule::{
    CriterionPredicate, RangePredicate, AMOUNT_CURRENCY_COLUMNS, NUMERIC_RANGE_COLUMNS,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn numeric_pattern(re: &str) -> Regex {
    Regex::new(re).expect("static regex is valid")
}

struct NumericPatterns {
    le: Regex,
    ge: Regex,
    lt: Regex,
    gt: Regex,
    eq: Regex,
    between: Regex,
}

fn patterns() -> &'static NumericPatterns {
    static PATTERNS: OnceLock<NumericPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| NumericPatterns {
        le: numeric_pattern(r"^<=(-?\d+(?:\.\d+)?)$"),
        ge: numeric_pattern(r"^>=(-?\d+(?:\.\d+)?)$"),
        lt: numeric_pattern(r"^<(-?\d+(?:\.\d+)?)$"),
        gt: numeric_pattern(r"^>(-?\d+(?:\.\d+)?)$"),
        eq: numeric_pattern(r"^=?(-?\d+(?:\.\d+)?)$"),
        between: numeric_pattern(r"^BETWEEN(-?\d+(?:\.\d+)?)AND(-?\d+(?:\.\d+)?)$"),
    })
}

/// Strip whitespace and upper-case, honoring the whole-cell blank no-op
/// contract. Returns `None` when the cell is blank (no constraint).
fn normalize(raw: &str) -> Option<String> {
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let upper = stripped.to_ascii_uppercase();
    if upper.is_empty() || upper == "NAN" || upper == "NONE" {
        return None;
    }
    Some(upper)
}

/// Substitute the `SPACE`/`BLANK` placeholder tokens used inside default-
/// group token lists, after the whole-cell blank check has already run.
fn substitute_placeholders(normalized: &str) -> String {
    normalized.replace("SPACE", " ").replace("BLANK", "")
}

fn parse_range(expr: &str) -> AppResult<RangePredicate> {
    let p = patterns();
    if let Some(c) = p.le.captures(expr) {
        return Ok(RangePredicate::Le(parse_f64(&c[1])?));
    }
    if let Some(c) = p.ge.captures(expr) {
        return Ok(RangePredicate::Ge(parse_f64(&c[1])?));
    }
    if let Some(c) = p.lt.captures(expr) {
        return Ok(RangePredicate::Lt(parse_f64(&c[1])?));
    }
    if let Some(c) = p.gt.captures(expr) {
        return Ok(RangePredicate::Gt(parse_f64(&c[1])?));
    }
    if let Some(c) = p.between.captures(expr) {
        return Ok(RangePredicate::Between(
            parse_f64(&c[1])?,
            parse_f64(&c[2])?,
        ));
    }
    if let Some(c) = p.eq.captures(expr) {
        return Ok(RangePredicate::Eq(parse_f64(&c[1])?));
    }
    Err(AppError::RuleDsl(format!(
        "unrecognized numeric range expression: {expr}"
    )))
}

fn parse_f64(s: &str) -> AppResult<f64> {
    s.parse::<f64>()
        .map_err(|_| AppError::RuleDsl(format!("invalid number in criterion: {s}")))
}

/// Expand a default-group token into the literal strings it matches:
/// `"03-05"` expands to `{"03","04","05"}` style integer ranges using each
/// bound's own digit width; any other token is a single literal.
fn expand_token(token: &str) -> Vec<String> {
    if let Some((lo, hi)) = token.split_once('-') {
        if let (Ok(lo_n), Ok(hi_n)) = (lo.parse::<i64>(), hi.parse::<i64>()) {
            if lo_n <= hi_n {
                let width = lo.len();
                return (lo_n..=hi_n)
                    .map(|n| format!("{:0width$}", n, width = width))
                    .collect();
            }
        }
    }
    vec![token.to_string()]
}

fn parse_default(normalized: &str) -> CriterionPredicate {
    let substituted = substitute_placeholders(normalized);
    let mut positive = HashSet::new();
    let mut negative = HashSet::new();
    for token in substituted.split(',') {
        if token.is_empty() {
            continue;
        }
        if let Some(rest) = token.strip_prefix("NOT:") {
            for expanded in expand_token(rest) {
                negative.insert(expanded);
            }
        } else {
            for expanded in expand_token(token) {
                positive.insert(expanded);
            }
        }
    }
    CriterionPredicate::Default { positive, negative }
}

/// Parse one criterion cell for the given column into its typed predicate.
/// Returns `Ok(None)` when the cell is blank (no constraint for this rule).
pub fn parse_criterion(column: &str, raw: &str) -> AppResult<Option<CriterionPredicate>> {
    let Some(normalized) = normalize(raw) else {
        return Ok(None);
    };

    if NUMERIC_RANGE_COLUMNS.contains(&column) {
        return Ok(Some(CriterionPredicate::Numeric(parse_range(&normalized)?)));
    }

    if AMOUNT_CURRENCY_COLUMNS.contains(&column) {
        let (ccy, expr) = normalized.split_once(',').ok_or_else(|| {
            AppError::RuleDsl(format!(
                "amount-currency criterion missing comma separator: {normalized}"
            ))
        })?;
        return Ok(Some(CriterionPredicate::AmountCurrency {
            target_currency: ccy.to_string(),
            range: parse_range(expr)?,
        }));
    }

    Ok(Some(parse_default(&normalized)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells_are_no_ops() {
        assert!(parse_criterion("anything", "").unwrap().is_none());
        assert!(parse_criterion("anything", "nan").unwrap().is_none());
        assert!(parse_criterion("anything", "  None ").unwrap().is_none());
    }

    #[test]
    fn default_group_tokens_with_ranges_and_negation() {
        let pred = parse_criterion("draft_code", "01,03-05,NOT:04")
            .unwrap()
            .unwrap();
        match pred {
            CriterionPredicate::Default { positive, negative } => {
                assert!(positive.contains("01"));
                assert!(positive.contains("03"));
                assert!(positive.contains("04"));
                assert!(positive.contains("05"));
                assert!(negative.contains("04"));
            }
            _ => panic!("expected default predicate"),
        }
    }

    #[test]
    fn numeric_range_between() {
        let pred = parse_criterion("timeliness", "BETWEEN 1 AND 3")
            .unwrap()
            .unwrap();
        assert_eq!(
            pred,
            CriterionPredicate::Numeric(RangePredicate::Between(1.0, 3.0))
        );
    }

    #[test]
    fn numeric_range_le() {
        let pred = parse_criterion("timeliness", "<= 3").unwrap().unwrap();
        assert_eq!(pred, CriterionPredicate::Numeric(RangePredicate::Le(3.0)));
    }

    #[test]
    fn amount_currency_criterion() {
        let pred = parse_criterion("source_amount", "USD, BETWEEN 10 AND 100")
            .unwrap()
            .unwrap();
        assert_eq!(
            pred,
            CriterionPredicate::AmountCurrency {
                target_currency: "USD".to_string(),
                range: RangePredicate::Between(10.0, 100.0),
            }
        );
    }
}
