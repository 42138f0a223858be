//! Interchange rule engine (spec.md §4.6): bind each transaction to the
//! single highest-priority matching fee rule, or leave it unbound.

use crate::metadata::exchange_rate::ExchangeRateTable;
use crate::types::rule::{CriterionPredicate, FeeRule, InterchangeBinding};
use crate::types::{Cell, Table};

/// Evaluates one criterion against one transaction row, narrowing `batch` in
/// place. `batch` holds row indices still under consideration.
fn criterion_matches(
    column: &str,
    predicate: &CriterionPredicate,
    enriched: &Table,
    row: usize,
    exchange_rates: &ExchangeRateTable,
) -> bool {
    match predicate {
        CriterionPredicate::Numeric(range) => match enriched.get(column, row) {
            Cell::Decimal(v) => range.matches(*v),
            Cell::Int(v) => range.matches(*v as f64),
            _ => false,
        },
        CriterionPredicate::AmountCurrency {
            target_currency,
            range,
        } => {
            let amount = match enriched.get("source_amount", row).as_decimal() {
                Some(v) => v,
                None => return false,
            };
            let source_currency = enriched
                .get("source_currency_code_alphabetic", row)
                .to_comparable_string();
            let rate = match exchange_rates.rate(&source_currency, target_currency) {
                Some(r) => r,
                None => return false,
            };
            range.matches(amount * rate)
        }
        CriterionPredicate::Default { positive, negative } => {
            let value = enriched.get(column, row).to_comparable_string();
            let excluded = negative.contains(&value);
            let included = positive.is_empty() || positive.contains(&value);
            included && !excluded
        }
    }
}

/// Binds the enriched transaction frame against rules already filtered to
/// those valid on the processing date (see `MetadataStore::read_fee_rules`)
/// and sorted `(region_country_code, intelica_id ascending)`.
pub fn bind(
    enriched: &Table,
    rules: &[FeeRule],
    exchange_rates: &ExchangeRateTable,
) -> Vec<InterchangeBinding> {
    let row_count = enriched.row_count();
    let mut bindings: Vec<InterchangeBinding> =
        (0..row_count).map(|_| InterchangeBinding::unbound()).collect();

    for rule in rules {
        let mut candidates: Vec<usize> = (0..row_count)
            .filter(|&i| !bindings[i].is_bound())
            .filter(|&i| {
                enriched.get("jurisdiction_assigned", i).to_comparable_string()
                    == rule.region_country_code
            })
            .collect();
        if candidates.is_empty() {
            continue;
        }

        for (column, predicate) in &rule.criteria {
            candidates.retain(|&row| {
                criterion_matches(column, predicate, enriched, row, exchange_rates)
            });
            if candidates.is_empty() {
                break;
            }
        }

        for row in candidates {
            bindings[row] = InterchangeBinding {
                region_country_code: rule.region_country_code.clone(),
                intelica_id: rule.intelica_id,
                fee_descriptor: rule.fee_descriptor.clone(),
                fee_currency: rule.fee_currency.clone(),
                fee_variable: rule.fee_variable,
                fee_fixed: rule.fee_fixed,
                fee_min: rule.fee_min,
                fee_cap: rule.fee_cap,
            };
        }
    }

    bindings
}

/// Projects bound interchange outcomes into one columnar frame, ready for
/// the artifact joiner.
pub fn bindings_to_table(bindings: &[InterchangeBinding]) -> Table {
    let mut table = Table::with_row_count(bindings.len());
    table.push_column(
        "interchange_region_country_code",
        bindings
            .iter()
            .map(|b| Cell::Str(b.region_country_code.clone()))
            .collect(),
    );
    table.push_column(
        "interchange_intelica_id",
        bindings.iter().map(|b| Cell::Int(b.intelica_id)).collect(),
    );
    table.push_column(
        "fee_descriptor",
        bindings.iter().map(|b| Cell::Str(b.fee_descriptor.clone())).collect(),
    );
    table.push_column(
        "fee_currency",
        bindings.iter().map(|b| Cell::Str(b.fee_currency.clone())).collect(),
    );
    table.push_column(
        "fee_variable",
        bindings.iter().map(|b| Cell::Decimal(b.fee_variable)).collect(),
    );
    table.push_column(
        "fee_fixed",
        bindings.iter().map(|b| Cell::Decimal(b.fee_fixed)).collect(),
    );
    table.push_column(
        "fee_min",
        bindings.iter().map(|b| Cell::Decimal(b.fee_min)).collect(),
    );
    table.push_column(
        "fee_cap",
        bindings.iter().map(|b| Cell::Decimal(b.fee_cap)).collect(),
    );
    table
}
