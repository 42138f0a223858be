//! Derived attribute computation (spec.md §4.5). Each function is a pure
//! `(clean_row, client_meta, file_meta, ardef_record?) -> value` projection,
//! computed one row at a time over the cleaned columnar frame.
//!
//! The classification truth tables (`authorization_code_valid`,
//! `business_transaction_type`, `reversal_indicator`) are preserved
//! verbatim from the source and must not be "simplified" — see
//! `calculate.py` in the original BASE II implementation.

use crate::metadata::client::Client;
use crate::metadata::country::CountryTable;
use crate::metadata::currency::CurrencyTable;
use crate::metadata::transaction_type::TransactionTypeTable;
use crate::pipeline::{ardef_resolver, dates, jurisdiction};
use crate::types::ardef::ArdefRecord;
use crate::types::{Cell, Table};

/// Ranked column-candidate lists for the coalescing attributes, one set per
/// BASE II sub-record variant that can carry the field. The first non-blank
/// wins.
mod coalesce_candidates {
    pub const BUSINESS_APPLICATION_ID: &[&str] =
        &["business_application_id_0", "business_application_id_1"];
    pub const BUSINESS_FORMAT_CODE: &[&str] = &["business_format_code_0", "business_format_code_1"];
    pub const MESSAGE_REASON_CODE: &[&str] = &["message_reason_code_0", "message_reason_code_1"];
    pub const NETWORK_IDENTIFICATION_CODE: &[&str] =
        &["network_identification_code_0", "network_identification_code_1"];
    pub const TYPE_OF_PURCHASE: &[&str] = &["type_of_purchase_0", "type_of_purchase_1"];
    pub const SURCHARGE_AMOUNT: &[&str] =
        &["surcharge_amount_0", "surcharge_amount_1", "surcharge_amount_2"];
}

fn coalesce_first_non_blank(row: &Table, idx: usize, candidates: &[&str]) -> Cell {
    for name in candidates {
        let cell = row.get(name, idx);
        if !cell.to_comparable_string().trim().is_empty() {
            return cell.clone();
        }
    }
    Cell::Null
}

fn max_decimal_across(row: &Table, idx: usize, candidates: &[&str]) -> Cell {
    let max = candidates
        .iter()
        .filter_map(|name| row.get(name, idx).as_decimal())
        .fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        });
    match max {
        Some(v) => Cell::Decimal(v),
        None => Cell::Null,
    }
}

fn normalize_bin(raw: &str, digits: usize) -> String {
    raw.chars()
        .map(|c| if c == '*' { '0' } else { c })
        .filter(|c| c.is_ascii_digit())
        .take(digits)
        .collect()
}

fn authorization_code_valid(authorization_code: &str) -> &'static str {
    const INVALID_TAIL: &[&str] = &[" ", "0000", "00000", "0000n", "0000p", "0000y"];
    if authorization_code.ends_with('x') {
        return "INVALID";
    }
    let tail: String = authorization_code
        .chars()
        .rev()
        .take(5)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if INVALID_TAIL.contains(&tail.as_str()) {
        return "INVALID";
    }
    "VALID"
}

fn business_transaction_type(
    draft_code: &str,
    merchant_category_code: Option<i64>,
    usage_code: Option<i64>,
    _special_condition_indicator: &str,
    _draft_code_qualifier_0: Option<i64>,
) -> i64 {
    const SALE_CODES: &[&str] = &["05", "15", "25", "35"];
    const CASH_CODES: &[&str] = &["06", "16", "26", "36"];
    const REFUND_CODES: &[&str] = &["07", "17", "27", "37"];
    const QUASI_CASH_MCCS: &[i64] = &[4829, 6051, 7995];

    if SALE_CODES.contains(&draft_code) {
        return match merchant_category_code {
            Some(mcc) if QUASI_CASH_MCCS.contains(&mcc) => 3,
            _ => 1,
        };
    }
    if CASH_CODES.contains(&draft_code) && usage_code == Some(1) {
        // The source's np.select takes the first matching condition, and
        // cash/usage_code==1 alone already covers the "+ special 7/8" and
        // "+ qualifier==2" conditions listed after it, so those two never
        // fire; every such row resolves to 19.
        return 19;
    }
    if REFUND_CODES.contains(&draft_code) {
        return match merchant_category_code {
            Some(6010) => 21,
            Some(6011) => 22,
            _ => 255,
        };
    }
    255
}

fn reversal_indicator(draft_code: &str) -> i64 {
    const REVERSAL_CODES: &[&str] = &["25", "26", "27", "35", "36", "37"];
    if REVERSAL_CODES.contains(&draft_code) {
        1
    } else {
        0
    }
}

/// Computes every derived attribute for one cleaned BASE II draft frame,
/// given the ARDEF binding, client BIN lists, and lookup tables each row
/// needs.
pub fn calculate(
    clean: &Table,
    ardef_bindings: &[ArdefRecord],
    client: &Client,
    country_table: &CountryTable,
    currency_table: &CurrencyTable,
    transaction_type_table: &TransactionTypeTable,
) -> Table {
    let row_count = clean.row_count();
    let mut out = Table::with_row_count(row_count);

    let business_transaction_types: Vec<i64> = (0..row_count)
        .map(|i| {
            business_transaction_type(
                clean.get("draft_code", i).as_str().unwrap_or(""),
                clean.get("merchant_category_code", i).as_int(),
                clean.get("usage_code", i).as_int(),
                clean
                    .get("special_condition_indicator_merchant_draft_indicator", i)
                    .as_str()
                    .unwrap_or(""),
                clean.get("draft_code_qualifier_0", i).as_int(),
            )
        })
        .collect();

    out.push_column(
        "transaction_type_id",
        business_transaction_types
            .iter()
            .map(|&btt| match transaction_type_table.transaction_type_of(btt) {
                Some(id) => Cell::Str(id.to_string()),
                None => Cell::Null,
            })
            .collect(),
    );

    out.push_column(
        "authorization_code_valid",
        (0..row_count)
            .map(|i| {
                Cell::Str(
                    authorization_code_valid(clean.get("authorization_code", i).as_str().unwrap_or(""))
                        .to_string(),
                )
            })
            .collect(),
    );

    out.push_column(
        "business_transaction_type",
        business_transaction_types.iter().map(|&v| Cell::Int(v)).collect(),
    );

    out.push_column(
        "reversal_indicator",
        (0..row_count)
            .map(|i| Cell::Int(reversal_indicator(clean.get("draft_code", i).as_str().unwrap_or(""))))
            .collect(),
    );

    out.push_column(
        "timeliness",
        (0..row_count)
            .map(|i| {
                match (
                    clean.get("central_processing_date", i).as_date(),
                    clean.get("purchase_date", i).as_date(),
                ) {
                    (Some(central), Some(purchase)) => {
                        Cell::Int(dates::timeliness_days(central, purchase))
                    }
                    _ => Cell::Null,
                }
            })
            .collect(),
    );

    out.push_column(
        "issuer_bin_8",
        (0..row_count)
            .map(|i| {
                Cell::Str(normalize_bin(clean.get("pan", i).as_str().unwrap_or(""), 8))
            })
            .collect(),
    );

    out.push_column(
        "acquirer_bin",
        (0..row_count)
            .map(|i| {
                Cell::Str(normalize_bin(
                    clean.get("retrieval_reference_number", i).as_str().unwrap_or(""),
                    6,
                ))
            })
            .collect(),
    );

    out.push_column(
        "business_application_id",
        (0..row_count)
            .map(|i| coalesce_first_non_blank(clean, i, coalesce_candidates::BUSINESS_APPLICATION_ID))
            .collect(),
    );
    out.push_column(
        "business_format_code",
        (0..row_count)
            .map(|i| coalesce_first_non_blank(clean, i, coalesce_candidates::BUSINESS_FORMAT_CODE))
            .collect(),
    );
    out.push_column(
        "message_reason_code",
        (0..row_count)
            .map(|i| coalesce_first_non_blank(clean, i, coalesce_candidates::MESSAGE_REASON_CODE))
            .collect(),
    );
    out.push_column(
        "network_identification_code",
        (0..row_count)
            .map(|i| {
                coalesce_first_non_blank(clean, i, coalesce_candidates::NETWORK_IDENTIFICATION_CODE)
            })
            .collect(),
    );
    out.push_column(
        "type_of_purchase",
        (0..row_count)
            .map(|i| coalesce_first_non_blank(clean, i, coalesce_candidates::TYPE_OF_PURCHASE))
            .collect(),
    );
    out.push_column(
        "surcharge_amount",
        (0..row_count)
            .map(|i| max_decimal_across(clean, i, coalesce_candidates::SURCHARGE_AMOUNT))
            .collect(),
    );

    out.push_column(
        "source_currency_code_alphabetic",
        (0..row_count)
            .map(|i| {
                let numeric = clean.get("source_currency_code", i).to_comparable_string();
                match currency_table.alphabetic_of(&numeric) {
                    Some(alpha) => Cell::Str(alpha.to_string()),
                    None => Cell::Null,
                }
            })
            .collect(),
    );

    // ARDEF-projected attributes: direct column projection from the bound record.
    let project = |f: fn(&ArdefRecord) -> Option<&str>| -> Vec<Cell> {
        ardef_bindings
            .iter()
            .map(|r| f(r).map(|s| Cell::Str(s.to_string())).unwrap_or(Cell::Null))
            .collect()
    };
    out.push_column("funding_source", project(|r| r.funding_source.as_deref()));
    out.push_column("issuer_country", project(|r| r.issuer_country.as_deref()));
    out.push_column("issuer_region", project(|r| r.issuer_region.as_deref()));
    out.push_column("product_id", project(|r| r.product_id.as_deref()));
    out.push_column("product_subtype", project(|r| r.product_subtype.as_deref()));
    out.push_column("ardef_country", project(|r| r.ardef_country.as_deref()));
    out.push_column("b2b_program_id", project(|r| r.b2b_program_id.as_deref()));
    out.push_column("fast_funds", project(|r| r.fast_funds.as_deref()));
    out.push_column("nnss_indicator", project(|r| r.nnss_indicator.as_deref()));
    out.push_column(
        "technology_indicator",
        project(|r| r.technology_indicator.as_deref()),
    );
    out.push_column("travel_indicator", project(|r| r.travel_indicator.as_deref()));

    // Jurisdiction classification, one row at a time.
    let mut jurisdictions = Vec::with_capacity(row_count);
    let mut jurisdiction_assigned = Vec::with_capacity(row_count);
    for i in 0..row_count {
        let merchant_country = clean.get("merchant_country", i).to_comparable_string();
        let issuer_bin = out.get("issuer_bin_8", i).to_comparable_string();
        let acquirer_bin = out.get("acquirer_bin", i).to_comparable_string();
        let result = jurisdiction::classify(
            &merchant_country,
            &ardef_bindings[i],
            client,
            country_table,
            &issuer_bin,
            &acquirer_bin,
        );
        jurisdictions.push(Cell::Str(result.jurisdiction.as_str().to_string()));
        jurisdiction_assigned.push(Cell::Str(result.jurisdiction_assigned));
    }
    out.push_column("jurisdiction", jurisdictions);
    out.push_column("jurisdiction_assigned", jurisdiction_assigned);

    out
}

/// Convenience wrapper used by the calculate stage command: binds ARDEF per
/// row from raw PAN values before computing derived attributes.
pub fn bind_ardef_rows(clean: &Table, index: &crate::types::ardef::ArdefIndex) -> Vec<ArdefRecord> {
    (0..clean.row_count())
        .map(|i| {
            let pan = clean.get("pan", i).as_str().unwrap_or("");
            index.lookup(ardef_resolver::account9(pan)).clone()
        })
        .collect()
}
