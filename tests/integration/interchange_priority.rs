//! End-to-end: an interregional reversal draft whose amount converts, via
//! an exchange rate, into the range a higher-priority fee rule's
//! amount-currency criterion requires — verifying the rule engine binds
//! the lower `intelica_id` rule even though a catch-all rule would also
//! match.

use crate::common::db_seeding::{
    seed_ardef, seed_client, seed_country, seed_currency, seed_fee_rule, seed_file_control,
};
use crate::common::{unique_test_dir, TestMetadataStore};
use crate::support::{run_all, seed_field_defs, write_landing_file, DraftFields};
use chrono::NaiveDate;
use itx_visa_pipeline::artifact::{ArtifactStore, Layer};
use itx_visa_pipeline::metadata::file_control::FileControl;
use rusqlite::params;

const CLIENT_ID: &str = "DEMO2";
const FILE_ID: &str = "F2";
const BRAND_ID: &str = "VISA";
const FILE_TYPE: &str = "IN";
const LANDING_FILE_NAME: &str = "demo_reversal.txt";

fn interregional_reversal_fields() -> DraftFields {
    DraftFields {
        draft_code: "25",
        pan: "4111111111111111",
        authorization_code: "654321",
        merchant_category_code: "5411",
        usage_code: "1",
        special_condition_indicator: " ",
        draft_code_qualifier_0: "0",
        central_processing_date: "0701",
        purchase_date: "0628",
        // Same zoned-decimal encoding as the on-us scenario: 1234.45.
        source_amount: "00012344E",
        source_currency_code: "978",
        merchant_country: "FRA",
        retrieval_reference_number: "987654321098",
    }
}

fn seed_exchange_rate(store: &TestMetadataStore, brand: &str, rate_date: &str, from: &str, to: &str, value: f64) {
    store
        .connection()
        .execute(
            "INSERT INTO exchange_rate (brand, rate_date, currency_from_code, currency_to, exchange_value) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![brand, rate_date, from, to, value],
        )
        .unwrap();
}

#[test]
fn interregional_reversal_binds_higher_priority_amount_currency_rule() {
    let metadata_store = TestMetadataStore::new("interchange_priority");
    let processing_date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    seed_client(&metadata_store, CLIENT_ID, "", "", "");
    seed_country(&metadata_store, "FRA", "NA");
    seed_file_control(
        &metadata_store,
        CLIENT_ID,
        FILE_ID,
        BRAND_ID,
        FILE_TYPE,
        "2025-07-01",
        LANDING_FILE_NAME,
    );
    seed_field_defs(&metadata_store);
    seed_ardef(&metadata_store, 411111111, 411111199, "2020-01-01", "GBR", "EU");
    seed_currency(&metadata_store, "978", "EUR");
    seed_exchange_rate(&metadata_store, BRAND_ID, "2025-07-01", "EUR", "EUR", 1.0);

    // Lower `intelica_id` binds first: the amount-currency rule should win
    // over the catch-all even though both match this transaction.
    seed_fee_rule(
        &metadata_store,
        "9",
        10,
        "2020-01-01",
        "Interregional EUR band",
        "EUR",
        0.021,
        0.05,
        r#"{"source_amount":"EUR, BETWEEN 1000 AND 2000"}"#,
    );
    seed_fee_rule(
        &metadata_store,
        "9",
        20,
        "2020-01-01",
        "Interregional catch-all",
        "USD",
        0.03,
        0.0,
        r#"{}"#,
    );

    let datalake_root = unique_test_dir("interchange_priority_datalake");
    write_landing_file(
        &datalake_root,
        CLIENT_ID,
        LANDING_FILE_NAME,
        &interregional_reversal_fields().to_line(),
    );

    run_all(&datalake_root, &metadata_store.db_path(), CLIENT_ID, FILE_ID)
        .expect("run-all should succeed");

    let file_control = FileControl {
        client_id: CLIENT_ID.to_string(),
        file_id: FILE_ID.to_string(),
        brand_id: BRAND_ID.to_string(),
        file_type: FILE_TYPE.to_string(),
        file_processing_date: processing_date,
        landing_file_name: LANDING_FILE_NAME.to_string(),
    };
    let artifacts = ArtifactStore::new(datalake_root);
    let operational = artifacts
        .read(
            Layer::Operational,
            &file_control,
            itx_visa_pipeline::cli::commands::STORE_TARGET,
        )
        .expect("operational artifact should have been written");

    assert_eq!(operational.row_count(), 1);
    assert_eq!(operational.get("reversal_indicator", 0).as_int(), Some(1));
    assert_eq!(operational.get("jurisdiction", 0).as_str(), Some("interregional"));
    assert_eq!(operational.get("jurisdiction_assigned", 0).as_str(), Some("9"));
    assert_eq!(operational.get("timeliness", 0).as_int(), Some(3));
    assert_eq!(
        operational.get("source_currency_code_alphabetic", 0).as_str(),
        Some("EUR")
    );
    assert_eq!(operational.get("interchange_intelica_id", 0).as_int(), Some(10));
    assert_eq!(
        operational.get("fee_descriptor", 0).as_str(),
        Some("Interregional EUR band")
    );
    assert_eq!(operational.get("fee_currency", 0).as_str(), Some("EUR"));
}
