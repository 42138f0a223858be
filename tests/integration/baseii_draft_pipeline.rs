//! End-to-end: one on-us BASE II sale draft, all six stages, driven
//! through the public CLI surface (`Cli::parse_from`) rather than calling
//! pipeline functions directly.

use crate::common::db_seeding::{
    seed_ardef, seed_client, seed_country, seed_currency, seed_fee_rule, seed_file_control,
};
use crate::common::{unique_test_dir, TestMetadataStore};
use crate::support::{run_all, seed_field_defs, write_landing_file, DraftFields};
use chrono::NaiveDate;
use itx_visa_pipeline::artifact::{ArtifactStore, Layer};
use itx_visa_pipeline::metadata::file_control::FileControl;

const CLIENT_ID: &str = "DEMO";
const FILE_ID: &str = "F1";
const BRAND_ID: &str = "VISA";
const FILE_TYPE: &str = "IN";
const LANDING_FILE_NAME: &str = "demo_drafts.txt";

fn on_us_sale_fields() -> DraftFields {
    DraftFields {
        draft_code: "05",
        pan: "4111111111111111",
        authorization_code: "123456",
        merchant_category_code: "5411",
        usage_code: "1",
        special_condition_indicator: " ",
        draft_code_qualifier_0: "0",
        central_processing_date: "0610",
        purchase_date: "0609",
        // 9-char zoned decimal, scale 2, overpunch terminator 'E' (+5) -> 1234.45
        source_amount: "00012344E",
        source_currency_code: "840",
        merchant_country: "USA",
        retrieval_reference_number: "123456789012",
    }
}

#[test]
fn on_us_sale_draft_runs_all_six_stages_and_binds_its_fee_rule() {
    let metadata_store = TestMetadataStore::new("baseii_draft_pipeline");
    let processing_date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();

    seed_client(&metadata_store, CLIENT_ID, "", "41111111", "");
    seed_country(&metadata_store, "USA", "AP");
    seed_file_control(
        &metadata_store,
        CLIENT_ID,
        FILE_ID,
        BRAND_ID,
        FILE_TYPE,
        "2025-06-15",
        LANDING_FILE_NAME,
    );
    seed_field_defs(&metadata_store);
    seed_ardef(&metadata_store, 411111111, 411111199, "2020-01-01", "USA", "AP");
    seed_fee_rule(
        &metadata_store,
        "USA",
        1,
        "2020-01-01",
        "Electronic US Consumer",
        "USD",
        0.0195,
        0.10,
        r#"{"draft_code":"05"}"#,
    );
    seed_currency(&metadata_store, "840", "USD");

    let datalake_root = unique_test_dir("baseii_draft_pipeline_datalake");
    write_landing_file(&datalake_root, CLIENT_ID, LANDING_FILE_NAME, &on_us_sale_fields().to_line());

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
    assert_eq!(operational.get("draft_code", 0).as_str(), Some("05"));
    assert_eq!(operational.get("authorization_code_valid", 0).as_str(), Some("VALID"));
    assert_eq!(operational.get("business_transaction_type", 0).as_int(), Some(1));
    assert_eq!(operational.get("reversal_indicator", 0).as_int(), Some(0));
    assert_eq!(operational.get("timeliness", 0).as_int(), Some(1));
    assert_eq!(operational.get("jurisdiction", 0).as_str(), Some("on-us"));
    assert_eq!(operational.get("jurisdiction_assigned", 0).as_str(), Some("USA"));
    assert_eq!(operational.get("source_amount", 0).as_decimal(), Some(1234.45));
    assert_eq!(
        operational.get("source_currency_code_alphabetic", 0).as_str(),
        Some("USD")
    );
    assert_eq!(operational.get("interchange_intelica_id", 0).as_int(), Some(1));
    assert_eq!(
        operational.get("fee_descriptor", 0).as_str(),
        Some("Electronic US Consumer")
    );
    assert_eq!(operational.get("fee_currency", 0).as_str(), Some("USD"));
}
