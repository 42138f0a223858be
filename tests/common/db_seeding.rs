//! FK-free insert helpers for seeding a `TestMetadataStore` with minimal
//! rows for each metadata table (spec.md §6). The metadata store has no
//! foreign keys between tables, so each helper is independent — seed only
//! what a given scenario needs.

use super::TestMetadataStore;
use rusqlite::params;

pub fn seed_client(
    store: &TestMetadataStore,
    client_id: &str,
    issuing_bins_6: &str,
    issuing_bins_8: &str,
    acquiring_bins: &str,
) {
    store
        .connection()
        .execute(
            "INSERT INTO client (client_id, client_name, issuing_bins_6_digits, \
             issuing_bins_8_digits, acquiring_bins) VALUES (?1, ?1, ?2, ?3, ?4)",
            params![client_id, issuing_bins_6, issuing_bins_8, acquiring_bins],
        )
        .unwrap();
}

pub fn seed_country(store: &TestMetadataStore, country_code: &str, visa_region_code: &str) {
    store
        .connection()
        .execute(
            "INSERT INTO country (country_code, visa_region_code) VALUES (?1, ?2)",
            params![country_code, visa_region_code],
        )
        .unwrap();
}

pub fn seed_file_control(
    store: &TestMetadataStore,
    client_id: &str,
    file_id: &str,
    brand_id: &str,
    file_type: &str,
    file_processing_date: &str,
    landing_file_name: &str,
) {
    store
        .connection()
        .execute(
            "INSERT INTO file_control (client_id, file_id, brand_id, file_type, \
             file_processing_date, landing_file_name) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                client_id,
                file_id,
                brand_id,
                file_type,
                file_processing_date,
                landing_file_name
            ],
        )
        .unwrap();
}

#[allow(clippy::too_many_arguments)]
pub fn seed_field_definition(
    store: &TestMetadataStore,
    type_record: &str,
    tcsn: &str,
    position: i64,
    length: i64,
    column_name: &str,
    column_type: &str,
    float_decimals: Option<i64>,
    date_format: Option<&str>,
) {
    store
        .connection()
        .execute(
            "INSERT INTO visa_fields (type_record, tcsn, position, length, column_name, \
             column_type, float_decimals, date_format) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                type_record,
                tcsn,
                position,
                length,
                column_name,
                column_type,
                float_decimals,
                date_format
            ],
        )
        .unwrap();
}

pub fn seed_ardef(
    store: &TestMetadataStore,
    low_key: i64,
    table_key: i64,
    effective_date: &str,
    issuer_country: &str,
    issuer_region: &str,
) {
    store
        .connection()
        .execute(
            "INSERT INTO visa_ardef (low_key, table_key, effective_date, delete_indicator, \
             issuer_country, issuer_region) VALUES (?1, ?2, ?3, ' ', ?4, ?5)",
            params![low_key, table_key, effective_date, issuer_country, issuer_region],
        )
        .unwrap();
}

#[allow(clippy::too_many_arguments)]
pub fn seed_fee_rule(
    store: &TestMetadataStore,
    region_country_code: &str,
    intelica_id: i64,
    valid_from: &str,
    fee_descriptor: &str,
    fee_currency: &str,
    fee_variable: f64,
    fee_fixed: f64,
    criteria_json: &str,
) {
    store
        .connection()
        .execute(
            "INSERT INTO visa_rules (region_country_code, intelica_id, valid_from, \
             fee_descriptor, fee_currency, fee_variable, fee_fixed, criteria_json) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                region_country_code,
                intelica_id,
                valid_from,
                fee_descriptor,
                fee_currency,
                fee_variable,
                fee_fixed,
                criteria_json
            ],
        )
        .unwrap();
}

pub fn seed_currency(store: &TestMetadataStore, numeric: &str, alphabetic: &str) {
    store
        .connection()
        .execute(
            "INSERT INTO currency (currency_numeric_code, currency_alphabetic_code) \
             VALUES (?1, ?2)",
            params![numeric, alphabetic],
        )
        .unwrap();
}
