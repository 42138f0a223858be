//! Test-fixture schema setup for the metadata store.
//!
//! Production metadata tables are owned and populated outside the core
//! (spec.md §1 treats the relational metadata store as an external
//! collaborator); this module exists so tests can seed an in-memory or
//! scratch SQLite database with the read contract's shape.

use crate::errors::AppResult;
use rusqlite::Connection;

pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS client (
            client_id TEXT PRIMARY KEY,
            client_name TEXT,
            issuing_bins_6_digits TEXT,
            issuing_bins_8_digits TEXT,
            acquiring_bins TEXT
        );

        CREATE TABLE IF NOT EXISTS country (
            country_code TEXT PRIMARY KEY,
            visa_region_code TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS file_control (
            client_id TEXT NOT NULL,
            file_id TEXT NOT NULL,
            brand_id TEXT NOT NULL,
            file_type TEXT NOT NULL,
            file_processing_date TEXT NOT NULL,
            landing_file_name TEXT NOT NULL,
            PRIMARY KEY (client_id, file_id)
        );

        CREATE TABLE IF NOT EXISTS visa_ardef (
            low_key INTEGER NOT NULL,
            table_key INTEGER NOT NULL,
            effective_date TEXT NOT NULL,
            valid_until TEXT,
            delete_indicator TEXT NOT NULL DEFAULT ' ',
            funding_source TEXT,
            issuer_country TEXT,
            issuer_region TEXT,
            product_id TEXT,
            product_subtype TEXT,
            ardef_country TEXT,
            b2b_program_id TEXT,
            fast_funds TEXT,
            nnss_indicator TEXT,
            technology_indicator TEXT,
            travel_indicator TEXT
        );

        CREATE TABLE IF NOT EXISTS visa_fields (
            type_record TEXT NOT NULL,
            tcsn TEXT NOT NULL,
            position INTEGER NOT NULL,
            length INTEGER NOT NULL,
            column_name TEXT NOT NULL,
            secondary_identifier_pos INTEGER,
            secondary_identifier_len INTEGER,
            secondary_identifier TEXT,
            column_type TEXT NOT NULL,
            float_decimals INTEGER,
            date_format TEXT
        );

        CREATE TABLE IF NOT EXISTS visa_rules (
            region_country_code TEXT NOT NULL,
            intelica_id INTEGER NOT NULL,
            valid_from TEXT NOT NULL,
            valid_until TEXT,
            fee_descriptor TEXT NOT NULL,
            fee_currency TEXT NOT NULL,
            fee_variable REAL NOT NULL DEFAULT 0,
            fee_fixed REAL NOT NULL DEFAULT 0,
            fee_min REAL NOT NULL DEFAULT 0,
            fee_cap REAL NOT NULL DEFAULT 0,
            criteria_json TEXT NOT NULL DEFAULT '{}',
            PRIMARY KEY (region_country_code, intelica_id)
        );

        CREATE TABLE IF NOT EXISTS visa_transaction_type (
            business_transaction_type_id INTEGER PRIMARY KEY,
            transaction_type_id TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS exchange_rate (
            brand TEXT NOT NULL,
            rate_date TEXT NOT NULL,
            currency_from_code TEXT NOT NULL,
            currency_to TEXT NOT NULL,
            exchange_value REAL NOT NULL,
            PRIMARY KEY (brand, rate_date, currency_from_code, currency_to)
        );

        CREATE TABLE IF NOT EXISTS currency (
            currency_numeric_code TEXT PRIMARY KEY,
            currency_alphabetic_code TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}
