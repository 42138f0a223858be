//! Shared fixtures for the BASE II draft end-to-end scenarios: the field
//! definition set every scenario seeds, a builder for a single 168-char
//! draft sub-record line, and the CLI invocation helper that drives
//! `run-all` through its public `Cli::parse_from` surface.

use crate::common::db_seeding::seed_field_definition;
use crate::common::TestMetadataStore;
use itx_visa_pipeline::cli::{Cli, Commands};
use itx_visa_pipeline::errors::AppResult;
use clap::Parser;
use std::path::Path;

/// One sub-record's worth of positional field values for the layout every
/// scenario in this suite shares (positions 1-68; the remainder is space
/// padding up to the 168-char CTF line length).
pub struct DraftFields {
    pub draft_code: &'static str,
    pub pan: &'static str,
    pub authorization_code: &'static str,
    pub merchant_category_code: &'static str,
    pub usage_code: &'static str,
    pub special_condition_indicator: &'static str,
    pub draft_code_qualifier_0: &'static str,
    pub central_processing_date: &'static str,
    pub purchase_date: &'static str,
    pub source_amount: &'static str,
    pub source_currency_code: &'static str,
    pub merchant_country: &'static str,
    pub retrieval_reference_number: &'static str,
}

impl DraftFields {
    /// Renders one 168-char CTF line with sequence char `'0'` (a
    /// single-sub-record transaction).
    pub fn to_line(&self) -> String {
        let mut line = String::new();
        line.push_str(self.draft_code);
        line.push(' ');
        line.push('0');
        line.push_str(self.pan);
        line.push_str(self.authorization_code);
        line.push_str(self.merchant_category_code);
        line.push_str(self.usage_code);
        line.push_str(self.special_condition_indicator);
        line.push_str(self.draft_code_qualifier_0);
        line.push_str(self.central_processing_date);
        line.push_str(self.purchase_date);
        line.push_str(self.source_amount);
        line.push_str(self.source_currency_code);
        line.push_str(self.merchant_country);
        line.push_str(self.retrieval_reference_number);
        while line.chars().count() < 168 {
            line.push(' ');
        }
        line
    }
}

/// Seeds the `visa_fields` rows the extractor/cleaner need for every field
/// `DraftFields` carries.
pub fn seed_field_defs(store: &TestMetadataStore) {
    seed_field_definition(store, "draft", "0", 1, 2, "draft_code", "str", None, None);
    seed_field_definition(store, "draft", "0", 5, 16, "pan", "str", None, None);
    seed_field_definition(store, "draft", "0", 21, 6, "authorization_code", "str", None, None);
    seed_field_definition(
        store,
        "draft",
        "0",
        27,
        4,
        "merchant_category_code",
        "int",
        None,
        None,
    );
    seed_field_definition(store, "draft", "0", 31, 1, "usage_code", "int", None, None);
    seed_field_definition(
        store,
        "draft",
        "0",
        32,
        1,
        "special_condition_indicator_merchant_draft_indicator",
        "str",
        None,
        None,
    );
    seed_field_definition(
        store,
        "draft",
        "0",
        33,
        1,
        "draft_code_qualifier_0",
        "int",
        None,
        None,
    );
    seed_field_definition(
        store,
        "draft",
        "0",
        34,
        4,
        "central_processing_date",
        "date",
        None,
        Some("!MMDD"),
    );
    seed_field_definition(
        store,
        "draft",
        "0",
        38,
        4,
        "purchase_date",
        "date",
        None,
        Some("!MMDD"),
    );
    seed_field_definition(
        store,
        "draft",
        "0",
        42,
        9,
        "source_amount",
        "decimal",
        Some(2),
        None,
    );
    seed_field_definition(
        store,
        "draft",
        "0",
        51,
        3,
        "source_currency_code",
        "str",
        None,
        None,
    );
    seed_field_definition(store, "draft", "0", 54, 3, "merchant_country", "str", None, None);
    seed_field_definition(
        store,
        "draft",
        "0",
        57,
        12,
        "retrieval_reference_number",
        "str",
        None,
        None,
    );
}

/// Writes `contents` as the landing file for `(client_id, landing_file_name)`
/// under `datalake_root`, creating the `landing/<client_id>/` directory.
pub fn write_landing_file(datalake_root: &Path, client_id: &str, landing_file_name: &str, contents: &str) {
    let landing_path = datalake_root.join("landing").join(client_id).join(landing_file_name);
    std::fs::create_dir_all(landing_path.parent().unwrap()).unwrap();
    std::fs::write(&landing_path, contents).unwrap();
}

/// Drives the `run-all` subcommand through `Cli::parse_from`, the same way
/// the real binary's argv would, rather than calling pipeline stages
/// directly.
pub fn run_all(datalake_root: &Path, database_path: &Path, client_id: &str, file_id: &str) -> AppResult<()> {
    let cli = Cli::parse_from([
        "itx",
        "run-all",
        "--client-id",
        client_id,
        "--file-id",
        file_id,
        "--datalake-root",
        datalake_root.to_str().unwrap(),
        "--database-path",
        database_path.to_str().unwrap(),
    ]);
    match cli.command {
        Commands::RunAll(command) => command.run(),
        _ => unreachable!("parsed the run-all subcommand"),
    }
}
