//! Per-stage CLI subcommands (spec.md §10.4): one `clap::Args` struct and a
//! `run()` method per pipeline stage, plus `run_all` which chains all six
//! against one `(client_id, file_id)`.

pub mod calculate;
pub mod clean;
pub mod extract;
pub mod interchange;
pub mod run_all;
pub mod store;
pub mod transform;

use crate::artifact::ArtifactStore;
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::metadata::file_control::FileControl;
use crate::metadata::MetadataStore;
use clap::Args;
use std::path::PathBuf;

/// Conventional staging subdirectory names, matching `interchange.visa.*`'s
/// defaults (spec.md §6).
pub const TRANSFORM_TARGET: &str = "100-BASEII_RAW_DRAFTS";
pub const EXTRACT_ORIGIN: &str = TRANSFORM_TARGET;
pub const EXTRACT_TARGET: &str = "200-BASEII_EXT_DRAFTS";
pub const CLEAN_ORIGIN: &str = EXTRACT_TARGET;
pub const CLEAN_TARGET: &str = "300-BASEII_CLN_DRAFTS";
pub const CALCULATE_ORIGIN: &str = CLEAN_TARGET;
pub const CALCULATE_TARGET: &str = "400-BASEII_CAL_DRAFTS";
pub const INTERCHANGE_TARGET: &str = "500-BASEII_ITX_DRAFTS";
pub const STORE_TARGET: &str = "BASEII_DRAFTS";

/// The `type_record` key under which draft field definitions are stored;
/// SMS and VSS variants are framed but not yet extracted/cleaned end to end
/// (see DESIGN.md).
pub const DRAFT_TYPE_RECORD: &str = "draft";

/// Identity and storage-location arguments shared by every stage
/// subcommand: which file to process, and optional overrides for the two
/// location-bearing `AppConfig` fields.
#[derive(Args, Clone)]
pub struct CommonArgs {
    /// Client identifier (file_control.client_id)
    #[arg(long)]
    pub client_id: String,

    /// File identifier (file_control.file_id)
    #[arg(long)]
    pub file_id: String,

    /// Datalake root (overrides config.toml and env vars)
    #[arg(long)]
    pub datalake_root: Option<PathBuf>,

    /// Metadata store path (overrides config.toml and env vars)
    #[arg(long)]
    pub database_path: Option<PathBuf>,
}

/// Everything a stage needs once it has resolved its target file: an open
/// metadata connection, an artifact store rooted at the datalake, and the
/// `file_control` row identifying this `(client_id, file_id)`.
pub struct StageContext {
    pub metadata: MetadataStore,
    pub artifacts: ArtifactStore,
    pub file_control: FileControl,
}

impl CommonArgs {
    /// Loads configuration, applies CLI overrides, opens the metadata
    /// store, and resolves `file_control` — the setup every stage command
    /// performs before doing its own work.
    pub fn open(&self) -> AppResult<StageContext> {
        let app_config = AppConfig::load().unwrap_or_else(|_| AppConfig::get_defaults());

        let database_path = self
            .database_path
            .clone()
            .unwrap_or_else(|| app_config.paths.database_path.clone());
        let datalake_root = self
            .datalake_root
            .clone()
            .unwrap_or_else(|| app_config.paths.datalake_root.clone());

        let metadata = MetadataStore::open(&database_path.to_string_lossy())?;
        let file_control = metadata.read_file_control(&self.client_id, &self.file_id)?;
        let artifacts = ArtifactStore::new(datalake_root);

        Ok(StageContext {
            metadata,
            artifacts,
            file_control,
        })
    }
}
