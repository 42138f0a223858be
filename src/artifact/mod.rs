//! The columnar artifact store (spec.md §6): a `Table` read from or written
//! to a layer/client/brand/type/date/subdir path under the datalake root.

pub mod layer;
pub mod parquet_io;
pub mod path;

pub use layer::Layer;

use crate::errors::AppResult;
use crate::metadata::file_control::FileControl;
use crate::types::Table;
use std::path::Path;

pub struct ArtifactStore {
    datalake_root: std::path::PathBuf,
}

impl ArtifactStore {
    pub fn new(datalake_root: impl Into<std::path::PathBuf>) -> Self {
        Self {
            datalake_root: datalake_root.into(),
        }
    }

    pub fn write(
        &self,
        layer: Layer,
        file_control: &FileControl,
        subdir: &str,
        table: &Table,
    ) -> AppResult<std::path::PathBuf> {
        let target = path::resolve_path(&self.datalake_root, layer, file_control, subdir);
        parquet_io::write_table(table, &target)?;
        Ok(target)
    }

    pub fn read(
        &self,
        layer: Layer,
        file_control: &FileControl,
        subdir: &str,
    ) -> AppResult<Table> {
        let target = path::resolve_path(&self.datalake_root, layer, file_control, subdir);
        parquet_io::read_table(&target)
    }

    /// Reads a landing-layer plaintext file as its non-empty Latin-1 lines,
    /// matching `FileStorage.read_plaintext` in the Python source.
    pub fn read_landing_lines(&self, file_control: &FileControl) -> AppResult<Vec<String>> {
        let target = path::resolve_path(&self.datalake_root, Layer::Landing, file_control, "");
        read_latin1_lines(&target)
    }
}

fn read_latin1_lines(path: &Path) -> AppResult<Vec<String>> {
    let bytes = std::fs::read(path)?;
    let text: String = bytes.iter().map(|&b| b as char).collect();
    Ok(text
        .split('\n')
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect())
}
