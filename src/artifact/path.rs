//! Artifact path resolution (spec.md §6):
//! `<datalake>/<layer>/<client_id>/[<brand>/<file_type>/<processing_date>/<subdir>/]<file_id>.parquet`
//! The landing layer uses the raw `landing_file_name` instead of the
//! bracketed suffix.

use crate::artifact::layer::Layer;
use crate::metadata::file_control::FileControl;
use std::path::PathBuf;

pub fn resolve_path(
    datalake_root: &std::path::Path,
    layer: Layer,
    file_control: &FileControl,
    subdir: &str,
) -> PathBuf {
    let mut path = datalake_root
        .join(layer.to_string())
        .join(&file_control.client_id);

    if layer == Layer::Landing {
        return path.join(&file_control.landing_file_name);
    }

    path = path
        .join(&file_control.brand_id)
        .join(&file_control.file_type)
        .join(file_control.file_processing_date.format("%Y-%m-%d").to_string());

    if !subdir.is_empty() {
        path = path.join(subdir);
    }

    path.join(format!("{}.parquet", file_control.file_id))
}
