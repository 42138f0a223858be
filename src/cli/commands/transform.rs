use super::{CommonArgs, StageContext, TRANSFORM_TARGET};
use crate::artifact::Layer;
use crate::errors::AppResult;
use crate::pipeline::framer::{self, RecordFamily};
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct TransformCommand {
    #[command(flatten)]
    common: CommonArgs,

    /// Staging subdir to write the framed transactions to
    #[arg(long, default_value = TRANSFORM_TARGET)]
    target_subdir: String,
}

impl TransformCommand {
    pub fn run(&self) -> AppResult<()> {
        let ctx = self.common.open()?;
        execute(&ctx, &self.target_subdir)
    }
}

/// Reads the landing file's plaintext lines and frames them into
/// transaction rows, one sub-record per sequence digit.
pub(crate) fn execute(ctx: &StageContext, target_subdir: &str) -> AppResult<()> {
    info!(
        client_id = %ctx.file_control.client_id,
        file_id = %ctx.file_control.file_id,
        "transform: starting"
    );

    let lines = ctx.artifacts.read_landing_lines(&ctx.file_control)?;
    info!(lines = lines.len(), "transform: read landing file");

    let table = framer::frame(&lines, &RecordFamily::BASE_II_DRAFT);
    info!(rows = table.row_count(), "transform: framed transactions");

    let path = ctx
        .artifacts
        .write(Layer::Staging, &ctx.file_control, target_subdir, &table)?;
    info!(path = %path.display(), "transform: wrote staging artifact");
    Ok(())
}
