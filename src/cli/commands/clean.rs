use super::{CommonArgs, StageContext, CLEAN_ORIGIN, CLEAN_TARGET, DRAFT_TYPE_RECORD};
use crate::artifact::Layer;
use crate::errors::AppResult;
use crate::pipeline::cleaner;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct CleanCommand {
    #[command(flatten)]
    common: CommonArgs,

    /// Staging subdir holding the extracted fields
    #[arg(long, default_value = CLEAN_ORIGIN)]
    origin_subdir: String,

    /// Staging subdir to write the cleaned fields to
    #[arg(long, default_value = CLEAN_TARGET)]
    target_subdir: String,
}

impl CleanCommand {
    pub fn run(&self) -> AppResult<()> {
        let ctx = self.common.open()?;
        execute(&ctx, &self.origin_subdir, &self.target_subdir)
    }
}

/// Coerces each extracted string column to its declared semantic type,
/// anchoring non-standard date formats on the file's processing date.
pub(crate) fn execute(ctx: &StageContext, origin_subdir: &str, target_subdir: &str) -> AppResult<()> {
    info!(
        client_id = %ctx.file_control.client_id,
        file_id = %ctx.file_control.file_id,
        "clean: starting"
    );

    let field_defs = ctx.metadata.read_field_definitions(DRAFT_TYPE_RECORD)?;
    let extracted = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, origin_subdir)?;

    let cleaned = cleaner::clean(&extracted, &field_defs, ctx.file_control.file_processing_date)?;
    info!(rows = cleaned.row_count(), "clean: coerced field values");

    let path = ctx
        .artifacts
        .write(Layer::Staging, &ctx.file_control, target_subdir, &cleaned)?;
    info!(path = %path.display(), "clean: wrote staging artifact");
    Ok(())
}
