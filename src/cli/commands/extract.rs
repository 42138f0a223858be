use super::{CommonArgs, StageContext, DRAFT_TYPE_RECORD, EXTRACT_ORIGIN, EXTRACT_TARGET};
use crate::artifact::Layer;
use crate::errors::AppResult;
use crate::pipeline::extractor;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    common: CommonArgs,

    /// Staging subdir holding the framed transactions
    #[arg(long, default_value = EXTRACT_ORIGIN)]
    origin_subdir: String,

    /// Staging subdir to write the extracted fields to
    #[arg(long, default_value = EXTRACT_TARGET)]
    target_subdir: String,
}

impl ExtractCommand {
    pub fn run(&self) -> AppResult<()> {
        let ctx = self.common.open()?;
        execute(&ctx, &self.origin_subdir, &self.target_subdir)
    }
}

/// Reads Visa draft field definitions and slices positional/secondary-keyed
/// values out of the framed transaction frame.
pub(crate) fn execute(ctx: &StageContext, origin_subdir: &str, target_subdir: &str) -> AppResult<()> {
    info!(
        client_id = %ctx.file_control.client_id,
        file_id = %ctx.file_control.file_id,
        "extract: starting"
    );

    let field_defs = ctx.metadata.read_field_definitions(DRAFT_TYPE_RECORD)?;
    info!(fields = field_defs.len(), "extract: loaded field definitions");

    let framed = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, origin_subdir)?;
    let extracted = extractor::extract(&framed, &field_defs);
    info!(
        rows = extracted.row_count(),
        columns = extracted.column_count(),
        "extract: extracted fields"
    );

    let path = ctx
        .artifacts
        .write(Layer::Staging, &ctx.file_control, target_subdir, &extracted)?;
    info!(path = %path.display(), "extract: wrote staging artifact");
    Ok(())
}
