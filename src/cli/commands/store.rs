use super::{
    CommonArgs, StageContext, CALCULATE_TARGET, CLEAN_TARGET, INTERCHANGE_TARGET, STORE_TARGET,
};
use crate::artifact::Layer;
use crate::errors::AppResult;
use crate::pipeline::joiner;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct StoreCommand {
    #[command(flatten)]
    common: CommonArgs,

    /// Staging subdir holding the cleaned transactions
    #[arg(long, default_value = CLEAN_TARGET)]
    transactions_subdir: String,

    /// Staging subdir holding the calculated derived attributes
    #[arg(long, default_value = CALCULATE_TARGET)]
    calculated_subdir: String,

    /// Staging subdir holding the bound interchange outcomes
    #[arg(long, default_value = INTERCHANGE_TARGET)]
    interchange_subdir: String,

    /// Operational-layer subdir to write the fully processed file to
    #[arg(long, default_value = STORE_TARGET)]
    target_subdir: String,
}

impl StoreCommand {
    pub fn run(&self) -> AppResult<()> {
        let ctx = self.common.open()?;
        execute(
            &ctx,
            &self.transactions_subdir,
            &self.calculated_subdir,
            &self.interchange_subdir,
            &self.target_subdir,
        )
    }
}

/// Joins the cleaned, calculated, and interchange frames by row position
/// and writes the fully processed file into the operational layer.
pub(crate) fn execute(
    ctx: &StageContext,
    transactions_subdir: &str,
    calculated_subdir: &str,
    interchange_subdir: &str,
    target_subdir: &str,
) -> AppResult<()> {
    info!(
        client_id = %ctx.file_control.client_id,
        file_id = %ctx.file_control.file_id,
        "store: starting"
    );

    let transactions = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, transactions_subdir)?;
    let calculated = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, calculated_subdir)?;
    let interchange = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, interchange_subdir)?;

    let merged = joiner::join(&transactions, &calculated, &interchange)?;
    info!(
        rows = merged.row_count(),
        columns = merged.column_count(),
        "store: merged full file"
    );

    let path = ctx
        .artifacts
        .write(Layer::Operational, &ctx.file_control, target_subdir, &merged)?;
    info!(path = %path.display(), "store: wrote operational artifact");
    Ok(())
}
