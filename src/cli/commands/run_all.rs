use super::{
    calculate, clean, extract, interchange, store, transform, CommonArgs, CALCULATE_ORIGIN,
    CALCULATE_TARGET, CLEAN_ORIGIN, CLEAN_TARGET, EXTRACT_ORIGIN, EXTRACT_TARGET,
    INTERCHANGE_TARGET, STORE_TARGET, TRANSFORM_TARGET,
};
use crate::errors::AppResult;
use clap::Args;
use tracing::info;

/// Runs all six stages in order against one `(client_id, file_id)`,
/// stopping at the first failure. Uses the conventional subdir names each
/// stage defaults to; use the individual subcommands to override one.
#[derive(Args)]
pub struct RunAllCommand {
    #[command(flatten)]
    common: CommonArgs,
}

impl RunAllCommand {
    pub fn run(&self) -> AppResult<()> {
        let ctx = self.common.open()?;

        info!(
            client_id = %ctx.file_control.client_id,
            file_id = %ctx.file_control.file_id,
            "run-all: starting full pipeline"
        );

        transform::execute(&ctx, TRANSFORM_TARGET)?;
        extract::execute(&ctx, EXTRACT_ORIGIN, EXTRACT_TARGET)?;
        clean::execute(&ctx, CLEAN_ORIGIN, CLEAN_TARGET)?;
        calculate::execute(&ctx, CALCULATE_ORIGIN, CALCULATE_TARGET)?;
        interchange::execute(&ctx, CLEAN_TARGET, CALCULATE_TARGET, INTERCHANGE_TARGET)?;
        store::execute(
            &ctx,
            CLEAN_TARGET,
            CALCULATE_TARGET,
            INTERCHANGE_TARGET,
            STORE_TARGET,
        )?;

        info!(
            client_id = %ctx.file_control.client_id,
            file_id = %ctx.file_control.file_id,
            "run-all: pipeline complete"
        );
        Ok(())
    }
}
