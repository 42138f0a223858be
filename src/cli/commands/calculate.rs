use super::{CommonArgs, StageContext, CALCULATE_ORIGIN, CALCULATE_TARGET};
use crate::artifact::Layer;
use crate::errors::AppResult;
use crate::pipeline::{ardef_resolver, calculator};
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct CalculateCommand {
    #[command(flatten)]
    common: CommonArgs,

    /// Staging subdir holding the cleaned transactions
    #[arg(long, default_value = CALCULATE_ORIGIN)]
    origin_subdir: String,

    /// Staging subdir to write derived attributes to
    #[arg(long, default_value = CALCULATE_TARGET)]
    target_subdir: String,
}

impl CalculateCommand {
    pub fn run(&self) -> AppResult<()> {
        let ctx = self.common.open()?;
        execute(&ctx, &self.origin_subdir, &self.target_subdir)
    }
}

/// Resolves each transaction's ARDEF binding and computes every derived
/// attribute of spec.md §4.5, including jurisdiction classification.
pub(crate) fn execute(ctx: &StageContext, origin_subdir: &str, target_subdir: &str) -> AppResult<()> {
    info!(
        client_id = %ctx.file_control.client_id,
        file_id = %ctx.file_control.file_id,
        "calculate: starting"
    );

    let clean = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, origin_subdir)?;

    let client = ctx.metadata.read_client(&ctx.file_control.client_id)?;
    let country_table = ctx.metadata.read_country_table()?;
    let currency_table = ctx.metadata.read_currency_table()?;
    let transaction_type_table = ctx.metadata.read_transaction_type_table()?;

    let ardef_records = ctx.metadata.read_ardef_records()?;
    let ardef_index =
        ardef_resolver::build_index(ardef_records, ctx.file_control.file_processing_date);
    let ardef_bindings = calculator::bind_ardef_rows(&clean, &ardef_index);
    info!(
        bindings = ardef_bindings.len(),
        "calculate: resolved ardef bindings"
    );

    let calculated = calculator::calculate(
        &clean,
        &ardef_bindings,
        &client,
        &country_table,
        &currency_table,
        &transaction_type_table,
    );
    info!(
        rows = calculated.row_count(),
        columns = calculated.column_count(),
        "calculate: computed derived attributes"
    );

    let path = ctx
        .artifacts
        .write(Layer::Staging, &ctx.file_control, target_subdir, &calculated)?;
    info!(path = %path.display(), "calculate: wrote staging artifact");
    Ok(())
}
