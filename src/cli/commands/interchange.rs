use super::{CommonArgs, StageContext, CALCULATE_TARGET, CLEAN_TARGET, INTERCHANGE_TARGET};
use crate::artifact::Layer;
use crate::errors::AppResult;
use crate::pipeline::rule_engine;
use clap::Args;
use tracing::info;

const ENRICHED_SUFFIX: &str = "_clean";

#[derive(Args)]
pub struct InterchangeCommand {
    #[command(flatten)]
    common: CommonArgs,

    /// Staging subdir holding the cleaned transactions
    #[arg(long, default_value = CLEAN_TARGET)]
    transactions_subdir: String,

    /// Staging subdir holding the calculated derived attributes
    #[arg(long, default_value = CALCULATE_TARGET)]
    calculated_subdir: String,

    /// Staging subdir to write the bound interchange outcomes to
    #[arg(long, default_value = INTERCHANGE_TARGET)]
    target_subdir: String,
}

impl InterchangeCommand {
    pub fn run(&self) -> AppResult<()> {
        let ctx = self.common.open()?;
        execute(
            &ctx,
            &self.transactions_subdir,
            &self.calculated_subdir,
            &self.target_subdir,
        )
    }
}

/// Joins the cleaned and calculated frames, loads fee rules valid on the
/// file's processing date, and binds each transaction to its one
/// highest-priority matching rule (spec.md §4.6).
pub(crate) fn execute(
    ctx: &StageContext,
    transactions_subdir: &str,
    calculated_subdir: &str,
    target_subdir: &str,
) -> AppResult<()> {
    info!(
        client_id = %ctx.file_control.client_id,
        file_id = %ctx.file_control.file_id,
        "interchange: starting"
    );

    let transactions = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, transactions_subdir)?;
    let calculated = ctx
        .artifacts
        .read(Layer::Staging, &ctx.file_control, calculated_subdir)?;

    let mut enriched = transactions.clone();
    enriched.join_left(&calculated, ENRICHED_SUFFIX);

    let rules = ctx
        .metadata
        .read_fee_rules(ctx.file_control.file_processing_date)?;
    info!(rules = rules.len(), "interchange: loaded fee rules");

    let exchange_rates = ctx
        .metadata
        .read_exchange_rates(&ctx.file_control.brand_id, ctx.file_control.file_processing_date)?;

    let bindings = rule_engine::bind(&enriched, &rules, &exchange_rates);
    let bound = bindings.iter().filter(|b| b.is_bound()).count();
    info!(
        bound,
        unbound = bindings.len() - bound,
        "interchange: bound transactions to fee rules"
    );

    let outcome = rule_engine::bindings_to_table(&bindings);
    let path = ctx
        .artifacts
        .write(Layer::Staging, &ctx.file_control, target_subdir, &outcome)?;
    info!(path = %path.display(), "interchange: wrote staging artifact");
    Ok(())
}
