use super::AppContext;
use crate::output::Output;
use crate::progress::Spinner;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use movies_core::{transfer, TransferOptions};
use movies_sources::{open_store, StoreKind};
use serde_json::json;

pub fn run_transfer(
    from: StoreKind,
    to: StoreKind,
    options: TransferOptions,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    if ctx.settings.same_store(&from, &to) {
        return Err(color_eyre::eyre::eyre!("Source and target are both {}", from));
    }

    let source = open_store(&from, &ctx.settings).wrap_err_with(|| format!("Failed to open {}", from))?;
    let mut target = open_store(&to, &ctx.settings).wrap_err_with(|| format!("Failed to open {}", to))?;

    let spinner = Spinner::start(output, format!("Transferring movies from {} to {}", from, to));
    let result = transfer(&*source, &mut *target, &options);
    spinner.finish();
    let report = result.map_err(|e| color_eyre::eyre::eyre!("{:#}", e))?;

    for (imdb_id, count) in &report.source_duplicates {
        output.warn(format!("{} is stored {} times in {}", imdb_id, count, from));
    }
    if report.dry_run {
        output.info(format!(
            "Dry run: {} of {} movies would be inserted into {} ({} skipped)",
            report.fetched - report.skipped,
            report.fetched,
            to,
            report.skipped
        ));
    } else {
        output.success(format!(
            "Transferred {} of {} movies from {} to {} ({} skipped)",
            report.inserted, report.fetched, from, to, report.skipped
        ));
    }
    output.json(&json!({
        "type": "transfer",
        "from": from.to_string(),
        "to": to.to_string(),
        "report": report,
    }));
    Ok(())
}
