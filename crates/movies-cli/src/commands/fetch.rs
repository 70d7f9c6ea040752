use super::AppContext;
use crate::output::Output;
use crate::progress::Spinner;
use color_eyre::Result;
use movies_core::{transfer, TransferOptions};
use movies_sources::{open_store, StoreKind};
use serde_json::json;
use std::path::PathBuf;

/// Copy the whole Notion database into a SQLite file
pub fn run_fetch(path: Option<PathBuf>, ctx: &AppContext, output: &Output) -> Result<()> {
    let target_kind = StoreKind::Sqlite(path);
    let source = open_store(&StoreKind::Notion, &ctx.settings)?;
    let mut target = open_store(&target_kind, &ctx.settings)?;

    let existing = target.fetchall()?.len();
    if existing > 0 {
        output.warn(format!(
            "{} already holds {} movies; fetched movies are appended",
            target_kind, existing
        ));
    }

    let spinner = Spinner::start(output, "Fetching movies from Notion");
    let result = transfer(&*source, &mut *target, &TransferOptions::default());
    spinner.finish();
    let report = result.map_err(|e| color_eyre::eyre::eyre!("{:#}", e))?;

    output.success(format!(
        "Fetched {} movies from Notion into {}",
        report.inserted, target_kind
    ));
    output.json(&json!({
        "type": "fetch",
        "target": target_kind.to_string(),
        "report": report,
    }));
    Ok(())
}
