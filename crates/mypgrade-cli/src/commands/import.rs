//! The `mypgrade import` command.

use std::path::PathBuf;

use anyhow::Result;

use mypgrade_core::store::ImportOutcome;
use mypgrade_core::traits::{read_and_reconcile, FileSource};

use super::{confirmer, Paths};

pub async fn execute(paths: &Paths, file: PathBuf, yes: bool) -> Result<()> {
    let (config, mut store) = paths.open()?;

    let source = FileSource::new(&file);
    let plan = read_and_reconcile(&source, store.subjects())
        .await
        .map_err(|e| {
            if e.is_structural() {
                anyhow::Error::new(e).context(format!("error importing {}", file.display()))
            } else {
                anyhow::Error::new(e)
            }
        })?;

    let stats = plan.stats();
    tracing::debug!(
        rows = stats.rows_seen,
        too_short = stats.rows_too_short,
        unmatched = stats.rows_unmatched,
        rejected_cells = stats.cells_rejected,
        "reconciled {}",
        file.display()
    );

    let confirm = confirmer(yes, &config);
    match store.import(plan, confirm.as_ref()) {
        ImportOutcome::Merged {
            processed,
            replaced,
        } => {
            store.save()?;
            println!(
                "Import successful! {processed} score(s) imported for: {}",
                replaced.join(", ")
            );
        }
        ImportOutcome::Declined { .. } => {
            println!("Aborted.");
        }
    }

    Ok(())
}
