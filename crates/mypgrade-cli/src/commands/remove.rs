//! The `mypgrade remove` command.

use anyhow::Result;

use mypgrade_core::model::Criterion;

use super::Paths;

pub fn execute(
    paths: &Paths,
    subject_id: String,
    criterion: Criterion,
    attempt: usize,
) -> Result<()> {
    anyhow::ensure!(attempt >= 1, "attempts are numbered from 1");

    let (_, mut store) = paths.open()?;
    let removed = store.remove_score(&subject_id, criterion, attempt - 1)?;
    store.save()?;

    println!("Removed attempt #{attempt} ({removed}/8) from {subject_id} criterion {criterion}.");

    Ok(())
}
