//! The `mypgrade reset` command.

use anyhow::Result;

use super::{confirmer, Paths};

pub fn execute(paths: &Paths, yes: bool) -> Result<()> {
    let (config, mut store) = paths.open()?;

    let confirm = confirmer(yes, &config);
    if store.reset(confirm.as_ref()) {
        store.save()?;
        println!("All scores cleared.");
    } else {
        println!("Aborted.");
    }

    Ok(())
}
