//! The `mypgrade init` command.

use std::path::Path;

use anyhow::Result;

use mypgrade_core::config::{LOCAL_CONFIG_FILE, SAMPLE_CONFIG};
use mypgrade_core::model::default_roster;
use mypgrade_core::store::GradeStore;

use super::Paths;

pub fn execute(paths: &Paths) -> Result<()> {
    // Create mypgrade.toml
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(LOCAL_CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    // Create the state document
    let config = paths.config()?;
    let state_file = &config.state_file;
    if state_file.exists() {
        println!("{} already exists, skipping.", state_file.display());
    } else {
        GradeStore::new(state_file, default_roster()).save()?;
        println!("Created {}", state_file.display());
    }

    println!("\nNext steps:");
    println!("  1. Record a score:   mypgrade add math A 7");
    println!("  2. Import a CSV:     mypgrade import grades.csv");
    println!("  3. See your grades:  mypgrade show");

    Ok(())
}
