//! Subcommand implementations and the helpers they share.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use mypgrade_core::config::{load_config_from, MypgradeConfig};
use mypgrade_core::store::GradeStore;
use mypgrade_core::traits::{AutoConfirm, Confirm};

pub mod add;
pub mod boundaries;
pub mod import;
pub mod init;
pub mod remove;
pub mod reset;
pub mod show;
pub mod subject;

/// Global path options.
pub struct Paths {
    pub config: Option<PathBuf>,
    pub state: Option<PathBuf>,
}

impl Paths {
    /// Load the config, applying `--state` on top.
    pub fn config(&self) -> Result<MypgradeConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(state) = &self.state {
            config.state_file = state.clone();
        }
        Ok(config)
    }

    /// Load the config and open the state document it points at.
    pub fn open(&self) -> Result<(MypgradeConfig, GradeStore)> {
        let config = self.config()?;
        let store = GradeStore::open(config.state_file.clone())?;
        Ok((config, store))
    }
}

/// Asks on stderr and reads a yes/no answer from stdin. Anything but
/// `y`/`yes` (including end of input) counts as no.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input).is_err() {
            return false;
        }
        matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Pick the confirmation strategy for a destructive command.
pub fn confirmer(yes: bool, config: &MypgradeConfig) -> Box<dyn Confirm> {
    if yes || !config.confirm_destructive {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    }
}
