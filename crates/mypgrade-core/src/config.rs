//! mypgrade configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "mypgrade.toml";

/// Environment variable overriding `state_file`.
pub const STATE_FILE_ENV: &str = "MYPGRADE_STATE_FILE";

/// Top-level mypgrade configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MypgradeConfig {
    /// Where the subject document is persisted.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
    /// Ask before resetting or merging an import unless `--yes` is given.
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./mypgrade-state.json")
}

fn default_true() -> bool {
    true
}

impl Default for MypgradeConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            confirm_destructive: true,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables expand to nothing. Substituted values are not expanded
/// again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("mypgrade")
            .join("config.toml")
    })
}

/// Parse config text.
pub fn parse_config_str(content: &str) -> Result<MypgradeConfig> {
    let mut config: MypgradeConfig =
        toml::from_str(content).context("failed to parse mypgrade config")?;
    config.state_file = PathBuf::from(resolve_env_vars(&config.state_file.to_string_lossy()));
    Ok(config)
}

/// Load config from an explicit path, which must exist, or search the
/// well-known paths:
/// 1. `mypgrade.toml` in the current directory
/// 2. `~/.config/mypgrade/config.toml`
///
/// `MYPGRADE_STATE_FILE` overrides `state_file` in every case.
pub fn load_config_from(path: Option<&Path>) -> Result<MypgradeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            global_config_path().filter(|p| p.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            parse_config_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => MypgradeConfig::default(),
    };

    if let Some(state_file) = std::env::var_os(STATE_FILE_ENV) {
        config.state_file = PathBuf::from(state_file);
    }

    Ok(config)
}

/// Starter config written by `mypgrade init`.
pub const SAMPLE_CONFIG: &str = r#"# mypgrade configuration

# JSON document holding every subject's criterion scores.
# ${VAR} references are expanded from the environment.
state_file = "./mypgrade-state.json"

# Ask before `reset` and before merging an `import` (skip with --yes).
confirm_destructive = true
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_MYPGRADE_TEST_VAR", "grades");
        assert_eq!(resolve_env_vars("${_MYPGRADE_TEST_VAR}"), "grades");
        assert_eq!(
            resolve_env_vars("/data/${_MYPGRADE_TEST_VAR}/state.json"),
            "/data/grades/state.json"
        );
        std::env::remove_var("_MYPGRADE_TEST_VAR");
    }

    #[test]
    fn substituted_value_is_not_rescanned() {
        std::env::set_var("_MYPGRADE_SELF_REF", "a${_MYPGRADE_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_MYPGRADE_SELF_REF}/x"),
            "a${_MYPGRADE_SELF_REF}/x"
        );
        std::env::remove_var("_MYPGRADE_SELF_REF");
    }

    #[test]
    fn unterminated_reference_left_alone() {
        assert_eq!(resolve_env_vars("${OOPS"), "${OOPS");
    }

    #[test]
    fn default_config() {
        let config = MypgradeConfig::default();
        assert_eq!(config.state_file, PathBuf::from("./mypgrade-state.json"));
        assert!(config.confirm_destructive);
    }

    #[test]
    fn sample_config_parses() {
        let config = parse_config_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, MypgradeConfig::default());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config = parse_config_str("confirm_destructive = false\n").unwrap();
        assert!(!config.confirm_destructive);
        assert_eq!(config.state_file, PathBuf::from("./mypgrade-state.json"));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "state_file = \"/tmp/elsewhere.json\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        if std::env::var_os(STATE_FILE_ENV).is_none() {
            assert_eq!(config.state_file, PathBuf::from("/tmp/elsewhere.json"));
        }
    }
}
