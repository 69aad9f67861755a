//! Host configuration.
//!
//! The console setup is read as JSON from the path given as the first
//! command-line argument, else from `$WEBIO_CONFIG`. Without either the
//! defaults apply.

use std::path::{Path, PathBuf};

use anyhow::Context;
use webio_console::SetupConfig;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "WEBIO_CONFIG";

/// Resolves the config path from the CLI argument or the environment.
pub fn config_path(arg: Option<String>) -> Option<PathBuf> {
    arg.or_else(|| std::env::var(CONFIG_ENV).ok())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Loads the setup config, or the defaults when no path is given.
pub fn load(path: Option<&Path>) -> anyhow::Result<SetupConfig> {
    let Some(path) = path else {
        return Ok(SetupConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: SetupConfig = serde_json::from_str(&content)
        .with_context(|| format!("invalid config in {}", path.display()))?;

    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
