use std::fs;
use std::io;
use std::path::Path;

use crate::model::config::WorkspaceConfig;

const CONFIG_FILE: &str = "config.toml";

/// Read config.toml from the workspace directory. A missing or
/// malformed file falls back to defaults, same policy as the keyed
/// stores.
pub fn read_config(dir: &Path) -> WorkspaceConfig {
    let Ok(text) = fs::read_to_string(dir.join(CONFIG_FILE)) else {
        return WorkspaceConfig::default();
    };
    toml::from_str(&text).unwrap_or_default()
}

/// Write config.toml to the workspace directory (used by init).
pub fn write_config(dir: &Path, config: &WorkspaceConfig) -> io::Result<()> {
    let text = toml::to_string_pretty(config).map_err(io::Error::other)?;
    fs::write(dir.join(CONFIG_FILE), text)
}
