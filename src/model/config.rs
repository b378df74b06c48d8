use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the workspace directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub workspace: WorkspaceInfo,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    /// Display name shown in the TUI header
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long to wait after a search keystroke before applying the
    /// query (milliseconds)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// How long a notice stays on screen before it is cleared
    /// (milliseconds)
    #[serde(default = "default_notice_ms")]
    pub notice_ms: u64,
}

fn default_debounce_ms() -> u64 {
    150
}

fn default_notice_ms() -> u64 {
    500
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            debounce_ms: default_debounce_ms(),
            notice_ms: default_notice_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: WorkspaceConfig = toml::from_str("").unwrap();
        assert_eq!(config.workspace.name, "");
        assert_eq!(config.ui.debounce_ms, 150);
        assert_eq!(config.ui.notice_ms, 500);
    }

    #[test]
    fn partial_ui_section_keeps_other_defaults() {
        let config: WorkspaceConfig = toml::from_str("[ui]\ndebounce_ms = 300\n").unwrap();
        assert_eq!(config.ui.debounce_ms, 300);
        assert_eq!(config.ui.notice_ms, 500);
    }
}
