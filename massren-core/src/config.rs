use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding massren's per-project files.
pub const MASSREN_DIR: &str = ".massren";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    /// Default preview format: "lines", "table", "summary", or "json"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,

    /// Batches smaller than this are previewed before they are applied
    #[serde(default = "default_auto_preview_limit")]
    pub auto_preview_limit: usize,

    /// Rule set used when no --rules flag is given
    #[serde(default = "default_rules_file")]
    pub rules_file: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preview_format: default_preview(),
            use_color: None,
            auto_preview_limit: default_auto_preview_limit(),
            rules_file: default_rules_file(),
        }
    }
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_auto_preview_limit() -> usize {
    25
}

fn default_rules_file() -> PathBuf {
    Path::new(MASSREN_DIR).join("rules.toml")
}

impl Config {
    /// Load config from .massren/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(MASSREN_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Whether a batch of `item_count` items gets an automatic preview.
    pub fn auto_preview(&self, item_count: usize) -> bool {
        item_count < self.defaults.auto_preview_limit
    }
}
