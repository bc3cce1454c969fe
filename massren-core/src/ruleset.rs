use crate::error::RuleSetError;
use crate::pipeline::RulePipeline;
use crate::rule::RenameRule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Rules as stored on disk, in execution order.
///
/// ```toml
/// [[rules]]
/// kind = "rename"
/// new_base_name = "tex"
/// suffix = "_"
/// digit_count = 2
///
/// [[rules]]
/// kind = "insert"
/// enabled = false
/// insert_text = "_hd"
/// reverse_from_end = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub rules: Vec<RenameRule>,
}

impl RuleSet {
    pub fn from_pipeline(pipeline: &RulePipeline) -> Self {
        Self {
            rules: pipeline.rules().to_vec(),
        }
    }

    pub fn into_pipeline(self) -> RulePipeline {
        RulePipeline::from_rules(self.rules)
    }

    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, RuleSetError> {
        toml::from_str(content).map_err(|source| RuleSetError::Parse {
            path: origin.display().to_string(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String, RuleSetError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, RuleSetError> {
        let content = fs::read_to_string(path).map_err(|source| RuleSetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Like [`load_from_path`](Self::load_from_path), but a missing file is an empty set.
    pub fn load_or_default(path: &Path) -> Result<Self, RuleSetError> {
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the rule set, creating parent directories as needed.
    pub fn save_to_path(&self, path: &Path) -> Result<(), RuleSetError> {
        let write_error = |source: std::io::Error| RuleSetError::Write {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(write_error)
    }
}
