//! Run configuration file
//!
//! A JSON document naming the two ontology versions, the strategies to run
//! and the parameters handed to them:
//!
//! ```json
//! {
//!   "source": "v1.json",
//!   "target": "v2.json",
//!   "alignment": ["match_by_code", "match_by_id"],
//!   "presentation": ["identify_merged_concepts"],
//!   "parameters": { "code.annotation.property": "http://example.org#code" }
//! }
//! ```
//!
//! Relative ontology paths resolve against the directory of the config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{ConfigError, ConfigResult};
use super::parameters::Parameters;

/// Configuration of one diff run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Older version (required)
    pub source: PathBuf,

    /// Newer version (required)
    pub target: PathBuf,

    /// Alignment strategies by catalog name
    #[serde(default = "default_alignment")]
    pub alignment: Vec<String>,

    /// Presentation strategies by catalog name
    #[serde(default)]
    pub presentation: Vec<String>,

    #[serde(default)]
    pub parameters: Parameters,
}

fn default_alignment() -> Vec<String> {
    vec!["match_by_id".to_string()]
}

impl DiffConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut config: DiffConfig = serde_json::from_str(&content)?;

        if let Some(base) = path.parent() {
            config.source = resolve(base, &config.source);
            config.target = resolve(base, &config.target);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a run
    pub fn validate(&self) -> ConfigResult<()> {
        if self.source.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("source path must not be empty".into()));
        }
        if self.target.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("target path must not be empty".into()));
        }
        if self.alignment.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one alignment strategy is required".into(),
            ));
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
