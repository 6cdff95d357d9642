use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const PLACEHOLDER: &str = "{}";

/// What [`run`](crate::transform::run) does when a course file cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteFailurePolicy {
    /// Log the failure, record it in the report, and move on to the next course.
    #[default]
    Continue,
    /// Stop at the first failed write and return the error.
    Abort,
}

/// Locations and failure policy for one roster run.
///
/// Stored on disk as a JSON object; every key is optional:
/// ```json
/// {
///   "master_path": "resource/student-master-list.csv",
///   "output_dir": "resource",
///   "file_template": "course{}.csv",
///   "on_write_error": "continue"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub master_path: PathBuf,
    pub output_dir: PathBuf,
    /// File name for each course output; `{}` is replaced by the 1-based course index.
    pub file_template: String,
    pub on_write_error: WriteFailurePolicy,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            master_path: PathBuf::from("resource/student-master-list.csv"),
            output_dir: PathBuf::from("resource"),
            file_template: "course{}.csv".to_string(),
            on_write_error: WriteFailurePolicy::Continue,
        }
    }
}

impl RosterConfig {
    /// Loads the config from a JSON file at `path` and validates it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_template.matches(PLACEHOLDER).count() != 1 {
            return Err(ConfigError::InvalidTemplate {
                template: self.file_template.clone(),
            });
        }
        Ok(())
    }

    /// Path of the output file for the course at 1-based position `index`.
    pub fn output_path(&self, index: usize) -> PathBuf {
        let file_name = self.file_template.replace(PLACEHOLDER, &index.to_string());
        self.output_dir.join(file_name)
    }
}
