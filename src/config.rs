use crate::editor::{SaveGuard, Viewport};
use crate::error::ConfigError;
use crate::graph::ConnectionPolicy;
use crate::model::Position;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Settings for one editing session.
///
/// Every field has a default, so a config file only needs the keys it changes:
///
/// ```json
/// { "connection_policy": { "allow_cycles": false }, "request_timeout_secs": 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance between a node and its duplicate.
    pub duplicate_offset: Position,
    /// Visible canvas area; click-to-add places nodes inside it.
    pub viewport: Viewport,
    pub connection_policy: ConnectionPolicy,
    pub save_guard: SaveGuard,
    /// Upper bound for a single load/save/delete request. `None` waits forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            duplicate_offset: Position::new(50.0, 50.0),
            viewport: Viewport::default(),
            connection_policy: ConnectionPolicy::default(),
            save_guard: SaveGuard::default(),
            request_timeout_secs: None,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.viewport.has_positive_size() {
            return Err(ConfigError::Invalid(format!(
                "viewport must have a positive size, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(self.duplicate_offset.x.is_finite() && self.duplicate_offset.y.is_finite()) {
            return Err(ConfigError::Invalid(
                "duplicate_offset must be finite".to_string(),
            ));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
