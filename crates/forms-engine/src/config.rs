//! Engine Configuration

use serde::{Deserialize, Serialize};

use crate::error::{FormsError, Result};

/// Default truncation length for display cells
pub const DEFAULT_DISPLAY_MAX_LENGTH: usize = 50;

/// Default date rendering (en-US short date, no zero padding)
pub const DEFAULT_DATE_DISPLAY_FORMAT: &str = "%-m/%-d/%Y";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Text longer than this is truncated when displayed
    pub display_max_length: usize,
    /// chrono format string for date cells
    pub date_display_format: String,
    /// Reject select/multiselect values outside the field's options
    pub enforce_option_sets: bool,
    /// Number of prior stores a session keeps for undo
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_max_length: DEFAULT_DISPLAY_MAX_LENGTH,
            date_display_format: DEFAULT_DATE_DISPLAY_FORMAT.into(),
            enforce_option_sets: false,
            history_limit: 100,
        }
    }
}

impl EngineConfig {
    /// Parse from a JSON document
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| FormsError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with
    pub fn check(&self) -> Result<()> {
        if self.date_display_format.trim().is_empty() {
            return Err(FormsError::Config("date_display_format cannot be empty".into()));
        }
        Ok(())
    }
}
