//! CLI Configuration

use clap::ValueEnum;
use forms_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    pub default_format: Option<String>,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl Config {
    pub fn load(profile: Option<&str>) -> Result<Self, String> {
        let path = Self::config_path(profile)?;
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
            let config: Self = toml::from_str(&content).map_err(|e| e.to_string())?;
            config.engine.check().map_err(|e| e.to_string())?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, profile: Option<&str>) -> Result<PathBuf, String> {
        let path = Self::config_path(profile)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(&path, content).map_err(|e| e.to_string())?;
        Ok(path)
    }

    /// Configured default output format, table when unset or unknown
    pub fn output_format(&self) -> OutputFormat {
        self.default_format
            .as_deref()
            .and_then(|f| OutputFormat::from_str(f, true).ok())
            .unwrap_or(OutputFormat::Table)
    }

    fn config_path(profile: Option<&str>) -> Result<PathBuf, String> {
        let home = dirs::home_dir().ok_or("Cannot find home directory")?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".formctl").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_table() {
        let config: Config = toml::from_str(
            r#"
default_format = "json"

[engine]
display_max_length = 20
enforce_option_sets = true
"#,
        )
        .unwrap();
        assert_eq!(config.engine.display_max_length, 20);
        assert!(config.engine.enforce_option_sets);
        assert_eq!(config.engine.history_limit, EngineConfig::default().history_limit);
        assert!(matches!(config.output_format(), OutputFormat::Json));
    }

    #[test]
    fn test_unknown_format_falls_back_to_table() {
        let config = Config {
            default_format: Some("xml".into()),
            ..Default::default()
        };
        assert!(matches!(config.output_format(), OutputFormat::Table));
    }
}
