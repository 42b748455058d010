//! Config commands

use crate::config::Config;
use crate::ConfigCommands;

const KEYS: [&str; 5] = [
    "default_format",
    "display_max_length",
    "date_display_format",
    "enforce_option_sets",
    "history_limit",
];

pub fn handle(action: ConfigCommands, profile: Option<&str>) -> Result<(), String> {
    match action {
        ConfigCommands::Init => {
            let config = Config::default();
            let path = config.save(profile)?;
            println!("Configuration initialized at {}", path.display());
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(profile).unwrap_or_default();
            set(&mut config, &key, &value)?;
            config.engine.check().map_err(|e| e.to_string())?;
            config.save(profile)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(profile).unwrap_or_default();
            println!("{}: {}", key, get(&config, &key)?);
        }
        ConfigCommands::List => {
            let config = Config::load(profile).unwrap_or_default();
            for key in KEYS {
                println!("{}: {}", key, get(&config, key)?);
            }
        }
    }
    Ok(())
}

fn set(config: &mut Config, key: &str, value: &str) -> Result<(), String> {
    let invalid = |e: &dyn std::fmt::Display| format!("Invalid value for {}: {}", key, e);
    match key {
        "default_format" => config.default_format = Some(value.to_string()),
        "display_max_length" => config.engine.display_max_length = value.parse::<usize>().map_err(|e| invalid(&e))?,
        "date_display_format" => config.engine.date_display_format = value.to_string(),
        "enforce_option_sets" => config.engine.enforce_option_sets = value.parse::<bool>().map_err(|e| invalid(&e))?,
        "history_limit" => config.engine.history_limit = value.parse::<usize>().map_err(|e| invalid(&e))?,
        _ => return Err(format!("Unknown config key: {}", key)),
    }
    Ok(())
}

fn get(config: &Config, key: &str) -> Result<String, String> {
    let value = match key {
        "default_format" => config.default_format.clone().unwrap_or_else(|| "(not set)".into()),
        "display_max_length" => config.engine.display_max_length.to_string(),
        "date_display_format" => config.engine.date_display_format.clone(),
        "enforce_option_sets" => config.engine.enforce_option_sets.to_string(),
        "history_limit" => config.engine.history_limit.to_string(),
        _ => return Err(format!("Unknown config key: {}", key)),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut config = Config::default();
        set(&mut config, "display_max_length", "24").unwrap();
        set(&mut config, "enforce_option_sets", "true").unwrap();
        assert_eq!(get(&config, "display_max_length").unwrap(), "24");
        assert_eq!(get(&config, "enforce_option_sets").unwrap(), "true");
        assert_eq!(get(&config, "default_format").unwrap(), "(not set)");
    }

    #[test]
    fn test_bad_values() {
        let mut config = Config::default();
        assert!(set(&mut config, "history_limit", "many").is_err());
        assert!(set(&mut config, "api_key", "x").is_err());
        assert!(get(&config, "api_key").is_err());
    }
}
