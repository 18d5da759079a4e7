//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, mut settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Set { key, value } => {
            set_key(&mut settings, key, value)?;
            settings.save()?;
            Output::success(&format!("Set {} = {}", key, value));
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Apply a dotted-key assignment to the settings.
fn set_key(settings: &mut Settings, key: &str, value: &str) -> Result<()> {
    match key {
        "general.log_level" => settings.general.log_level = value.to_string(),
        "llm.model" => settings.llm.model = value.to_string(),
        "llm.base_url" => settings.llm.base_url = value.to_string(),
        "llm.api_key_env" => settings.llm.api_key_env = value.to_string(),
        "llm.temperature" => {
            settings.llm.temperature = value
                .parse()
                .map_err(|_| anyhow::anyhow!("'{}' is not a valid temperature", value))?;
        }
        "stream.char_delay_ms" => {
            settings.stream.char_delay_ms = value
                .parse()
                .map_err(|_| anyhow::anyhow!("'{}' is not a valid delay in milliseconds", value))?;
        }
        _ => anyhow::bail!("Unknown configuration key: {}", key),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_keys() {
        let mut settings = Settings::default();
        set_key(&mut settings, "llm.model", "gpt-4o-mini").unwrap();
        set_key(&mut settings, "stream.char_delay_ms", "25").unwrap();

        assert_eq!(settings.llm.model, "gpt-4o-mini");
        assert_eq!(settings.stream.char_delay_ms, 25);
    }

    #[test]
    fn test_set_unknown_key_fails() {
        let mut settings = Settings::default();
        assert!(set_key(&mut settings, "llm.nope", "x").is_err());
    }

    #[test]
    fn test_set_invalid_value_fails() {
        let mut settings = Settings::default();
        assert!(set_key(&mut settings, "stream.char_delay_ms", "fast").is_err());
    }
}
