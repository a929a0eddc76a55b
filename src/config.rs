use crate::estimation::tariff::{
    DEFAULT_CO2_KG_PER_KWH, DEFAULT_CURRENCY, DEFAULT_RATE_PER_KWH, Tariff,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub server: Option<ServerSection>,
    #[serde(default)]
    pub tariff: Option<TariffSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSection {
    /// Port to listen on (default: 8080)
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TariffSection {
    /// Price per kWh (default: 6.0)
    pub rate_per_kwh: Option<f64>,
    /// Emission factor in kg CO2 per kWh (default: 0.82)
    pub co2_kg_per_kwh: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_default() -> Result<Config, ConfigError> {
    load_from_path(DEFAULT_CONFIG_PATH)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

impl Config {
    /// Returns the server port (default: 8080)
    pub fn server_port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Returns the configured log level, falling back to INFO when the value
    /// is not a recognised level name.
    pub fn log_level(&self) -> Level {
        Level::from_str(self.logging.level.trim()).unwrap_or(Level::INFO)
    }

    pub fn tariff(&self) -> Tariff {
        let section = self.tariff.as_ref();
        Tariff {
            rate_per_kwh: section
                .and_then(|t| t.rate_per_kwh)
                .unwrap_or(DEFAULT_RATE_PER_KWH),
            co2_kg_per_kwh: section
                .and_then(|t| t.co2_kg_per_kwh)
                .unwrap_or(DEFAULT_CO2_KG_PER_KWH),
            currency: section
                .and_then(|t| t.currency.clone())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn default_config_uses_default_tariff() -> Result<(), Box<dyn std::error::Error>> {
        let config = load_default()?;
        assert_eq!(config.tariff(), Tariff::default());
        assert_eq!(config.server_port(), DEFAULT_SERVER_PORT);
        Ok(())
    }

    #[test]
    fn missing_optional_sections_fall_back_to_defaults() -> Result<(), Box<dyn std::error::Error>>
    {
        let temp_dir = std::env::temp_dir();
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let path = temp_dir.join(format!("household-config-minimal-{unique}.toml"));
        let contents = r#"
[app]
name = "household-energy"

[logging]
level = "debug"
"#;
        fs::write(&path, contents)?;

        let result = load_from_path(&path)?;
        let _ = fs::remove_file(&path);

        assert_eq!(result.server_port(), DEFAULT_SERVER_PORT);
        assert_eq!(result.tariff(), Tariff::default());
        assert_eq!(result.log_level(), Level::DEBUG);
        Ok(())
    }

    #[test]
    fn partial_tariff_section_keeps_remaining_defaults() -> Result<(), Box<dyn std::error::Error>>
    {
        let temp_dir = std::env::temp_dir();
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let path = temp_dir.join(format!("household-config-tariff-{unique}.toml"));
        let contents = r#"
[app]
name = "household-energy"

[logging]
level = "info"

[server]
port = 9090

[tariff]
rate_per_kwh = 8.5
"#;
        fs::write(&path, contents)?;

        let result = load_from_path(&path)?;
        let _ = fs::remove_file(&path);
        let tariff = result.tariff();

        assert_eq!(result.server_port(), 9090);
        assert_eq!(tariff.rate_per_kwh, 8.5);
        assert_eq!(tariff.co2_kg_per_kwh, DEFAULT_CO2_KG_PER_KWH);
        assert_eq!(tariff.currency, DEFAULT_CURRENCY);
        Ok(())
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() -> Result<(), Box<dyn std::error::Error>> {
        let mut config = load_default()?;
        config.logging.level = "chatty".to_string();
        assert_eq!(config.log_level(), Level::INFO);
        Ok(())
    }

    #[test]
    fn missing_config_file_returns_read_error() {
        let temp_dir = std::env::temp_dir();
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        let path = temp_dir.join(format!("household-config-missing-{unique}.toml"));

        let result = load_from_path(&path);

        assert!(matches!(result, Err(ConfigError::Read(_))));
    }

    #[test]
    fn invalid_toml_returns_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = std::env::temp_dir();
        let unique = SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos();
        let path = temp_dir.join(format!("household-config-invalid-{unique}.toml"));
        fs::write(&path, "not = [valid")?;

        let result = load_from_path(&path);
        let _ = fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        Ok(())
    }
}
