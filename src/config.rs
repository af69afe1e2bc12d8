// Submitter configuration
// Endpoint settings from defaults, a YAML settings file or the environment.

use dotenv::dotenv;
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;

pub const ENDPOINT_ENV_VAR: &str = "BOOKING_ENDPOINT_URL";
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8000/bookings";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("Environment variable '{0}' not found")]
    MissingEnvVar(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

// Where and how booking requests are sent
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitterConfig {
    /// Absolute URL of the booking service; requests are POSTed here
    pub endpoint_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("hotel-booking/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl SubmitterConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            ..Default::default()
        }
    }

    /// Reads a YAML settings file. String values written as `${NAME}` are
    /// replaced with the environment variable `NAME` (a `.env` file is honoured).
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        dotenv().ok();

        let mut config: SubmitterConfig = serde_yaml::from_str(yaml)?;
        config.endpoint_url = expand_env_var(&config.endpoint_url)?;
        config.user_agent = expand_env_var(&config.user_agent)?;
        config.validate()?;

        Ok(config)
    }

    /// Endpoint from `BOOKING_ENDPOINT_URL`, everything else defaulted.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let endpoint_url = env::var(ENDPOINT_ENV_VAR)
            .map_err(|_| ConfigError::MissingEnvVar(ENDPOINT_ENV_VAR.to_string()))?;
        let config = Self::new(endpoint_url);
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = reqwest::Url::parse(&self.endpoint_url)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", self.endpoint_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::InvalidEndpoint(format!(
                "unsupported scheme '{}' in {}",
                other, self.endpoint_url
            ))),
        }
    }
}

fn expand_env_var(value: &str) -> Result<String, ConfigError> {
    match value.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        Some(name) => env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string())),
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SubmitterConfig::default();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert!(config.user_agent.starts_with("hotel-booking/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str() {
        let config = SubmitterConfig::from_yaml_str(
            "endpoint_url: https://booking.example/api/bookings\nuser_agent: luxe-hotel-site\n",
        )
        .unwrap();
        assert_eq!(config.endpoint_url, "https://booking.example/api/bookings");
        assert_eq!(config.user_agent, "luxe-hotel-site");
    }

    #[test]
    fn test_from_yaml_expands_env_vars() {
        env::set_var("HOTEL_BOOKING_TEST_ENDPOINT", "https://pay.example/bookings");
        let config =
            SubmitterConfig::from_yaml_str("endpoint_url: ${HOTEL_BOOKING_TEST_ENDPOINT}\n")
                .unwrap();
        assert_eq!(config.endpoint_url, "https://pay.example/bookings");
    }

    #[test]
    fn test_from_yaml_missing_env_var() {
        let result =
            SubmitterConfig::from_yaml_str("endpoint_url: ${HOTEL_BOOKING_TEST_UNSET_VAR}\n");
        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar(ref name)) if name == "HOTEL_BOOKING_TEST_UNSET_VAR"
        ));
    }

    // Only test touching BOOKING_ENDPOINT_URL
    #[test]
    fn test_from_env() {
        env::set_var(ENDPOINT_ENV_VAR, "https://booking.example/from-env");
        let config = SubmitterConfig::from_env().unwrap();
        assert_eq!(config.endpoint_url, "https://booking.example/from-env");
        assert!(config.user_agent.starts_with("hotel-booking/"));

        env::set_var(ENDPOINT_ENV_VAR, "mailto:desk@booking.example");
        assert!(matches!(
            SubmitterConfig::from_env(),
            Err(ConfigError::InvalidEndpoint(_))
        ));

        env::remove_var(ENDPOINT_ENV_VAR);
        assert!(matches!(
            SubmitterConfig::from_env(),
            Err(ConfigError::MissingEnvVar(ref name)) if name == ENDPOINT_ENV_VAR
        ));
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(matches!(
            SubmitterConfig::new("not a url").validate(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            SubmitterConfig::new("ftp://booking.example/").validate(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        let path = env::temp_dir().join("hotel_booking_settings_test.yaml");
        std::fs::write(&path, "endpoint_url: http://localhost:9000/book\n").unwrap();

        let config = SubmitterConfig::from_yaml(&path).unwrap();
        assert_eq!(config.endpoint_url, "http://localhost:9000/book");

        std::fs::remove_file(&path).ok();
        assert!(matches!(
            SubmitterConfig::from_yaml(&path),
            Err(ConfigError::IoError(_))
        ));
    }
}
