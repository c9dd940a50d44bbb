use super::fallback::FALLBACK_FEE_RATE;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

const DEFAULT_API_BASE_URL: &str = "https://api.feecalc.app";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EndpointConfig {
    pub base_url: String,
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default = "default_fees_endpoint")]
    pub fees: EndpointConfig,
    #[serde(default = "default_rates_endpoint")]
    pub rates: EndpointConfig,
}

fn default_fees_endpoint() -> EndpointConfig {
    EndpointConfig {
        base_url: DEFAULT_API_BASE_URL.to_string(),
        path: "/fees".to_string(),
    }
}

fn default_rates_endpoint() -> EndpointConfig {
    EndpointConfig {
        base_url: DEFAULT_API_BASE_URL.to_string(),
        path: "/exchange-rate".to_string(),
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            fees: default_fees_endpoint(),
            rates: default_rates_endpoint(),
        }
    }
}

/// The currency pair whose rate is refreshed from the remote source.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RatePairConfig {
    pub from: String,
    pub to: String,
}

impl Default for RatePairConfig {
    fn default() -> Self {
        RatePairConfig {
            from: "USD".to_string(),
            to: "NGN".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub rate_pair: RatePairConfig,
    #[serde(default = "default_send_currency")]
    pub send_currency: String,
    #[serde(default = "default_receive_currency")]
    pub receive_currency: String,
    /// Fee fraction used until a remote listing says otherwise.
    #[serde(default = "default_fee_rate")]
    pub fee_rate: f64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_send_currency() -> String {
    "USD".to_string()
}

fn default_receive_currency() -> String {
    "NGN".to_string()
}

fn default_fee_rate() -> f64 {
    FALLBACK_FEE_RATE
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            rate_pair: RatePairConfig::default(),
            send_currency: default_send_currency(),
            receive_currency: default_receive_currency(),
            fee_rate: default_fee_rate(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or the built-in defaults
    /// when no config file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("app", "feecalc", "feecalc")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.fee_rate.is_finite() || !(0.0..1.0).contains(&self.fee_rate) {
            anyhow::bail!(
                "fee_rate must be a fraction between 0 and 1, got {}",
                self.fee_rate
            );
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  fees:
    base_url: "http://example.com/api"
    path: "/v1/fees"
  rates:
    base_url: "http://example.com/fx"
    path: "/latest"
rate_pair:
  from: "GBP"
  to: "KES"
send_currency: "GBP"
receive_currency: "KES"
fee_rate: 0.01
timeout_secs: 3
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.fees.base_url, "http://example.com/api");
        assert_eq!(config.providers.fees.path, "/v1/fees");
        assert_eq!(config.providers.rates.path, "/latest");
        assert_eq!(config.rate_pair.from, "GBP");
        assert_eq!(config.rate_pair.to, "KES");
        assert_eq!(config.send_currency, "GBP");
        assert_eq!(config.fee_rate, 0.01);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_config_defaults_for_missing_fields() {
        let yaml_str = r#"
providers:
  rates:
    base_url: "http://localhost:9000"
    path: "/rate"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.providers.fees, default_fees_endpoint());
        assert_eq!(config.providers.rates.base_url, "http://localhost:9000");
        assert_eq!(config.rate_pair, RatePairConfig::default());
        assert_eq!(config.send_currency, "USD");
        assert_eq!(config.receive_currency, "NGN");
        assert_eq!(config.fee_rate, FALLBACK_FEE_RATE);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_path_rejects_invalid_fee_rate() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "fee_rate: 1.5\n").unwrap();

        let result = AppConfig::load_from_path(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("fee_rate"));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
