//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Wallet policy configuration.
    #[serde(default)]
    pub wallet: WalletConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connection acquire timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    8
}

/// Wallet policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletConfig {
    /// Smallest amount a user may withdraw in one request.
    #[serde(default = "default_min_withdrawal")]
    pub min_withdrawal: Decimal,
}

fn default_min_withdrawal() -> Decimal {
    // 50.00 in minor units
    Decimal::new(5000, 2)
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            min_withdrawal: default_min_withdrawal(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ARENAVAULT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_wallet_config_default() {
        let wallet = WalletConfig::default();
        assert_eq!(wallet.min_withdrawal, dec!(50.00));
    }

    #[test]
    fn test_database_defaults_applied() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url": "postgres://localhost/arenavault_dev"}"#).unwrap();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.connect_timeout_secs, 8);
    }
}
