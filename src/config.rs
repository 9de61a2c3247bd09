use crate::chain::ChainNetwork;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Chain that addresses, keys and payment requests must belong to
    pub network: ChainNetwork,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter used when RUST_LOG is unset
    pub filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig {
                network: ChainNetwork::Main,
            },
            logging: LoggingConfig {
                filter: "error".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default(
                "classifier.network",
                defaults.classifier.network.payment_protocol_id(),
            )?
            .set_default("logging.filter", defaults.logging.filter)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // INTAKE_CLASSIFIER__NETWORK, INTAKE_LOGGING__FILTER
            .add_source(
                config::Environment::with_prefix("INTAKE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Short alias for the one setting people change most
        if let Ok(network) = env::var("INTAKE_NETWORK") {
            app_config.classifier.network = network
                .parse()
                .map_err(|e: crate::chain::ParseNetworkError| ConfigError::Message(e.to_string()))?;
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Self {
        // Try to load config for defaults, but don't fail if not found
        Self::load().unwrap_or_default()
    }
}
