//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Payment gateway configuration.
    pub payments: PaymentsConfig,
    /// Demo data configuration.
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Payment gateway configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    /// Base URL of the payment gateway API.
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Secret API key used to authenticate with the gateway.
    pub secret_key: String,
    /// Platform fee in basis points withheld from each charge.
    #[serde(default = "default_fee_basis_points")]
    pub fee_basis_points: u32,
    /// Deadline for a single charge request, in milliseconds.
    #[serde(default = "default_charge_timeout_ms")]
    pub charge_timeout_ms: u64,
}

fn default_gateway_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_fee_basis_points() -> u32 {
    500 // 5%
}

fn default_charge_timeout_ms() -> u64 {
    10_000
}

/// Demo data configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoConfig {
    /// Seed the store with demo listings and users on startup.
    #[serde(default)]
    pub seed: bool,
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
            .add_source(config::Environment::with_prefix("ROOST").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(default_host(), "0.0.0.0");
        assert_eq!(default_port(), 8080);
        assert_eq!(default_fee_basis_points(), 500);
        assert_eq!(default_charge_timeout_ms(), 10_000);
    }

    #[test]
    fn test_demo_config_default_is_off() {
        let demo = DemoConfig::default();
        assert!(!demo.seed);
    }
}
