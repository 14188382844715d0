use std::env;

use crate::models::catalog::DEFAULT_CURRENCY;
use crate::services::order_service::DEFAULT_SELECTION_LIMIT;

const ENVIRONMENTS: [&str; 3] = ["development", "test", "production"];

#[derive(Debug, Clone)]
pub struct Config {
    pub selection_limit: usize,
    pub currency_label: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            selection_limit: DEFAULT_SELECTION_LIMIT,
            currency_label: DEFAULT_CURRENCY.to_string(),
            log_level: "warn".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let selection_limit = match lookup("SHOP_SELECTION_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                anyhow::anyhow!("SHOP_SELECTION_LIMIT must be a positive whole number, got '{}'", raw)
            })?,
            None => defaults.selection_limit,
        };

        let config = Config {
            selection_limit,
            currency_label: lookup("SHOP_CURRENCY_LABEL").unwrap_or(defaults.currency_label),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: lookup("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.selection_limit == 0 {
            return Err(anyhow::anyhow!("SHOP_SELECTION_LIMIT must be greater than 0"));
        }

        if self.currency_label.trim().is_empty() {
            return Err(anyhow::anyhow!("SHOP_CURRENCY_LABEL must not be empty"));
        }

        if !ENVIRONMENTS.contains(&self.environment.as_str()) {
            return Err(anyhow::anyhow!(
                "APP_ENV must be one of {}, got '{}'",
                ENVIRONMENTS.join(", "),
                self.environment
            ));
        }

        Ok(())
    }
}
