/*
 * Configuration management for the swapscope service
 */

use crate::models::{Result, SwapscopeError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "https://api.paraswap.io";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub aggregator: AggregatorConfig,
    pub wallet: WalletConfig,
    pub trading: TradingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AggregatorConfig {
    pub api_url: String,
    pub version: String,
    pub partner: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
    pub address: Option<String>,
    pub chain_id: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TradingConfig {
    pub default_slippage_percent: String,
}

impl Config {
    /// Layers defaults, an optional `swapscope.toml`, then `SWAPSCOPE_*`
    /// environment variables (`SWAPSCOPE_SERVER__PORT=9000`).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let settings = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("server.log_level", "info")?
            .set_default("aggregator.api_url", DEFAULT_API_URL)?
            .set_default("aggregator.version", "6.2")?
            .set_default("aggregator.partner", "")?
            .set_default("wallet.chain_id", 1_i64)?
            .set_default("trading.default_slippage_percent", "0.5")?
            .add_source(config::File::with_name("swapscope").required(false))
            .add_source(
                config::Environment::with_prefix("SWAPSCOPE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.default_slippage()?;
        Ok(config)
    }

    /// Parsed default slippage, which must lie in `[0, 100]`.
    pub fn default_slippage(&self) -> Result<Decimal> {
        let slippage = Decimal::from_str(self.trading.default_slippage_percent.trim()).map_err(|e| {
            SwapscopeError::ConfigError(format!("Invalid default slippage: {e}"))
        })?;
        if slippage < Decimal::ZERO || slippage > Decimal::ONE_HUNDRED {
            return Err(SwapscopeError::ConfigError(format!(
                "Default slippage must be between 0 and 100, got {slippage}"
            )));
        }
        Ok(slippage)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
            },
            aggregator: AggregatorConfig {
                api_url: DEFAULT_API_URL.to_string(),
                version: "6.2".to_string(),
                partner: String::new(),
            },
            wallet: WalletConfig {
                address: None,
                chain_id: 1,
            },
            trading: TradingConfig {
                default_slippage_percent: "0.5".to_string(),
            },
        }
    }
}
