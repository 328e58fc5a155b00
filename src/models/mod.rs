/*
 * Data models and types for the swap comparison service
 */

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod amount;

pub use amount::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
    pub name: String,
}

/// One candidate hop through a single exchange, as shown in the route list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub exchange: String,
    pub src_amount: Amount,
    pub dest_amount: Amount,
    pub percent: f64,
    pub gas_usd: Option<String>,
    pub price_impact: Option<f64>,
    pub gas_cost_usd: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub src_amount: String,
    pub dest_amount: String,
    pub gas_cost: String,
    pub gas_cost_usd: String,
    pub quoted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SwapSide {
    Sell,
    Buy,
}

impl SwapSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SwapSide::Sell => "SELL",
            SwapSide::Buy => "BUY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImpactSeverity {
    Low,
    Moderate,
    High,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "percent_less")]
pub enum RankLabel {
    BestRate,
    Behind(Decimal),
    Only,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteView {
    pub index: usize,
    pub route: Route,
    pub dest_amount_display: String,
    pub rank: RankLabel,
    pub min_received: Option<Amount>,
    pub impact_severity: Option<ImpactSeverity>,
    pub high_impact_warning: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedRouteDetail {
    pub index: usize,
    pub exchange: String,
    pub dest_amount: Amount,
    pub dest_amount_display: String,
    pub min_received: Amount,
    pub gas_estimate: String,
    pub gas_cost_usd: String,
    pub impact_notice: Option<f64>,
    pub can_execute: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionParams {
    pub from: String,
    pub to: String,
    pub value: String,
    pub data: String,
    #[serde(default)]
    pub gas_price: Option<String>,
    #[serde(default)]
    pub gas: Option<String>,
    pub chain_id: u64,
}

#[derive(Debug, Error)]
pub enum SwapscopeError {
    #[error("{0}")]
    SdkInit(String),

    #[error("{0}")]
    QuoteFetch(String),

    #[error("SDK not initialized or wallet not connected")]
    WalletNotConnected,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to build swap transaction: {0}")]
    TransactionBuild(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for SwapscopeError {
    fn from(e: config::ConfigError) -> Self {
        SwapscopeError::ConfigError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SwapscopeError>;
