/*
 * Swap aggregator integration: rate lookup and transaction building
 */

mod velora;

use crate::config::AggregatorConfig;
use crate::models::{Result, SwapSide, SwapscopeError, TransactionParams};
use crate::tokens::is_supported_chain;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub use velora::VeloraClient;

#[derive(Debug, Clone, PartialEq)]
pub struct RateRequest {
    pub src_token: String,
    pub dest_token: String,
    /// Base units of the side being fixed.
    pub amount: String,
    pub user_address: String,
    pub side: SwapSide,
    pub src_decimals: u8,
    pub dest_decimals: u8,
    pub include_dexs: Vec<String>,
    pub exclude_dexs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TxRequest {
    pub src_token: String,
    pub dest_token: String,
    pub src_amount: String,
    pub src_decimals: u8,
    pub dest_decimals: u8,
    pub slippage_bps: u32,
    pub price_route: Value,
    pub user_address: String,
    pub partner: String,
}

#[async_trait]
pub trait SwapAggregator: Send + Sync {
    /// Returns the raw `priceRoute` object.
    async fn get_rate(&self, request: &RateRequest) -> Result<Value>;
    async fn build_tx(&self, request: &TxRequest) -> Result<TransactionParams>;
    fn chain_id(&self) -> u64;
}

pub fn create_aggregator(config: &AggregatorConfig, chain_id: u64) -> Result<Arc<dyn SwapAggregator>> {
    if !is_supported_chain(chain_id) {
        return Err(SwapscopeError::SdkInit(format!(
            "Failed to initialize Velora SDK: unsupported chain {chain_id}"
        )));
    }
    Ok(Arc::new(VeloraClient::new(
        &config.api_url,
        &config.version,
        chain_id,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_chain_is_sdk_init_error() {
        let config = crate::config::Config::default().aggregator;
        let err = create_aggregator(&config, 56).err().unwrap();
        assert!(matches!(err, SwapscopeError::SdkInit(_)));
        assert!(err.to_string().contains("unsupported chain 56"));

        let client = create_aggregator(&config, 8453).unwrap();
        assert_eq!(client.chain_id(), 8453);
    }
}
