#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use swapscope::aggregator::{RateRequest, SwapAggregator, TxRequest};
use swapscope::config::Config;
use swapscope::service::SwapService;
use swapscope::{Result, SwapscopeError, TransactionParams};

pub const USER: &str = "0x1111111111111111111111111111111111111111";

/// Aggregator double that replays queued answers and records requests.
#[derive(Default)]
pub struct StubAggregator {
    pub rates: Mutex<Vec<Result<Value>>>,
    pub rate_requests: Mutex<Vec<RateRequest>>,
    pub tx_requests: Mutex<Vec<TxRequest>>,
    pub fail_tx: bool,
}

impl StubAggregator {
    pub fn with_rates(rates: Vec<Result<Value>>) -> Self {
        let mut rates = rates;
        rates.reverse();
        Self {
            rates: Mutex::new(rates),
            ..Self::default()
        }
    }
}

#[async_trait]
impl SwapAggregator for StubAggregator {
    async fn get_rate(&self, request: &RateRequest) -> Result<Value> {
        self.rate_requests.lock().unwrap().push(request.clone());
        self.rates
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(SwapscopeError::QuoteFetch("no stubbed rate".to_string())))
    }

    async fn build_tx(&self, request: &TxRequest) -> Result<TransactionParams> {
        self.tx_requests.lock().unwrap().push(request.clone());
        if self.fail_tx {
            return Err(SwapscopeError::TransactionBuild("reverted".to_string()));
        }
        Ok(TransactionParams {
            from: request.user_address.clone(),
            to: "0x6a000f20005980200259b80c5102003040001068".to_string(),
            value: request.src_amount.clone(),
            data: "0xe3ead59e".to_string(),
            gas_price: None,
            gas: None,
            chain_id: 1,
        })
    }

    fn chain_id(&self) -> u64 {
        1
    }
}

pub fn two_hop_price_route() -> Value {
    json!({
        "srcAmount": "1000000000000000000",
        "destAmount": "2500",
        "gasCost": "120000",
        "gasCostUSD": "3.50",
        "bestRoute": [
            {"exchange": "SushiSwap", "destAmount": "2490", "percent": 50},
            {"swapExchanges": [{"exchange": "UniswapV3"}], "destAmount": "2500", "percent": 50}
        ]
    })
}

pub fn connected_config() -> Config {
    let mut config = Config::default();
    config.wallet.address = Some(USER.to_string());
    config.aggregator.partner = "swapscope".to_string();
    config
}

pub fn service_with(stub: Arc<StubAggregator>) -> SwapService {
    SwapService::with_factory(
        connected_config(),
        Box::new(move |chain_id| {
            if chain_id == 56 {
                return Err(SwapscopeError::SdkInit(
                    "Failed to initialize Velora SDK: unsupported chain 56".to_string(),
                ));
            }
            Ok(stub.clone() as Arc<dyn SwapAggregator>)
        }),
    )
    .unwrap()
}
