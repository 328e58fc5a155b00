/*
 * Velora (ParaSwap) REST client implementation
 */

use super::{RateRequest, SwapAggregator, TxRequest};
use crate::models::{Result, SwapscopeError, TransactionParams};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct VeloraClient {
    client: Client,
    base_url: String,
    version: String,
    chain_id: u64,
}

#[derive(Debug, Deserialize)]
struct PricesResponse {
    #[serde(rename = "priceRoute")]
    price_route: Option<Value>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionResponse {
    from: String,
    to: String,
    #[serde(default)]
    value: Value,
    data: String,
    #[serde(default)]
    gas_price: Option<Value>,
    #[serde(default)]
    gas: Option<Value>,
    chain_id: u64,
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl VeloraClient {
    pub fn new(base_url: &str, version: &str, chain_id: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SwapscopeError::SdkInit(format!("Failed to initialize Velora SDK: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            version: version.to_string(),
            chain_id,
        })
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody { error: Some(error), .. }) => error,
            Ok(ErrorBody { message: Some(message), .. }) => message,
            _ => format!("Velora API returned {status}"),
        }
    }
}

#[async_trait]
impl SwapAggregator for VeloraClient {
    async fn get_rate(&self, request: &RateRequest) -> Result<Value> {
        let url = format!("{}/prices", self.base_url);
        let query = [
            ("srcToken", request.src_token.to_lowercase()),
            ("destToken", request.dest_token.to_lowercase()),
            ("amount", request.amount.clone()),
            ("srcDecimals", request.src_decimals.to_string()),
            ("destDecimals", request.dest_decimals.to_string()),
            ("side", request.side.as_str().to_string()),
            ("network", self.chain_id.to_string()),
            ("userAddress", request.user_address.clone()),
            ("version", self.version.clone()),
            ("includeDEXS", request.include_dexs.join(",")),
            ("excludeDEXS", request.exclude_dexs.join(",")),
        ];
        let query: Vec<_> = query.into_iter().filter(|(_, v)| !v.is_empty()).collect();

        debug!("Requesting Velora rate: {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| SwapscopeError::QuoteFetch(format!("Failed to fetch swap quote: {e}")))?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            warn!("Velora rate request failed: {}", message);
            return Err(SwapscopeError::QuoteFetch(message));
        }

        let body = response
            .json::<PricesResponse>()
            .await
            .map_err(|e| SwapscopeError::QuoteFetch(format!("Failed to parse Velora response: {e}")))?;

        if let Some(error) = body.error {
            return Err(SwapscopeError::QuoteFetch(error));
        }

        body.price_route
            .filter(Value::is_object)
            .ok_or_else(|| SwapscopeError::QuoteFetch("No priceRoute in Velora response".to_string()))
    }

    async fn build_tx(&self, request: &TxRequest) -> Result<TransactionParams> {
        let url = format!("{}/transactions/{}", self.base_url, self.chain_id);
        let body = json!({
            "srcToken": request.src_token.to_lowercase(),
            "destToken": request.dest_token.to_lowercase(),
            "srcAmount": request.src_amount,
            "srcDecimals": request.src_decimals,
            "destDecimals": request.dest_decimals,
            "slippage": request.slippage_bps,
            "priceRoute": request.price_route,
            "userAddress": request.user_address,
            "partner": request.partner,
        });

        let response = self
            .client
            .post(&url)
            .query(&[("ignoreChecks", "true")])
            .json(&body)
            .send()
            .await
            .map_err(|e| SwapscopeError::TransactionBuild(e.to_string()))?;

        if !response.status().is_success() {
            let message = Self::error_message(response).await;
            warn!("Velora transaction build failed: {}", message);
            return Err(SwapscopeError::TransactionBuild(message));
        }

        let tx = response
            .json::<TransactionResponse>()
            .await
            .map_err(|e| SwapscopeError::TransactionBuild(format!("Failed to parse transaction: {e}")))?;

        Ok(TransactionParams {
            from: tx.from,
            to: tx.to,
            value: value_to_string(&tx.value).unwrap_or_else(|| "0".to_string()),
            data: tx.data,
            gas_price: tx.gas_price.as_ref().and_then(value_to_string),
            gas: tx.gas.as_ref().and_then(value_to_string),
            chain_id: tx.chain_id,
        })
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }
}
