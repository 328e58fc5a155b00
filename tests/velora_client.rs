use mockito::Matcher;
use serde_json::json;
use swapscope::aggregator::{RateRequest, SwapAggregator, TxRequest, VeloraClient};
use swapscope::{SwapSide, SwapscopeError};

const USER: &str = "0x1111111111111111111111111111111111111111";
const ETH: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";
const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

fn rate_request() -> RateRequest {
    RateRequest {
        src_token: ETH.to_string(),
        dest_token: USDC.to_string(),
        amount: "1000000000000000000".to_string(),
        user_address: USER.to_string(),
        side: SwapSide::Sell,
        src_decimals: 18,
        dest_decimals: 6,
        include_dexs: vec![],
        exclude_dexs: vec!["CurveV1".to_string()],
    }
}

#[tokio::test]
async fn get_rate_sends_query_and_returns_price_route() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/prices")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("srcToken".into(), ETH.into()),
            Matcher::UrlEncoded("destToken".into(), USDC.to_lowercase()),
            Matcher::UrlEncoded("amount".into(), "1000000000000000000".into()),
            Matcher::UrlEncoded("side".into(), "SELL".into()),
            Matcher::UrlEncoded("network".into(), "1".into()),
            Matcher::UrlEncoded("version".into(), "6.2".into()),
            Matcher::UrlEncoded("excludeDEXS".into(), "CurveV1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "priceRoute": {
                    "destAmount": "2500000000",
                    "gasCost": "111200",
                    "bestRoute": [{"percent": 100, "swaps": []}]
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = VeloraClient::new(&server.url(), "6.2", 1).unwrap();
    let price_route = client.get_rate(&rate_request()).await.unwrap();

    assert_eq!(price_route["destAmount"], "2500000000");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_rate_surfaces_aggregator_error_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/prices")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"No routes found with enough liquidity"}"#)
        .create_async()
        .await;

    let client = VeloraClient::new(&server.url(), "6.2", 1).unwrap();
    let err = client.get_rate(&rate_request()).await.unwrap_err();

    match err {
        SwapscopeError::QuoteFetch(message) => {
            assert_eq!(message, "No routes found with enough liquidity");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn get_rate_without_price_route_is_quote_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/prices")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = VeloraClient::new(&server.url(), "6.2", 1).unwrap();
    assert!(matches!(
        client.get_rate(&rate_request()).await,
        Err(SwapscopeError::QuoteFetch(_))
    ));
}

#[tokio::test]
async fn build_tx_posts_price_route_and_slippage() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/transactions/8453")
        .match_query(Matcher::UrlEncoded("ignoreChecks".into(), "true".into()))
        .match_body(Matcher::PartialJson(json!({
            "srcToken": ETH,
            "srcAmount": "1000000000000000000",
            "slippage": 50,
            "partner": "swapscope",
            "priceRoute": {"destAmount": "2500000000"}
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "from": USER,
                "to": "0x6a000f20005980200259b80c5102003040001068",
                "value": "1000000000000000000",
                "data": "0xe3ead59e",
                "gasPrice": "1500000000",
                "chainId": 8453
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = VeloraClient::new(&server.url(), "6.2", 8453).unwrap();
    let tx = client
        .build_tx(&TxRequest {
            src_token: ETH.to_string(),
            dest_token: USDC.to_string(),
            src_amount: "1000000000000000000".to_string(),
            src_decimals: 18,
            dest_decimals: 6,
            slippage_bps: 50,
            price_route: json!({"destAmount": "2500000000"}),
            user_address: USER.to_string(),
            partner: "swapscope".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(tx.chain_id, 8453);
    assert_eq!(tx.value, "1000000000000000000");
    assert_eq!(tx.gas_price.as_deref(), Some("1500000000"));
    assert_eq!(tx.gas, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn build_tx_failure_is_transaction_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/transactions/1")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let client = VeloraClient::new(&server.url(), "6.2", 1).unwrap();
    let err = client
        .build_tx(&TxRequest {
            src_token: ETH.to_string(),
            dest_token: USDC.to_string(),
            src_amount: "1".to_string(),
            src_decimals: 18,
            dest_decimals: 6,
            slippage_bps: 50,
            price_route: json!({}),
            user_address: USER.to_string(),
            partner: String::new(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SwapscopeError::TransactionBuild(_)));
}
