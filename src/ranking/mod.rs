/*
 * Route ranking: aggregator price routes into a sorted route list
 */

use crate::models::{Amount, QuoteSummary, Route};
use crate::utils::{amount_field, percent_field, string_field};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;

pub const UNKNOWN_EXCHANGE: &str = "Unknown DEX";
pub const AGGREGATE_ROUTE_LABEL: &str = "Velora Optimal";

fn first_exchange(list: Option<&Value>) -> Option<&str> {
    list?
        .as_array()?
        .first()?
        .get("exchange")?
        .as_str()
        .filter(|name| !name.is_empty())
}

/// Probes the known response shapes for an exchange name, most direct first.
#[must_use]
pub fn extract_exchange_name(hop: &Value) -> String {
    if let Some(name) = hop.get("exchange").and_then(Value::as_str) {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    if let Some(name) = first_exchange(hop.get("swapExchanges")) {
        return name.to_string();
    }

    let nested = hop
        .get("swaps")
        .and_then(Value::as_array)
        .and_then(|swaps| swaps.first())
        .and_then(|swap| first_exchange(swap.get("swapExchanges")));
    if let Some(name) = nested {
        return name.to_string();
    }

    if let Some(name) = hop
        .get("data")
        .and_then(|data| data.get("exchange"))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
    {
        return name.to_string();
    }

    UNKNOWN_EXCHANGE.to_string()
}

fn route_from_hop(hop: &Value) -> Route {
    Route {
        exchange: extract_exchange_name(hop),
        src_amount: amount_field(hop.get("srcAmount")),
        dest_amount: amount_field(hop.get("destAmount")),
        percent: percent_field(hop.get("percent")),
        gas_usd: string_field(hop.get("gasUSD")),
        price_impact: Some(percent_field(hop.get("priceImpactPercent"))),
        gas_cost_usd: string_field(hop.get("gasCostUSD")),
    }
}

fn aggregate_route(price_route: &Value, requested_amount: &str) -> Route {
    let src_amount = match price_route.get("srcAmount") {
        Some(value) if !value.is_null() => amount_field(Some(value)),
        _ => amount_field(Some(&Value::String(requested_amount.to_string()))),
    };

    Route {
        exchange: AGGREGATE_ROUTE_LABEL.to_string(),
        src_amount,
        dest_amount: amount_field(price_route.get("destAmount")),
        percent: 100.0,
        gas_usd: string_field(price_route.get("gasCost")),
        price_impact: Some(percent_field(price_route.get("priceImpactPercent"))),
        gas_cost_usd: string_field(price_route.get("gasCostUSD")),
    }
}

/// Sorts best output first; equal outputs keep their order.
pub fn rank_routes(routes: &mut [Route]) {
    routes.sort_by(|a, b| b.dest_amount.cmp(&a.dest_amount));
}

/// One route per `bestRoute` hop, or a single aggregate route when the
/// response carries no hops.
#[must_use]
pub fn normalize_routes(price_route: &Value, requested_amount: &str) -> Vec<Route> {
    let mut routes: Vec<Route> = price_route
        .get("bestRoute")
        .and_then(Value::as_array)
        .map(|hops| hops.iter().map(route_from_hop).collect())
        .unwrap_or_default();

    for (index, route) in routes.iter().enumerate() {
        debug!(
            index,
            exchange = %route.exchange,
            src_amount = %route.src_amount,
            dest_amount = %route.dest_amount,
            percent = route.percent,
            "normalized hop"
        );
    }

    if routes.is_empty() {
        debug!("no bestRoute hops, using aggregate route");
        routes.push(aggregate_route(price_route, requested_amount));
    }

    rank_routes(&mut routes);
    routes
}

#[must_use]
pub fn summarize(price_route: &Value, requested_amount: &str) -> QuoteSummary {
    let field = |key: &str| string_field(price_route.get(key));

    QuoteSummary {
        src_amount: field("srcAmount").unwrap_or_else(|| requested_amount.to_string()),
        dest_amount: field("destAmount").unwrap_or_else(|| "0".to_string()),
        gas_cost: field("gasCost").unwrap_or_else(|| "0".to_string()),
        gas_cost_usd: field("gasCostUSD").unwrap_or_else(|| "0".to_string()),
        quoted_at: Utc::now(),
    }
}

/// `output × (1 − slippage/100)`, exact at any magnitude.
#[must_use]
pub fn min_received(output: &Amount, slippage_percent: Decimal) -> Amount {
    output.less_percent(slippage_percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn exchange_name_probe_order() {
        assert_eq!(extract_exchange_name(&json!({"exchange": "UniswapV3"})), "UniswapV3");
        assert_eq!(
            extract_exchange_name(&json!({
                "exchange": "",
                "swapExchanges": [{"exchange": "SushiSwap"}, {"exchange": "Curve"}]
            })),
            "SushiSwap"
        );
        assert_eq!(
            extract_exchange_name(&json!({
                "percent": 100,
                "swaps": [{"swapExchanges": [{"exchange": "BalancerV2"}]}]
            })),
            "BalancerV2"
        );
        assert_eq!(
            extract_exchange_name(&json!({"swaps": [], "data": {"exchange": "DODO"}})),
            "DODO"
        );
        assert_eq!(extract_exchange_name(&json!({"swapExchanges": []})), UNKNOWN_EXCHANGE);
    }

    #[test]
    fn direct_field_wins_over_nested() {
        let hop = json!({
            "exchange": "Kyber",
            "swaps": [{"swapExchanges": [{"exchange": "CurveV2"}]}]
        });
        assert_eq!(extract_exchange_name(&hop), "Kyber");
    }

    #[test]
    fn hops_sorted_best_first() {
        let price_route = json!({
            "destAmount": "2500",
            "bestRoute": [
                {"exchange": "SushiSwap", "srcAmount": "1", "destAmount": "2490", "percent": 40},
                {"exchange": "UniswapV3", "srcAmount": "1", "destAmount": "2500", "percent": "60"}
            ]
        });

        let routes = normalize_routes(&price_route, "1");
        let outputs: Vec<_> = routes.iter().map(|r| r.dest_amount.clone()).collect();
        assert_eq!(outputs, vec![Amount::from(2500u64), Amount::from(2490u64)]);
        assert_eq!(routes[0].exchange, "UniswapV3");
        assert_eq!(routes[0].percent, 60.0);
    }

    #[test]
    fn ties_keep_response_order() {
        let price_route = json!({
            "bestRoute": [
                {"exchange": "A", "destAmount": "10"},
                {"exchange": "B", "destAmount": "20"},
                {"exchange": "C", "destAmount": "10"}
            ]
        });
        let names: Vec<_> = normalize_routes(&price_route, "1")
            .into_iter()
            .map(|r| r.exchange)
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let routes = normalize_routes(&json!({"bestRoute": [{"percent": "bad"}]}), "1");
        assert_eq!(routes.len(), 1);
        let route = &routes[0];
        assert_eq!(route.exchange, UNKNOWN_EXCHANGE);
        assert!(route.src_amount.is_zero());
        assert!(route.dest_amount.is_zero());
        assert_eq!(route.percent, 0.0);
        assert_eq!(route.price_impact, Some(0.0));
        assert_eq!(route.gas_usd, None);
    }

    #[test]
    fn empty_best_route_yields_aggregate_route() {
        let price_route = json!({
            "bestRoute": [],
            "destAmount": "1990",
            "gasCost": "111200",
            "gasCostUSD": "3.21",
            "priceImpactPercent": "0.04"
        });
        let routes = normalize_routes(&price_route, "1000");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].exchange, AGGREGATE_ROUTE_LABEL);
        assert_eq!(routes[0].src_amount, Amount::from(1000u64));
        assert_eq!(routes[0].dest_amount, Amount::from(1990u64));
        assert_eq!(routes[0].percent, 100.0);
        assert_eq!(routes[0].gas_cost_usd.as_deref(), Some("3.21"));
        assert_eq!(routes[0].price_impact, Some(0.04));
    }

    #[test]
    fn summary_defaults() {
        let summary = summarize(&json!({"destAmount": "42"}), "7");
        assert_eq!(summary.src_amount, "7");
        assert_eq!(summary.dest_amount, "42");
        assert_eq!(summary.gas_cost, "0");
        assert_eq!(summary.gas_cost_usd, "0");
    }

    #[test]
    fn outputs_beyond_decimal_range_rank_first() {
        let price_route = json!({
            "bestRoute": [
                {"exchange": "Small", "destAmount": "5"},
                {"exchange": "Big", "destAmount": "100000000000000000000000000000"}
            ]
        });
        let routes = normalize_routes(&price_route, "1");
        assert_eq!(routes[0].exchange, "Big");
        assert_eq!(routes[0].dest_amount.to_string(), "100000000000000000000000000000");
        assert_eq!(routes[1].dest_amount, Amount::from(5u64));
    }

    #[test]
    fn min_received_is_exact() {
        let half = Decimal::from_str("0.5").unwrap();
        let out = min_received(&Amount::from(1000u64), half);
        assert_eq!(out, Amount::from(995u64));
        assert_eq!(out.to_string(), "995");
        assert_eq!(min_received(&Amount::from(1001u64), half).to_string(), "995.995");

        let thousand = Amount::from(1000u64);
        assert_eq!(min_received(&thousand, Decimal::ZERO), thousand);
        assert_eq!(min_received(&thousand, Decimal::ONE_HUNDRED), Amount::zero());

        let huge = Amount::from_str("200000000000000000000000000000").unwrap();
        assert_eq!(
            min_received(&huge, Decimal::ONE).to_string(),
            "198000000000000000000000000000"
        );
    }
}
