/*
 * REST API module for the swap comparison service
 */

use crate::config::Config;
use crate::models::{RouteView, SelectedRouteDetail, SwapscopeError, Token, TransactionParams};
use crate::service::SwapService;
use crate::session::SessionSnapshot;
use crate::tokens::{chain_name, SUPPORTED_CHAINS};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{get, post, put, routes, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

pub struct ApiState {
    pub config: Config,
    pub swap_service: Arc<SwapService>,
}

type ApiResult<T> = std::result::Result<Json<T>, Custom<String>>;

#[derive(Debug, Serialize)]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Deserialize)]
pub struct WalletRequest {
    pub address: String,
    pub chain_id: u64,
}

#[derive(Debug, Deserialize)]
pub struct PairRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    pub amount: Option<String>,
}

/// Either a preset/explicit `percent` or the raw text of the custom field.
#[derive(Debug, Deserialize)]
pub struct SlippageRequest {
    pub percent: Option<Decimal>,
    pub custom: Option<String>,
}

fn error_status(e: &SwapscopeError) -> Status {
    match e {
        SwapscopeError::InvalidInput(_) | SwapscopeError::WalletNotConnected => Status::BadRequest,
        SwapscopeError::SdkInit(_) => Status::ServiceUnavailable,
        SwapscopeError::QuoteFetch(_)
        | SwapscopeError::TransactionBuild(_)
        | SwapscopeError::NetworkError(_) => Status::BadGateway,
        SwapscopeError::ConfigError(_)
        | SwapscopeError::MetricsError(_)
        | SwapscopeError::SerializationError(_) => Status::InternalServerError,
    }
}

fn to_custom(e: SwapscopeError) -> Custom<String> {
    warn!("Request failed: {e}");
    Custom(error_status(&e), e.to_string())
}

#[get("/health")]
pub async fn health_check() -> &'static str {
    "OK"
}

#[get("/metrics")]
pub async fn metrics(state: &State<ApiState>) -> std::result::Result<String, Custom<String>> {
    state.swap_service.metrics().render().map_err(to_custom)
}

#[get("/api/v1/chains")]
pub async fn list_chains(state: &State<ApiState>) -> Json<Vec<ChainInfo>> {
    let active = state.swap_service.snapshot().await.chain_id;
    Json(
        SUPPORTED_CHAINS
            .iter()
            .map(|&chain_id| ChainInfo {
                chain_id,
                name: chain_name(chain_id),
                active: chain_id == active,
            })
            .collect(),
    )
}

#[get("/api/v1/tokens?<search>")]
pub async fn search_tokens(search: Option<String>, state: &State<ApiState>) -> Json<Vec<Token>> {
    Json(
        state
            .swap_service
            .search_tokens(search.as_deref().unwrap_or(""))
            .await,
    )
}

#[put("/api/v1/wallet", data = "<body>")]
pub async fn connect_wallet(body: Json<WalletRequest>, state: &State<ApiState>) -> ApiResult<SessionSnapshot> {
    state
        .swap_service
        .connect_wallet(&body.address, body.chain_id)
        .await
        .map(Json)
        .map_err(to_custom)
}

#[put("/api/v1/pair", data = "<body>")]
pub async fn set_pair(body: Json<PairRequest>, state: &State<ApiState>) -> ApiResult<SessionSnapshot> {
    state
        .swap_service
        .set_pair(body.from.as_deref(), body.to.as_deref(), body.amount.as_deref())
        .await
        .map(Json)
        .map_err(to_custom)
}

#[post("/api/v1/pair/flip")]
pub async fn flip_pair(state: &State<ApiState>) -> Json<SessionSnapshot> {
    Json(state.swap_service.flip_tokens().await)
}

#[put("/api/v1/slippage", data = "<body>")]
pub async fn set_slippage(body: Json<SlippageRequest>, state: &State<ApiState>) -> ApiResult<SessionSnapshot> {
    let result = match (&body.percent, &body.custom) {
        (Some(percent), _) => state.swap_service.set_slippage(*percent).await,
        (None, Some(custom)) => state.swap_service.set_custom_slippage(custom).await,
        (None, None) => Err(SwapscopeError::InvalidInput(
            "Provide percent or custom".to_string(),
        )),
    };
    result.map(Json).map_err(to_custom)
}

#[post("/api/v1/quote")]
pub async fn get_quote(state: &State<ApiState>) -> ApiResult<SessionSnapshot> {
    state.swap_service.get_quote().await.map(Json).map_err(to_custom)
}

#[get("/api/v1/routes")]
pub async fn list_routes(state: &State<ApiState>) -> Json<Vec<RouteView>> {
    Json(state.swap_service.route_views().await)
}

#[post("/api/v1/routes/<index>/select")]
pub async fn select_route(index: usize, state: &State<ApiState>) -> ApiResult<Option<SelectedRouteDetail>> {
    state
        .swap_service
        .select_route(index)
        .await
        .map(Json)
        .map_err(to_custom)
}

#[get("/api/v1/routes/selected")]
pub async fn selected_route(state: &State<ApiState>) -> Option<Json<SelectedRouteDetail>> {
    state.swap_service.selected_route().await.map(Json)
}

#[post("/api/v1/swap")]
pub async fn execute_swap(state: &State<ApiState>) -> ApiResult<TransactionParams> {
    state.swap_service.execute_swap().await.map(Json).map_err(to_custom)
}

#[get("/api/v1/state")]
pub async fn session_state(state: &State<ApiState>) -> Json<SessionSnapshot> {
    Json(state.swap_service.snapshot().await)
}

#[must_use]
pub fn create_rocket(state: ApiState) -> rocket::Rocket<rocket::Build> {
    let figment = rocket::Config::figment()
        .merge(("address", state.config.server.host.clone()))
        .merge(("port", state.config.server.port));

    rocket::custom(figment).manage(state).mount(
        "/",
        routes![
            health_check,
            metrics,
            list_chains,
            search_tokens,
            connect_wallet,
            set_pair,
            flip_pair,
            set_slippage,
            get_quote,
            list_routes,
            select_route,
            selected_route,
            execute_swap,
            session_state,
        ],
    )
}
