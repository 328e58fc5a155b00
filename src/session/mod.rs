/*
 * Swap view model: inputs, last quote, selected route
 */

use crate::aggregator::{RateRequest, TxRequest};
use crate::analytics::RouteAnalyzer;
use crate::models::{
    QuoteSummary, Result, Route, RouteView, SelectedRouteDetail, SwapSide, SwapscopeError, Token,
};
use crate::ranking::{normalize_routes, summarize};
use crate::tokens::chain_name;
use crate::utils::to_base_units;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

pub const HIGH_SLIPPAGE_PERCENT: Decimal = Decimal::from_parts(3, 0, 0, false, 0);
pub const DEFAULT_SLIPPAGE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

#[must_use]
pub fn slippage_presets() -> [Decimal; 4] {
    [
        Decimal::new(1, 1),
        Decimal::new(5, 1),
        Decimal::new(10, 1),
        Decimal::new(30, 1),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuoteTicket(u64);

/// A normalized aggregator answer together with the request that produced it.
#[derive(Debug, Clone)]
pub struct Quote {
    pub request: RateRequest,
    pub routes: Vec<Route>,
    pub summary: QuoteSummary,
    pub price_route: Value,
}

impl Quote {
    #[must_use]
    pub fn from_price_route(request: RateRequest, price_route: Value) -> Self {
        let routes = normalize_routes(&price_route, &request.amount);
        let summary = summarize(&price_route, &request.amount);
        Self {
            request,
            routes,
            summary,
            price_route,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub chain_id: u64,
    pub chain_name: String,
    pub user_address: Option<String>,
    pub from_token: Option<Token>,
    pub to_token: Option<Token>,
    pub amount: String,
    pub slippage_percent: Decimal,
    pub high_slippage_warning: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub init_error: Option<String>,
    pub summary: Option<QuoteSummary>,
    pub routes: Vec<RouteView>,
    pub selected: Option<SelectedRouteDetail>,
}

#[derive(Debug, Clone)]
pub struct SwapSession {
    chain_id: u64,
    user_address: Option<String>,
    from_token: Option<Token>,
    to_token: Option<Token>,
    amount: String,
    slippage_percent: Decimal,
    quote: Option<Quote>,
    selected_route: usize,
    error: Option<String>,
    init_error: Option<String>,
    loading: bool,
    latest_ticket: u64,
}

impl SwapSession {
    #[must_use]
    pub fn new(chain_id: u64, slippage_percent: Decimal) -> Self {
        Self {
            chain_id,
            user_address: None,
            from_token: None,
            to_token: None,
            amount: String::new(),
            slippage_percent,
            quote: None,
            selected_route: 0,
            error: None,
            init_error: None,
            loading: false,
            latest_ticket: 0,
        }
    }

    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    #[must_use]
    pub fn slippage_percent(&self) -> Decimal {
        self.slippage_percent
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn routes(&self) -> &[Route] {
        self.quote
            .as_ref()
            .map(|quote| quote.routes.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&QuoteSummary> {
        self.quote.as_ref().map(|quote| &quote.summary)
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_route
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Tokens are chain specific, so switching chains drops the pair, any
    /// quote made on the old chain, and any quote still in flight.
    pub fn connect(&mut self, user_address: String, chain_id: u64) {
        if chain_id != self.chain_id {
            self.from_token = None;
            self.to_token = None;
            self.quote = None;
            self.selected_route = 0;
            self.latest_ticket += 1;
            self.loading = false;
        }
        self.chain_id = chain_id;
        self.user_address = Some(user_address);
    }

    pub fn set_init_error(&mut self, message: Option<String>) {
        self.init_error = message;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn set_from_token(&mut self, token: Token) {
        self.from_token = Some(token);
    }

    pub fn set_to_token(&mut self, token: Token) {
        self.to_token = Some(token);
    }

    pub fn flip_tokens(&mut self) {
        std::mem::swap(&mut self.from_token, &mut self.to_token);
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn set_slippage(&mut self, slippage_percent: Decimal) -> Result<()> {
        if slippage_percent < Decimal::ZERO || slippage_percent > Decimal::ONE_HUNDRED {
            return Err(SwapscopeError::InvalidInput(format!(
                "Slippage must be between 0 and 100, got {slippage_percent}"
            )));
        }
        self.slippage_percent = slippage_percent;
        Ok(())
    }

    /// Free-text slippage; unparsable or zero input falls back to the default.
    pub fn set_custom_slippage(&mut self, input: &str) -> Result<()> {
        let parsed = Decimal::from_str(input.trim())
            .ok()
            .filter(|value| !value.is_zero())
            .unwrap_or(DEFAULT_SLIPPAGE_PERCENT);
        self.set_slippage(parsed)
    }

    #[must_use]
    pub fn high_slippage_warning(&self) -> bool {
        self.slippage_percent > HIGH_SLIPPAGE_PERCENT
    }

    #[must_use]
    pub fn slippage_bps(&self) -> u32 {
        (self.slippage_percent * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
            .unwrap_or(0)
    }

    pub fn quote_request(&self) -> Result<RateRequest> {
        if let Some(message) = &self.init_error {
            return Err(SwapscopeError::SdkInit(message.clone()));
        }
        let user_address = self
            .user_address
            .clone()
            .ok_or(SwapscopeError::WalletNotConnected)?;
        let (from, to) = match (&self.from_token, &self.to_token) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(SwapscopeError::InvalidInput(
                    "Select both tokens".to_string(),
                ))
            }
        };
        if from.address.eq_ignore_ascii_case(&to.address) {
            return Err(SwapscopeError::InvalidInput(
                "Choose two different tokens".to_string(),
            ));
        }

        Ok(RateRequest {
            src_token: from.address.to_lowercase(),
            dest_token: to.address.to_lowercase(),
            amount: to_base_units(&self.amount, from.decimals)?,
            user_address,
            side: SwapSide::Sell,
            src_decimals: from.decimals,
            dest_decimals: to.decimals,
            include_dexs: Vec::new(),
            exclude_dexs: Vec::new(),
        })
    }

    pub fn begin_quote(&mut self) -> QuoteTicket {
        self.latest_ticket += 1;
        self.loading = true;
        self.error = None;
        QuoteTicket(self.latest_ticket)
    }

    /// Returns `false` when a newer quote was started after `ticket`.
    pub fn apply_quote(&mut self, ticket: QuoteTicket, quote: Quote) -> bool {
        if ticket.0 != self.latest_ticket {
            return false;
        }
        self.quote = Some(quote);
        self.selected_route = 0;
        self.loading = false;
        self.error = None;
        true
    }

    /// Records the failure; the previous quote and selection stay as they were.
    pub fn fail_quote(&mut self, ticket: QuoteTicket, message: impl Into<String>) -> bool {
        if ticket.0 != self.latest_ticket {
            return false;
        }
        self.loading = false;
        self.error = Some(message.into());
        true
    }

    pub fn select_route(&mut self, index: usize) -> Result<()> {
        let count = self.routes().len();
        if index >= count {
            return Err(SwapscopeError::InvalidInput(format!(
                "Route {index} does not exist ({count} routes)"
            )));
        }
        self.selected_route = index;
        Ok(())
    }

    fn analyzer(&self) -> RouteAnalyzer {
        let dest_decimals = self
            .quote
            .as_ref()
            .map(|quote| quote.request.dest_decimals)
            .or_else(|| self.to_token.as_ref().map(|token| token.decimals));

        let analyzer = RouteAnalyzer::new().with_slippage(self.slippage_percent);
        match dest_decimals {
            Some(decimals) => analyzer.with_dest_decimals(decimals),
            None => analyzer,
        }
    }

    #[must_use]
    pub fn route_views(&self) -> Vec<RouteView> {
        self.analyzer().route_views(self.routes(), self.selected_route)
    }

    #[must_use]
    pub fn selected_detail(&self) -> Option<SelectedRouteDetail> {
        self.analyzer()
            .selected_detail(self.routes(), self.selected_route, self.summary())
    }

    /// Transaction request for the last quote, built with the current slippage.
    pub fn swap_request(&self, partner: &str) -> Result<TxRequest> {
        let user_address = self
            .user_address
            .clone()
            .ok_or(SwapscopeError::WalletNotConnected)?;
        let quote = self
            .quote
            .as_ref()
            .ok_or_else(|| SwapscopeError::InvalidInput("Get a quote first".to_string()))?;
        let executable = self.selected_detail().is_some_and(|detail| detail.can_execute);
        if !executable {
            return Err(SwapscopeError::InvalidInput(
                "Select route to swap".to_string(),
            ));
        }

        Ok(TxRequest {
            src_token: quote.request.src_token.clone(),
            dest_token: quote.request.dest_token.clone(),
            src_amount: quote.request.amount.clone(),
            src_decimals: quote.request.src_decimals,
            dest_decimals: quote.request.dest_decimals,
            slippage_bps: self.slippage_bps(),
            price_route: quote.price_route.clone(),
            user_address,
            partner: partner.to_string(),
        })
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            chain_id: self.chain_id,
            chain_name: chain_name(self.chain_id),
            user_address: self.user_address.clone(),
            from_token: self.from_token.clone(),
            to_token: self.to_token.clone(),
            amount: self.amount.clone(),
            slippage_percent: self.slippage_percent,
            high_slippage_warning: self.high_slippage_warning(),
            loading: self.loading,
            error: self.error.clone(),
            init_error: self.init_error.clone(),
            summary: self.summary().cloned(),
            routes: self.route_views(),
            selected: self.selected_detail(),
        }
    }
}
