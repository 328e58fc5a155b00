/*
 * Swap service that wires the aggregator into the view model
 */

use crate::{
    aggregator::{create_aggregator, SwapAggregator},
    config::Config,
    metrics::Metrics,
    models::{Result, RouteView, SelectedRouteDetail, SwapscopeError, Token, TransactionParams},
    session::{Quote, SessionSnapshot, SwapSession},
    tokens,
    utils::format_address,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

pub type AggregatorFactory = Box<dyn Fn(u64) -> Result<Arc<dyn SwapAggregator>> + Send + Sync>;

pub struct SwapService {
    partner: String,
    factory: AggregatorFactory,
    aggregator: RwLock<Option<Arc<dyn SwapAggregator>>>,
    session: RwLock<SwapSession>,
    metrics: Metrics,
}

impl SwapService {
    pub fn new(config: Config) -> Result<Self> {
        let aggregator_config = config.aggregator.clone();
        let factory: AggregatorFactory =
            Box::new(move |chain_id| create_aggregator(&aggregator_config, chain_id));
        Self::with_factory(config, factory)
    }

    pub fn with_factory(config: Config, factory: AggregatorFactory) -> Result<Self> {
        info!("Initializing Swap Service");

        let mut session = SwapSession::new(config.wallet.chain_id, config.default_slippage()?);
        let aggregator = match factory(config.wallet.chain_id) {
            Ok(aggregator) => {
                info!("Velora client initialized for chain {}", config.wallet.chain_id);
                Some(aggregator)
            }
            Err(e) => {
                warn!("SDK initialization error: {}", e);
                session.set_init_error(Some(e.to_string()));
                None
            }
        };

        if let Some(address) = &config.wallet.address {
            session.connect(format_address(address)?, config.wallet.chain_id);
            info!("Wallet {} connected", address);
        }

        Ok(Self {
            partner: config.aggregator.partner,
            factory,
            aggregator: RwLock::new(aggregator),
            session: RwLock::new(session),
            metrics: Metrics::new()?,
        })
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Records the account and re-initializes the aggregator for `chain_id`.
    pub async fn connect_wallet(&self, address: &str, chain_id: u64) -> Result<SessionSnapshot> {
        let address = format_address(address)?;

        let (aggregator, init_error) = match (self.factory)(chain_id) {
            Ok(aggregator) => (Some(aggregator), None),
            Err(e) => {
                warn!("SDK initialization error on chain {}: {}", chain_id, e);
                (None, Some(e.to_string()))
            }
        };

        *self.aggregator.write().await = aggregator;

        let mut session = self.session.write().await;
        session.connect(address, chain_id);
        session.set_init_error(init_error);
        info!("Connected to {}", tokens::chain_name(chain_id));
        Ok(session.snapshot())
    }

    pub async fn search_tokens(&self, term: &str) -> Vec<Token> {
        let chain_id = self.session.read().await.chain_id();
        tokens::search(chain_id, term)
    }

    /// Sets whichever of the pair and amount are given.
    pub async fn set_pair(
        &self,
        from: Option<&str>,
        to: Option<&str>,
        amount: Option<&str>,
    ) -> Result<SessionSnapshot> {
        let mut session = self.session.write().await;
        let chain_id = session.chain_id();
        let resolve = |reference: &str| {
            tokens::find(chain_id, reference).ok_or_else(|| {
                SwapscopeError::InvalidInput(format!(
                    "Unknown token {reference} on {}",
                    tokens::chain_name(chain_id)
                ))
            })
        };

        if let Some(reference) = from {
            session.set_from_token(resolve(reference)?);
        }
        if let Some(reference) = to {
            session.set_to_token(resolve(reference)?);
        }
        if let Some(amount) = amount {
            session.set_amount(amount);
        }
        Ok(session.snapshot())
    }

    pub async fn flip_tokens(&self) -> SessionSnapshot {
        let mut session = self.session.write().await;
        session.flip_tokens();
        session.snapshot()
    }

    pub async fn set_slippage(&self, slippage_percent: Decimal) -> Result<SessionSnapshot> {
        let mut session = self.session.write().await;
        session.set_slippage(slippage_percent)?;
        Ok(session.snapshot())
    }

    pub async fn set_custom_slippage(&self, input: &str) -> Result<SessionSnapshot> {
        let mut session = self.session.write().await;
        session.set_custom_slippage(input)?;
        Ok(session.snapshot())
    }

    /// One aggregator round trip. The state lock is released while the
    /// request is in flight.
    pub async fn get_quote(&self) -> Result<SessionSnapshot> {
        let aggregator = self.aggregator.read().await.clone();

        let (ticket, request, aggregator) = {
            let mut session = self.session.write().await;
            let request = match session.quote_request() {
                Ok(request) => request,
                Err(e) => {
                    session.set_error(e.to_string());
                    return Err(e);
                }
            };
            let Some(aggregator) = aggregator else {
                let e = SwapscopeError::SdkInit("Velora SDK is not initialized".to_string());
                session.set_error(e.to_string());
                return Err(e);
            };
            (session.begin_quote(), request, aggregator)
        };

        info!(
            "Requesting quote {} -> {} for {}",
            request.src_token, request.dest_token, request.amount
        );
        self.metrics.quotes_requested.inc();
        let timer = self.metrics.aggregator_latency.start_timer();
        let result = aggregator.get_rate(&request).await;
        timer.observe_duration();

        let mut session = self.session.write().await;
        match result {
            Ok(price_route) => {
                let quote = Quote::from_price_route(request, price_route);
                info!(
                    "Quote received: {} routes, destAmount {}",
                    quote.routes.len(),
                    quote.summary.dest_amount
                );
                if !session.apply_quote(ticket, quote) {
                    info!("Discarding stale quote response");
                }
                Ok(session.snapshot())
            }
            Err(e) => {
                self.metrics.quotes_failed.inc();
                error!("Error fetching swap quote: {}", e);
                session.fail_quote(ticket, e.to_string());
                Err(e)
            }
        }
    }

    pub async fn route_views(&self) -> Vec<RouteView> {
        self.session.read().await.route_views()
    }

    pub async fn select_route(&self, index: usize) -> Result<Option<SelectedRouteDetail>> {
        let mut session = self.session.write().await;
        session.select_route(index)?;
        Ok(session.selected_detail())
    }

    pub async fn selected_route(&self) -> Option<SelectedRouteDetail> {
        self.session.read().await.selected_detail()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.read().await.snapshot()
    }

    /// Builds transaction parameters for the last quote. Submission is left
    /// to the caller's wallet.
    pub async fn execute_swap(&self) -> Result<TransactionParams> {
        let request = self.session.read().await.swap_request(&self.partner)?;
        let aggregator = self
            .aggregator
            .read()
            .await
            .clone()
            .ok_or_else(|| SwapscopeError::SdkInit("Velora SDK is not initialized".to_string()))?;

        match aggregator.build_tx(&request).await {
            Ok(tx) => {
                self.metrics.swaps_built.inc();
                info!("Swap transaction built for {} -> {}", request.src_token, request.dest_token);
                Ok(tx)
            }
            Err(e) => {
                error!("Error building swap transaction: {}", e);
                self.session
                    .write()
                    .await
                    .set_error("Failed to build swap transaction");
                Err(e)
            }
        }
    }
}
