/*
 * Prometheus metrics for quote and swap activity
 */

use crate::models::Result;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub quotes_requested: IntCounter,
    pub quotes_failed: IntCounter,
    pub swaps_built: IntCounter,
    pub aggregator_latency: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new_custom(Some("swapscope".to_string()), None)?;

        let quotes_requested = IntCounter::new("quotes_requested_total", "Quote requests sent to the aggregator")?;
        let quotes_failed = IntCounter::new("quotes_failed_total", "Quote requests that failed")?;
        let swaps_built = IntCounter::new("swaps_built_total", "Swap transactions built")?;
        let aggregator_latency = Histogram::with_opts(
            HistogramOpts::new("aggregator_latency_seconds", "Aggregator round-trip time")
                .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;

        registry.register(Box::new(quotes_requested.clone()))?;
        registry.register(Box::new(quotes_failed.clone()))?;
        registry.register(Box::new(swaps_built.clone()))?;
        registry.register(Box::new(aggregator_latency.clone()))?;

        Ok(Self {
            registry,
            quotes_requested,
            quotes_failed,
            swaps_built,
            aggregator_latency,
        })
    }

    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
