/*
 * Comparison metrics for ranked routes and the selected-route panel
 */

use crate::models::{
    Amount, ImpactSeverity, QuoteSummary, RankLabel, Route, RouteView, SelectedRouteDetail,
};
use crate::ranking::min_received;
use crate::utils::format_token_amount;
use num_traits::{ToPrimitive, Zero};
use rust_decimal::Decimal;

pub const HIGH_IMPACT_WARNING_PERCENT: f64 = 1.0;
pub const IMPACT_NOTICE_PERCENT: f64 = 0.5;

const DEFAULT_DISPLAY_DECIMALS: u8 = 18;

pub struct RouteAnalyzer {
    slippage_percent: Decimal,
    dest_decimals: u8,
}

impl Default for RouteAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slippage_percent: Decimal::ZERO,
            dest_decimals: DEFAULT_DISPLAY_DECIMALS,
        }
    }

    #[must_use]
    pub fn with_slippage(mut self, slippage_percent: Decimal) -> Self {
        self.slippage_percent = slippage_percent;
        self
    }

    #[must_use]
    pub fn with_dest_decimals(mut self, decimals: u8) -> Self {
        self.dest_decimals = decimals;
        self
    }

    /// Percentage by which `output` trails `best`, to six places.
    #[must_use]
    pub fn relative_to_best(best: &Amount, output: &Amount) -> Decimal {
        let (best, output, _) = best.aligned(output);
        if best.is_zero() || output >= best {
            return Decimal::ZERO;
        }
        let micro_percent = ((best.clone() - output) * 100_000_000u64 + &best / 2u32) / &best;
        micro_percent
            .to_i64()
            .map_or(Decimal::ZERO, |value| Decimal::new(value, 6))
    }

    #[must_use]
    pub fn impact_severity(impact_percent: f64) -> ImpactSeverity {
        if impact_percent < 0.1 {
            ImpactSeverity::Low
        } else if impact_percent < 1.0 {
            ImpactSeverity::Moderate
        } else if impact_percent < 3.0 {
            ImpactSeverity::High
        } else {
            ImpactSeverity::Severe
        }
    }

    fn rank_label(routes: &[Route], index: usize) -> RankLabel {
        if routes.len() == 1 {
            return RankLabel::Only;
        }
        if index == 0 {
            return RankLabel::BestRate;
        }
        let behind = Self::relative_to_best(&routes[0].dest_amount, &routes[index].dest_amount);
        RankLabel::Behind(behind.round_dp(2))
    }

    #[must_use]
    pub fn route_views(&self, routes: &[Route], selected: usize) -> Vec<RouteView> {
        routes
            .iter()
            .enumerate()
            .map(|(index, route)| {
                let impact = route.price_impact.filter(|impact| *impact > 0.0);
                RouteView {
                    index,
                    route: route.clone(),
                    dest_amount_display: format_token_amount(&route.dest_amount, self.dest_decimals),
                    rank: Self::rank_label(routes, index),
                    min_received: (!self.slippage_percent.is_zero())
                        .then(|| min_received(&route.dest_amount, self.slippage_percent)),
                    impact_severity: impact.map(Self::impact_severity),
                    high_impact_warning: impact
                        .is_some_and(|impact| impact > HIGH_IMPACT_WARNING_PERCENT),
                    selected: index == selected,
                }
            })
            .collect()
    }

    /// Detail panel for `selected`, falling back to the best route when the
    /// index no longer exists.
    #[must_use]
    pub fn selected_detail(
        &self,
        routes: &[Route],
        selected: usize,
        summary: Option<&QuoteSummary>,
    ) -> Option<SelectedRouteDetail> {
        let index = if selected < routes.len() { selected } else { 0 };
        let route = routes.get(index)?;

        let gas_estimate = route
            .gas_usd
            .clone()
            .or_else(|| summary.map(|s| s.gas_cost.clone()))
            .unwrap_or_else(|| "0".to_string());
        let gas_cost_usd = route
            .gas_cost_usd
            .clone()
            .or_else(|| summary.map(|s| s.gas_cost_usd.clone()))
            .unwrap_or_else(|| "0".to_string());

        Some(SelectedRouteDetail {
            index,
            exchange: route.exchange.clone(),
            dest_amount: route.dest_amount.clone(),
            dest_amount_display: format_token_amount(&route.dest_amount, self.dest_decimals),
            min_received: min_received(&route.dest_amount, self.slippage_percent),
            gas_estimate,
            gas_cost_usd,
            impact_notice: route
                .price_impact
                .filter(|impact| *impact > IMPACT_NOTICE_PERCENT),
            can_execute: !route.dest_amount.is_zero(),
        })
    }
}
