/*
 * Swapscope - DEX route comparison service
 * Core library exports and module declarations
 */

pub mod aggregator;
pub mod analytics;
pub mod api;
pub mod config;
pub mod metrics;
pub mod models;
pub mod ranking;
pub mod service;
pub mod session;
pub mod tokens;
pub mod utils;

pub use config::Config;
pub use models::*;
pub use service::SwapService;
