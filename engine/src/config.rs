//! Configuration for the analytics engine
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Optional configuration file (config/analytics.toml)
//! 3. Environment variable overrides with WIA_ prefix
//!
//! The values here are the tunable policy constants of the engine; the
//! classification cut points mandated by business policy (80/95 ABC bands,
//! rotation day bands, alert tiers) live with their engines.

use config::{ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Tunable analytics constants
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// OUT-movement observations required for full confidence.
    /// A data-sufficiency proxy, not a statistical interval; pending
    /// product-owner confirmation.
    pub confidence_observation_target: u32,

    /// Prediction horizon for reorder alerts, in days
    pub reorder_horizon_days: i64,

    /// Days of cover behind the suggested minimum stock
    pub coverage_days: i64,

    /// Relative difference below which optimization suggestions are
    /// suppressed
    pub optimization_tolerance: Decimal,

    /// Analysis window applied when filters carry no dates, in days
    pub default_window_days: i64,

    /// Trailing window for consumption-based predictors, in days
    pub consumption_window_days: i64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            confidence_observation_target: 10,
            reorder_horizon_days: 7,
            coverage_days: 30,
            optimization_tolerance: Decimal::new(2, 1),
            default_window_days: 30,
            consumption_window_days: 90,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            // Start with default values
            .set_default("confidence_observation_target", 10)?
            .set_default("reorder_horizon_days", 7)?
            .set_default("coverage_days", 30)?
            .set_default("optimization_tolerance", "0.2")?
            .set_default("default_window_days", 30)?
            .set_default("consumption_window_days", 90)?
            // Optional configuration file
            .add_source(File::with_name("config/analytics").required(false))
            // Override with environment variables (WIA_ prefix)
            .add_source(
                Environment::with_prefix("WIA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
