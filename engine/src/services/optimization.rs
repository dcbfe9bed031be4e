//! Stock-threshold optimization suggestions
//!
//! EOQ-style heuristic: minimum as days of cover at the recent consumption
//! rate, maximum at twice the minimum. Not a full economic-order-quantity
//! cost optimization.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{DateRange, Movement, Product};

use crate::metrics;

/// Confidence tier of a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }

    pub fn for_confidence(confidence: f64) -> Self {
        if confidence >= 0.7 {
            ConfidenceTier::High
        } else if confidence >= 0.4 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

/// A suggested minimum/maximum revision for one product
#[derive(Debug, Clone, Serialize)]
pub struct StockSuggestion {
    pub product_id: Uuid,
    pub code: String,
    pub name: String,
    pub current_min: i64,
    pub current_max: Option<i64>,
    pub suggested_min: i64,
    pub suggested_max: i64,
    pub average_daily_consumption: f64,
    pub confidence: f64,
    pub observations: u32,
    pub tier: ConfidenceTier,
}

/// Suggest revised stock thresholds for products whose observed consumption
/// disagrees with the configured minimum.
///
/// Suggestions within `tolerance` of the current minimum are suppressed so
/// already-well-tuned thresholds stay quiet; the comparison runs in
/// `Decimal` and is exact.
pub fn suggest(
    products: &[Product],
    movements: &[Movement],
    window: &DateRange,
    coverage_days: i64,
    tolerance: Decimal,
    confidence_target: u32,
) -> Vec<StockSuggestion> {
    let consumption = metrics::out_consumption_by_product(movements, window);
    let days_in_window = window.days();

    products
        .iter()
        .filter_map(|product| {
            let sample = consumption.get(&product.id).copied().unwrap_or_default();
            let average_daily_consumption =
                metrics::average_daily_consumption(sample.total, days_in_window);

            let suggested_min =
                (average_daily_consumption * coverage_days as f64).ceil() as i64;
            let difference = (suggested_min - product.stock_min).abs();
            if Decimal::from(difference) <= Decimal::from(product.stock_min) * tolerance {
                return None;
            }

            let confidence = metrics::confidence(sample.observations, confidence_target);
            Some(StockSuggestion {
                product_id: product.id,
                code: product.code.clone(),
                name: product.name.clone(),
                current_min: product.stock_min,
                current_max: product.stock_max,
                suggested_min,
                suggested_max: suggested_min * 2,
                average_daily_consumption,
                confidence,
                observations: sample.observations,
                tier: ConfidenceTier::for_confidence(confidence),
            })
        })
        .collect()
}
