//! Reorder-date prediction from trailing consumption

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{DateRange, Movement, Product};

use crate::metrics;

/// Urgency of an upcoming reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Urgent,
    Warning,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Urgent => "urgent",
            Urgency::Warning => "warning",
        }
    }
}

/// A product predicted to cross its minimum within the horizon
#[derive(Debug, Clone, Serialize)]
pub struct ReorderPrediction {
    pub product_id: Uuid,
    pub code: String,
    pub name: String,
    pub stock_current: i64,
    pub stock_min: i64,
    pub average_daily_consumption: f64,
    pub days_until_min: f64,
    /// Date the stock is expected to reach its minimum
    pub predicted_min_date: NaiveDate,
    pub suggested_reorder_quantity: i64,
    /// Data-sufficiency score in [0, 1]; not a statistical interval
    pub confidence: f64,
    pub observations: u32,
    pub urgency: Urgency,
}

/// Predict which products cross their minimum within `horizon_days`.
///
/// A prediction is emitted only when `0 < days_until_min <= horizon_days`:
/// products already at or below their minimum belong to the low-stock
/// report, not here. Results are sorted most urgent first.
pub fn predict(
    products: &[Product],
    movements: &[Movement],
    window: &DateRange,
    horizon_days: i64,
    confidence_target: u32,
) -> Vec<ReorderPrediction> {
    let consumption = metrics::out_consumption_by_product(movements, window);
    let days_in_window = window.days();
    let horizon = horizon_days as f64;

    let mut predictions: Vec<ReorderPrediction> = products
        .iter()
        .filter_map(|product| {
            let sample = consumption.get(&product.id).copied().unwrap_or_default();
            let average_daily_consumption =
                metrics::average_daily_consumption(sample.total, days_in_window);
            if average_daily_consumption <= 0.0 {
                return None;
            }

            let days_until_min =
                (product.stock_current - product.stock_min) as f64 / average_daily_consumption;
            if days_until_min <= 0.0 || days_until_min > horizon {
                return None;
            }

            let suggested_reorder_quantity =
                (product.stock_min * 2 - product.stock_current).max(product.stock_min);
            let predicted_min_date = (window.to
                + chrono::Duration::seconds((days_until_min * 86_400.0) as i64))
            .date_naive();

            Some(ReorderPrediction {
                product_id: product.id,
                code: product.code.clone(),
                name: product.name.clone(),
                stock_current: product.stock_current,
                stock_min: product.stock_min,
                average_daily_consumption,
                days_until_min,
                predicted_min_date,
                suggested_reorder_quantity,
                confidence: metrics::confidence(sample.observations, confidence_target),
                observations: sample.observations,
                urgency: if days_until_min <= 3.0 {
                    Urgency::Urgent
                } else {
                    Urgency::Warning
                },
            })
        })
        .collect();

    predictions.sort_by(|a, b| {
        a.days_until_min
            .partial_cmp(&b.days_until_min)
            .unwrap_or(Ordering::Equal)
    });
    predictions
}
