//! Stock-rotation categorization from recent OUT movements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{DateRange, Movement, Product, ReportPeriod};

use crate::metrics;

/// Rotation speed bands, in days of cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationCategory {
    Fast,
    Medium,
    Slow,
    None,
}

impl RotationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationCategory::Fast => "fast",
            RotationCategory::Medium => "medium",
            RotationCategory::Slow => "slow",
            RotationCategory::None => "none",
        }
    }
}

/// Rotation figures for one product
#[derive(Debug, Clone, Serialize)]
pub struct RotationEntry {
    pub product_id: Uuid,
    pub code: String,
    pub name: String,
    pub stock_current: i64,
    pub total_consumed: i64,
    pub average_daily_consumption: f64,
    /// Internal value; `f64::INFINITY` when no consumption was observed.
    /// Use `reported_days` at output boundaries.
    pub days_of_rotation: f64,
    pub category: RotationCategory,
}

impl RotationEntry {
    /// Externally reported rotation days: the unbounded sentinel renders
    /// as zero
    pub fn reported_days(&self) -> f64 {
        if self.days_of_rotation.is_finite() {
            self.days_of_rotation
        } else {
            0.0
        }
    }
}

/// Rotation analysis over a window
#[derive(Debug, Clone, Serialize)]
pub struct RotationAnalysis {
    pub window: DateRange,
    pub entries: Vec<RotationEntry>,
}

impl RotationAnalysis {
    pub fn count(&self, category: RotationCategory) -> usize {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .count()
    }
}

/// Categorize products by days of rotation over `window`.
///
/// `days_in_window` comes from the actual window bounds, so leap-sensitive
/// ranges stay correct.
pub fn categorize(
    products: &[Product],
    movements: &[Movement],
    window: &DateRange,
) -> RotationAnalysis {
    let consumption = metrics::out_consumption_by_product(movements, window);
    let days_in_window = window.days();

    let entries = products
        .iter()
        .map(|product| {
            let sample = consumption.get(&product.id).copied().unwrap_or_default();
            let average_daily_consumption =
                metrics::average_daily_consumption(sample.total, days_in_window);
            let days_of_rotation =
                metrics::days_of_rotation(product.stock_current, average_daily_consumption);

            RotationEntry {
                product_id: product.id,
                code: product.code.clone(),
                name: product.name.clone(),
                stock_current: product.stock_current,
                total_consumed: sample.total,
                average_daily_consumption,
                days_of_rotation,
                category: categorize_days(days_of_rotation),
            }
        })
        .collect();

    RotationAnalysis {
        window: *window,
        entries,
    }
}

/// Categorize over the trailing window of a nominal period ending at `now`
pub fn categorize_period(
    products: &[Product],
    movements: &[Movement],
    period: ReportPeriod,
    now: DateTime<Utc>,
) -> RotationAnalysis {
    categorize(products, movements, &period.range_ending_at(now))
}

fn categorize_days(days: f64) -> RotationCategory {
    if days <= 30.0 {
        RotationCategory::Fast
    } else if days <= 60.0 {
        RotationCategory::Medium
    } else if days <= 90.0 {
        RotationCategory::Slow
    } else {
        // Includes the infinite no-consumption sentinel
        RotationCategory::None
    }
}
