//! Low-stock tiering with depletion and reorder hints

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::Product;

/// Stock alert bands; non-overlapping by construction, every product falls
/// into exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Critical,
    High,
    Medium,
    Normal,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "critical",
            AlertLevel::High => "high",
            AlertLevel::Medium => "medium",
            AlertLevel::Normal => "normal",
        }
    }
}

/// Alert record for one product
#[derive(Debug, Clone, Serialize)]
pub struct StockAlert {
    pub product_id: Uuid,
    pub code: String,
    pub name: String,
    pub warehouse: String,
    pub stock_current: i64,
    pub stock_min: i64,
    pub level: AlertLevel,
    /// Present for critical items only
    pub days_until_depletion: Option<i64>,
    /// Present for critical items only; may be fractional for odd minimums
    pub suggested_reorder: Option<f64>,
}

/// Count of products per band
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub normal: usize,
}

/// Tiering result
#[derive(Debug, Clone, Default, Serialize)]
pub struct AlertAnalysis {
    pub alerts: Vec<StockAlert>,
    pub summary: AlertSummary,
}

/// Band for a stock level against its minimum. Bands are compared in
/// `Decimal` so the 1.15/1.5 multipliers partition exactly.
pub fn level_for(stock_current: i64, stock_min: i64) -> AlertLevel {
    if stock_current < stock_min {
        return AlertLevel::Critical;
    }

    let stock = Decimal::from(stock_current);
    let min = Decimal::from(stock_min);
    if stock <= min * Decimal::new(115, 2) {
        AlertLevel::High
    } else if stock <= min * Decimal::new(150, 2) {
        AlertLevel::Medium
    } else {
        AlertLevel::Normal
    }
}

/// Tier every product into its alert band
pub fn tier(products: &[Product]) -> AlertAnalysis {
    let mut analysis = AlertAnalysis::default();

    for product in products {
        let level = level_for(product.stock_current, product.stock_min);

        match level {
            AlertLevel::Critical => analysis.summary.critical += 1,
            AlertLevel::High => analysis.summary.high += 1,
            AlertLevel::Medium => analysis.summary.medium += 1,
            AlertLevel::Normal => analysis.summary.normal += 1,
        }

        let (days_until_depletion, suggested_reorder) = if level == AlertLevel::Critical {
            (
                depletion_days(product.stock_current, product.stock_min),
                Some(suggested_reorder(product.stock_current, product.stock_min)),
            )
        } else {
            (None, None)
        };

        analysis.alerts.push(StockAlert {
            product_id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            warehouse: product.warehouse.clone(),
            stock_current: product.stock_current,
            stock_min: product.stock_min,
            level,
            days_until_depletion,
            suggested_reorder,
        });
    }

    analysis
}

/// `floor(stock / (min / 30))`, guarded for a zero minimum
fn depletion_days(stock_current: i64, stock_min: i64) -> Option<i64> {
    if stock_min <= 0 {
        return None;
    }
    Some(30 * stock_current / stock_min)
}

/// `max(min - stock, min * 0.5)`
fn suggested_reorder(stock_current: i64, stock_min: i64) -> f64 {
    let shortfall = (stock_min - stock_current) as f64;
    shortfall.max(stock_min as f64 * 0.5)
}
