//! Consumption trend analysis
//!
//! One range fetch, in-memory bucketing by calendar day; the per-day query
//! loop that used to feed the consumption chart is deliberately gone.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{DateRange, Movement, MovementType, Product, ReportPeriod};

use crate::metrics;

/// How many products each report retains, by total consumption
const TOP_PRODUCTS: usize = 20;

/// Trend of consumption between the two halves of the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

/// One product's share of a daily bucket
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProductShare {
    pub product_id: Uuid,
    pub quantity: i64,
}

/// Consumption on one calendar day
#[derive(Debug, Clone, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub total: i64,
    /// Per-product consumption, descending
    pub breakdown: Vec<ProductShare>,
}

/// Whole-period consumption and trend for one product
#[derive(Debug, Clone, Serialize)]
pub struct ProductTrend {
    pub product_id: Uuid,
    pub code: String,
    pub name: String,
    pub total_consumed: i64,
    pub first_half: i64,
    pub second_half: i64,
    pub direction: TrendDirection,
}

/// Trend analysis over a window
#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub window: DateRange,
    /// Buckets ascending by date; days without consumption are absent
    pub daily: Vec<DailyBucket>,
    /// Top consumers, descending by total
    pub products: Vec<ProductTrend>,
    pub total_consumed: i64,
    pub adjustment_volume: i64,
}

/// Bucket OUT movements by calendar day and classify per-product trends by
/// comparing the two halves of the window.
pub fn analyze(products: &[Product], movements: &[Movement], window: &DateRange) -> TrendAnalysis {
    let midpoint = window.midpoint();

    let mut days: BTreeMap<NaiveDate, HashMap<Uuid, i64>> = BTreeMap::new();
    let mut halves: HashMap<Uuid, (i64, i64)> = HashMap::new();
    let mut total_consumed = 0;

    for movement in movements {
        if movement.movement_type != MovementType::Out || !window.contains(movement.movement_date)
        {
            continue;
        }

        total_consumed += movement.quantity;
        *days
            .entry(movement.movement_date.date_naive())
            .or_default()
            .entry(movement.product_id)
            .or_default() += movement.quantity;

        let half = halves.entry(movement.product_id).or_default();
        if movement.movement_date < midpoint {
            half.0 += movement.quantity;
        } else {
            half.1 += movement.quantity;
        }
    }

    let daily = days
        .into_iter()
        .map(|(date, by_product)| {
            let total = by_product.values().sum();
            let mut breakdown: Vec<ProductShare> = by_product
                .into_iter()
                .map(|(product_id, quantity)| ProductShare {
                    product_id,
                    quantity,
                })
                .collect();
            breakdown.sort_by(|a, b| {
                b.quantity
                    .cmp(&a.quantity)
                    .then_with(|| a.product_id.cmp(&b.product_id))
            });
            DailyBucket {
                date,
                total,
                breakdown,
            }
        })
        .collect();

    let mut trends: Vec<ProductTrend> = products
        .iter()
        .filter_map(|product| {
            let (first_half, second_half) = halves.get(&product.id).copied()?;
            Some(ProductTrend {
                product_id: product.id,
                code: product.code.clone(),
                name: product.name.clone(),
                total_consumed: first_half + second_half,
                first_half,
                second_half,
                direction: direction(first_half, second_half),
            })
        })
        .collect();
    trends.sort_by(|a, b| {
        b.total_consumed
            .cmp(&a.total_consumed)
            .then_with(|| a.code.cmp(&b.code))
    });
    trends.truncate(TOP_PRODUCTS);

    TrendAnalysis {
        window: *window,
        daily,
        products: trends,
        total_consumed,
        adjustment_volume: metrics::adjustment_volume(movements, window),
    }
}

/// Analyze over the trailing window of a nominal period ending at `now`
pub fn analyze_period(
    products: &[Product],
    movements: &[Movement],
    period: ReportPeriod,
    now: DateTime<Utc>,
) -> TrendAnalysis {
    analyze(products, movements, &period.range_ending_at(now))
}

/// `second > first * 1.1` is increasing, `second < first * 0.9` is
/// decreasing; exact in integer arithmetic
fn direction(first_half: i64, second_half: i64) -> TrendDirection {
    if 10 * second_half > 11 * first_half {
        TrendDirection::Increasing
    } else if 10 * second_half < 9 * first_half {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}
