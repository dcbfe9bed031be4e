//! Metric primitives
//!
//! Small pure estimators shared by the classification and predictive
//! engines. Every division is guarded: zero-consumption and zero-value
//! inputs are valid business states, never panics.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{DateRange, Movement, MovementType, Product};

/// OUT-movement consumption observed for one product
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumptionSample {
    pub total: i64,
    pub observations: u32,
}

/// Average units consumed per day over `days`; zero for an empty window
pub fn average_daily_consumption(total_consumed: i64, days: f64) -> f64 {
    if days <= 0.0 {
        return 0.0;
    }
    total_consumed as f64 / days
}

/// Days the current stock lasts at the given consumption rate.
///
/// `f64::INFINITY` is the internal sentinel for "no detectable
/// consumption"; it is mapped to `0` at the projection boundary so that it
/// stays distinguishable from a product that consumes and holds zero stock.
pub fn days_of_rotation(stock_current: i64, average_daily_consumption: f64) -> f64 {
    if average_daily_consumption <= 0.0 {
        return f64::INFINITY;
    }
    stock_current as f64 / average_daily_consumption
}

/// Current stock valued at cost price
pub fn value_at_cost(product: &Product) -> Decimal {
    Decimal::from(product.stock_current) * product.cost_price.unwrap_or(Decimal::ZERO)
}

/// Current stock valued at sale price, falling back to cost
pub fn value_at_sale(product: &Product) -> Decimal {
    product.stock_value()
}

/// Per-item percentage and cumulative percentage of `values`, expected in
/// descending order. Empty when the total is not positive.
pub fn cumulative_shares(values: &[Decimal]) -> Vec<(Decimal, Decimal)> {
    let total: Decimal = values.iter().sum();
    if total <= Decimal::ZERO {
        return Vec::new();
    }

    let hundred = Decimal::from(100);
    let mut cumulative = Decimal::ZERO;
    values
        .iter()
        .map(|value| {
            cumulative += *value;
            (*value / total * hundred, cumulative / total * hundred)
        })
        .collect()
}

/// Sum and count of OUT movements per product within `range`
pub fn out_consumption_by_product(
    movements: &[Movement],
    range: &DateRange,
) -> HashMap<Uuid, ConsumptionSample> {
    let mut samples: HashMap<Uuid, ConsumptionSample> = HashMap::new();
    for movement in movements {
        if movement.movement_type != MovementType::Out {
            continue;
        }
        if !range.contains(movement.movement_date) {
            continue;
        }
        let sample = samples.entry(movement.product_id).or_default();
        sample.total += movement.quantity;
        sample.observations += 1;
    }
    samples
}

/// Magnitude of adjustment movements within `range`
pub fn adjustment_volume(movements: &[Movement], range: &DateRange) -> i64 {
    movements
        .iter()
        .filter(|m| range.contains(m.movement_date))
        .map(Movement::adjustment_magnitude)
        .sum()
}

/// Data-sufficiency confidence: observations over target, capped at 1.0.
/// Not a statistical confidence interval.
pub fn confidence(observations: u32, target: u32) -> f64 {
    if target == 0 {
        return 1.0;
    }
    (observations as f64 / target as f64).min(1.0)
}
