//! ABC (Pareto) classification of products by stock value

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::Product;

use crate::metrics;

/// Pareto category by cumulative value share
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbcCategory {
    A,
    B,
    C,
}

impl AbcCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcCategory::A => "A",
            AbcCategory::B => "B",
            AbcCategory::C => "C",
        }
    }
}

/// A classified product with its value share
#[derive(Debug, Clone, Serialize)]
pub struct AbcEntry {
    pub product_id: Uuid,
    pub code: String,
    pub name: String,
    pub stock_current: i64,
    pub unit_value: Decimal,
    pub value: Decimal,
    pub percentage: Decimal,
    pub cumulative_percentage: Decimal,
    pub category: AbcCategory,
}

/// Per-category rollup
#[derive(Debug, Clone, Default, Serialize)]
pub struct AbcCategorySummary {
    pub count: usize,
    pub value: Decimal,
    pub percentage: Decimal,
}

/// Full classification result, entries in descending value order
#[derive(Debug, Clone, Default, Serialize)]
pub struct AbcClassification {
    pub entries: Vec<AbcEntry>,
    pub total_value: Decimal,
    /// Same stock valued at cost instead of sale
    pub total_value_at_cost: Decimal,
    pub a: AbcCategorySummary,
    pub b: AbcCategorySummary,
    pub c: AbcCategorySummary,
}

impl AbcClassification {
    pub fn summary(&self, category: AbcCategory) -> &AbcCategorySummary {
        match category {
            AbcCategory::A => &self.a,
            AbcCategory::B => &self.b,
            AbcCategory::C => &self.c,
        }
    }
}

/// Classify products by cumulative value share (80/95 cut points).
///
/// Value is `stock_current * (sale_price ?? cost_price ?? 0)`; non-positive
/// values are discarded. A zero total yields an empty classification rather
/// than a division.
pub fn classify(products: &[Product]) -> AbcClassification {
    let mut valued: Vec<(&Product, Decimal)> = products
        .iter()
        .map(|p| (p, metrics::value_at_sale(p)))
        .filter(|(_, value)| *value > Decimal::ZERO)
        .collect();

    // Descending by value; ties broken by code for deterministic output
    valued.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.code.cmp(&b.0.code)));

    let values: Vec<Decimal> = valued.iter().map(|(_, value)| *value).collect();
    let shares = metrics::cumulative_shares(&values);
    if shares.is_empty() {
        return AbcClassification::default();
    }

    let a_cutoff = Decimal::from(80);
    let b_cutoff = Decimal::from(95);

    let mut classification = AbcClassification {
        total_value: values.iter().sum(),
        total_value_at_cost: products.iter().map(metrics::value_at_cost).sum(),
        ..AbcClassification::default()
    };

    for ((product, value), (percentage, cumulative_percentage)) in
        valued.into_iter().zip(shares)
    {
        let category = if cumulative_percentage <= a_cutoff {
            AbcCategory::A
        } else if cumulative_percentage <= b_cutoff {
            AbcCategory::B
        } else {
            AbcCategory::C
        };

        let summary = match category {
            AbcCategory::A => &mut classification.a,
            AbcCategory::B => &mut classification.b,
            AbcCategory::C => &mut classification.c,
        };
        summary.count += 1;
        summary.value += value;
        summary.percentage += percentage;

        classification.entries.push(AbcEntry {
            product_id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            stock_current: product.stock_current,
            unit_value: product.unit_value(),
            value,
            percentage,
            cumulative_percentage,
            category,
        });
    }

    classification
}
