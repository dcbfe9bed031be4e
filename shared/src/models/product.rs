//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stocked product (read-only view; lifecycle belongs to the data store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    /// Unique product code (e.g., "PRD-2024-0001")
    pub code: String,
    pub name: String,
    pub cost_price: Option<Decimal>,
    pub sale_price: Option<Decimal>,
    pub stock_current: i64,
    pub stock_min: i64,
    pub stock_max: Option<i64>,
    pub warehouse: String,
    pub aisle: Option<String>,
    pub shelf: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    pub is_batch_tracked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Unit value for classification: sale price, falling back to cost
    pub fn unit_value(&self) -> Decimal {
        self.sale_price
            .or(self.cost_price)
            .unwrap_or(Decimal::ZERO)
    }

    /// Current stock valued at `unit_value`
    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.stock_current) * self.unit_value()
    }
}
