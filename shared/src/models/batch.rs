//! Batch tracking models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quality status of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Ok,
    Defective,
    Blocked,
    Expired,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Ok => "ok",
            BatchStatus::Defective => "defective",
            BatchStatus::Blocked => "blocked",
            BatchStatus::Expired => "expired",
        }
    }
}

/// A tracked batch of a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: Uuid,
    /// Unique batch number (e.g., "LOT-2024-0001")
    pub batch_number: String,
    pub product_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub status: BatchStatus,
    pub quantity_total: i64,
    pub quantity_available: i64,
    pub quantity_reserved: i64,
    pub quantity_defective: i64,
    pub expiry_date: Option<NaiveDate>,
    /// Quality score on a 0-100 scale
    pub quality_score: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Batch {
    /// Days since the batch record was last touched
    pub fn days_since_update(&self, now: DateTime<Utc>) -> i64 {
        (now - self.updated_at).num_days()
    }

    /// Days until expiry, negative when already past
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|d| (d - today).num_days())
    }
}
