//! Stock movement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Types of stock movements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
    Transfer,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Adjustment => "adjustment",
            MovementType::Transfer => "transfer",
        }
    }
}

/// A stock movement record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub batch_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub movement_type: MovementType,
    /// Signed for adjustments, non-negative otherwise
    pub quantity: i64,
    pub movement_date: DateTime<Utc>,
    pub warehouse: String,
    pub reason: Option<String>,
}

impl Movement {
    pub fn is_outbound(&self) -> bool {
        self.movement_type == MovementType::Out
    }

    /// Magnitude that accumulates into adjustment volume
    pub fn adjustment_magnitude(&self) -> i64 {
        match self.movement_type {
            MovementType::Adjustment => self.quantity.abs(),
            _ => 0,
        }
    }
}
