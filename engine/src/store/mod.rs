//! Read-only data access for the analytics engine
//!
//! The engine never writes. Adapters expose filterable product, movement,
//! and batch queries against the hosted store; retry and circuit-breaking
//! policy belongs to the adapter, not to analytics logic.

mod memory;

pub use memory::InMemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use shared::{Batch, BatchStatus, DateRange, Movement, MovementType, Product, ReportFilters};

/// Failure surfaced by a data adapter
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Filter for product queries
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub warehouse: Option<String>,
    pub category: Option<String>,
    pub product_id: Option<Uuid>,
    pub include_inactive: bool,
}

impl ProductFilter {
    pub fn from_report_filters(filters: &ReportFilters) -> Self {
        Self {
            warehouse: filters.warehouse.clone(),
            category: filters.category.clone(),
            product_id: filters.product_id,
            include_inactive: filters.include_inactive,
        }
    }
}

/// Filter for movement queries
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    pub range: Option<DateRange>,
    pub warehouse: Option<String>,
    pub product_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub movement_type: Option<MovementType>,
}

impl MovementFilter {
    /// Range query derived from report filters; one fetch per report,
    /// bucketing happens in memory
    pub fn from_report_filters(filters: &ReportFilters, range: DateRange) -> Self {
        Self {
            range: Some(range),
            warehouse: filters.warehouse.clone(),
            product_id: filters.product_id,
            user_id: filters.user_id,
            movement_type: None,
        }
    }
}

/// Filter for batch queries
#[derive(Debug, Clone, Default)]
pub struct BatchFilter {
    pub product_id: Option<Uuid>,
    pub status: Option<BatchStatus>,
}

impl BatchFilter {
    pub fn from_report_filters(filters: &ReportFilters) -> Self {
        Self {
            product_id: filters.product_id,
            status: None,
        }
    }
}

/// Read-only inventory data source
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    async fn list_movements(&self, filter: &MovementFilter) -> Result<Vec<Movement>, StoreError>;

    async fn list_batches(&self, filter: &BatchFilter) -> Result<Vec<Batch>, StoreError>;
}
