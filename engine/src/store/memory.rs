//! In-memory inventory store
//!
//! Reference adapter used by tests and embedders that already hold their
//! data; applies the same filter semantics expected from hosted adapters.

use async_trait::async_trait;

use shared::{Batch, Movement, Product};

use super::{BatchFilter, InventoryStore, MovementFilter, ProductFilter, StoreError};

/// Inventory store backed by plain vectors
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    products: Vec<Product>,
    movements: Vec<Movement>,
    batches: Vec<Batch>,
}

impl InMemoryStore {
    pub fn new(products: Vec<Product>, movements: Vec<Movement>, batches: Vec<Batch>) -> Self {
        Self {
            products,
            movements,
            batches,
        }
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .products
            .iter()
            .filter(|p| filter.include_inactive || p.is_active)
            .filter(|p| {
                filter
                    .warehouse
                    .as_ref()
                    .map_or(true, |w| &p.warehouse == w)
            })
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |c| p.category.as_ref() == Some(c))
            })
            .filter(|p| filter.product_id.map_or(true, |id| p.id == id))
            .cloned()
            .collect())
    }

    async fn list_movements(&self, filter: &MovementFilter) -> Result<Vec<Movement>, StoreError> {
        Ok(self
            .movements
            .iter()
            .filter(|m| {
                filter
                    .range
                    .map_or(true, |range| range.contains(m.movement_date))
            })
            .filter(|m| {
                filter
                    .warehouse
                    .as_ref()
                    .map_or(true, |w| &m.warehouse == w)
            })
            .filter(|m| filter.product_id.map_or(true, |id| m.product_id == id))
            .filter(|m| filter.user_id.map_or(true, |id| m.user_id == Some(id)))
            .filter(|m| {
                filter
                    .movement_type
                    .map_or(true, |t| m.movement_type == t)
            })
            .cloned()
            .collect())
    }

    async fn list_batches(&self, filter: &BatchFilter) -> Result<Vec<Batch>, StoreError> {
        Ok(self
            .batches
            .iter()
            .filter(|b| filter.product_id.map_or(true, |id| b.product_id == id))
            .filter(|b| filter.status.map_or(true, |s| b.status == s))
            .cloned()
            .collect())
    }
}
