//! Validation utilities for the Warehouse Inventory Management Platform

use chrono::{DateTime, Utc};

use crate::models::{Movement, MovementType, Product, ReportFilters};

/// Validate that an optional date window is correctly ordered
pub fn validate_date_window(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<(), &'static str> {
    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err("date_from must not be after date_to");
        }
    }
    Ok(())
}

/// Validate report filters before any data access
pub fn validate_report_filters(filters: &ReportFilters) -> Result<(), &'static str> {
    validate_date_window(filters.date_from, filters.date_to)
}

/// Validate product stock invariants
pub fn validate_product(product: &Product) -> Result<(), &'static str> {
    if product.stock_current < 0 {
        return Err("stock_current cannot be negative");
    }
    if product.stock_min < 0 {
        return Err("stock_min cannot be negative");
    }
    if let Some(max) = product.stock_max {
        if max < product.stock_min {
            return Err("stock_max cannot be below stock_min");
        }
    }
    Ok(())
}

/// Validate the per-type movement quantity rule: adjustments may be signed,
/// every other type must be non-negative
pub fn validate_movement(movement: &Movement) -> Result<(), &'static str> {
    match movement.movement_type {
        MovementType::Adjustment => Ok(()),
        _ if movement.quantity < 0 => Err("quantity cannot be negative for this movement type"),
        _ => Ok(()),
    }
}
