//! Warehouse Inventory Analytics & Reporting Engine
//!
//! Turns raw product, movement, and batch records into classified, scored,
//! and aggregated report artifacts: ABC classification, stock-rotation
//! categorization, reorder prediction, stock optimization, anomaly
//! detection, consumption trends, and KPI/chart/table projection.
//!
//! The engine is stateless: each report is a pure snapshot computed from a
//! single round of read-only adapter queries.

pub mod config;
pub mod error;
pub mod metrics;
pub mod services;
pub mod store;

pub use config::AnalyticsConfig;
pub use error::{AppError, AppResult};
pub use services::reporting::ReportService;
