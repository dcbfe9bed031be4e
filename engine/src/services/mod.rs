//! Analytics services
//!
//! Classification and predictive engines are pure functions over product,
//! movement, and batch slices; the reporting facade is the only component
//! that touches the data store.

pub mod abc;
pub mod alerts;
pub mod anomalies;
pub mod optimization;
pub mod projection;
pub mod reorder;
pub mod reporting;
pub mod rotation;
pub mod trends;
