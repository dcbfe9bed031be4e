//! Report value objects produced by the analytics engine
//!
//! Reports are pure snapshots: created fresh on every invocation and never
//! mutated after construction.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Report types supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    AbcAnalysis,
    StockRotation,
    LowStock,
    ReorderPrediction,
    StockOptimization,
    BatchAnomalies,
    ConsumptionTrends,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::AbcAnalysis => "abc_analysis",
            ReportType::StockRotation => "stock_rotation",
            ReportType::LowStock => "low_stock",
            ReportType::ReorderPrediction => "reorder_prediction",
            ReportType::StockOptimization => "stock_optimization",
            ReportType::BatchAnomalies => "batch_anomalies",
            ReportType::ConsumptionTrends => "consumption_trends",
        }
    }
}

/// Filter parameters echoed back into every report
///
/// No defaults are baked in; each report chooses its own window when dates
/// are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilters {
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub warehouse: Option<String>,
    pub category: Option<String>,
    pub product_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub include_inactive: bool,
}

/// A typed scalar used for KPI values and table cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
}

impl Scalar {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Int(v) => serde_json::json!(v),
            Scalar::Float(v) => serde_json::json!(v),
            Scalar::Decimal(v) => serde_json::json!(v),
            Scalar::Text(v) => serde_json::json!(v),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{:.2}", v),
            Scalar::Decimal(v) => write!(f, "{}", v.round_dp(2)),
            Scalar::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Chart shapes in current scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Bar,
    Pie,
}

/// A named numeric series within a chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<f64>,
}

/// A chart descriptor consumed by rendering layers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chart {
    pub chart_type: ChartType,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Tabular projection; `headers` order is the column order, rows map each
/// header to its cell, missing cells read as empty strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<BTreeMap<String, String>>,
}

/// An assembled report snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub report_type: ReportType,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub filters: ReportFilters,
    pub kpis: BTreeMap<String, Scalar>,
    pub charts: Vec<Chart>,
    pub table_data: TableData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Int(42).to_string(), "42");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.50");
        assert_eq!(
            Scalar::Decimal(Decimal::from_str("1234.567").unwrap()).to_string(),
            "1234.57"
        );
        assert_eq!(Scalar::Text("A".to_string()).to_string(), "A");
    }

    #[test]
    fn test_scalar_serializes_untagged() {
        assert_eq!(Scalar::Int(7).to_json(), serde_json::json!(7));
        assert_eq!(
            serde_json::to_value(Scalar::Text("fast".to_string())).unwrap(),
            serde_json::json!("fast")
        );
    }

    #[test]
    fn test_report_type_as_str() {
        assert_eq!(ReportType::AbcAnalysis.as_str(), "abc_analysis");
        assert_eq!(ReportType::ConsumptionTrends.as_str(), "consumption_trends");
    }
}
