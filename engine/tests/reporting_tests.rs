//! Report assembly facade tests
//!
//! End-to-end report generation against the in-memory store: window
//! resolution, adapter failure propagation, locale separation, and the
//! export contract consumed by spreadsheet/PDF/JSON writers.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use uuid::Uuid;

use shared::{
    Batch, BatchStatus, Language, Movement, MovementType, Product, ReportFilters, ReportType,
};
use warehouse_analytics_engine::store::{
    BatchFilter, InMemoryStore, InventoryStore, MovementFilter, ProductFilter, StoreError,
};
use warehouse_analytics_engine::{AppError, ReportService};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("warehouse_analytics_engine=debug")
        .try_init()
        .ok();
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn product(code: &str, stock: i64, min: i64, sale_price: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: format!("Product {}", code),
        cost_price: None,
        sale_price: Some(dec(sale_price)),
        stock_current: stock,
        stock_min: min,
        stock_max: None,
        warehouse: "MAIN".to_string(),
        aisle: None,
        shelf: None,
        category: None,
        is_active: true,
        is_batch_tracked: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn out_movement(product_id: Uuid, quantity: i64, days_ago: i64) -> Movement {
    Movement {
        id: Uuid::new_v4(),
        product_id,
        batch_id: None,
        user_id: None,
        movement_type: MovementType::Out,
        quantity,
        movement_date: Utc::now() - Duration::days(days_ago),
        warehouse: "MAIN".to_string(),
        reason: None,
    }
}

/// Store whose every query fails, for error propagation tests
struct FailingStore;

#[async_trait]
impl InventoryStore for FailingStore {
    async fn list_products(&self, _filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_movements(
        &self,
        _filter: &MovementFilter,
    ) -> Result<Vec<Movement>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_batches(&self, _filter: &BatchFilter) -> Result<Vec<Batch>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// The five-product scenario from the classification contract
fn abc_store() -> InMemoryStore {
    let products = vec![
        product("P1", 1000, 0, "1"),
        product("P2", 500, 0, "1"),
        product("P3", 300, 0, "1"),
        product("P4", 150, 0, "1"),
        product("P5", 50, 0, "1"),
    ];
    InMemoryStore::new(products, Vec::new(), Vec::new())
}

// ============================================================================
// Report Generation
// ============================================================================

#[tokio::test]
async fn test_abc_report_end_to_end() {
    init_tracing();
    let service = ReportService::new(abc_store());

    let report = service
        .generate_report(
            ReportType::AbcAnalysis,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap();

    assert_eq!(report.report_type, ReportType::AbcAnalysis);
    assert_eq!(report.title, "ABC Classification (Pareto)");

    assert_eq!(report.kpis["product_count"].to_string(), "5");
    assert_eq!(report.kpis["count_a"].to_string(), "2");
    assert_eq!(report.kpis["count_b"].to_string(), "1");
    assert_eq!(report.kpis["count_c"].to_string(), "2");
    assert_eq!(dec(&report.kpis["total_value"].to_string()), dec("2000"));

    // Headers define the column order
    assert_eq!(
        report.table_data.headers,
        vec![
            "Code",
            "Product",
            "Stock",
            "Unit value",
            "Value",
            "% of value",
            "Cumulative %",
            "Category"
        ]
    );
    assert_eq!(report.table_data.rows.len(), 5);
    assert_eq!(report.table_data.rows[0]["Code"], "P1");
    assert_eq!(report.table_data.rows[0]["Category"], "A");
    assert_eq!(report.table_data.rows[4]["Category"], "C");

    // Totals sum numeric columns only; the label column carries the marker
    let totals = report.table_data.totals.as_ref().unwrap();
    assert_eq!(totals["Code"], "TOTAL");
    assert_eq!(totals["Product"], "");
    assert_eq!(dec(&totals["Stock"]), dec("2000"));
    assert_eq!(dec(&totals["Value"]), dec("2000"));
    assert_eq!(dec(&totals["% of value"]), dec("100"));
    assert_eq!(totals["Cumulative %"], "");

    assert_eq!(report.charts.len(), 2);
}

#[tokio::test]
async fn test_rotation_report_end_to_end() {
    let p = product("P1", 90, 0, "1");
    let movements = vec![out_movement(p.id, 90, 10)];
    let store = InMemoryStore::new(vec![p], movements, Vec::new());
    let service = ReportService::new(store);

    let report = service
        .generate_report(
            ReportType::StockRotation,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap();

    assert_eq!(report.kpis["count_fast"].to_string(), "1");
    assert_eq!(report.kpis["count_none"].to_string(), "0");
    assert_eq!(report.table_data.rows[0]["Days of rotation"], "30.00");
    assert_eq!(report.table_data.rows[0]["Category"], "Fast");
}

#[tokio::test]
async fn test_rotation_sentinel_renders_as_zero() {
    let store = InMemoryStore::new(vec![product("P1", 500, 0, "1")], Vec::new(), Vec::new());
    let service = ReportService::new(store);

    let report = service
        .generate_report(
            ReportType::StockRotation,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap();

    assert_eq!(report.kpis["count_none"].to_string(), "1");
    assert_eq!(report.table_data.rows[0]["Days of rotation"], "0.00");
    assert_eq!(report.table_data.rows[0]["Category"], "No rotation");
}

#[tokio::test]
async fn test_low_stock_report_orders_critical_first() {
    let store = InMemoryStore::new(
        vec![product("OK1", 500, 100, "1"), product("BAD", 10, 100, "1")],
        Vec::new(),
        Vec::new(),
    );
    let service = ReportService::new(store);

    let report = service
        .generate_report(
            ReportType::LowStock,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap();

    assert_eq!(report.kpis["count_critical"].to_string(), "1");
    assert_eq!(report.table_data.rows[0]["Code"], "BAD");
    assert_eq!(report.table_data.rows[0]["Level"], "Critical");
    // floor(10 / (100/30)) = 3 days of stock left
    assert_eq!(report.table_data.rows[0]["Days to depletion"], "3");
}

#[tokio::test]
async fn test_batch_anomaly_report() {
    let now = Utc::now();
    let p = product("P1", 100, 10, "1");
    let batch = Batch {
        id: Uuid::new_v4(),
        batch_number: "LOT-2024-0001".to_string(),
        product_id: p.id,
        supplier_id: None,
        status: BatchStatus::Defective,
        quantity_total: 100,
        quantity_available: 20,
        quantity_reserved: 0,
        quantity_defective: 80,
        expiry_date: None,
        quality_score: dec("40"),
        created_at: now,
        updated_at: now,
    };
    let store = InMemoryStore::new(vec![p], Vec::new(), vec![batch]);
    let service = ReportService::new(store);

    let report = service
        .generate_report(
            ReportType::BatchAnomalies,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap();

    assert_eq!(report.kpis["anomaly_count"].to_string(), "1");
    assert_eq!(report.kpis["count_critical"].to_string(), "1");
    assert_eq!(report.table_data.rows[0]["Batch"], "LOT-2024-0001");
    assert_eq!(report.table_data.rows[0]["Product"], "Product P1");
    assert_eq!(report.table_data.rows[0]["Anomaly"], "High defect rate");
}

// ============================================================================
// Input Validation & Failure Propagation
// ============================================================================

#[tokio::test]
async fn test_inverted_date_window_fails_fast() {
    let now = Utc::now();
    let service = ReportService::new(abc_store());

    let filters = ReportFilters {
        date_from: Some(now),
        date_to: Some(now - Duration::days(7)),
        ..ReportFilters::default()
    };

    let err = service
        .generate_report(ReportType::AbcAnalysis, &filters, Language::English)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(err.detail().code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_adapter_failure_is_not_an_empty_report() {
    let service = ReportService::new(FailingStore);

    let err = service
        .generate_report(
            ReportType::ConsumptionTrends,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DataUnavailable(_)));
    assert_eq!(err.detail().code, "DATA_UNAVAILABLE");
}

#[tokio::test]
async fn test_inactive_products_follow_the_filter() {
    let mut retired = product("OLD", 100, 0, "1");
    retired.is_active = false;
    let store = InMemoryStore::new(
        vec![product("P1", 100, 0, "1"), retired],
        Vec::new(),
        Vec::new(),
    );
    let service = ReportService::new(store);

    let default_report = service
        .generate_report(
            ReportType::AbcAnalysis,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap();
    assert_eq!(default_report.kpis["product_count"].to_string(), "1");

    let filters = ReportFilters {
        include_inactive: true,
        ..ReportFilters::default()
    };
    let inclusive_report = service
        .generate_report(ReportType::AbcAnalysis, &filters, Language::English)
        .await
        .unwrap();
    assert_eq!(inclusive_report.kpis["product_count"].to_string(), "2");
}

// ============================================================================
// Locale Separation & Export Contract
// ============================================================================

#[tokio::test]
async fn test_locale_switches_labels_but_never_numbers() {
    let service = ReportService::new(abc_store());
    let filters = ReportFilters::default();

    let english = service
        .generate_report(ReportType::AbcAnalysis, &filters, Language::English)
        .await
        .unwrap();
    let spanish = service
        .generate_report(ReportType::AbcAnalysis, &filters, Language::Spanish)
        .await
        .unwrap();

    // Numeric computation is locale-independent
    assert_eq!(english.kpis, spanish.kpis);
    assert_eq!(
        english.table_data.rows.len(),
        spanish.table_data.rows.len()
    );

    // Labels are not
    assert_eq!(spanish.title, "Clasificación ABC (Pareto)");
    assert!(spanish.table_data.headers.contains(&"Código".to_string()));
    assert!(english.table_data.headers.contains(&"Code".to_string()));
}

#[tokio::test]
async fn test_from_env_uses_defaults_without_overrides() {
    let service = ReportService::from_env(abc_store()).unwrap();
    assert_eq!(service.config().reorder_horizon_days, 7);
    assert_eq!(service.config().confidence_observation_target, 10);
}

#[tokio::test]
async fn test_report_snapshot_metadata() {
    let service = ReportService::new(abc_store());
    let filters = ReportFilters {
        warehouse: Some("MAIN".to_string()),
        ..ReportFilters::default()
    };

    let first = service
        .generate_report(ReportType::AbcAnalysis, &filters, Language::English)
        .await
        .unwrap();
    let second = service
        .generate_report(ReportType::AbcAnalysis, &filters, Language::English)
        .await
        .unwrap();

    // Fresh snapshot per invocation, filters echoed back
    assert_ne!(first.id, second.id);
    assert_eq!(first.filters.warehouse.as_deref(), Some("MAIN"));
    assert!(first.generated_at <= second.generated_at);
}

#[tokio::test]
async fn test_report_export_shape() {
    let service = ReportService::new(abc_store());

    let report = service
        .generate_report(
            ReportType::AbcAnalysis,
            &ReportFilters::default(),
            Language::English,
        )
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();

    // Header order survives serialization for column-ordered exporters
    assert_eq!(json["table_data"]["headers"][0], "Code");
    assert_eq!(json["table_data"]["headers"][7], "Category");
    assert_eq!(json["report_type"], "abc_analysis");

    // KPI scalars serialize untagged
    assert_eq!(json["kpis"]["count_a"], serde_json::json!(2));

    // Every row carries a cell for every header
    for row in json["table_data"]["rows"].as_array().unwrap() {
        for header in json["table_data"]["headers"].as_array().unwrap() {
            assert!(row.get(header.as_str().unwrap()).is_some());
        }
    }
}
