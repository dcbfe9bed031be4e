//! Aggregation & projection layer
//!
//! Turns classified collections into KPI maps, chart descriptors, and
//! tabular structures. All user-facing strings are selected through the
//! explicit `Language` parameter; the numeric computation behind each
//! projection lives in the classifier modules and never sees the locale.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use shared::{Chart, ChartSeries, ChartType, Language, Product, ReportType, Scalar, TableData};

use crate::services::abc::AbcClassification;
use crate::services::alerts::{AlertAnalysis, AlertLevel};
use crate::services::anomalies::{AnomalyKind, AnomalyScan, Severity};
use crate::services::optimization::{ConfidenceTier, StockSuggestion};
use crate::services::reorder::{ReorderPrediction, Urgency};
use crate::services::rotation::{RotationAnalysis, RotationCategory};
use crate::services::trends::{TrendAnalysis, TrendDirection};

/// How many products the per-day consumption chart keeps
const CHART_TOP_PER_DAY: usize = 5;

/// How many products the ABC value chart keeps
const CHART_TOP_VALUES: usize = 10;

/// Projected report body: KPIs, charts, and table
#[derive(Debug, Clone)]
pub struct Projection {
    pub kpis: BTreeMap<String, Scalar>,
    pub charts: Vec<Chart>,
    pub table: TableData,
}

/// A table column: label plus whether totals may sum it
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub label: String,
    pub numeric: bool,
}

impl ColumnSpec {
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            numeric: false,
        }
    }

    pub fn numeric(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            numeric: true,
        }
    }
}

/// Builds a `TableData` from a fixed ordered column schema; headers define
/// the column order, rows map header to cell
#[derive(Debug, Clone)]
pub struct TableBuilder {
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<Scalar>>,
    total_label: Option<(usize, String)>,
}

impl TableBuilder {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            total_label: None,
        }
    }

    /// Request a totals row; `column` names the cell that carries the
    /// localized TOTAL marker
    pub fn total_label(mut self, column: usize, label: impl Into<String>) -> Self {
        self.total_label = Some((column, label.into()));
        self
    }

    pub fn push_row(&mut self, cells: Vec<Scalar>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(cells);
    }

    pub fn build(self) -> TableData {
        let headers: Vec<String> = self.columns.iter().map(|c| c.label.clone()).collect();

        let rows = self
            .rows
            .iter()
            .map(|cells| {
                headers
                    .iter()
                    .zip(cells.iter())
                    .map(|(header, cell)| (header.clone(), cell.to_string()))
                    .collect::<BTreeMap<String, String>>()
            })
            .collect();

        let totals = self.total_label.map(|(label_column, label)| {
            self.columns
                .iter()
                .enumerate()
                .map(|(index, column)| {
                    let cell = if column.numeric {
                        sum_cells(self.rows.iter().filter_map(|row| row.get(index))).to_string()
                    } else if index == label_column {
                        label.clone()
                    } else {
                        String::new()
                    };
                    (column.label.clone(), cell)
                })
                .collect()
        });

        TableData {
            headers,
            rows,
            totals,
        }
    }
}

/// Sum a numeric column; homogeneous columns keep their representation,
/// mixed ones fall back to floating point
fn sum_cells<'a>(cells: impl Iterator<Item = &'a Scalar>) -> Scalar {
    let mut ints = 0i64;
    let mut floats = 0.0f64;
    let mut money = Decimal::ZERO;
    let mut has_float = false;
    let mut has_money = false;

    for cell in cells {
        match cell {
            Scalar::Int(v) => ints += v,
            Scalar::Float(v) => {
                floats += v;
                has_float = true;
            }
            Scalar::Decimal(v) => {
                money += v;
                has_money = true;
            }
            Scalar::Text(_) => {}
        }
    }

    if has_money && !has_float {
        Scalar::Decimal(money + Decimal::from(ints))
    } else if has_float || has_money {
        Scalar::Float(floats + ints as f64 + money.to_f64().unwrap_or(0.0))
    } else {
        Scalar::Int(ints)
    }
}

fn tr(language: Language, en: &str, es: &str) -> String {
    match language {
        Language::English => en.to_string(),
        Language::Spanish => es.to_string(),
    }
}

/// Localized report title
pub fn report_title(report_type: ReportType, language: Language) -> String {
    match report_type {
        ReportType::AbcAnalysis => tr(
            language,
            "ABC Classification (Pareto)",
            "Clasificación ABC (Pareto)",
        ),
        ReportType::StockRotation => tr(language, "Stock Rotation", "Rotación de Stock"),
        ReportType::LowStock => tr(language, "Low Stock Alerts", "Alertas de Stock Bajo"),
        ReportType::ReorderPrediction => {
            tr(language, "Reorder Predictions", "Predicción de Reposición")
        }
        ReportType::StockOptimization => tr(
            language,
            "Stock Optimization Suggestions",
            "Sugerencias de Optimización de Stock",
        ),
        ReportType::BatchAnomalies => tr(language, "Batch Anomalies", "Anomalías de Lotes"),
        ReportType::ConsumptionTrends => {
            tr(language, "Consumption Trends", "Tendencias de Consumo")
        }
    }
}

fn total_marker(language: Language) -> String {
    tr(language, "TOTAL", "TOTAL")
}

fn money_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn optional_int(value: Option<i64>) -> Scalar {
    match value {
        Some(v) => Scalar::Int(v),
        None => Scalar::Text(String::new()),
    }
}

fn optional_float(value: Option<f64>) -> Scalar {
    match value {
        Some(v) => Scalar::Float(v),
        None => Scalar::Text(String::new()),
    }
}

// ============================================================================
// Localized classification labels
// ============================================================================

fn rotation_label(category: RotationCategory, language: Language) -> String {
    match category {
        RotationCategory::Fast => tr(language, "Fast", "Rápida"),
        RotationCategory::Medium => tr(language, "Medium", "Media"),
        RotationCategory::Slow => tr(language, "Slow", "Lenta"),
        RotationCategory::None => tr(language, "No rotation", "Sin rotación"),
    }
}

fn alert_label(level: AlertLevel, language: Language) -> String {
    match level {
        AlertLevel::Critical => tr(language, "Critical", "Crítico"),
        AlertLevel::High => tr(language, "High", "Alto"),
        AlertLevel::Medium => tr(language, "Medium", "Medio"),
        AlertLevel::Normal => tr(language, "Normal", "Normal"),
    }
}

fn urgency_label(urgency: Urgency, language: Language) -> String {
    match urgency {
        Urgency::Urgent => tr(language, "Urgent", "Urgente"),
        Urgency::Warning => tr(language, "Warning", "Advertencia"),
    }
}

fn tier_label(tier: ConfidenceTier, language: Language) -> String {
    match tier {
        ConfidenceTier::High => tr(language, "High", "Alta"),
        ConfidenceTier::Medium => tr(language, "Medium", "Media"),
        ConfidenceTier::Low => tr(language, "Low", "Baja"),
    }
}

fn kind_label(kind: AnomalyKind, language: Language) -> String {
    match kind {
        AnomalyKind::HighDefectRate => tr(language, "High defect rate", "Tasa de defectos alta"),
        AnomalyKind::BlockedTooLong => {
            tr(language, "Blocked too long", "Bloqueado demasiado tiempo")
        }
        AnomalyKind::ExpiringSoon => tr(language, "Expiring soon", "Próximo a vencer"),
    }
}

fn severity_label(severity: Severity, language: Language) -> String {
    match severity {
        Severity::Critical => tr(language, "Critical", "Crítica"),
        Severity::High => tr(language, "High", "Alta"),
        Severity::Medium => tr(language, "Medium", "Media"),
    }
}

fn direction_label(direction: TrendDirection, language: Language) -> String {
    match direction {
        TrendDirection::Increasing => tr(language, "Increasing", "En aumento"),
        TrendDirection::Decreasing => tr(language, "Decreasing", "En descenso"),
        TrendDirection::Stable => tr(language, "Stable", "Estable"),
    }
}

// ============================================================================
// Per-report projections
// ============================================================================

/// Project an ABC classification into KPIs, charts, and table
pub fn project_abc(classification: &AbcClassification, language: Language) -> Projection {
    let mut kpis = BTreeMap::new();
    kpis.insert(
        "product_count".to_string(),
        Scalar::Int(classification.entries.len() as i64),
    );
    kpis.insert(
        "total_value".to_string(),
        Scalar::Decimal(classification.total_value),
    );
    kpis.insert(
        "total_value_at_cost".to_string(),
        Scalar::Decimal(classification.total_value_at_cost),
    );
    kpis.insert("count_a".to_string(), Scalar::Int(classification.a.count as i64));
    kpis.insert("count_b".to_string(), Scalar::Int(classification.b.count as i64));
    kpis.insert("count_c".to_string(), Scalar::Int(classification.c.count as i64));
    kpis.insert("value_a".to_string(), Scalar::Decimal(classification.a.value));
    kpis.insert("value_b".to_string(), Scalar::Decimal(classification.b.value));
    kpis.insert("value_c".to_string(), Scalar::Decimal(classification.c.value));

    let share_chart = Chart {
        chart_type: ChartType::Pie,
        title: tr(
            language,
            "Value share by category",
            "Participación del valor por categoría",
        ),
        labels: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        series: vec![ChartSeries {
            name: tr(language, "Value", "Valor"),
            data: vec![
                money_f64(classification.a.value),
                money_f64(classification.b.value),
                money_f64(classification.c.value),
            ],
        }],
    };

    let top = classification
        .entries
        .iter()
        .take(CHART_TOP_VALUES)
        .collect::<Vec<_>>();
    let top_chart = Chart {
        chart_type: ChartType::Bar,
        title: tr(language, "Top products by value", "Productos con mayor valor"),
        labels: top.iter().map(|e| e.code.clone()).collect(),
        series: vec![ChartSeries {
            name: tr(language, "Value", "Valor"),
            data: top.iter().map(|e| money_f64(e.value)).collect(),
        }],
    };

    let mut table = TableBuilder::new(vec![
        ColumnSpec::text(tr(language, "Code", "Código")),
        ColumnSpec::text(tr(language, "Product", "Producto")),
        ColumnSpec::numeric(tr(language, "Stock", "Existencias")),
        ColumnSpec::text(tr(language, "Unit value", "Valor unitario")),
        ColumnSpec::numeric(tr(language, "Value", "Valor")),
        ColumnSpec::numeric(tr(language, "% of value", "% del valor")),
        ColumnSpec::text(tr(language, "Cumulative %", "% acumulado")),
        ColumnSpec::text(tr(language, "Category", "Categoría")),
    ])
    .total_label(0, total_marker(language));

    for entry in &classification.entries {
        table.push_row(vec![
            Scalar::Text(entry.code.clone()),
            Scalar::Text(entry.name.clone()),
            Scalar::Int(entry.stock_current),
            Scalar::Decimal(entry.unit_value),
            Scalar::Decimal(entry.value),
            Scalar::Decimal(entry.percentage),
            Scalar::Decimal(entry.cumulative_percentage),
            Scalar::Text(entry.category.as_str().to_string()),
        ]);
    }

    Projection {
        kpis,
        charts: vec![share_chart, top_chart],
        table: table.build(),
    }
}

/// Project a rotation analysis
pub fn project_rotation(analysis: &RotationAnalysis, language: Language) -> Projection {
    let mut kpis = BTreeMap::new();
    kpis.insert(
        "product_count".to_string(),
        Scalar::Int(analysis.entries.len() as i64),
    );
    kpis.insert(
        "count_fast".to_string(),
        Scalar::Int(analysis.count(RotationCategory::Fast) as i64),
    );
    kpis.insert(
        "count_medium".to_string(),
        Scalar::Int(analysis.count(RotationCategory::Medium) as i64),
    );
    kpis.insert(
        "count_slow".to_string(),
        Scalar::Int(analysis.count(RotationCategory::Slow) as i64),
    );
    kpis.insert(
        "count_none".to_string(),
        Scalar::Int(analysis.count(RotationCategory::None) as i64),
    );

    let finite: Vec<f64> = analysis
        .entries
        .iter()
        .filter(|e| e.days_of_rotation.is_finite())
        .map(|e| e.days_of_rotation)
        .collect();
    let average_days = if finite.is_empty() {
        0.0
    } else {
        finite.iter().sum::<f64>() / finite.len() as f64
    };
    kpis.insert(
        "average_days_of_rotation".to_string(),
        Scalar::Float(average_days),
    );

    let categories = [
        RotationCategory::Fast,
        RotationCategory::Medium,
        RotationCategory::Slow,
        RotationCategory::None,
    ];
    let chart = Chart {
        chart_type: ChartType::Bar,
        title: tr(
            language,
            "Products per rotation category",
            "Productos por categoría de rotación",
        ),
        labels: categories
            .iter()
            .map(|c| rotation_label(*c, language))
            .collect(),
        series: vec![ChartSeries {
            name: tr(language, "Products", "Productos"),
            data: categories
                .iter()
                .map(|c| analysis.count(*c) as f64)
                .collect(),
        }],
    };

    let mut table = TableBuilder::new(vec![
        ColumnSpec::text(tr(language, "Code", "Código")),
        ColumnSpec::text(tr(language, "Product", "Producto")),
        ColumnSpec::numeric(tr(language, "Stock", "Existencias")),
        ColumnSpec::numeric(tr(language, "Consumed", "Consumido")),
        ColumnSpec::text(tr(language, "Daily consumption", "Consumo diario")),
        ColumnSpec::text(tr(language, "Days of rotation", "Días de rotación")),
        ColumnSpec::text(tr(language, "Category", "Categoría")),
    ])
    .total_label(0, total_marker(language));

    for entry in &analysis.entries {
        table.push_row(vec![
            Scalar::Text(entry.code.clone()),
            Scalar::Text(entry.name.clone()),
            Scalar::Int(entry.stock_current),
            Scalar::Int(entry.total_consumed),
            Scalar::Float(entry.average_daily_consumption),
            Scalar::Float(entry.reported_days()),
            Scalar::Text(rotation_label(entry.category, language)),
        ]);
    }

    Projection {
        kpis,
        charts: vec![chart],
        table: table.build(),
    }
}

/// Project a low-stock tiering
pub fn project_alerts(analysis: &AlertAnalysis, language: Language) -> Projection {
    let mut kpis = BTreeMap::new();
    kpis.insert(
        "product_count".to_string(),
        Scalar::Int(analysis.alerts.len() as i64),
    );
    kpis.insert(
        "count_critical".to_string(),
        Scalar::Int(analysis.summary.critical as i64),
    );
    kpis.insert(
        "count_high".to_string(),
        Scalar::Int(analysis.summary.high as i64),
    );
    kpis.insert(
        "count_medium".to_string(),
        Scalar::Int(analysis.summary.medium as i64),
    );
    kpis.insert(
        "count_normal".to_string(),
        Scalar::Int(analysis.summary.normal as i64),
    );

    let levels = [
        AlertLevel::Critical,
        AlertLevel::High,
        AlertLevel::Medium,
        AlertLevel::Normal,
    ];
    let counts = [
        analysis.summary.critical,
        analysis.summary.high,
        analysis.summary.medium,
        analysis.summary.normal,
    ];
    let chart = Chart {
        chart_type: ChartType::Bar,
        title: tr(
            language,
            "Products per alert level",
            "Productos por nivel de alerta",
        ),
        labels: levels.iter().map(|l| alert_label(*l, language)).collect(),
        series: vec![ChartSeries {
            name: tr(language, "Products", "Productos"),
            data: counts.iter().map(|c| *c as f64).collect(),
        }],
    };

    // Most severe first
    let mut ordered: Vec<_> = analysis.alerts.iter().collect();
    ordered.sort_by_key(|alert| {
        let rank = match alert.level {
            AlertLevel::Critical => 0,
            AlertLevel::High => 1,
            AlertLevel::Medium => 2,
            AlertLevel::Normal => 3,
        };
        (rank, alert.code.clone())
    });

    let mut table = TableBuilder::new(vec![
        ColumnSpec::text(tr(language, "Code", "Código")),
        ColumnSpec::text(tr(language, "Product", "Producto")),
        ColumnSpec::text(tr(language, "Warehouse", "Almacén")),
        ColumnSpec::numeric(tr(language, "Stock", "Existencias")),
        ColumnSpec::numeric(tr(language, "Minimum", "Mínimo")),
        ColumnSpec::text(tr(language, "Level", "Nivel")),
        ColumnSpec::text(tr(language, "Days to depletion", "Días hasta agotarse")),
        ColumnSpec::text(tr(language, "Suggested reorder", "Reposición sugerida")),
    ])
    .total_label(0, total_marker(language));

    for alert in ordered {
        table.push_row(vec![
            Scalar::Text(alert.code.clone()),
            Scalar::Text(alert.name.clone()),
            Scalar::Text(alert.warehouse.clone()),
            Scalar::Int(alert.stock_current),
            Scalar::Int(alert.stock_min),
            Scalar::Text(alert_label(alert.level, language)),
            optional_int(alert.days_until_depletion),
            optional_float(alert.suggested_reorder),
        ]);
    }

    Projection {
        kpis,
        charts: vec![chart],
        table: table.build(),
    }
}

/// Project reorder predictions
pub fn project_reorder(predictions: &[ReorderPrediction], language: Language) -> Projection {
    let urgent = predictions
        .iter()
        .filter(|p| p.urgency == Urgency::Urgent)
        .count();

    let mut kpis = BTreeMap::new();
    kpis.insert(
        "prediction_count".to_string(),
        Scalar::Int(predictions.len() as i64),
    );
    kpis.insert("count_urgent".to_string(), Scalar::Int(urgent as i64));
    kpis.insert(
        "count_warning".to_string(),
        Scalar::Int((predictions.len() - urgent) as i64),
    );

    let chart = Chart {
        chart_type: ChartType::Bar,
        title: tr(
            language,
            "Days until minimum stock",
            "Días hasta el stock mínimo",
        ),
        labels: predictions.iter().map(|p| p.code.clone()).collect(),
        series: vec![ChartSeries {
            name: tr(language, "Days", "Días"),
            data: predictions.iter().map(|p| p.days_until_min).collect(),
        }],
    };

    let mut table = TableBuilder::new(vec![
        ColumnSpec::text(tr(language, "Code", "Código")),
        ColumnSpec::text(tr(language, "Product", "Producto")),
        ColumnSpec::numeric(tr(language, "Stock", "Existencias")),
        ColumnSpec::numeric(tr(language, "Minimum", "Mínimo")),
        ColumnSpec::text(tr(language, "Daily consumption", "Consumo diario")),
        ColumnSpec::text(tr(language, "Days until minimum", "Días hasta el mínimo")),
        ColumnSpec::text(tr(language, "Predicted date", "Fecha prevista")),
        ColumnSpec::numeric(tr(language, "Suggested quantity", "Cantidad sugerida")),
        ColumnSpec::text(tr(language, "Confidence", "Confianza")),
        ColumnSpec::text(tr(language, "Urgency", "Urgencia")),
    ])
    .total_label(0, total_marker(language));

    for prediction in predictions {
        table.push_row(vec![
            Scalar::Text(prediction.code.clone()),
            Scalar::Text(prediction.name.clone()),
            Scalar::Int(prediction.stock_current),
            Scalar::Int(prediction.stock_min),
            Scalar::Float(prediction.average_daily_consumption),
            Scalar::Float(prediction.days_until_min),
            Scalar::Text(prediction.predicted_min_date.to_string()),
            Scalar::Int(prediction.suggested_reorder_quantity),
            Scalar::Float(prediction.confidence),
            Scalar::Text(urgency_label(prediction.urgency, language)),
        ]);
    }

    Projection {
        kpis,
        charts: vec![chart],
        table: table.build(),
    }
}

/// Project stock-optimization suggestions
pub fn project_optimization(suggestions: &[StockSuggestion], language: Language) -> Projection {
    let count_for = |tier: ConfidenceTier| {
        suggestions.iter().filter(|s| s.tier == tier).count() as i64
    };

    let mut kpis = BTreeMap::new();
    kpis.insert(
        "suggestion_count".to_string(),
        Scalar::Int(suggestions.len() as i64),
    );
    kpis.insert(
        "count_high_confidence".to_string(),
        Scalar::Int(count_for(ConfidenceTier::High)),
    );
    kpis.insert(
        "count_medium_confidence".to_string(),
        Scalar::Int(count_for(ConfidenceTier::Medium)),
    );
    kpis.insert(
        "count_low_confidence".to_string(),
        Scalar::Int(count_for(ConfidenceTier::Low)),
    );

    let chart = Chart {
        chart_type: ChartType::Bar,
        title: tr(
            language,
            "Current vs suggested minimum",
            "Mínimo actual frente al sugerido",
        ),
        labels: suggestions.iter().map(|s| s.code.clone()).collect(),
        series: vec![
            ChartSeries {
                name: tr(language, "Current minimum", "Mínimo actual"),
                data: suggestions.iter().map(|s| s.current_min as f64).collect(),
            },
            ChartSeries {
                name: tr(language, "Suggested minimum", "Mínimo sugerido"),
                data: suggestions.iter().map(|s| s.suggested_min as f64).collect(),
            },
        ],
    };

    let mut table = TableBuilder::new(vec![
        ColumnSpec::text(tr(language, "Code", "Código")),
        ColumnSpec::text(tr(language, "Product", "Producto")),
        ColumnSpec::numeric(tr(language, "Current minimum", "Mínimo actual")),
        ColumnSpec::numeric(tr(language, "Suggested minimum", "Mínimo sugerido")),
        ColumnSpec::numeric(tr(language, "Suggested maximum", "Máximo sugerido")),
        ColumnSpec::text(tr(language, "Daily consumption", "Consumo diario")),
        ColumnSpec::text(tr(language, "Confidence", "Confianza")),
        ColumnSpec::text(tr(language, "Tier", "Nivel")),
    ])
    .total_label(0, total_marker(language));

    for suggestion in suggestions {
        table.push_row(vec![
            Scalar::Text(suggestion.code.clone()),
            Scalar::Text(suggestion.name.clone()),
            Scalar::Int(suggestion.current_min),
            Scalar::Int(suggestion.suggested_min),
            Scalar::Int(suggestion.suggested_max),
            Scalar::Float(suggestion.average_daily_consumption),
            Scalar::Float(suggestion.confidence),
            Scalar::Text(tier_label(suggestion.tier, language)),
        ]);
    }

    Projection {
        kpis,
        charts: vec![chart],
        table: table.build(),
    }
}

/// Project a batch anomaly scan; `products` resolves product names
pub fn project_anomalies(
    scan: &AnomalyScan,
    products: &[Product],
    language: Language,
) -> Projection {
    let names: HashMap<Uuid, &str> = products
        .iter()
        .map(|p| (p.id, p.name.as_str()))
        .collect();

    let mut kpis = BTreeMap::new();
    kpis.insert(
        "anomaly_count".to_string(),
        Scalar::Int(scan.anomalies.len() as i64),
    );
    kpis.insert("count_critical".to_string(), Scalar::Int(scan.critical as i64));
    kpis.insert("count_high".to_string(), Scalar::Int(scan.high as i64));
    kpis.insert("count_medium".to_string(), Scalar::Int(scan.medium as i64));

    let chart = Chart {
        chart_type: ChartType::Pie,
        title: tr(
            language,
            "Anomalies by severity",
            "Anomalías por severidad",
        ),
        labels: vec![
            severity_label(Severity::Critical, language),
            severity_label(Severity::High, language),
            severity_label(Severity::Medium, language),
        ],
        series: vec![ChartSeries {
            name: tr(language, "Anomalies", "Anomalías"),
            data: vec![scan.critical as f64, scan.high as f64, scan.medium as f64],
        }],
    };

    let mut table = TableBuilder::new(vec![
        ColumnSpec::text(tr(language, "Batch", "Lote")),
        ColumnSpec::text(tr(language, "Product", "Producto")),
        ColumnSpec::text(tr(language, "Anomaly", "Anomalía")),
        ColumnSpec::text(tr(language, "Severity", "Severidad")),
        ColumnSpec::numeric(tr(language, "Total quantity", "Cantidad total")),
        ColumnSpec::numeric(tr(language, "Defective quantity", "Cantidad defectuosa")),
        ColumnSpec::text(tr(language, "Days blocked", "Días bloqueado")),
        ColumnSpec::text(tr(language, "Days to expiry", "Días hasta vencer")),
    ])
    .total_label(0, total_marker(language));

    for anomaly in &scan.anomalies {
        table.push_row(vec![
            Scalar::Text(anomaly.batch_number.clone()),
            Scalar::Text(
                names
                    .get(&anomaly.product_id)
                    .copied()
                    .unwrap_or_default()
                    .to_string(),
            ),
            Scalar::Text(kind_label(anomaly.kind, language)),
            Scalar::Text(severity_label(anomaly.severity, language)),
            Scalar::Int(anomaly.quantity_total),
            Scalar::Int(anomaly.quantity_defective),
            optional_int(anomaly.days_blocked),
            optional_int(anomaly.days_until_expiry),
        ]);
    }

    Projection {
        kpis,
        charts: vec![chart],
        table: table.build(),
    }
}

/// Project a consumption trend analysis; `products` resolves codes for the
/// per-day chart
pub fn project_trends(
    analysis: &TrendAnalysis,
    products: &[Product],
    language: Language,
) -> Projection {
    let codes: HashMap<Uuid, &str> = products
        .iter()
        .map(|p| (p.id, p.code.as_str()))
        .collect();

    let direction_count = |direction: TrendDirection| {
        analysis
            .products
            .iter()
            .filter(|p| p.direction == direction)
            .count() as i64
    };

    let mut kpis = BTreeMap::new();
    kpis.insert(
        "total_consumed".to_string(),
        Scalar::Int(analysis.total_consumed),
    );
    kpis.insert(
        "adjustment_volume".to_string(),
        Scalar::Int(analysis.adjustment_volume),
    );
    kpis.insert(
        "active_days".to_string(),
        Scalar::Int(analysis.daily.len() as i64),
    );
    kpis.insert(
        "average_daily".to_string(),
        Scalar::Float(crate::metrics::average_daily_consumption(
            analysis.total_consumed,
            analysis.window.days(),
        )),
    );
    kpis.insert(
        "count_increasing".to_string(),
        Scalar::Int(direction_count(TrendDirection::Increasing)),
    );
    kpis.insert(
        "count_decreasing".to_string(),
        Scalar::Int(direction_count(TrendDirection::Decreasing)),
    );
    kpis.insert(
        "count_stable".to_string(),
        Scalar::Int(direction_count(TrendDirection::Stable)),
    );

    let daily_chart = Chart {
        chart_type: ChartType::Bar,
        title: tr(language, "Daily consumption", "Consumo diario"),
        labels: analysis.daily.iter().map(|d| d.date.to_string()).collect(),
        series: vec![ChartSeries {
            name: tr(language, "Consumed", "Consumido"),
            data: analysis.daily.iter().map(|d| d.total as f64).collect(),
        }],
    };

    // Per-day breakdown reduced to each day's top products
    let mut charted: Vec<Uuid> = Vec::new();
    for bucket in &analysis.daily {
        for share in bucket.breakdown.iter().take(CHART_TOP_PER_DAY) {
            if !charted.contains(&share.product_id) {
                charted.push(share.product_id);
            }
        }
    }
    let breakdown_chart = Chart {
        chart_type: ChartType::Bar,
        title: tr(
            language,
            "Top products per day",
            "Productos principales por día",
        ),
        labels: analysis.daily.iter().map(|d| d.date.to_string()).collect(),
        series: charted
            .iter()
            .map(|product_id| ChartSeries {
                name: codes.get(product_id).copied().unwrap_or_default().to_string(),
                data: analysis
                    .daily
                    .iter()
                    .map(|bucket| {
                        bucket
                            .breakdown
                            .iter()
                            .take(CHART_TOP_PER_DAY)
                            .find(|share| share.product_id == *product_id)
                            .map_or(0.0, |share| share.quantity as f64)
                    })
                    .collect(),
            })
            .collect(),
    };

    let mut table = TableBuilder::new(vec![
        ColumnSpec::text(tr(language, "Code", "Código")),
        ColumnSpec::text(tr(language, "Product", "Producto")),
        ColumnSpec::numeric(tr(language, "Total consumed", "Total consumido")),
        ColumnSpec::numeric(tr(language, "First half", "Primera mitad")),
        ColumnSpec::numeric(tr(language, "Second half", "Segunda mitad")),
        ColumnSpec::text(tr(language, "Trend", "Tendencia")),
    ])
    .total_label(0, total_marker(language));

    for trend in &analysis.products {
        table.push_row(vec![
            Scalar::Text(trend.code.clone()),
            Scalar::Text(trend.name.clone()),
            Scalar::Int(trend.total_consumed),
            Scalar::Int(trend.first_half),
            Scalar::Int(trend.second_half),
            Scalar::Text(direction_label(trend.direction, language)),
        ]);
    }

    Projection {
        kpis,
        charts: vec![daily_chart, breakdown_chart],
        table: table.build(),
    }
}
