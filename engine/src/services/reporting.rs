//! Report assembly facade
//!
//! Stateless: each call is `(report_type, filters, language) -> Report`.
//! The facade resolves the analysis window, performs at most one fetch per
//! entity kind, runs the pure engines, and wraps the projection into an
//! immutable report snapshot. Adapter failures surface as a single
//! `DataUnavailable` error, never as an empty report.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use shared::{
    validate_report_filters, DateRange, Language, Movement, Product, Report, ReportFilters,
    ReportType,
};

use crate::config::AnalyticsConfig;
use crate::error::{AppError, AppResult};
use crate::services::projection::{self, Projection};
use crate::services::{abc, alerts, anomalies, optimization, reorder, rotation, trends};
use crate::store::{BatchFilter, InventoryStore, MovementFilter, ProductFilter};

/// Report assembly facade over a read-only inventory store
#[derive(Clone)]
pub struct ReportService<S> {
    store: S,
    config: AnalyticsConfig,
}

impl<S: InventoryStore> ReportService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, AnalyticsConfig::default())
    }

    pub fn with_config(store: S, config: AnalyticsConfig) -> Self {
        Self { store, config }
    }

    /// Facade with tunables loaded from config file and environment
    pub fn from_env(store: S) -> AppResult<Self> {
        let config = AnalyticsConfig::load()?;
        Ok(Self::with_config(store, config))
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Generate a report snapshot
    pub async fn generate_report(
        &self,
        report_type: ReportType,
        filters: &ReportFilters,
        language: Language,
    ) -> AppResult<Report> {
        validate_filters(filters)?;

        let now = Utc::now();
        tracing::info!(
            report_type = report_type.as_str(),
            language = language.code(),
            "generating report"
        );

        let result = match report_type {
            ReportType::AbcAnalysis => self.abc_analysis(filters, language).await,
            ReportType::StockRotation => self.stock_rotation(filters, language, now).await,
            ReportType::LowStock => self.low_stock(filters, language).await,
            ReportType::ReorderPrediction => {
                self.reorder_prediction(filters, language, now).await
            }
            ReportType::StockOptimization => {
                self.stock_optimization(filters, language, now).await
            }
            ReportType::BatchAnomalies => self.batch_anomalies(filters, language, now).await,
            ReportType::ConsumptionTrends => {
                self.consumption_trends(filters, language, now).await
            }
        };

        let projection = match result {
            Ok(projection) => projection,
            Err(err) => {
                tracing::error!(error = %err, "report generation failed");
                return Err(err);
            }
        };

        Ok(Report {
            id: Uuid::new_v4(),
            report_type,
            title: projection::report_title(report_type, language),
            generated_at: now,
            filters: filters.clone(),
            kpis: projection.kpis,
            charts: projection.charts,
            table_data: projection.table,
        })
    }

    /// Analysis window: explicit filter dates win, otherwise a trailing
    /// window of `default_days` ending now
    fn window(
        &self,
        filters: &ReportFilters,
        default_days: i64,
        now: DateTime<Utc>,
    ) -> DateRange {
        let range = match (filters.date_from, filters.date_to) {
            (Some(from), Some(to)) => DateRange::new(from, to),
            (Some(from), None) => DateRange::new(from, now),
            (None, Some(to)) => DateRange::ending_at(to, default_days),
            (None, None) => DateRange::ending_at(now, default_days),
        };
        tracing::debug!(from = %range.from, to = %range.to, "resolved analysis window");
        range
    }

    async fn fetch_products(&self, filters: &ReportFilters) -> AppResult<Vec<Product>> {
        let products = self
            .store
            .list_products(&ProductFilter::from_report_filters(filters))
            .await?;
        Ok(products)
    }

    /// One product fetch and one movement range fetch, concurrently
    async fn fetch_products_and_movements(
        &self,
        filters: &ReportFilters,
        window: DateRange,
    ) -> AppResult<(Vec<Product>, Vec<Movement>)> {
        let product_filter = ProductFilter::from_report_filters(filters);
        let movement_filter = MovementFilter::from_report_filters(filters, window);
        let (products, movements) = tokio::try_join!(
            self.store.list_products(&product_filter),
            self.store.list_movements(&movement_filter),
        )?;
        Ok((products, movements))
    }

    async fn abc_analysis(
        &self,
        filters: &ReportFilters,
        language: Language,
    ) -> AppResult<Projection> {
        let products = self.fetch_products(filters).await?;
        let classification = abc::classify(&products);
        tracing::debug!(
            products = products.len(),
            classified = classification.entries.len(),
            "abc classification complete"
        );
        Ok(projection::project_abc(&classification, language))
    }

    async fn stock_rotation(
        &self,
        filters: &ReportFilters,
        language: Language,
        now: DateTime<Utc>,
    ) -> AppResult<Projection> {
        let window = self.window(filters, self.config.default_window_days, now);
        let (products, movements) = self.fetch_products_and_movements(filters, window).await?;
        let analysis = rotation::categorize(&products, &movements, &window);
        Ok(projection::project_rotation(&analysis, language))
    }

    async fn low_stock(
        &self,
        filters: &ReportFilters,
        language: Language,
    ) -> AppResult<Projection> {
        let products = self.fetch_products(filters).await?;
        let analysis = alerts::tier(&products);
        tracing::debug!(
            products = products.len(),
            critical = analysis.summary.critical,
            "low-stock tiering complete"
        );
        Ok(projection::project_alerts(&analysis, language))
    }

    async fn reorder_prediction(
        &self,
        filters: &ReportFilters,
        language: Language,
        now: DateTime<Utc>,
    ) -> AppResult<Projection> {
        let window = self.window(filters, self.config.consumption_window_days, now);
        let (products, movements) = self.fetch_products_and_movements(filters, window).await?;
        let predictions = reorder::predict(
            &products,
            &movements,
            &window,
            self.config.reorder_horizon_days,
            self.config.confidence_observation_target,
        );
        Ok(projection::project_reorder(&predictions, language))
    }

    async fn stock_optimization(
        &self,
        filters: &ReportFilters,
        language: Language,
        now: DateTime<Utc>,
    ) -> AppResult<Projection> {
        let window = self.window(filters, self.config.consumption_window_days, now);
        let (products, movements) = self.fetch_products_and_movements(filters, window).await?;
        let suggestions = optimization::suggest(
            &products,
            &movements,
            &window,
            self.config.coverage_days,
            self.config.optimization_tolerance,
            self.config.confidence_observation_target,
        );
        Ok(projection::project_optimization(&suggestions, language))
    }

    async fn batch_anomalies(
        &self,
        filters: &ReportFilters,
        language: Language,
        now: DateTime<Utc>,
    ) -> AppResult<Projection> {
        let product_filter = ProductFilter::from_report_filters(filters);
        let batch_filter = BatchFilter::from_report_filters(filters);
        let (products, batches) = tokio::try_join!(
            self.store.list_products(&product_filter),
            self.store.list_batches(&batch_filter),
        )?;
        let scan = anomalies::detect(&batches, now);
        tracing::debug!(
            batches = batches.len(),
            anomalies = scan.anomalies.len(),
            "anomaly scan complete"
        );
        Ok(projection::project_anomalies(&scan, &products, language))
    }

    async fn consumption_trends(
        &self,
        filters: &ReportFilters,
        language: Language,
        now: DateTime<Utc>,
    ) -> AppResult<Projection> {
        let window = self.window(filters, self.config.default_window_days, now);
        let (products, movements) = self.fetch_products_and_movements(filters, window).await?;
        let analysis = trends::analyze(&products, &movements, &window);
        Ok(projection::project_trends(&analysis, &products, language))
    }
}

/// Filter validation runs before any adapter call
fn validate_filters(filters: &ReportFilters) -> AppResult<()> {
    if let Err(message) = validate_report_filters(filters) {
        return Err(AppError::Validation {
            field: "date_from".to_string(),
            message: message.to_string(),
            message_es: "la fecha inicial no puede ser posterior a la fecha final".to_string(),
        });
    }
    Ok(())
}
