//! Batch anomaly detection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{Batch, BatchStatus};

/// Independent anomaly kinds; a batch may carry several kinds but never a
/// duplicate of the same kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    HighDefectRate,
    BlockedTooLong,
    ExpiringSoon,
}

impl AnomalyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::HighDefectRate => "high_defect_rate",
            AnomalyKind::BlockedTooLong => "blocked_too_long",
            AnomalyKind::ExpiringSoon => "expiring_soon",
        }
    }
}

/// Severity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
        }
    }
}

/// A flagged batch condition
#[derive(Debug, Clone, Serialize)]
pub struct BatchAnomaly {
    pub batch_id: Uuid,
    pub batch_number: String,
    pub product_id: Uuid,
    pub kind: AnomalyKind,
    pub severity: Severity,
    pub quantity_total: i64,
    pub quantity_defective: i64,
    pub days_blocked: Option<i64>,
    pub days_until_expiry: Option<i64>,
}

/// Scan result: unordered anomaly list plus severity counts
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnomalyScan {
    pub anomalies: Vec<BatchAnomaly>,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

impl AnomalyScan {
    fn push(&mut self, anomaly: BatchAnomaly) {
        match anomaly.severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
        }
        self.anomalies.push(anomaly);
    }
}

/// Scan batches for defect, blockage, and expiry anomalies
pub fn detect(batches: &[Batch], now: DateTime<Utc>) -> AnomalyScan {
    let today = now.date_naive();
    let mut scan = AnomalyScan::default();

    for batch in batches {
        if let Some(anomaly) = defect_anomaly(batch) {
            scan.push(anomaly);
        }
        if let Some(anomaly) = blockage_anomaly(batch, now) {
            scan.push(anomaly);
        }
        if let Some(anomaly) = expiry_anomaly(batch, today) {
            scan.push(anomaly);
        }
    }

    scan
}

fn defect_anomaly(batch: &Batch) -> Option<BatchAnomaly> {
    if batch.status != BatchStatus::Defective {
        return None;
    }
    // defective > total/2, exact in integer arithmetic
    let severity = if 2 * batch.quantity_defective > batch.quantity_total {
        Severity::Critical
    } else {
        Severity::High
    };
    Some(anomaly(batch, AnomalyKind::HighDefectRate, severity, None, None))
}

fn blockage_anomaly(batch: &Batch, now: DateTime<Utc>) -> Option<BatchAnomaly> {
    if batch.status != BatchStatus::Blocked {
        return None;
    }
    let days = batch.days_since_update(now);
    if days <= 7 {
        return None;
    }
    let severity = if days > 30 {
        Severity::Critical
    } else if days > 14 {
        Severity::High
    } else {
        Severity::Medium
    };
    Some(anomaly(
        batch,
        AnomalyKind::BlockedTooLong,
        severity,
        Some(days),
        None,
    ))
}

fn expiry_anomaly(batch: &Batch, today: chrono::NaiveDate) -> Option<BatchAnomaly> {
    if batch.status != BatchStatus::Ok {
        return None;
    }
    let days = batch.days_until_expiry(today)?;
    // Past expiry with status Ok is the Expired status's job, not an
    // early warning
    if !(0..=30).contains(&days) {
        return None;
    }
    let severity = if days <= 7 {
        Severity::Critical
    } else if days <= 14 {
        Severity::High
    } else {
        Severity::Medium
    };
    Some(anomaly(
        batch,
        AnomalyKind::ExpiringSoon,
        severity,
        None,
        Some(days),
    ))
}

fn anomaly(
    batch: &Batch,
    kind: AnomalyKind,
    severity: Severity,
    days_blocked: Option<i64>,
    days_until_expiry: Option<i64>,
) -> BatchAnomaly {
    BatchAnomaly {
        batch_id: batch.id,
        batch_number: batch.batch_number.clone(),
        product_id: batch.product_id,
        kind,
        severity,
        quantity_total: batch.quantity_total,
        quantity_defective: batch.quantity_defective,
        days_blocked,
        days_until_expiry,
    }
}
