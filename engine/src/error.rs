//! Error handling for the Warehouse Inventory Analytics Engine
//!
//! Provides consistent error payloads in Spanish and English

use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Engine error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    // Data access errors
    #[error("Data unavailable: {0}")]
    DataUnavailable(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

/// Error payload surfaced to boundary layers (exporters, UI glue)
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_es: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation {
                field,
                message,
                message_es,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_es: message_es.clone(),
                field: Some(field.clone()),
            },
            AppError::DataUnavailable(err) => ErrorDetail {
                code: "DATA_UNAVAILABLE".to_string(),
                message_en: format!("Data store error: {}", err),
                message_es: format!("Error del almacén de datos: {}", err),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message_en: format!("Configuration error: {}", msg),
                message_es: format!("Error de configuración: {}", msg),
                field: None,
            },
            AppError::Internal(msg) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: msg.clone(),
                message_es: "Se produjo un error interno".to_string(),
                field: None,
            },
            AppError::InternalError(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: "An internal error occurred".to_string(),
                message_es: "Se produjo un error interno".to_string(),
                field: None,
            },
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias for engine operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_codes() {
        let validation = AppError::Validation {
            field: "date_from".to_string(),
            message: "bad window".to_string(),
            message_es: "ventana inválida".to_string(),
        };
        let detail = validation.detail();
        assert_eq!(detail.code, "VALIDATION_ERROR");
        assert_eq!(detail.field.as_deref(), Some("date_from"));

        let unavailable =
            AppError::DataUnavailable(StoreError::Unavailable("timeout".to_string()));
        assert_eq!(unavailable.detail().code, "DATA_UNAVAILABLE");

        let internal = AppError::InternalError(anyhow::anyhow!("boom"));
        assert_eq!(internal.detail().code, "INTERNAL_ERROR");
    }

    #[test]
    fn test_store_error_converts() {
        let err: AppError = StoreError::Query("bad sql".to_string()).into();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }
}
