//! Error handling for the Chocorocks dashboard data layer
//!
//! Provides consistent error messages in English and Spanish (the dashboard
//! UI is Spanish-language). Validation errors stay local and are never sent
//! to the server; API errors are surfaced with their status and logged.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_es: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Business logic errors
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    /// A multi-step write failed after earlier steps were applied. There is
    /// no compensation; the caller must re-run a stock lookup before
    /// retrying anything.
    #[error("Operation partially applied: {0}")]
    PartiallyApplied(String),

    // External API errors
    #[error("Unauthorized")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message suitable for direct display in the Spanish-language UI
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation { message_es, .. } => message_es.clone(),
            AppError::ValidationError(msg) => format!("Datos no válidos: {}", msg),
            AppError::DuplicateEntry(what) => format!("Ya existe {}.", what),
            AppError::NotFound(resource) => format!("No se encontró {}.", resource),
            AppError::InsufficientStock(msg) => msg.clone(),
            AppError::PartiallyApplied(_) => {
                "Error al registrar la operación. Verifique el stock actualizado antes de reintentar."
                    .to_string()
            }
            AppError::Unauthorized => {
                "No tiene autorización para realizar esta acción.".to_string()
            }
            AppError::Api { .. } | AppError::Request(_) => {
                "Error de comunicación con el servidor.".to_string()
            }
            AppError::Configuration(_) | AppError::Internal(_) => {
                "Error interno de la aplicación.".to_string()
            }
        }
    }
}

/// Result type alias for the data layer
pub type AppResult<T> = Result<T, AppError>;
