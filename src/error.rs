//! Application error types

use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Forecast error: {0}")]
    Forecast(String),

    #[error("Input rejected: {0}")]
    InputRejected(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Serializable error response for frontend
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = match err {
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::NoData(_) => "NO_DATA",
            AppError::Forecast(_) => "FORECAST_ERROR",
            AppError::InputRejected(_) => "INPUT_REJECTED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

// Allow AppError to be returned from Tauri commands
impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        ErrorResponse::from(self).serialize(serializer)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::InputRejected("portfolio is full".to_string());
        let resp = ErrorResponse::from(&err);
        assert_eq!(resp.code, "INPUT_REJECTED");
        assert!(resp.message.contains("portfolio is full"));

        let err = AppError::NoData("AAPL".to_string());
        assert_eq!(ErrorResponse::from(&err).code, "NO_DATA");

        let err = AppError::Forecast("insufficient history".to_string());
        assert_eq!(ErrorResponse::from(&err).code, "FORECAST_ERROR");
    }
}
