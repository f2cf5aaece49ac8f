//! Error types for the matching core
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Malformed order input, raised before any book is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A price or quantity that could not be built from text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("not a decimal number: {0}")]
    Malformed(String),

    #[error("out of range: {0}")]
    OutOfRange(rust_decimal::Decimal),
}

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Order with ID {order_id} not found.")]
    NotFound { order_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("price", "must be greater than zero");
        assert_eq!(err.to_string(), "price: must be greater than zero");
    }

    #[test]
    fn test_not_found_display() {
        let err = OrderError::NotFound {
            order_id: "nonexistent".to_string(),
        };
        assert_eq!(err.to_string(), "Order with ID nonexistent not found.");
    }

    #[test]
    fn test_engine_error_from_validation() {
        let engine_err: EngineError = ValidationError::new("asset", "must not be empty").into();
        assert!(matches!(engine_err, EngineError::Validation(_)));
    }

    #[test]
    fn test_engine_error_from_order_error() {
        let engine_err: EngineError = OrderError::NotFound {
            order_id: "1".to_string(),
        }
        .into();
        assert_eq!(engine_err.to_string(), "Order with ID 1 not found.");
    }
}
