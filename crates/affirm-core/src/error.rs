//! # Gateway Error Types
//!
//! Typed error handling for the affirm-pay charge gateway.
//! All gateway operations return `Result<T, GatewayError>`.
//!
//! Business declines and redirect-pending outcomes are *not* errors: the
//! provider acknowledged the request, so they travel inside
//! [`OperationResult`](crate::OperationResult) where callers inspect
//! `successful` / `redirect_url` instead of catching exceptions.

use thiserror::Error;

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A required request field is missing; raised before any network call
    #[error("Missing required parameter: {field}")]
    Validation { field: &'static str },

    /// Network/DNS/TLS error communicating with the provider.
    /// Distinct from a business decline: no charge attempt was acknowledged.
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GatewayError {
    /// Returns true if this error is retryable.
    ///
    /// Only network faults qualify. Validation and configuration errors are
    /// deterministic, and provider declines never surface here at all.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Network(_))
    }

    /// Returns true if the error was raised before any request left the host
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            GatewayError::Validation { .. } | GatewayError::Configuration(_)
        )
    }
}

/// Result type alias for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GatewayError::Network("timeout".into()).is_retryable());
        assert!(!GatewayError::Validation { field: "transaction_reference" }.is_retryable());
        assert!(!GatewayError::Configuration("missing key".into()).is_retryable());
    }

    #[test]
    fn test_local_errors() {
        assert!(GatewayError::Validation { field: "checkout_token" }.is_local());
        assert!(GatewayError::Configuration("bad".into()).is_local());
        assert!(!GatewayError::Network("refused".into()).is_local());
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = GatewayError::Validation { field: "transaction_reference" };
        assert_eq!(
            err.to_string(),
            "Missing required parameter: transaction_reference"
        );
    }
}
