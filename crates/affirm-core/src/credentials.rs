//! # Gateway Credentials
//!
//! Credential context for the Affirm API.
//! All secrets are loaded from environment variables or supplied explicitly.

use crate::error::GatewayError;
use std::env;

/// Affirm API credential context.
///
/// Immutable per client instance: created at construction, read by every
/// request, never mutated mid-call. Cloning is cheap enough to share across
/// tasks.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Public API key (Basic auth username)
    pub public_key: String,

    /// Private API key (Basic auth password)
    pub private_key: String,

    /// Product key issued alongside the key pair (used by checkout flows)
    pub product_key: String,

    /// Route calls to the sandbox host instead of production
    pub test_mode: bool,
}

impl Credentials {
    /// Create credentials with explicit values
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        product_key: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            product_key: product_key.into(),
            test_mode: false,
        }
    }

    /// Load credentials from environment variables.
    ///
    /// Required env vars:
    /// - `AFFIRM_PUBLIC_KEY`
    /// - `AFFIRM_PRIVATE_KEY`
    /// - `AFFIRM_PRODUCT_KEY`
    ///
    /// Optional:
    /// - `AFFIRM_TEST_MODE` (`1`/`true` routes to the sandbox host)
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let public_key = env::var("AFFIRM_PUBLIC_KEY")
            .map_err(|_| GatewayError::Configuration("AFFIRM_PUBLIC_KEY not set".to_string()))?;

        let private_key = env::var("AFFIRM_PRIVATE_KEY")
            .map_err(|_| GatewayError::Configuration("AFFIRM_PRIVATE_KEY not set".to_string()))?;

        let product_key = env::var("AFFIRM_PRODUCT_KEY")
            .map_err(|_| GatewayError::Configuration("AFFIRM_PRODUCT_KEY not set".to_string()))?;

        if public_key.is_empty() || private_key.is_empty() {
            return Err(GatewayError::Configuration(
                "Affirm API keys must be non-empty".to_string(),
            ));
        }

        let test_mode = env::var("AFFIRM_TEST_MODE")
            .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            public_key,
            private_key,
            product_key,
            test_mode,
        })
    }

    /// Builder: enable or disable sandbox routing
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Check if calls route to the sandbox host
    pub fn is_test_mode(&self) -> bool {
        self.test_mode
    }
}
