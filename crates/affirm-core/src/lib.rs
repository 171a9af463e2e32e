//! # affirm-core
//!
//! Core types for the affirm-pay-rs charge gateway.
//!
//! This crate provides:
//! - `Credentials` for the three-key Affirm credential context
//! - Per-operation parameter types (`AuthorizeParams`, `CaptureParams`, ...)
//! - `OperationResult` / `HttpOutcome` for the response data model
//! - `ApiGeneration` and `OperationKind` dispatch selectors
//! - `GatewayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use affirm_core::{AuthorizeParams, Credentials};
//!
//! let credentials = Credentials::from_env()?;
//! let params = AuthorizeParams::default()
//!     .with_checkout_token("CHECKOUT_TOKEN")
//!     .with_order_id("JKLM4321");
//!
//! // Hand params to affirm-client's Gateway to dispatch the call.
//! ```

pub mod credentials;
pub mod error;
pub mod params;
pub mod result;

// Re-exports for convenience
pub use credentials::Credentials;
pub use error::{GatewayError, GatewayResult};
pub use params::{
    AuthorizeParams, CaptureParams, FetchParams, RefundParams, ShippingInfo, UpdateParams,
    VoidParams,
};
pub use result::{
    ApiGeneration, Decline, HttpOutcome, OperationKind, OperationResult, RequestTrace,
};
