//! # affirm-client
//!
//! Affirm charge API client for affirm-pay-rs.
//!
//! This crate is the request/response dispatch layer: it turns an abstract
//! charge operation into a concrete HTTP call and classifies the raw reply
//! into a typed outcome.
//!
//! - **endpoint** — URL resolution across the two API generations
//!   (`/api/v1` transactions, `/api/v2` charges) and the
//!   production/sandbox host pair
//! - **request** — per-operation validation and wire-payload construction
//! - **transport** — the HTTP round trip: Basic auth, TLS 1.2 floor,
//!   4xx/5xx returned as data
//! - **classify** — provider-quirk-aware success/failure/redirect
//!   classification per operation
//! - **gateway** — the caller-facing `Gateway` with the six operation
//!   constructors
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use affirm_client::Gateway;
//! use affirm_core::{AuthorizeParams, CaptureParams};
//!
//! let gateway = Gateway::from_env()?;
//!
//! let auth = gateway
//!     .authorize(AuthorizeParams::default().with_checkout_token(token))
//!     .send()
//!     .await?;
//!
//! if auth.successful {
//!     let reference = auth.transaction_reference.unwrap();
//!     gateway
//!         .capture(CaptureParams::default().with_transaction_reference(reference))
//!         .send()
//!         .await?;
//! }
//! ```

pub mod classify;
pub mod endpoint;
pub mod gateway;
pub mod request;
pub mod transport;

// Re-exports
pub use classify::classify;
pub use endpoint::{resolve, resolve_with_base, LIVE_HOST, SANDBOX_HOST};
pub use gateway::{Gateway, PendingOperation};
pub use request::{BuiltRequest, HttpMethod};
pub use transport::{basic_auth_header, HttpRequest, ReqwestTransport, Transport};
