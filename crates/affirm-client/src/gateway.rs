//! # Affirm Gateway
//!
//! The caller-facing entry point. A `Gateway` holds the credential context
//! and a transport; each of the six operation constructors returns a
//! [`PendingOperation`] whose `send()` runs the full dispatch:
//! validate + build → resolve endpoint → transport → classify.
//!
//! ```rust,ignore
//! use affirm_client::Gateway;
//! use affirm_core::AuthorizeParams;
//!
//! let gateway = Gateway::from_env()?;
//! let result = gateway
//!     .authorize(AuthorizeParams::default().with_checkout_token(token))
//!     .send()
//!     .await?;
//!
//! if result.is_redirect() {
//!     // send the customer to result.redirect_url
//! } else if result.successful {
//!     // capture later with result.transaction_reference
//! }
//! ```

use crate::classify::classify;
use crate::endpoint;
use crate::request::{
    build_authorize, build_capture, build_fetch, build_refund, build_update, build_void,
    BuiltRequest,
};
use crate::transport::{basic_auth_header, HttpRequest, ReqwestTransport, Transport};
use affirm_core::{
    AuthorizeParams, CaptureParams, Credentials, FetchParams, GatewayError, GatewayResult,
    OperationResult, RefundParams, RequestTrace, UpdateParams, VoidParams,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Affirm charge gateway client.
///
/// Immutable after construction; safe to share across tasks. Each call is a
/// single request/response round trip with no internal retries — declined
/// operations come back as data, never as automatic re-sends.
pub struct Gateway {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
    api_base: Option<String>,
}

impl Gateway {
    /// Create a gateway with the default reqwest transport
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            transport: Arc::new(ReqwestTransport::new()),
            api_base: None,
        }
    }

    /// Create a gateway from environment variables
    pub fn from_env() -> GatewayResult<Self> {
        Ok(Self::new(Credentials::from_env()?))
    }

    /// Builder: replace the default transport timeout
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.transport = Arc::new(ReqwestTransport::with_timeout(timeout));
        self
    }

    /// Builder: inject a custom transport (test doubles, instrumentation)
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Builder: override the API base URL (for testing/mocking).
    /// Must end with `/api/`.
    pub fn with_api_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // =========================================================================
    // Operation Constructors
    // =========================================================================

    /// Authorize a charge from a checkout token (or an existing v1
    /// transaction id). No money moves until capture; uncaptured
    /// authorizations expire provider-side.
    pub fn authorize(&self, params: AuthorizeParams) -> PendingOperation<'_> {
        self.pending(OperationParams::Authorize(params))
    }

    /// Capture a previously authorized charge, converting the hold into an
    /// actual funds transfer
    pub fn capture(&self, params: CaptureParams) -> PendingOperation<'_> {
        self.pending(OperationParams::Capture(params))
    }

    /// Fetch a single transaction or a page of charges
    pub fn fetch(&self, params: FetchParams) -> PendingOperation<'_> {
        self.pending(OperationParams::Fetch(params))
    }

    /// Void an authorization before capture; a voided charge cannot be
    /// captured afterwards
    pub fn void(&self, params: VoidParams) -> PendingOperation<'_> {
        self.pending(OperationParams::Void(params))
    }

    /// Refund a captured charge, partially (`amount` in cents) or in full
    pub fn refund(&self, params: RefundParams) -> PendingOperation<'_> {
        self.pending(OperationParams::Refund(params))
    }

    /// Update shipping details and the merchant order id on a charge
    pub fn update(&self, params: UpdateParams) -> PendingOperation<'_> {
        self.pending(OperationParams::Update(params))
    }

    fn pending(&self, params: OperationParams) -> PendingOperation<'_> {
        PendingOperation {
            gateway: self,
            params,
        }
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    async fn dispatch(&self, params: OperationParams) -> GatewayResult<OperationResult> {
        // Validation failures abort here; the transport never sees them.
        let built = match &params {
            OperationParams::Authorize(p) => build_authorize(p)?,
            OperationParams::Capture(p) => build_capture(p)?,
            OperationParams::Fetch(p) => build_fetch(p)?,
            OperationParams::Void(p) => build_void(p)?,
            OperationParams::Refund(p) => build_refund(p)?,
            OperationParams::Update(p) => build_update(p)?,
        };
        self.execute(built).await
    }

    #[instrument(skip(self, built), fields(operation = %built.kind))]
    async fn execute(&self, built: BuiltRequest) -> GatewayResult<OperationResult> {
        let url = match &self.api_base {
            Some(base) => {
                endpoint::resolve_with_base(base, built.generation, &built.resource_path, &built.query)
            }
            None => endpoint::resolve(
                built.generation,
                self.credentials.test_mode,
                &built.resource_path,
                &built.query,
            ),
        };

        let body = match &built.payload {
            Some(payload) => Some(
                serde_json::to_string(payload)
                    .map_err(|e| GatewayError::Serialization(e.to_string()))?,
            ),
            None => None,
        };

        let headers = vec![
            (
                "Authorization".to_string(),
                basic_auth_header(&self.credentials.public_key, &self.credentials.private_key),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ];

        let request = HttpRequest {
            method: built.method,
            url,
            headers,
            body,
        };

        debug!(
            generation = built.generation.segment(),
            resource = %built.resource_path,
            "Dispatching charge operation"
        );

        let outcome = self.transport.send(&request).await?;
        let mut result = classify(built.kind, &outcome);

        // Sandbox diagnostics ride along as a side channel, never mixed into
        // the parsed business fields.
        if self.credentials.test_mode {
            result.trace = Some(RequestTrace {
                method: request.method.as_str().to_string(),
                endpoint: request.url.to_string(),
                request_headers: request.headers.clone(),
                request_body: request.body.clone(),
                response_status: outcome.status,
                response_body: outcome.raw_body.clone(),
            });
        }

        if result.successful {
            info!(
                status = outcome.status,
                reference = result.transaction_reference.as_deref().unwrap_or(""),
                "Operation accepted"
            );
        } else if result.is_redirect() {
            info!(status = outcome.status, "Operation pending out-of-band approval");
        } else {
            warn!(
                status = outcome.status,
                message = result.message.as_deref().unwrap_or(""),
                "Operation declined"
            );
        }

        Ok(result)
    }
}

enum OperationParams {
    Authorize(AuthorizeParams),
    Capture(CaptureParams),
    Fetch(FetchParams),
    Void(VoidParams),
    Refund(RefundParams),
    Update(UpdateParams),
}

/// A validated-on-send operation bound to its gateway.
///
/// Created by the `Gateway` operation constructors; consumed by `send()`.
pub struct PendingOperation<'a> {
    gateway: &'a Gateway,
    params: OperationParams,
}

impl PendingOperation<'_> {
    /// Run the operation: one blocking round trip, classified into an
    /// [`OperationResult`]. Validation and network faults return `Err`;
    /// business declines and redirects come back inside the result.
    pub async fn send(self) -> GatewayResult<OperationResult> {
        self.gateway.dispatch(self.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use affirm_core::HttpOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport spy: records every request, answers with a canned reply
    #[derive(Default)]
    struct SpyTransport {
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl SpyTransport {
        fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for SpyTransport {
        async fn send(&self, request: &HttpRequest) -> GatewayResult<HttpOutcome> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(HttpOutcome::from_raw(200, "{}"))
        }
    }

    fn spy_gateway() -> (Gateway, Arc<SpyTransport>) {
        let spy = Arc::new(SpyTransport::default());
        let gateway = Gateway::new(Credentials::new("pub_abc", "priv_xyz", "prod_123"))
            .with_transport(spy.clone());
        (gateway, spy)
    }

    #[tokio::test]
    async fn test_missing_reference_fails_before_transport() {
        let (gateway, spy) = spy_gateway();

        let err = gateway.capture(CaptureParams::default()).send().await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { field: "transaction_reference" }));

        let err = gateway.void(VoidParams::default()).send().await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));

        let err = gateway.refund(RefundParams::default()).send().await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));

        let err = gateway.update(UpdateParams::default()).send().await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { .. }));

        let err = gateway.authorize(AuthorizeParams::default()).send().await.unwrap_err();
        assert!(matches!(err, GatewayError::Validation { field: "checkout_token" }));

        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_composes_auth_and_urls() {
        let (gateway, spy) = spy_gateway();

        gateway
            .void(VoidParams::default().with_transaction_reference("ALO4"))
            .send()
            .await
            .unwrap();

        let requests = spy.requests.lock().unwrap();
        let request = &requests[0];
        assert_eq!(
            request.url.as_str(),
            "https://api.affirm.com/api/v2/charges/ALO4/void"
        );
        assert_eq!(request.body.as_deref(), Some("{}"));
        let auth = request
            .headers
            .iter()
            .find(|(name, _)| name == "Authorization")
            .map(|(_, value)| value.clone())
            .unwrap();
        assert_eq!(auth, basic_auth_header("pub_abc", "priv_xyz"));
    }

    #[tokio::test]
    async fn test_fetch_sends_no_body() {
        let (gateway, spy) = spy_gateway();

        gateway.fetch(FetchParams::default()).send().await.unwrap();

        let requests = spy.requests.lock().unwrap();
        assert!(requests[0].body.is_none());
        assert_eq!(requests[0].url.as_str(), "https://api.affirm.com/api/v2/charges");
    }

    #[tokio::test]
    async fn test_test_mode_routes_to_sandbox_and_traces() {
        let spy = Arc::new(SpyTransport::default());
        let gateway = Gateway::new(
            Credentials::new("pub_abc", "priv_xyz", "prod_123").with_test_mode(true),
        )
        .with_transport(spy.clone());

        let result = gateway
            .refund(RefundParams::default().with_transaction_reference("ALO4"))
            .send()
            .await
            .unwrap();

        let requests = spy.requests.lock().unwrap();
        assert_eq!(
            requests[0].url.as_str(),
            "https://sandbox.affirm.com/api/v2/charges/ALO4/refund"
        );

        let trace = result.trace.expect("sandbox calls carry a trace");
        assert_eq!(trace.method, "POST");
        assert_eq!(trace.request_body.as_deref(), Some("{}"));
        assert_eq!(trace.response_status, 200);
    }

    #[tokio::test]
    async fn test_live_mode_has_no_trace() {
        let (gateway, _spy) = spy_gateway();

        let result = gateway
            .refund(RefundParams::default().with_transaction_reference("ALO4"))
            .send()
            .await
            .unwrap();

        assert!(result.trace.is_none());
    }
}
