//! # HTTP Transport
//!
//! Executes one HTTP round trip against the Affirm API and returns the raw
//! status + body as an [`HttpOutcome`]. The transport never raises on
//! 4xx/5xx — a client error is a normal, data-carrying outcome the
//! classifier interprets — and only network/DNS/TLS faults become
//! [`GatewayError::Network`].
//!
//! The `Transport` trait is the seam for test doubles: the gateway is
//! exercised in tests with a spy that records invocations without touching
//! the network.

use crate::request::HttpMethod;
use affirm_core::{GatewayError, GatewayResult, HttpOutcome};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// A fully composed HTTP request: method, URL, headers, optional body.
///
/// The body is the serialized JSON the request builder decided on; `None`
/// means the request goes out with no body at all, which is
/// provider-observable and must not degrade to an empty `{}`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Basic `Authorization` header value for the Affirm key pair:
/// username = public key, password = private key.
pub fn basic_auth_header(public_key: &str, private_key: &str) -> String {
    let pair = format!("{}:{}", public_key, private_key);
    format!("Basic {}", BASE64.encode(pair.as_bytes()))
}

/// One blocking request/response round trip
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> GatewayResult<HttpOutcome>;
}

/// Production transport backed by a pooled reqwest client.
///
/// Negotiates TLS 1.2 or later and applies the configured per-request
/// timeout; connection pooling is delegated to reqwest.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a caller-supplied timeout
    pub fn with_timeout(timeout: std::time::Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .min_tls_version(reqwest::tls::Version::TLS_1_2)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> GatewayResult<HttpOutcome> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(request.url.clone()),
            HttpMethod::Post => self.client.post(request.url.clone()),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(
            method = request.method.as_str(),
            url = %request.url,
            has_body = request.body.is_some(),
            "Dispatching Affirm API request"
        );

        let response = builder.send().await.map_err(|e| {
            error!(url = %request.url, "Network error: {}", e);
            GatewayError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(HttpOutcome::from_raw(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        // base64("pub_abc:priv_xyz")
        assert_eq!(
            basic_auth_header("pub_abc", "priv_xyz"),
            "Basic cHViX2FiYzpwcml2X3h5eg=="
        );
    }

    #[test]
    fn test_http_request_carries_decided_body() {
        let request = HttpRequest {
            method: HttpMethod::Post,
            url: Url::parse("https://sandbox.affirm.com/api/v2/charges").unwrap(),
            headers: vec![("Accept".to_string(), "application/json".to_string())],
            body: None,
        };
        assert!(request.body.is_none());
    }
}
