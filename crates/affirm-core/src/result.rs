//! # Operation Results
//!
//! The data model shared between the transport and the response classifier:
//! the raw HTTP outcome, the typed per-operation result handed back to
//! callers, and the enums that select API generation and operation kind.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The six charge operations the gateway dispatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Authorize,
    Capture,
    Fetch,
    Void,
    Refund,
    Update,
}

impl OperationKind {
    /// Stable name for logging and tracing fields
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Authorize => "authorize",
            OperationKind::Capture => "capture",
            OperationKind::Fetch => "fetch",
            OperationKind::Void => "void",
            OperationKind::Refund => "refund",
            OperationKind::Update => "update",
        }
    }

    /// HTTP status the provider returns for a plain success of this kind:
    /// 201 for creates, 200 for reads and state transitions.
    pub fn success_status(&self) -> u16 {
        match self {
            OperationKind::Authorize | OperationKind::Capture | OperationKind::Refund => 201,
            OperationKind::Fetch | OperationKind::Void | OperationKind::Update => 200,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API generation selector.
///
/// Affirm serves two incompatible path-versioned generations on the same
/// host pair. The generation is an explicit value threaded through endpoint
/// resolution, never client state toggled mid-request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiGeneration {
    /// `/api/v1` — `transactions` resources
    V1Transactions,
    /// `/api/v2` — `charges` resources
    V2Charges,
}

impl ApiGeneration {
    /// Path segment after the `/api/` base
    pub fn segment(&self) -> &'static str {
        match self {
            ApiGeneration::V1Transactions => "v1",
            ApiGeneration::V2Charges => "v2",
        }
    }
}

/// Untyped result of one HTTP round trip.
///
/// Produced by the transport, consumed only by the response classifier.
/// 4xx/5xx replies land here like any other: a client error is a normal,
/// data-carrying outcome, not exceptional control flow.
#[derive(Debug, Clone, Serialize)]
pub struct HttpOutcome {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body; an empty object when the reply carried no body
    pub body: Value,
    /// Verbatim body text, kept for diagnostics
    pub raw_body: String,
}

impl HttpOutcome {
    /// Build an outcome from a raw status and body text.
    ///
    /// Empty and non-JSON bodies degrade to an empty object so the
    /// classifier can probe fields without special cases.
    pub fn from_raw(status: u16, raw_body: impl Into<String>) -> Self {
        let raw_body = raw_body.into();
        let body = if raw_body.trim().is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&raw_body)
                .unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
        };
        Self {
            status,
            body,
            raw_body,
        }
    }
}

/// Provider-side rejection of a well-formed request.
///
/// Carried inside [`OperationResult`] rather than raised: the provider
/// understood and declined (e.g. `invalid_request`, `refund-exceeded`), so
/// the call itself completed. Never retried automatically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decline {
    /// Machine-readable decline code, e.g. `refund-exceeded`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Body `type` field, e.g. `invalid_request`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_type: Option<String>,
    /// Provider message text, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Structured sandbox diagnostics for one round trip.
///
/// Captured only in test mode and attached to the result as a side channel,
/// never mixed into the parsed business fields.
#[derive(Debug, Clone, Serialize)]
pub struct RequestTrace {
    pub method: String,
    pub endpoint: String,
    pub request_headers: Vec<(String, String)>,
    pub request_body: Option<String>,
    pub response_status: u16,
    pub response_body: String,
}

/// Typed outcome of one charge operation.
///
/// Constructed once per call by the response classifier, read-only
/// afterward. Callers branch on [`successful`](Self::successful) and
/// [`redirect_url`](Self::redirect_url); a populated
/// [`decline`](Self::decline) explains an unsuccessful result.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResult {
    /// Operation this result answers
    pub kind: OperationKind,
    /// HTTP status of the underlying reply
    pub status: u16,
    /// Whether the provider accepted the operation
    pub successful: bool,
    /// Charge reference (`id` on success, `charge_id` on authorize failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    /// Amount in integer minor currency units, when the reply carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    /// Provider message text, verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Out-of-band approval URL; set when the charge is redirect-pending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// Fetched records, always list-shaped (single replies are wrapped)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Value>>,
    /// Business-level rejection details when `successful` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline: Option<Decline>,
    /// Sandbox-only round-trip diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<RequestTrace>,
}

impl OperationResult {
    /// True when the caller must send the end user to
    /// [`redirect_url`](Self::redirect_url) before the charge can complete.
    /// A redirect is a terminal state needing out-of-band interaction, not a
    /// retryable failure.
    pub fn is_redirect(&self) -> bool {
        self.redirect_url.is_some()
    }

    /// First fetched entry, if any
    pub fn first_entry(&self) -> Option<&Value> {
        self.entries.as_ref().and_then(|entries| entries.first())
    }
}
