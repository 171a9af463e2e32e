//! # Response Classification
//!
//! Turns a raw [`HttpOutcome`] into a typed [`OperationResult`]. Affirm's
//! replies are full of per-operation quirks, so classification is a table of
//! small success predicates keyed by [`OperationKind`]: adding a new
//! provider quirk touches exactly one entry.
//!
//! The general rule: no top-level `error` key, the status code is the
//! expected success code for the operation (201 creates, 200 otherwise),
//! and the body's `type` field — when present — is not `invalid_request`.
//! Per-operation entries widen that rule for known provider behaviors.

use affirm_core::{Decline, HttpOutcome, OperationKind, OperationResult};
use serde_json::Value;

/// Classify a raw reply for the given operation kind
pub fn classify(kind: OperationKind, outcome: &HttpOutcome) -> OperationResult {
    let body = &outcome.body;
    let successful = success_predicate(kind)(outcome);
    let redirect_url = approval_url(body);

    let transaction_reference = match kind {
        // The reference field name differs by outcome on authorize:
        // `id` on success, `charge_id` on failure.
        OperationKind::Authorize if successful => field_str(body, "id"),
        OperationKind::Authorize => field_str(body, "charge_id"),
        _ => field_str(body, "id").or_else(|| field_str(body, "transaction_id")),
    };

    let entries = match kind {
        OperationKind::Fetch if successful => Some(normalize_entries(body)),
        _ => None,
    };

    // A redirect is a terminal state requiring out-of-band user interaction,
    // not a business decline.
    let decline = if successful || redirect_url.is_some() {
        None
    } else {
        Some(Decline {
            code: field_str(body, "code"),
            decline_type: field_str(body, "type"),
            message: message_of(body),
        })
    };

    OperationResult {
        kind,
        status: outcome.status,
        successful,
        transaction_reference,
        amount: body.get("amount").and_then(Value::as_i64),
        message: message_of(body),
        redirect_url,
        entries,
        decline,
        trace: None,
    }
}

// =============================================================================
// Success Predicate Table
// =============================================================================

type SuccessPredicate = fn(&HttpOutcome) -> bool;

/// One entry per operation kind
fn success_predicate(kind: OperationKind) -> SuccessPredicate {
    match kind {
        OperationKind::Authorize => authorize_success,
        OperationKind::Capture => capture_success,
        OperationKind::Refund => refund_success,
        OperationKind::Void => void_success,
        OperationKind::Update => update_success,
        OperationKind::Fetch => fetch_success,
    }
}

fn general_success(kind: OperationKind, outcome: &HttpOutcome) -> bool {
    !error_present(&outcome.body)
        && outcome.status == kind.success_status()
        && !type_is(&outcome.body, "invalid_request")
}

/// Asynchronous/delayed authorization: a body `status` of `authorized` is a
/// success regardless of the HTTP status code.
fn authorize_success(outcome: &HttpOutcome) -> bool {
    general_success(OperationKind::Authorize, outcome)
        || field_str(&outcome.body, "status").as_deref() == Some("authorized")
}

/// Capturing an already-captured charge is idempotent: the provider answers
/// `duplicate-capture`, which counts as success at any status.
fn capture_success(outcome: &HttpOutcome) -> bool {
    general_success(OperationKind::Capture, outcome)
        || field_str(&outcome.body, "code").as_deref() == Some("duplicate-capture")
}

fn refund_success(outcome: &HttpOutcome) -> bool {
    general_success(OperationKind::Refund, outcome)
}

/// The provider sometimes returns an informational `message` alongside a
/// completed void; a body `type` of `void` confirms the state transition.
fn void_success(outcome: &HttpOutcome) -> bool {
    general_success(OperationKind::Void, outcome) || type_is(&outcome.body, "void")
}

fn update_success(outcome: &HttpOutcome) -> bool {
    general_success(OperationKind::Update, outcome) || type_is(&outcome.body, "update")
}

/// Reads succeed whenever the reply carries no error field
fn fetch_success(outcome: &HttpOutcome) -> bool {
    !error_present(&outcome.body)
}

// =============================================================================
// Body Probes
// =============================================================================

fn field_str(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(String::from)
}

fn type_is(body: &Value, expected: &str) -> bool {
    field_str(body, "type").as_deref() == Some(expected)
}

/// A top-level `error` key with a non-empty value
fn error_present(body: &Value) -> bool {
    match body.get("error") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(_) => true,
    }
}

/// Provider message text, verbatim. Falls back to `error.message` when the
/// top-level `message` is absent.
fn message_of(body: &Value) -> Option<String> {
    field_str(body, "message").or_else(|| {
        body.get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .map(String::from)
    })
}

/// Scan the `links` array for an `approval_url` entry
fn approval_url(body: &Value) -> Option<String> {
    body.get("links")?.as_array()?.iter().find_map(|link| {
        if link.get("rel").and_then(Value::as_str) == Some("approval_url") {
            link.get("href").and_then(Value::as_str).map(String::from)
        } else {
            None
        }
    })
}

/// Normalize a fetch reply into list shape: multi-record replies already
/// carry `entries`; a single-record reply becomes the sole entry of a
/// synthesized one-element list so callers always iterate uniformly.
fn normalize_entries(body: &Value) -> Vec<Value> {
    match body.get("entries").and_then(Value::as_array) {
        Some(entries) => entries.clone(),
        None => vec![body.clone()],
    }
}
