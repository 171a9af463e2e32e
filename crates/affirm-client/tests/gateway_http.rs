//! Full round-trip tests against a mock Affirm API: auth header, wire
//! payload shape, endpoint layout, and response classification.

use affirm_client::{basic_auth_header, Gateway};
use affirm_core::{
    AuthorizeParams, CaptureParams, Credentials, FetchParams, RefundParams, VoidParams,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> Gateway {
    Gateway::new(Credentials::new("pub_abc", "priv_xyz", "prod_123"))
        .with_api_base_url(format!("{}/api/", server.uri()))
}

#[tokio::test]
async fn authorize_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/charges"))
        .and(header(
            "Authorization",
            basic_auth_header("pub_abc", "priv_xyz").as_str(),
        ))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "checkout_token": "tok_checkout",
            "order_id": "JKLM4321"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ALO4-UVGM",
            "amount": 6100,
            "currency": "USD",
            "status": "authorized"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .authorize(
            AuthorizeParams::default()
                .with_checkout_token("tok_checkout")
                .with_order_id("JKLM4321"),
        )
        .send()
        .await
        .unwrap();

    assert!(result.successful);
    assert_eq!(result.transaction_reference.as_deref(), Some("ALO4-UVGM"));
    assert_eq!(result.amount, Some(6100));
    assert!(!result.is_redirect());
}

#[tokio::test]
async fn authorize_with_transaction_id_uses_v1_transactions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/transactions"))
        .and(body_json(json!({"transaction_id": "TX123"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "TX123"})))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .authorize(AuthorizeParams::default().with_transaction_id("TX123"))
        .send()
        .await
        .unwrap();

    assert!(result.successful);
}

#[tokio::test]
async fn capture_then_duplicate_capture_both_succeed() {
    let server = MockServer::start().await;

    let capture_path = "/api/v2/charges/ALO4-UVGM/capture";

    Mock::given(method("POST"))
        .and(path(capture_path))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ALO4-UVGM",
            "type": "capture",
            "amount": 6100
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let params = CaptureParams::default().with_transaction_reference("ALO4-UVGM");

    let first = gateway.capture(params.clone()).send().await.unwrap();
    assert!(first.successful);

    // Retrying the same capture gets rejected with duplicate-capture, which
    // still classifies as success (idempotent retry semantics).
    Mock::given(method("POST"))
        .and(path(capture_path))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "duplicate-capture",
            "message": "Charge has already been captured.",
            "type": "invalid_request"
        })))
        .mount(&server)
        .await;

    let second = gateway.capture(params).send().await.unwrap();
    assert!(second.successful);
}

#[tokio::test]
async fn refund_without_amount_sends_empty_object_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/charges/ALO4/refund"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ALO4",
            "type": "refund",
            "amount": 6100
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .refund(RefundParams::default().with_transaction_reference("ALO4"))
        .send()
        .await
        .unwrap();

    assert!(result.successful);
    assert_eq!(result.amount, Some(6100));
}

#[tokio::test]
async fn partial_refund_sends_amount_in_cents() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/charges/ALO4/refund"))
        .and(body_json(json!({"amount": 2500})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "ALO4",
            "type": "refund",
            "amount": 2500
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .refund(
            RefundParams::default()
                .with_transaction_reference("ALO4")
                .with_amount(2500),
        )
        .send()
        .await
        .unwrap();

    assert!(result.successful);
}

#[tokio::test]
async fn refund_exceeded_is_a_decline_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/charges/ALO4/refund"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "refund-exceeded",
            "message": "Charge cannot be refunded beyond original amount.",
            "type": "invalid_request"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .refund(RefundParams::default().with_transaction_reference("ALO4"))
        .send()
        .await
        .unwrap();

    assert!(!result.successful);
    let decline = result.decline.unwrap();
    assert_eq!(decline.code.as_deref(), Some("refund-exceeded"));
    assert_eq!(
        decline.message.as_deref(),
        Some("Charge cannot be refunded beyond original amount.")
    );
}

#[tokio::test]
async fn void_with_informational_message_still_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/charges/ALO4/void"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "void",
            "message": "Charge voided; authorization hold released."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .void(VoidParams::default().with_transaction_reference("ALO4"))
        .send()
        .await
        .unwrap();

    assert!(result.successful);
    assert!(result.message.is_some());
}

#[tokio::test]
async fn fetch_v1_lookup_normalizes_single_record() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/transactions/TX123"))
        .and(query_param("expand", "checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "TX123",
            "amount": 500
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .fetch(
            FetchParams::default()
                .with_transaction_id("TX123")
                .with_expand("checkout"),
        )
        .send()
        .await
        .unwrap();

    assert!(result.successful);
    let entries = result.entries.as_ref().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0], json!({"id": "TX123", "amount": 500}));
}

#[tokio::test]
async fn fetch_charge_list_preserves_entry_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/charges"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [{"id": "a"}, {"id": "b"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .fetch(FetchParams::default().with_limit(2))
        .send()
        .await
        .unwrap();

    assert_eq!(result.entries.as_ref().unwrap().len(), 2);
    assert_eq!(result.first_entry(), Some(&json!({"id": "a"})));
}

#[tokio::test]
async fn approval_url_marks_result_redirect_pending() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v2/charges"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Customer approval required",
            "links": [
                {"rel": "approval_url", "href": "https://x"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = gateway_for(&server)
        .authorize(AuthorizeParams::default().with_checkout_token("tok_checkout"))
        .send()
        .await
        .unwrap();

    assert!(result.is_redirect());
    assert_eq!(result.redirect_url.as_deref(), Some("https://x"));
    // Redirect-pending is a terminal state, not a decline.
    assert!(result.decline.is_none());
}
