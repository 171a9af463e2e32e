//! # Request Builders
//!
//! One builder per charge operation. A builder validates required fields,
//! selects the API generation, and serializes the operation's parameters
//! into a wire payload. Validation happens before any serialization and
//! fails fast with the missing field's name; nothing here touches the
//! network.

use affirm_core::{
    ApiGeneration, AuthorizeParams, CaptureParams, FetchParams, GatewayError, GatewayResult,
    OperationKind, RefundParams, UpdateParams, VoidParams,
};
use serde::Serialize;
use serde_json::Value;

/// HTTP method of a built request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// A validated, serialized request ready for endpoint resolution and
/// transport. Immutable once built.
#[derive(Debug, Clone)]
pub struct BuiltRequest {
    pub kind: OperationKind,
    pub method: HttpMethod,
    pub generation: ApiGeneration,
    /// Resource path under the generation segment, e.g. `/charges/{ref}/void`
    pub resource_path: String,
    /// Order-preserving query pairs; empty for bodied calls
    pub query: Vec<(&'static str, String)>,
    /// JSON body for mutating calls; `None` means no body at all, which the
    /// transport must honor (sending `{}` vs omitting the body is
    /// provider-observable)
    pub payload: Option<Value>,
}

fn require<'a>(value: &'a Option<String>, field: &'static str) -> GatewayResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(GatewayError::Validation { field })
}

fn to_payload<T: Serialize>(payload: &T) -> GatewayResult<Value> {
    serde_json::to_value(payload).map_err(|e| GatewayError::Serialization(e.to_string()))
}

// =============================================================================
// Wire Payload Types
// =============================================================================

#[derive(Debug, Serialize)]
struct AuthorizePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    checkout_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CapturePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_confirmation: Option<String>,
}

#[derive(Debug, Serialize)]
struct RefundPayload {
    /// Integer minor currency units; the key vanishes entirely for a full
    /// refund (never null, never zero)
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ShippingNamePayload {
    full: String,
}

#[derive(Debug, Serialize)]
struct ShippingAddressPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

impl ShippingAddressPayload {
    fn is_empty(&self) -> bool {
        self.line1.is_none()
            && self.line2.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zipcode.is_none()
            && self.country.is_none()
    }
}

#[derive(Debug, Serialize)]
struct ShippingPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<ShippingNamePayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<ShippingAddressPayload>,
}

#[derive(Debug, Serialize)]
struct UpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<ShippingPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping_confirmation: Option<String>,
}

// =============================================================================
// Builders
// =============================================================================

/// Build an authorize request.
///
/// A `checkout_token` routes to the v2 charges API; a `transaction_id`
/// routes to the v1 transactions API. One of the two is required.
pub fn build_authorize(params: &AuthorizeParams) -> GatewayResult<BuiltRequest> {
    let (generation, resource_path) = if params.checkout_token.is_some() {
        (ApiGeneration::V2Charges, "/charges".to_string())
    } else if params.transaction_id.is_some() {
        (ApiGeneration::V1Transactions, "/transactions".to_string())
    } else {
        return Err(GatewayError::Validation {
            field: "checkout_token",
        });
    };

    let payload = AuthorizePayload {
        checkout_token: params.checkout_token.clone(),
        transaction_id: params.transaction_id.clone(),
        order_id: params.order_id.clone(),
    };

    Ok(BuiltRequest {
        kind: OperationKind::Authorize,
        method: HttpMethod::Post,
        generation,
        resource_path,
        query: Vec::new(),
        payload: Some(to_payload(&payload)?),
    })
}

/// Build a capture request for a previously authorized charge
pub fn build_capture(params: &CaptureParams) -> GatewayResult<BuiltRequest> {
    let reference = require(&params.transaction_reference, "transaction_reference")?;

    let payload = CapturePayload {
        order_id: params.order_id.clone(),
        shipping_carrier: params.shipping_carrier.clone(),
        shipping_confirmation: params.tracking_number.clone(),
    };

    Ok(BuiltRequest {
        kind: OperationKind::Capture,
        method: HttpMethod::Post,
        generation: ApiGeneration::V2Charges,
        resource_path: format!("/charges/{}/capture", reference),
        query: Vec::new(),
        payload: Some(to_payload(&payload)?),
    })
}

/// Build a void request; the payload is an empty object by contract
pub fn build_void(params: &VoidParams) -> GatewayResult<BuiltRequest> {
    let reference = require(&params.transaction_reference, "transaction_reference")?;

    Ok(BuiltRequest {
        kind: OperationKind::Void,
        method: HttpMethod::Post,
        generation: ApiGeneration::V2Charges,
        resource_path: format!("/charges/{}/void", reference),
        query: Vec::new(),
        payload: Some(Value::Object(serde_json::Map::new())),
    })
}

/// Build a refund request. Without an `amount` the provider performs a full
/// refund; the body is then an empty object, never `amount: null` or `0`.
pub fn build_refund(params: &RefundParams) -> GatewayResult<BuiltRequest> {
    let reference = require(&params.transaction_reference, "transaction_reference")?;

    let payload = RefundPayload {
        amount: params.amount,
    };

    Ok(BuiltRequest {
        kind: OperationKind::Refund,
        method: HttpMethod::Post,
        generation: ApiGeneration::V2Charges,
        resource_path: format!("/charges/{}/refund", reference),
        query: Vec::new(),
        payload: Some(to_payload(&payload)?),
    })
}

/// Build an update request. The nested `shipping` structure is assembled
/// only from whichever sub-fields are present; partial addresses are valid.
pub fn build_update(params: &UpdateParams) -> GatewayResult<BuiltRequest> {
    let reference = require(&params.transaction_reference, "transaction_reference")?;

    let shipping = params.shipping.as_ref().and_then(|info| {
        let name = info.full_name().map(|full| ShippingNamePayload { full });
        let address = ShippingAddressPayload {
            line1: info.address1.clone(),
            line2: info.address2.clone(),
            city: info.city.clone(),
            state: info.state.clone(),
            zipcode: info.zipcode.clone(),
            country: info.country.clone(),
        };
        let address = if address.is_empty() { None } else { Some(address) };

        if name.is_none() && address.is_none() {
            None
        } else {
            Some(ShippingPayload { name, address })
        }
    });

    let payload = UpdatePayload {
        shipping,
        order_id: params.order_id.clone(),
        shipping_carrier: params.shipping_carrier.clone(),
        shipping_confirmation: params.tracking_number.clone(),
    };

    Ok(BuiltRequest {
        kind: OperationKind::Update,
        method: HttpMethod::Post,
        generation: ApiGeneration::V2Charges,
        resource_path: format!("/charges/{}/update", reference),
        query: Vec::new(),
        payload: Some(to_payload(&payload)?),
    })
}

/// Build a fetch request.
///
/// A `transaction_id` selects a v1 single-record lookup with an optional
/// `expand` parameter. Otherwise the call reads the v2 charges API — one
/// charge when a `transaction_reference` is set, the paginated collection
/// when not. Query parameters are included only when set; no parameters
/// means no query string.
pub fn build_fetch(params: &FetchParams) -> GatewayResult<BuiltRequest> {
    let (generation, resource_path, query) = if let Some(id) = params.transaction_id.as_deref() {
        let mut query = Vec::new();
        if let Some(expand) = params.expand.as_ref().filter(|v| !v.is_empty()) {
            query.push(("expand", expand.clone()));
        }
        (
            ApiGeneration::V1Transactions,
            format!("/transactions/{}", id),
            query,
        )
    } else {
        let resource_path = match params.transaction_reference.as_deref() {
            Some(reference) => format!("/charges/{}", reference),
            None => "/charges".to_string(),
        };
        let mut query = Vec::new();
        if let Some(limit) = params.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(before) = params.before.as_ref().filter(|v| !v.is_empty()) {
            query.push(("before", before.clone()));
        }
        if let Some(after) = params.after.as_ref().filter(|v| !v.is_empty()) {
            query.push(("after", after.clone()));
        }
        (ApiGeneration::V2Charges, resource_path, query)
    };

    Ok(BuiltRequest {
        kind: OperationKind::Fetch,
        method: HttpMethod::Get,
        generation,
        resource_path,
        query,
        payload: None,
    })
}
