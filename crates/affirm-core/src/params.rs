//! # Operation Parameters
//!
//! One parameter struct per charge operation. Parameters are assembled with
//! builder-style setters, then handed to the request builders which validate
//! required fields before anything is serialized; a request is immutable once
//! built.

use serde::{Deserialize, Serialize};

/// Parameters for authorizing a charge.
///
/// Identify the charge with either a `checkout_token` (fresh checkout,
/// v2 charges API) or a `transaction_id` (v1 transactions API). Exactly one
/// is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizeParams {
    /// Short-lived token from the client-side checkout flow
    pub checkout_token: Option<String>,
    /// Existing transaction id (routes the call to the v1 API)
    pub transaction_id: Option<String>,
    /// Merchant-internal order id attached to the charge
    pub order_id: Option<String>,
}

impl AuthorizeParams {
    pub fn with_checkout_token(mut self, token: impl Into<String>) -> Self {
        self.checkout_token = Some(token.into());
        self
    }

    pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }
}

/// Parameters for capturing a previously authorized charge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureParams {
    /// Charge reference returned by authorize (required)
    pub transaction_reference: Option<String>,
    pub order_id: Option<String>,
    pub shipping_carrier: Option<String>,
    /// Sent on the wire as `shipping_confirmation`
    pub tracking_number: Option<String>,
}

impl CaptureParams {
    pub fn with_transaction_reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_shipping_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.shipping_carrier = Some(carrier.into());
        self
    }

    pub fn with_tracking_number(mut self, tracking: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking.into());
        self
    }
}

/// Parameters for voiding an uncaptured charge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoidParams {
    /// Charge reference returned by authorize (required)
    pub transaction_reference: Option<String>,
}

impl VoidParams {
    pub fn with_transaction_reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }
}

/// Parameters for a partial or full refund.
///
/// `amount` is in integer minor currency units (cents). When unset, the
/// provider applies a full refund; the key is then omitted from the wire
/// payload entirely rather than sent as null or zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RefundParams {
    /// Charge reference returned by authorize (required)
    pub transaction_reference: Option<String>,
    /// Refund amount in cents; omit for a full refund
    pub amount: Option<i64>,
}

impl RefundParams {
    pub fn with_transaction_reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }

    pub fn with_amount(mut self, amount_cents: i64) -> Self {
        self.amount = Some(amount_cents);
        self
    }
}

/// Shipping details for an update call. Every field is independently
/// optional; partial addresses are valid and only present fields reach the
/// wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
}

impl ShippingInfo {
    /// Combined recipient name, present only when both parts are set
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_address1(mut self, line: impl Into<String>) -> Self {
        self.address1 = Some(line.into());
        self
    }

    pub fn with_address2(mut self, line: impl Into<String>) -> Self {
        self.address2 = Some(line.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_zipcode(mut self, zip: impl Into<String>) -> Self {
        self.zipcode = Some(zip.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// Parameters for updating shipping details on a charge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    /// Charge reference returned by authorize (required)
    pub transaction_reference: Option<String>,
    pub order_id: Option<String>,
    pub shipping_carrier: Option<String>,
    /// Sent on the wire as `shipping_confirmation`
    pub tracking_number: Option<String>,
    pub shipping: Option<ShippingInfo>,
}

impl UpdateParams {
    pub fn with_transaction_reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_shipping_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.shipping_carrier = Some(carrier.into());
        self
    }

    pub fn with_tracking_number(mut self, tracking: impl Into<String>) -> Self {
        self.tracking_number = Some(tracking.into());
        self
    }

    pub fn with_shipping(mut self, shipping: ShippingInfo) -> Self {
        self.shipping = Some(shipping);
        self
    }
}

/// Parameters for fetching one transaction or listing charges.
///
/// With a `transaction_id` the call is a v1 single-record lookup (optionally
/// expanded); otherwise it is a v2 charge read, paginated with
/// `limit`/`before`/`after` and listing the collection when no
/// `transaction_reference` is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchParams {
    /// v1 transaction id for a single-record lookup
    pub transaction_id: Option<String>,
    /// v2 charge reference
    pub transaction_reference: Option<String>,
    /// Related record to expand inline (v1 only), e.g. `checkout`
    pub expand: Option<String>,
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl FetchParams {
    pub fn with_transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    pub fn with_transaction_reference(mut self, reference: impl Into<String>) -> Self {
        self.transaction_reference = Some(reference.into());
        self
    }

    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn with_after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }
}
