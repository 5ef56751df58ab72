//! Lenient typed views of stripe-mock response bodies
//!
//! The harness treats responses as opaque JSON; these views exist for tests
//! that want typed access. Everything except `id` and `object` is optional
//! and unknown fields are preserved in `extra`, so a server adding fields
//! never breaks deserialization.

use indexmap::IndexMap;
#[cfg(feature = "schemars")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::constants::{ErrorType, PaymentIntentStatus, RefundReason, RefundStatus};

/// Payment intent (`pi_` ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct PaymentIntent {
    pub id: String,
    pub object: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub status: Option<PaymentIntentStatus>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<IndexMap<String, String>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// Customer (`cus_` ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct Customer {
    pub id: String,
    pub object: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<IndexMap<String, String>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// Refund (`re_` ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct Refund {
    pub id: String,
    pub object: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub charge: Option<String>,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub reason: Option<RefundReason>,
    #[serde(default)]
    pub status: Option<RefundStatus>,
    #[serde(default)]
    pub metadata: Option<IndexMap<String, String>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// Charge (`ch_` ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct Charge {
    pub id: String,
    pub object: String,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub source: Option<JsonValue>,
    #[serde(default)]
    pub captured: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, JsonValue>,
}

/// `{object: "list", data: [...]}` envelope returned by list and search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct ListEnvelope<T> {
    pub object: String,
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl<T> ListEnvelope<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `{error: {...}}` envelope returned on failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct ErrorEnvelope {
    pub error: ApiError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct ApiError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub param: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payment_intent_keeps_unknown_fields() {
        let pi: PaymentIntent = serde_json::from_value(json!({
            "id": "pi_123",
            "object": "payment_intent",
            "amount": 2000,
            "currency": "usd",
            "status": "requires_payment_method",
            "metadata": {"test_id": "harness_001"},
            "client_secret": "pi_123_secret_abc"
        }))
        .unwrap();

        assert_eq!(pi.amount, Some(2000));
        assert_eq!(pi.status, Some(PaymentIntentStatus::RequiresPaymentMethod));
        assert_eq!(
            pi.metadata.unwrap().get("test_id").map(String::as_str),
            Some("harness_001")
        );
        assert_eq!(pi.extra.get("client_secret"), Some(&json!("pi_123_secret_abc")));
    }

    #[test]
    fn test_customer_tolerates_null_fields() {
        let customer: Customer = serde_json::from_value(json!({
            "id": "cus_1",
            "object": "customer",
            "email": null,
            "name": null
        }))
        .unwrap();
        assert_eq!(customer.email, None);
        assert!(customer.extra.is_empty());
    }

    #[test]
    fn test_list_envelope_of_refunds() {
        let list: ListEnvelope<Refund> = serde_json::from_value(json!({
            "object": "list",
            "data": [
                {"id": "re_1", "object": "refund", "reason": "duplicate", "status": "succeeded"}
            ],
            "has_more": false,
            "url": "/v1/refunds"
        }))
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.data[0].reason, Some(RefundReason::Duplicate));
        assert_eq!(list.data[0].status, Some(RefundStatus::Succeeded));
    }

    #[test]
    fn test_error_envelope() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "error": {
                "type": "invalid_request_error",
                "message": "Missing required param: amount.",
                "param": "amount"
            }
        }))
        .unwrap();
        assert_eq!(envelope.error.error_type, ErrorType::InvalidRequest);
        assert_eq!(envelope.error.param.as_deref(), Some("amount"));
    }
}
