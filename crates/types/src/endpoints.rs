//! Endpoint path templates for the stripe-mock API.
//!
//! Templates addressing a single resource carry the [`ID_PLACEHOLDER`] token,
//! which [`with_id`] replaces with the resource id.

/// Token substituted by [`with_id`]
pub const ID_PLACEHOLDER: &str = "{id}";

pub const PAYMENT_INTENTS: &str = "/v1/payment_intents";
pub const PAYMENT_INTENT: &str = "/v1/payment_intents/{id}";
pub const CONFIRM_PAYMENT_INTENT: &str = "/v1/payment_intents/{id}/confirm";
pub const CAPTURE_PAYMENT_INTENT: &str = "/v1/payment_intents/{id}/capture";
pub const CANCEL_PAYMENT_INTENT: &str = "/v1/payment_intents/{id}/cancel";

pub const CUSTOMERS: &str = "/v1/customers";
pub const CUSTOMER: &str = "/v1/customers/{id}";
pub const SEARCH_CUSTOMERS: &str = "/v1/customers/search";

pub const REFUNDS: &str = "/v1/refunds";
pub const REFUND: &str = "/v1/refunds/{id}";
pub const CANCEL_REFUND: &str = "/v1/refunds/{id}/cancel";

pub const CHARGES: &str = "/v1/charges";
pub const CHARGE: &str = "/v1/charges/{id}";
pub const CAPTURE_CHARGE: &str = "/v1/charges/{id}/capture";
pub const SEARCH_CHARGES: &str = "/v1/charges/search";

/// Substitute `id` into a path template
///
/// The id is percent-encoded so it always lands in a single path segment.
///
/// # Example
/// ```
/// use paymock_types::endpoints::{self, with_id};
///
/// assert_eq!(
///     with_id(endpoints::CONFIRM_PAYMENT_INTENT, "pi_123"),
///     "/v1/payment_intents/pi_123/confirm"
/// );
/// ```
pub fn with_id(template: &str, id: &str) -> String {
    template.replace(ID_PLACEHOLDER, &urlencoding::encode(id))
}
