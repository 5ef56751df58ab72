//! Enumerated field values used by the stripe-mock API.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "schemars")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Error returned when parsing a string that is not one of an enumeration's values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind}: '{value}'. Valid options are: {valid}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub valid: String,
}

/// Declares a string-valued enumeration with its wire representation.
///
/// Every generated type gets `as_str`, an `ALL` slice in declaration order,
/// `Display`, case-insensitive `FromStr`, and serde support that uses the
/// wire strings.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[cfg_attr(feature = "schemars", derive(JsonSchema))]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Get the wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        valid: Self::ALL
                            .iter()
                            .map(|v| format!("'{}'", v.as_str()))
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Lifecycle status of a payment intent
    PaymentIntentStatus, "payment intent status" {
        RequiresPaymentMethod => "requires_payment_method",
        RequiresConfirmation => "requires_confirmation",
        RequiresAction => "requires_action",
        Processing => "processing",
        RequiresCapture => "requires_capture",
        Canceled => "canceled",
        Succeeded => "succeeded",
    }
}

wire_enum! {
    /// Status of a refund
    RefundStatus, "refund status" {
        Pending => "pending",
        RequiresAction => "requires_action",
        Succeeded => "succeeded",
        Failed => "failed",
        Canceled => "canceled",
    }
}

wire_enum! {
    /// Reason given when creating a refund
    RefundReason, "refund reason" {
        Duplicate => "duplicate",
        Fraudulent => "fraudulent",
        RequestedByCustomer => "requested_by_customer",
    }
}

wire_enum! {
    /// ISO currency codes exercised by the suite
    Currency, "currency" {
        /// US Dollar
        Usd => "usd",
        /// Euro
        Eur => "eur",
        /// British Pound
        Gbp => "gbp",
        /// Japanese Yen
        Jpy => "jpy",
        /// Canadian Dollar
        Cad => "cad",
        /// Australian Dollar
        Aud => "aud",
    }
}

wire_enum! {
    /// `error.type` values carried by error envelopes
    ErrorType, "error type" {
        InvalidRequest => "invalid_request_error",
        Authentication => "authentication_error",
        CardError => "card_error",
        RateLimit => "rate_limit_error",
        ApiError => "api_error",
    }
}

wire_enum! {
    /// `object` tag carried by every response body
    ObjectType, "object type" {
        PaymentIntent => "payment_intent",
        Customer => "customer",
        Refund => "refund",
        Charge => "charge",
        PaymentMethod => "payment_method",
        List => "list",
        SearchResult => "search_result",
    }
}

/// Fixed id prefix of each resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectPrefix {
    PaymentIntent,
    Customer,
    Refund,
    Charge,
    PaymentMethod,
}

impl ObjectPrefix {
    pub const ALL: &'static [ObjectPrefix] = &[
        ObjectPrefix::PaymentIntent,
        ObjectPrefix::Customer,
        ObjectPrefix::Refund,
        ObjectPrefix::Charge,
        ObjectPrefix::PaymentMethod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectPrefix::PaymentIntent => "pi_",
            ObjectPrefix::Customer => "cus_",
            ObjectPrefix::Refund => "re_",
            ObjectPrefix::Charge => "ch_",
            ObjectPrefix::PaymentMethod => "pm_",
        }
    }

    /// Whether `id` carries this prefix
    pub fn matches(&self, id: &str) -> bool {
        id.starts_with(self.as_str())
    }

    /// Find the resource kind an id belongs to
    pub fn of(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|prefix| prefix.matches(id))
    }

    /// The `object` tag returned for this resource kind
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectPrefix::PaymentIntent => ObjectType::PaymentIntent,
            ObjectPrefix::Customer => ObjectType::Customer,
            ObjectPrefix::Refund => ObjectType::Refund,
            ObjectPrefix::Charge => ObjectType::Charge,
            ObjectPrefix::PaymentMethod => ObjectType::PaymentMethod,
        }
    }
}

impl Display for ObjectPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP status codes asserted by the suite
pub mod status {
    pub const OK: u16 = 200;
    pub const BAD_REQUEST: u16 = 400;
    pub const UNAUTHORIZED: u16 = 401;
    pub const REQUEST_FAILED: u16 = 402;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const CONFLICT: u16 = 409;
    pub const EXTERNAL_DEPENDENCY_FAILED: u16 = 424;
    pub const TOO_MANY_REQUESTS: u16 = 429;
    pub const INTERNAL_SERVER_ERROR: u16 = 500;
    pub const BAD_GATEWAY: u16 = 502;
    pub const SERVICE_UNAVAILABLE: u16 = 503;
    pub const GATEWAY_TIMEOUT: u16 = 504;
}

/// Canonical values for positive and negative scenarios
pub mod test_data {
    /// $20.00 in cents
    pub const VALID_AMOUNT: i64 = 2000;
    pub const VALID_CURRENCY: &str = "usd";
    pub const MIN_AMOUNT: i64 = 50;
    pub const MAX_AMOUNT: i64 = 99_999_999;

    pub const VALID_EMAIL: &str = "test@example.com";
    pub const VALID_NAME: &str = "Test Customer";
    pub const VALID_PHONE: &str = "+15555555555";

    pub const INVALID_CURRENCY: &str = "invalid";
    pub const INVALID_EMAIL: &str = "not-an-email";
    pub const NEGATIVE_AMOUNT: i64 = -100;

    /// Payment method token accepted by stripe-mock
    pub const TEST_PAYMENT_METHOD: &str = "pm_card_visa";
}
