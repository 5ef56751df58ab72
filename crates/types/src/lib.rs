//! Shared constants and resource views for the paymock harness
//!
//! - [`endpoints`] - path templates of the stripe-mock REST API
//! - [`constants`] - id prefixes, status codes and enumerated field values
//! - [`resources`] - typed views of response bodies

pub mod constants;
pub mod endpoints;
pub mod resources;

pub use constants::{
    Currency, ErrorType, ObjectPrefix, ObjectType, PaymentIntentStatus, RefundReason,
    RefundStatus, UnknownVariant, status, test_data,
};
pub use resources::{
    ApiError, Charge, Customer, ErrorEnvelope, ListEnvelope, PaymentIntent, Refund,
};
