//! Paymock client
//!
//! A thin HTTP client for stripe-mock compatible payment APIs. It turns
//! resource operations on payment intents, customers, refunds and charges
//! into single HTTP round trips and returns the raw response for the caller
//! to assert on.
//!
//! # Overview
//!
//! - [`Settings`] - base URL, API key, timeout and TLS policy, resolved from
//!   the environment once per test session
//! - [`StripeClient`] - one method per endpoint; no retries, no status
//!   interpretation
//! - [`params`] - request structs that encode to form or query parameters,
//!   flattening metadata to `metadata[key]=value`
//! - [`ApiResponse`] - status, headers and body of a response
//!
//! # Quick Start
//!
//! ```ignore
//! use paymock_client::{CreateCustomer, Settings, StripeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env()?;
//!     let client = StripeClient::new(&settings)?;
//!
//!     let response = client
//!         .create_customer(&CreateCustomer::default().with_email("test@example.com"))
//!         .await?;
//!
//!     let customer = response.json()?;
//!     println!("Created {}", customer["id"]);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod response;

// Re-export main types at crate root
pub use client::{FORM_CONTENT_TYPE, RequestBody, StripeClient, StripeClientBuilder};
pub use config::Settings;
pub use error::{ClientError, Result};
pub use params::{
    CancelPaymentIntent, CaptureCharge, CapturePaymentIntent, ConfirmPaymentIntent, CreateCharge,
    CreateCustomer, CreatePaymentIntent, CreateRefund, ListCharges, ListCustomers,
    ListPaymentIntents, ListRefunds, Params, SearchParams, ToParams, UpdateCharge,
    UpdateCustomer, UpdatePaymentIntent, UpdateRefund,
};
pub use reqwest::{Method, StatusCode};
pub use response::ApiResponse;
