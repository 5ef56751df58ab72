//! Sample request payloads and session clients

use paymock_client::{
    ApiResponse, CreateCharge, CreateCustomer, CreatePaymentIntent, CreateRefund, Result,
    Settings, StripeClient,
};
use paymock_types::{RefundReason, test_data};
use tracing::debug;

use crate::assertions::{assert_status_code, extract_id};

/// Metadata value tagging every resource the suite creates
pub const TEST_ID: &str = "harness_001";

/// API key that the server rejects
pub const INVALID_API_KEY: &str = "invalid_key";

/// Card token accepted as a charge source
pub const TEST_SOURCE: &str = "tok_visa";

pub fn sample_payment_intent() -> CreatePaymentIntent {
    CreatePaymentIntent::new(test_data::VALID_AMOUNT, test_data::VALID_CURRENCY)
        .with_description("Test payment intent")
        .with_metadata("test_id", TEST_ID)
}

pub fn sample_customer() -> CreateCustomer {
    CreateCustomer::default()
        .with_email(test_data::VALID_EMAIL)
        .with_name(test_data::VALID_NAME)
        .with_phone(test_data::VALID_PHONE)
        .with_metadata("test_id", TEST_ID)
}

/// Refund without a charge; callers attach one with `with_charge`
pub fn sample_refund() -> CreateRefund {
    CreateRefund::default()
        .with_reason(RefundReason::RequestedByCustomer)
        .with_metadata("test_id", TEST_ID)
}

pub fn sample_charge() -> CreateCharge {
    CreateCharge::new(test_data::VALID_AMOUNT, test_data::VALID_CURRENCY)
        .with_source(TEST_SOURCE)
        .with_description("Test charge")
        .with_metadata("test_id", TEST_ID)
}

/// Client authenticated with the configured key
pub fn api_client(settings: &Settings) -> Result<StripeClient> {
    StripeClient::new(settings)
}

/// Client that sends no `Authorization` header
pub fn unauthenticated_client(settings: &Settings) -> Result<StripeClient> {
    StripeClient::builder(settings).without_api_key().build()
}

/// Client that sends a key the server does not accept
pub fn invalid_auth_client(settings: &Settings) -> Result<StripeClient> {
    StripeClient::builder(settings)
        .api_key(INVALID_API_KEY)
        .build()
}

/// Create the sample payment intent, failing the test unless it succeeds
pub async fn created_payment_intent(client: &StripeClient) -> ApiResponse {
    let response = client
        .create_payment_intent(&sample_payment_intent())
        .await
        .unwrap_or_else(|e| panic!("create payment intent: {e}"));
    assert_status_code(&response, 200);
    debug!(id = %extract_id(&response), "Created payment intent");
    response
}

/// Create the sample customer, failing the test unless it succeeds
pub async fn created_customer(client: &StripeClient) -> ApiResponse {
    let response = client
        .create_customer(&sample_customer())
        .await
        .unwrap_or_else(|e| panic!("create customer: {e}"));
    assert_status_code(&response, 200);
    debug!(id = %extract_id(&response), "Created customer");
    response
}

/// Create the sample charge, failing the test unless it succeeds
pub async fn created_charge(client: &StripeClient) -> ApiResponse {
    let response = client
        .create_charge(&sample_charge())
        .await
        .unwrap_or_else(|e| panic!("create charge: {e}"));
    assert_status_code(&response, 200);
    debug!(id = %extract_id(&response), "Created charge");
    response
}

/// Create a charge and refund it, failing the test unless both succeed
pub async fn created_refund(client: &StripeClient) -> ApiResponse {
    let charge_id = extract_id(&created_charge(client).await);
    let response = client
        .create_refund(&sample_refund().with_charge(charge_id.as_str()))
        .await
        .unwrap_or_else(|e| panic!("create refund: {e}"));
    assert_status_code(&response, 200);
    debug!(id = %extract_id(&response), charge = %charge_id, "Created refund");
    response
}
