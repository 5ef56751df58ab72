//! Paymock testkit
//!
//! Assertion helpers, sample payloads and session setup for scenario tests
//! against a stripe-mock compatible server. The scenario suite itself lives
//! in this crate's `tests/` directory.
//!
//! ```ignore
//! use paymock_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn creates_a_customer() {
//!     init_tracing();
//!     let client = api_client(&Settings::from_env().unwrap()).unwrap();
//!
//!     let response = client.create_customer(&sample_customer()).await.unwrap();
//!
//!     assert_status_code(&response, 200);
//!     assert_id_prefix(&response, ObjectPrefix::Customer);
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod logging;

pub use assertions::{JsonBody, JsonType};
pub use logging::init_tracing;

/// Everything a scenario test usually needs
pub mod prelude {
    pub use paymock_client::{
        ApiResponse, ClientError, Method, Params, RequestBody, Settings, StatusCode,
        StripeClient, ToParams,
    };
    pub use paymock_types::{
        Charge, Customer, ErrorType, ObjectPrefix, ObjectType, PaymentIntent,
        PaymentIntentStatus, Refund, RefundReason, RefundStatus, status, test_data,
    };

    pub use crate::{assertions::*, fixtures::*, logging::init_tracing};
}
