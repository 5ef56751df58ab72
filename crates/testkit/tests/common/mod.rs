#![allow(dead_code)]

mod stripe_mock;

use paymock_testkit::prelude::*;
use wiremock::{Mock, MockServer, matchers::any};

pub use stripe_mock::StripeMock;

/// Set to `1` to run the scenarios against the server named by `STRIPE_MOCK_URL`
pub const LIVE_VAR: &str = "PAYMOCK_LIVE";

pub fn is_live() -> bool {
    std::env::var(LIVE_VAR).is_ok_and(|v| v == "1")
}

/// One scenario's view of the server: settings plus an authenticated client
pub struct Harness {
    pub settings: Settings,
    pub client: StripeClient,
    _server: Option<MockServer>,
}

impl Harness {
    pub async fn start() -> Self {
        init_tracing();

        if is_live() {
            let settings = Settings::from_env().expect("settings from environment");
            tracing::info!(base_url = %settings.base_url, "Running scenarios against live server");
            return Self::with_settings(settings, None);
        }

        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(StripeMock)
            .mount(&server)
            .await;
        let settings = Settings::default().with_base_url(server.uri());
        Self::with_settings(settings, Some(server))
    }

    fn with_settings(settings: Settings, server: Option<MockServer>) -> Self {
        let client = api_client(&settings).expect("authenticated client");
        Self {
            settings,
            client,
            _server: server,
        }
    }

    pub fn unauthenticated(&self) -> StripeClient {
        unauthenticated_client(&self.settings).expect("unauthenticated client")
    }

    pub fn invalid_auth(&self) -> StripeClient {
        invalid_auth_client(&self.settings).expect("client with invalid key")
    }
}
