use paymock_types::endpoints::{self, with_id};
use reqwest::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use tracing::debug;
use url::Url;

use crate::{
    config::Settings,
    error::Result,
    params::{
        CancelPaymentIntent, CaptureCharge, CapturePaymentIntent, ConfirmPaymentIntent,
        CreateCharge, CreateCustomer, CreatePaymentIntent, CreateRefund, ListCharges,
        ListCustomers, ListPaymentIntents, ListRefunds, Params, SearchParams, ToParams,
        UpdateCharge, UpdateCustomer, UpdatePaymentIntent, UpdateRefund,
    },
    response::ApiResponse,
};

/// Content type sent on every request
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body of an outgoing request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// Form-encoded parameters; an empty set sends no body
    Form(Params),
    /// Body sent verbatim, for malformed-payload scenarios
    Raw(String),
}

/// Client for the stripe-mock REST API
///
/// Each method performs exactly one HTTP round trip and hands back the raw
/// [`ApiResponse`]. Error statuses are not interpreted; only transport
/// failures surface as `Err`.
///
/// # Example
///
/// ```ignore
/// use paymock_client::{CreatePaymentIntent, Settings, StripeClient};
///
/// let settings = Settings::from_env()?;
/// let client = StripeClient::new(&settings)?;
///
/// let response = client
///     .create_payment_intent(
///         &CreatePaymentIntent::new(2000, "usd").with_metadata("order_id", "6735"),
///     )
///     .await?;
/// println!("{} {}", response.status(), response.text());
/// ```
#[derive(Debug, Clone)]
pub struct StripeClient {
    /// Underlying HTTP client, configured with timeout and TLS policy
    http: reqwest::Client,

    /// Base URL, without trailing slash
    base_url: String,

    /// Pre-rendered `Authorization` header value
    auth_header: Option<String>,

    /// Whether the transport was told to skip certificate verification
    accept_invalid_certs: bool,
}

/// Builder applying per-client overrides on top of session [`Settings`]
#[derive(Debug, Clone)]
pub struct StripeClientBuilder {
    settings: Settings,
}

impl StripeClientBuilder {
    /// Override the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.settings = self.settings.with_base_url(base_url);
        self
    }

    /// Override the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.settings = self.settings.with_api_key(api_key);
        self
    }

    /// Send requests without an `Authorization` header
    pub fn without_api_key(mut self) -> Self {
        self.settings = self.settings.without_api_key();
        self
    }

    /// Override TLS certificate verification
    pub fn verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.settings = self.settings.with_verify_ssl(verify_ssl);
        self
    }

    pub fn build(self) -> Result<StripeClient> {
        // Reject unusable base URLs up front rather than on the first call
        Url::parse(&self.settings.base_url)?;

        let accept_invalid_certs = !self.settings.verify_ssl;
        let http = reqwest::Client::builder()
            .timeout(self.settings.request_timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;

        Ok(StripeClient {
            http,
            auth_header: self.settings.auth_header(),
            base_url: self.settings.base_url,
            accept_invalid_certs,
        })
    }
}

impl StripeClient {
    /// Create a client from session settings
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::builder(settings).build()
    }

    /// Start a builder seeded with session settings
    pub fn builder(settings: &Settings) -> StripeClientBuilder {
        StripeClientBuilder {
            settings: settings.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry an `Authorization` header
    pub fn is_authenticated(&self) -> bool {
        self.auth_header.is_some()
    }

    /// Whether server certificates are checked during the TLS handshake
    pub fn verifies_certificates(&self) -> bool {
        !self.accept_invalid_certs
    }

    fn build_url(&self, endpoint: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, endpoint))?)
    }

    /// Send one request
    ///
    /// `query` is appended to the URL when non-empty. Every request carries
    /// the form content type, and the bearer token when one is configured.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &Params,
        body: RequestBody,
    ) -> Result<ApiResponse> {
        let url = self.build_url(endpoint)?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE);

        if let Some(ref auth) = self.auth_header {
            request = request.header(AUTHORIZATION, auth);
        }

        if !query.is_empty() {
            request = request.query(query.pairs());
        }

        request = match body {
            RequestBody::Form(params) if !params.is_empty() => request.body(params.encode()?),
            RequestBody::Raw(raw) => request.body(raw),
            RequestBody::Form(_) | RequestBody::Empty => request,
        };

        debug!(
            method = %method,
            url = %url,
            authenticated = self.auth_header.is_some(),
            "Sending request"
        );

        let response = ApiResponse::read(request.send().await?).await?;

        debug!(
            method = %method,
            url = %url,
            status = response.status_code(),
            bytes = response.text().len(),
            "Received response"
        );

        Ok(response)
    }

    pub async fn get(&self, endpoint: &str, query: &Params) -> Result<ApiResponse> {
        self.request(Method::GET, endpoint, query, RequestBody::Empty)
            .await
    }

    pub async fn post(&self, endpoint: &str, form: &Params) -> Result<ApiResponse> {
        self.request(
            Method::POST,
            endpoint,
            &Params::new(),
            RequestBody::Form(form.clone()),
        )
        .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
        self.request(Method::DELETE, endpoint, &Params::new(), RequestBody::Empty)
            .await
    }

    // Payment intents

    pub async fn create_payment_intent(
        &self,
        request: &CreatePaymentIntent,
    ) -> Result<ApiResponse> {
        self.post(endpoints::PAYMENT_INTENTS, &request.to_params())
            .await
    }

    pub async fn retrieve_payment_intent(&self, payment_intent_id: &str) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::PAYMENT_INTENT, payment_intent_id);
        self.get(&endpoint, &Params::new()).await
    }

    pub async fn update_payment_intent(
        &self,
        payment_intent_id: &str,
        request: &UpdatePaymentIntent,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::PAYMENT_INTENT, payment_intent_id);
        self.post(&endpoint, &request.to_params()).await
    }

    pub async fn list_payment_intents(&self, request: &ListPaymentIntents) -> Result<ApiResponse> {
        self.get(endpoints::PAYMENT_INTENTS, &request.to_params())
            .await
    }

    pub async fn confirm_payment_intent(
        &self,
        payment_intent_id: &str,
        request: &ConfirmPaymentIntent,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CONFIRM_PAYMENT_INTENT, payment_intent_id);
        self.post(&endpoint, &request.to_params()).await
    }

    pub async fn capture_payment_intent(
        &self,
        payment_intent_id: &str,
        request: &CapturePaymentIntent,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CAPTURE_PAYMENT_INTENT, payment_intent_id);
        self.post(&endpoint, &request.to_params()).await
    }

    pub async fn cancel_payment_intent(
        &self,
        payment_intent_id: &str,
        request: &CancelPaymentIntent,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CANCEL_PAYMENT_INTENT, payment_intent_id);
        self.post(&endpoint, &request.to_params()).await
    }

    // Customers

    pub async fn create_customer(&self, request: &CreateCustomer) -> Result<ApiResponse> {
        self.post(endpoints::CUSTOMERS, &request.to_params()).await
    }

    pub async fn retrieve_customer(&self, customer_id: &str) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CUSTOMER, customer_id);
        self.get(&endpoint, &Params::new()).await
    }

    pub async fn update_customer(
        &self,
        customer_id: &str,
        request: &UpdateCustomer,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CUSTOMER, customer_id);
        self.post(&endpoint, &request.to_params()).await
    }

    pub async fn delete_customer(&self, customer_id: &str) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CUSTOMER, customer_id);
        self.delete(&endpoint).await
    }

    pub async fn list_customers(&self, request: &ListCustomers) -> Result<ApiResponse> {
        self.get(endpoints::CUSTOMERS, &request.to_params()).await
    }

    pub async fn search_customers(&self, request: &SearchParams) -> Result<ApiResponse> {
        self.get(endpoints::SEARCH_CUSTOMERS, &request.to_params())
            .await
    }

    // Refunds

    pub async fn create_refund(&self, request: &CreateRefund) -> Result<ApiResponse> {
        self.post(endpoints::REFUNDS, &request.to_params()).await
    }

    pub async fn retrieve_refund(&self, refund_id: &str) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::REFUND, refund_id);
        self.get(&endpoint, &Params::new()).await
    }

    pub async fn update_refund(
        &self,
        refund_id: &str,
        request: &UpdateRefund,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::REFUND, refund_id);
        self.post(&endpoint, &request.to_params()).await
    }

    pub async fn list_refunds(&self, request: &ListRefunds) -> Result<ApiResponse> {
        self.get(endpoints::REFUNDS, &request.to_params()).await
    }

    pub async fn cancel_refund(&self, refund_id: &str) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CANCEL_REFUND, refund_id);
        self.post(&endpoint, &Params::new()).await
    }

    // Charges

    pub async fn create_charge(&self, request: &CreateCharge) -> Result<ApiResponse> {
        self.post(endpoints::CHARGES, &request.to_params()).await
    }

    pub async fn retrieve_charge(&self, charge_id: &str) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CHARGE, charge_id);
        self.get(&endpoint, &Params::new()).await
    }

    pub async fn update_charge(
        &self,
        charge_id: &str,
        request: &UpdateCharge,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CHARGE, charge_id);
        self.post(&endpoint, &request.to_params()).await
    }

    pub async fn capture_charge(
        &self,
        charge_id: &str,
        request: &CaptureCharge,
    ) -> Result<ApiResponse> {
        let endpoint = with_id(endpoints::CAPTURE_CHARGE, charge_id);
        self.post(&endpoint, &request.to_params()).await
    }

    pub async fn list_charges(&self, request: &ListCharges) -> Result<ApiResponse> {
        self.get(endpoints::CHARGES, &request.to_params()).await
    }

    pub async fn search_charges(&self, request: &SearchParams) -> Result<ApiResponse> {
        self.get(endpoints::SEARCH_CHARGES, &request.to_params())
            .await
    }
}
