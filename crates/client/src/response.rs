use reqwest::{StatusCode, header::HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Raw response of one API call: status code, headers and body text
///
/// The body is read eagerly so the response can be inspected any number of
/// times. Nothing about the status is interpreted here.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl ApiResponse {
    /// Build a response from its parts
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Build a response with a JSON body
    pub fn from_json(status: StatusCode, body: &JsonValue) -> Self {
        Self::new(status, body.to_string())
    }

    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Numeric status code
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body as received
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON
    pub fn json(&self) -> Result<JsonValue> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body into a typed view
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
