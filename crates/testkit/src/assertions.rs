//! Assertion helpers over API responses
//!
//! Every helper panics with a descriptive message when its expectation is
//! not met, so it reads like a plain `assert!` inside a test. Helpers that
//! inspect the body accept either an [`ApiResponse`] or an already decoded
//! [`JsonValue`]; a body that is not JSON is itself a failure.

use std::{borrow::Cow, fmt};

use paymock_client::ApiResponse;
use paymock_types::{ErrorType, ObjectPrefix, ObjectType};
use schemars::JsonSchema;
use serde_json::Value as JsonValue;

/// Anything that can hand out a decoded JSON body
pub trait JsonBody {
    fn json_body(&self) -> Cow<'_, JsonValue>;
}

impl JsonBody for ApiResponse {
    #[track_caller]
    fn json_body(&self) -> Cow<'_, JsonValue> {
        Cow::Owned(get_response_json(self))
    }
}

impl JsonBody for JsonValue {
    fn json_body(&self) -> Cow<'_, JsonValue> {
        Cow::Borrowed(self)
    }
}

/// JSON value kinds accepted by [`assert_field_types`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl JsonType {
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Integer => value.is_i64() || value.is_u64(),
            JsonType::Number => value.is_number(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Object => value.is_object(),
            JsonType::Array => value.is_array(),
        }
    }

    /// Kind of an arbitrary value, `None` for null
    pub fn of(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            JsonValue::Bool(_) => Some(JsonType::Boolean),
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => Some(JsonType::Integer),
            JsonValue::Number(_) => Some(JsonType::Number),
            JsonValue::String(_) => Some(JsonType::String),
            JsonValue::Array(_) => Some(JsonType::Array),
            JsonValue::Object(_) => Some(JsonType::Object),
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Object => "object",
            JsonType::Array => "array",
        };
        f.write_str(name)
    }
}

/// Decode the response body, failing the test if it is not JSON
#[track_caller]
pub fn get_response_json(response: &ApiResponse) -> JsonValue {
    match response.json() {
        Ok(json) => json,
        Err(e) => panic!(
            "Response body is not valid JSON ({e}), status {}: {}",
            response.status_code(),
            response.text()
        ),
    }
}

/// Body rendered for failure messages: pretty JSON when possible, raw text otherwise
fn describe_body(response: &ApiResponse) -> String {
    response
        .json()
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| response.text().to_string())
}

#[track_caller]
pub fn assert_status_code(response: &ApiResponse, expected: u16) {
    if response.status_code() != expected {
        panic!(
            "Expected status {expected}, got {}\nResponse: {}",
            response.status_code(),
            describe_body(response)
        );
    }
}

/// [`assert_status_code`] with a caller supplied prefix on failure
#[track_caller]
pub fn assert_status_code_with_message(response: &ApiResponse, expected: u16, message: &str) {
    if response.status_code() != expected {
        panic!(
            "{message}\nExpected status {expected}, got {}\nResponse: {}",
            response.status_code(),
            describe_body(response)
        );
    }
}

/// The top-level `id` of a body
#[track_caller]
pub fn extract_id<B: JsonBody + ?Sized>(body: &B) -> String {
    let data = body.json_body();
    match data.get("id").and_then(JsonValue::as_str) {
        Some(id) => id.to_string(),
        None => panic!("Response has no string 'id' field: {data}"),
    }
}

/// Check that `key` is present and, when given, equal to `expected`
#[track_caller]
pub fn assert_response_contains<B: JsonBody + ?Sized>(
    body: &B,
    key: &str,
    expected: Option<JsonValue>,
) {
    let data = body.json_body();
    let Some(actual) = data.get(key) else {
        panic!("Key '{key}' not found in response: {data}");
    };
    if let Some(expected) = expected {
        assert_eq!(
            actual, &expected,
            "Expected '{key}' to be {expected}, got {actual}"
        );
    }
}

#[track_caller]
pub fn assert_object_type<B: JsonBody + ?Sized>(body: &B, expected: ObjectType) {
    let data = body.json_body();
    let actual = data.get("object").and_then(JsonValue::as_str);
    if actual != Some(expected.as_str()) {
        panic!(
            "Expected object type '{expected}', got {}",
            actual.map_or("<missing>".to_string(), |s| format!("'{s}'"))
        );
    }
}

#[track_caller]
pub fn assert_id_prefix<B: JsonBody + ?Sized>(body: &B, prefix: ObjectPrefix) {
    let id = extract_id(body);
    assert!(
        prefix.matches(&id),
        "Expected id to start with '{prefix}', got '{id}'"
    );
}

/// Check the list envelope and, when given, the `object` of every item
#[track_caller]
pub fn assert_is_list_response<B: JsonBody + ?Sized>(body: &B, item_type: Option<ObjectType>) {
    let data = body.json_body();
    assert_eq!(
        data.get("object").and_then(JsonValue::as_str),
        Some(ObjectType::List.as_str()),
        "Expected a list envelope, got: {data}"
    );
    let Some(items) = data.get("data").and_then(JsonValue::as_array) else {
        panic!("List envelope 'data' is not an array: {data}");
    };
    if let Some(item_type) = item_type {
        for (index, item) in items.iter().enumerate() {
            let actual = item.get("object").and_then(JsonValue::as_str);
            if actual != Some(item_type.as_str()) {
                panic!("Expected item {index} to be '{item_type}', got {item}");
            }
        }
    }
}

/// Check that `data` holds no more than `limit` items
#[track_caller]
pub fn assert_list_len_at_most<B: JsonBody + ?Sized>(body: &B, limit: usize) {
    let data = body.json_body();
    let Some(items) = data.get("data").and_then(JsonValue::as_array) else {
        panic!("Response has no 'data' array: {data}");
    };
    assert!(
        items.len() <= limit,
        "Expected at most {limit} items, got {}",
        items.len()
    );
}

/// Check the error envelope and, when given, its `type`
#[track_caller]
pub fn assert_error_response<B: JsonBody + ?Sized>(body: &B, expected: Option<ErrorType>) {
    let data = body.json_body();
    let Some(error) = data.get("error") else {
        panic!("Expected an error envelope, got: {data}");
    };
    if let Some(expected) = expected {
        let actual = error.get("type").and_then(JsonValue::as_str);
        if actual != Some(expected.as_str()) {
            panic!(
                "Expected error type '{expected}', got {}",
                actual.map_or("<missing>".to_string(), |s| format!("'{s}'"))
            );
        }
    }
}

/// Validate the body against a JSON schema, reporting every violation
#[track_caller]
pub fn validate_json_schema<B: JsonBody + ?Sized>(body: &B, schema: &JsonValue) {
    let validator = match jsonschema::validator_for(schema) {
        Ok(validator) => validator,
        Err(e) => panic!("Invalid JSON schema: {e}"),
    };
    let data = body.json_body();
    let violations: Vec<String> = validator
        .iter_errors(&data)
        .map(|error| error.to_string())
        .collect();
    if !violations.is_empty() {
        panic!(
            "Schema validation failed:\n  - {}\nResponse: {data}",
            violations.join("\n  - ")
        );
    }
}

/// Check the JSON kind of each listed field; absent or null fields pass
#[track_caller]
pub fn assert_field_types<B: JsonBody + ?Sized>(body: &B, fields: &[(&str, JsonType)]) {
    let data = body.json_body();
    for (field, expected) in fields {
        match data.get(*field) {
            None | Some(JsonValue::Null) => {}
            Some(value) if expected.matches(value) => {}
            Some(value) => panic!(
                "Field '{field}' should be {expected}, got {} ({value})",
                JsonType::of(value).map_or("null".to_string(), |t| t.to_string())
            ),
        }
    }
}

/// Check that every listed field is present, naming all missing ones at once
#[track_caller]
pub fn assert_required_fields<B: JsonBody + ?Sized>(body: &B, fields: &[&str]) {
    let data = body.json_body();
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|field| data.get(*field).is_none())
        .collect();
    if !missing.is_empty() {
        panic!("Missing required fields: {}", missing.join(", "));
    }
}

/// JSON schema of a resource view, for use with [`validate_json_schema`]
pub fn schema_for<T: JsonSchema>() -> JsonValue {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(&schema) {
        Ok(value) => value,
        Err(e) => panic!("Schema for {} is not serializable: {e}", T::schema_name()),
    }
}
