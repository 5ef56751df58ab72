//! In-process stand-in for stripe-mock.
//!
//! Stateless like the real thing: creations mint fresh prefixed ids, every
//! other call echoes the id from the path back inside a canned object with
//! the request's parameters applied. Authentication, required parameters,
//! `limit` bounds and parameter syntax are enforced with stripe-style error
//! envelopes.

use std::{
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

use paymock_types::{ErrorType, ObjectPrefix, ObjectType, RefundReason, status};
use serde_json::{Map, Value as JsonValue, json};
use wiremock::{Request, Respond, ResponseTemplate};

/// Items returned by list and search calls when `limit` allows it
const PAGE_SIZE: i64 = 3;
const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

/// Amount used by canned objects when the request carries none
const FIXTURE_AMOUNT: i64 = 1099;

type Reply = Result<JsonValue, ResponseTemplate>;

pub struct StripeMock;

impl Respond for StripeMock {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        if let Err(rejection) = authorize(request) {
            return rejection;
        }
        let params = match FormParams::from_request(request) {
            Ok(params) => params,
            Err(rejection) => return rejection,
        };

        let path = request.url.path();
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        let reply = match (request.method.as_str(), segments.as_slice()) {
            ("POST", ["v1", "payment_intents"]) => {
                require(&params, &["amount", "currency"]).and_then(|()| {
                    payment_intent(&generate_id(ObjectPrefix::PaymentIntent), &params, None)
                })
            }
            ("GET", ["v1", "payment_intents"]) => list(path, &params, payment_intent_item),
            ("GET" | "POST", ["v1", "payment_intents", id]) => payment_intent(id, &params, None),
            ("POST", ["v1", "payment_intents", id, "confirm"]) => {
                payment_intent(id, &params, Some("succeeded"))
            }
            ("POST", ["v1", "payment_intents", id, "capture"]) => {
                payment_intent(id, &params, Some("succeeded"))
            }
            ("POST", ["v1", "payment_intents", id, "cancel"]) => {
                payment_intent(id, &params, Some("canceled"))
            }

            ("POST", ["v1", "customers"]) => {
                customer(&generate_id(ObjectPrefix::Customer), &params)
            }
            ("GET", ["v1", "customers"]) => list(path, &params, customer),
            ("GET", ["v1", "customers", "search"]) => search(path, &params, customer),
            ("GET" | "POST", ["v1", "customers", id]) => customer(id, &params),
            ("DELETE", ["v1", "customers", id]) => Ok(json!({
                "id": id,
                "object": ObjectType::Customer,
                "deleted": true
            })),

            ("POST", ["v1", "refunds"]) => refund(&generate_id(ObjectPrefix::Refund), &params, None),
            ("GET", ["v1", "refunds"]) => list(path, &params, refund_item),
            ("GET" | "POST", ["v1", "refunds", id]) => refund(id, &params, None),
            ("POST", ["v1", "refunds", id, "cancel"]) => refund(id, &params, Some("canceled")),

            ("POST", ["v1", "charges"]) => require(&params, &["amount", "currency"])
                .and_then(|()| charge(&generate_id(ObjectPrefix::Charge), &params, false)),
            ("GET", ["v1", "charges"]) => list(path, &params, charge_item),
            ("GET", ["v1", "charges", "search"]) => search(path, &params, charge_item),
            ("GET" | "POST", ["v1", "charges", id]) => charge(id, &params, false),
            ("POST", ["v1", "charges", id, "capture"]) => charge(id, &params, true),

            (method, _) => Err(invalid_request(
                status::NOT_FOUND,
                format!("Unrecognized request URL ({method}: {path})."),
                None,
            )),
        };

        match reply {
            Ok(body) => ResponseTemplate::new(status::OK).set_body_json(body),
            Err(rejection) => rejection,
        }
    }
}

/// Id in the same shape as stripe's: prefix plus 24 hex characters
pub fn generate_id(prefix: ObjectPrefix) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &uuid[..24])
}

fn invalid_request(status: u16, message: String, param: Option<&str>) -> ResponseTemplate {
    let mut error = json!({
        "type": ErrorType::InvalidRequest,
        "message": message,
    });
    if let Some(param) = param {
        error["param"] = json!(param);
    }
    ResponseTemplate::new(status).set_body_json(json!({ "error": error }))
}

fn authorize(request: &Request) -> Result<(), ResponseTemplate> {
    let header = request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    match header.and_then(|h| h.strip_prefix("Bearer ")) {
        None => Err(invalid_request(
            status::UNAUTHORIZED,
            "You did not provide an API key. Provide it in the Authorization header \
             using Bearer auth (e.g. 'Authorization: Bearer YOUR_SECRET_KEY')."
                .to_string(),
            None,
        )),
        Some(key) if !key.starts_with("sk_test_") => Err(invalid_request(
            status::UNAUTHORIZED,
            format!("Invalid API Key provided: {key}"),
            None,
        )),
        Some(_) => Ok(()),
    }
}

fn require(params: &FormParams, names: &[&str]) -> Result<(), ResponseTemplate> {
    match names.iter().find(|name| params.get(name).is_none()) {
        Some(name) => Err(invalid_request(
            status::BAD_REQUEST,
            format!("Missing required param: {name}."),
            Some(*name),
        )),
        None => Ok(()),
    }
}

/// Decoded form body and query string of one request
struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    fn from_request(request: &Request) -> Result<Self, ResponseTemplate> {
        let mut pairs: Vec<(String, String)> = request
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if !request.body.is_empty() {
            let body: Vec<(String, String)> = serde_urlencoded::from_bytes(&request.body)
                .map_err(|e| {
                    invalid_request(
                        status::BAD_REQUEST,
                        format!("Invalid request body: {e}"),
                        None,
                    )
                })?;
            pairs.extend(body);
        }

        if let Some((key, _)) = pairs.iter().find(|(key, _)| !is_param_key(key)) {
            return Err(invalid_request(
                status::BAD_REQUEST,
                format!("Received unknown parameter: {key}"),
                Some(key.as_str()),
            ));
        }
        Ok(Self { pairs })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn string(&self, key: &str) -> JsonValue {
        self.get(key).map_or(JsonValue::Null, |v| json!(v))
    }

    fn integer(&self, key: &str) -> Result<Option<i64>, ResponseTemplate> {
        self.get(key)
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    invalid_request(
                        status::BAD_REQUEST,
                        format!("Invalid integer: {raw}"),
                        Some(key),
                    )
                })
            })
            .transpose()
    }

    /// `metadata[key]=value` pairs folded back into an object
    fn metadata(&self) -> JsonValue {
        let entries: Map<String, JsonValue> = self
            .pairs
            .iter()
            .filter_map(|(k, v)| {
                let key = k.strip_prefix("metadata[")?.strip_suffix(']')?;
                Some((key.to_string(), json!(v)))
            })
            .collect();
        JsonValue::Object(entries)
    }
}

/// `name` or `name[sub]...` made of plain identifier characters
fn is_param_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '[' | ']'))
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn payment_intent(id: &str, params: &FormParams, state: Option<&str>) -> Reply {
    let amount = params.integer("amount")?.unwrap_or(FIXTURE_AMOUNT);
    let state = state.unwrap_or(if params.get("payment_method").is_some() {
        "requires_confirmation"
    } else {
        "requires_payment_method"
    });
    let amount_received = if state == "succeeded" { amount } else { 0 };
    Ok(json!({
        "id": id,
        "object": ObjectType::PaymentIntent,
        "amount": amount,
        "amount_received": amount_received,
        "currency": params.get("currency").unwrap_or("usd"),
        "status": state,
        "customer": params.string("customer"),
        "payment_method": params.string("payment_method"),
        "description": params.string("description"),
        "cancellation_reason": params.string("cancellation_reason"),
        "metadata": params.metadata(),
        "created": now(),
        "livemode": false
    }))
}

fn payment_intent_item(id: &str, params: &FormParams) -> Reply {
    payment_intent(id, params, None)
}

fn customer(id: &str, params: &FormParams) -> Reply {
    Ok(json!({
        "id": id,
        "object": ObjectType::Customer,
        "email": params.string("email"),
        "name": params.string("name"),
        "phone": params.string("phone"),
        "description": params.string("description"),
        "metadata": params.metadata(),
        "balance": 0,
        "created": now(),
        "livemode": false
    }))
}

fn refund(id: &str, params: &FormParams, state: Option<&str>) -> Reply {
    let reason = match params.get("reason") {
        Some(raw) => match RefundReason::from_str(raw) {
            Ok(reason) => json!(reason),
            Err(e) => {
                return Err(invalid_request(
                    status::BAD_REQUEST,
                    e.to_string(),
                    Some("reason"),
                ));
            }
        },
        None => JsonValue::Null,
    };
    Ok(json!({
        "id": id,
        "object": ObjectType::Refund,
        "amount": params.integer("amount")?.unwrap_or(FIXTURE_AMOUNT),
        "currency": params.get("currency").unwrap_or("usd"),
        "charge": params.string("charge"),
        "payment_intent": params.string("payment_intent"),
        "reason": reason,
        "status": state.unwrap_or("succeeded"),
        "metadata": params.metadata(),
        "created": now()
    }))
}

fn refund_item(id: &str, params: &FormParams) -> Reply {
    refund(id, params, None)
}

fn charge(id: &str, params: &FormParams, capture: bool) -> Reply {
    let amount = params.integer("amount")?.unwrap_or(FIXTURE_AMOUNT);
    let captured = capture || params.get("capture") != Some("false");
    let amount_captured = if captured { amount } else { 0 };
    let source = params
        .get("source")
        .map_or(JsonValue::Null, |token| json!({"id": token, "object": "card"}));
    Ok(json!({
        "id": id,
        "object": ObjectType::Charge,
        "amount": amount,
        "amount_captured": amount_captured,
        "currency": params.get("currency").unwrap_or("usd"),
        "captured": captured,
        "paid": true,
        "status": "succeeded",
        "customer": params.string("customer"),
        "description": params.string("description"),
        "source": source,
        "metadata": params.metadata(),
        "created": now(),
        "livemode": false
    }))
}

fn charge_item(id: &str, params: &FormParams) -> Reply {
    charge(id, params, false)
}

fn page(
    params: &FormParams,
    item: fn(&str, &FormParams) -> Reply,
    prefix: ObjectPrefix,
) -> Result<Vec<JsonValue>, ResponseTemplate> {
    let limit = params.integer("limit")?.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(invalid_request(
            status::BAD_REQUEST,
            format!("Invalid limit: must be between 1 and {MAX_LIMIT}"),
            Some("limit"),
        ));
    }
    (0..limit.min(PAGE_SIZE))
        .map(|_| item(&generate_id(prefix), params))
        .collect()
}

fn prefix_of(path: &str) -> ObjectPrefix {
    match path.split('/').nth(2) {
        Some("payment_intents") => ObjectPrefix::PaymentIntent,
        Some("customers") => ObjectPrefix::Customer,
        Some("refunds") => ObjectPrefix::Refund,
        _ => ObjectPrefix::Charge,
    }
}

fn list(path: &str, params: &FormParams, item: fn(&str, &FormParams) -> Reply) -> Reply {
    let data = page(params, item, prefix_of(path))?;
    Ok(json!({
        "object": ObjectType::List,
        "data": data,
        "has_more": false,
        "url": path
    }))
}

fn search(path: &str, params: &FormParams, item: fn(&str, &FormParams) -> Reply) -> Reply {
    require(params, &["query"])?;
    let data = page(params, item, prefix_of(path))?;
    Ok(json!({
        "object": ObjectType::SearchResult,
        "data": data,
        "has_more": false,
        "next_page": null,
        "url": path
    }))
}
