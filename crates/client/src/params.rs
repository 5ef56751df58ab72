//! Form and query parameters for stripe-mock requests
//!
//! Every request struct turns into a flat, ordered [`Params`] list. Absent
//! optional fields are left out entirely, metadata maps are flattened to
//! `metadata[key]=value` pairs, and the `extra` bag is merged last so callers
//! can send fields this crate does not model yet.

use indexmap::IndexMap;
use paymock_types::RefundReason;

use crate::error::Result;

/// Ordered key/value pairs sent as a form body or query string
///
/// Setting a key that is already present replaces its value in place.
/// Appending keeps every value, which is how list parameters such as
/// `expand[]` go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Add `key=value` after any existing values for `key`
    pub fn append(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Drop every value for `key`
    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.pairs.retain(|(k, _)| k != key);
        self
    }

    /// Set `key` only when a value is present
    pub fn set_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    /// Flatten a metadata map into `metadata[key]=value` pairs
    pub fn metadata(&mut self, metadata: &IndexMap<String, String>) -> &mut Self {
        for (key, value) in metadata {
            self.set(format!("metadata[{}]", key), value);
        }
        self
    }

    /// Merge another set of parameters, its values winning on conflict
    ///
    /// A key repeated in `other` keeps all of its values.
    pub fn extend(&mut self, other: &Params) -> &mut Self {
        let mut merged: Vec<&str> = Vec::new();
        for (key, value) in &other.pairs {
            if merged.contains(&key.as_str()) {
                self.append(key.as_str(), value);
            } else {
                self.set(key.as_str(), value);
                merged.push(key);
            }
        }
        self
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value sent for `key`, in order
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(&self.pairs)?)
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.set(key, value);
        }
        params
    }
}

/// Conversion of a request description into wire parameters
pub trait ToParams {
    fn to_params(&self) -> Params;
}

impl ToParams for Params {
    fn to_params(&self) -> Params {
        self.clone()
    }
}

/// Generates `with_*` setters for optional fields plus the metadata and
/// extra-parameter setters shared by every request struct.
macro_rules! request_setters {
    ($ty:ident with metadata { $($rest:tt)* }) => {
        request_setters!($ty { $($rest)* });

        impl $ty {
            /// Add one metadata entry
            pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
                self.metadata.insert(key.into(), value.into());
                self
            }
        }
    };
    ($ty:ident { $($field:ident => $setter:ident : $inner:ty),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $setter(mut self, value: impl Into<$inner>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*

            /// Add a field not modelled by this struct
            pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
                self.extra.set(key, value);
                self
            }

            /// Send a list parameter, one `key=value` pair per element
            ///
            /// Replaces any values previously given for `key`.
            pub fn with_params<I>(mut self, key: impl Into<String>, values: I) -> Self
            where
                I: IntoIterator,
                I::Item: ToString,
            {
                let key = key.into();
                self.extra.remove(&key);
                for value in values {
                    self.extra.append(key.as_str(), value);
                }
                self
            }
        }
    };
}

/// `POST /v1/payment_intents`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePaymentIntent {
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub customer: Option<String>,
    pub payment_method: Option<String>,
    pub metadata: IndexMap<String, String>,
    pub extra: Params,
}

impl CreatePaymentIntent {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            ..Default::default()
        }
    }
}

request_setters!(CreatePaymentIntent with metadata {
    amount => with_amount: i64,
    currency => with_currency: String,
    description => with_description: String,
    customer => with_customer: String,
    payment_method => with_payment_method: String,
});

impl ToParams for CreatePaymentIntent {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("amount", self.amount)
            .set_opt("currency", self.currency.as_ref())
            .set_opt("description", self.description.as_ref())
            .set_opt("customer", self.customer.as_ref())
            .set_opt("payment_method", self.payment_method.as_ref())
            .metadata(&self.metadata)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/payment_intents/{id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePaymentIntent {
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub description: Option<String>,
    pub customer: Option<String>,
    pub payment_method: Option<String>,
    pub metadata: IndexMap<String, String>,
    pub extra: Params,
}

request_setters!(UpdatePaymentIntent with metadata {
    amount => with_amount: i64,
    currency => with_currency: String,
    description => with_description: String,
    customer => with_customer: String,
    payment_method => with_payment_method: String,
});

impl ToParams for UpdatePaymentIntent {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("amount", self.amount)
            .set_opt("currency", self.currency.as_ref())
            .set_opt("description", self.description.as_ref())
            .set_opt("customer", self.customer.as_ref())
            .set_opt("payment_method", self.payment_method.as_ref())
            .metadata(&self.metadata)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/payment_intents/{id}/confirm`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmPaymentIntent {
    pub payment_method: Option<String>,
    pub extra: Params,
}

request_setters!(ConfirmPaymentIntent {
    payment_method => with_payment_method: String,
});

impl ToParams for ConfirmPaymentIntent {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("payment_method", self.payment_method.as_ref())
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/payment_intents/{id}/capture`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturePaymentIntent {
    pub amount_to_capture: Option<i64>,
    pub extra: Params,
}

request_setters!(CapturePaymentIntent {
    amount_to_capture => with_amount_to_capture: i64,
});

impl ToParams for CapturePaymentIntent {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("amount_to_capture", self.amount_to_capture)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/payment_intents/{id}/cancel`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CancelPaymentIntent {
    pub cancellation_reason: Option<String>,
    pub extra: Params,
}

request_setters!(CancelPaymentIntent {
    cancellation_reason => with_cancellation_reason: String,
});

impl ToParams for CancelPaymentIntent {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("cancellation_reason", self.cancellation_reason.as_ref())
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/customers`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateCustomer {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub metadata: IndexMap<String, String>,
    pub extra: Params,
}

request_setters!(CreateCustomer with metadata {
    email => with_email: String,
    name => with_name: String,
    phone => with_phone: String,
    description => with_description: String,
});

impl ToParams for CreateCustomer {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("email", self.email.as_ref())
            .set_opt("name", self.name.as_ref())
            .set_opt("phone", self.phone.as_ref())
            .set_opt("description", self.description.as_ref())
            .metadata(&self.metadata)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/customers/{id}` takes the same fields as creation
pub type UpdateCustomer = CreateCustomer;

/// `POST /v1/refunds`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateRefund {
    pub charge: Option<String>,
    pub payment_intent: Option<String>,
    pub amount: Option<i64>,
    pub reason: Option<RefundReason>,
    pub metadata: IndexMap<String, String>,
    pub extra: Params,
}

request_setters!(CreateRefund with metadata {
    charge => with_charge: String,
    payment_intent => with_payment_intent: String,
    amount => with_amount: i64,
    reason => with_reason: RefundReason,
});

impl ToParams for CreateRefund {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("charge", self.charge.as_ref())
            .set_opt("payment_intent", self.payment_intent.as_ref())
            .set_opt("amount", self.amount)
            .set_opt("reason", self.reason)
            .metadata(&self.metadata)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/refunds/{id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRefund {
    pub reason: Option<RefundReason>,
    pub metadata: IndexMap<String, String>,
    pub extra: Params,
}

request_setters!(UpdateRefund with metadata {
    reason => with_reason: RefundReason,
});

impl ToParams for UpdateRefund {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("reason", self.reason)
            .metadata(&self.metadata)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/charges`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateCharge {
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub source: Option<String>,
    pub customer: Option<String>,
    pub description: Option<String>,
    pub metadata: IndexMap<String, String>,
    pub extra: Params,
}

impl CreateCharge {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            ..Default::default()
        }
    }
}

request_setters!(CreateCharge with metadata {
    amount => with_amount: i64,
    currency => with_currency: String,
    source => with_source: String,
    customer => with_customer: String,
    description => with_description: String,
});

impl ToParams for CreateCharge {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("amount", self.amount)
            .set_opt("currency", self.currency.as_ref())
            .set_opt("source", self.source.as_ref())
            .set_opt("customer", self.customer.as_ref())
            .set_opt("description", self.description.as_ref())
            .metadata(&self.metadata)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/charges/{id}`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateCharge {
    pub description: Option<String>,
    pub customer: Option<String>,
    pub metadata: IndexMap<String, String>,
    pub extra: Params,
}

request_setters!(UpdateCharge with metadata {
    description => with_description: String,
    customer => with_customer: String,
});

impl ToParams for UpdateCharge {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("description", self.description.as_ref())
            .set_opt("customer", self.customer.as_ref())
            .metadata(&self.metadata)
            .extend(&self.extra);
        params
    }
}

/// `POST /v1/charges/{id}/capture`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureCharge {
    pub amount: Option<i64>,
    pub extra: Params,
}

request_setters!(CaptureCharge {
    amount => with_amount: i64,
});

impl ToParams for CaptureCharge {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.set_opt("amount", self.amount).extend(&self.extra);
        params
    }
}

/// `GET /v1/payment_intents`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPaymentIntents {
    pub limit: Option<i64>,
    pub customer: Option<String>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
    pub extra: Params,
}

request_setters!(ListPaymentIntents {
    limit => with_limit: i64,
    customer => with_customer: String,
    starting_after => with_starting_after: String,
    ending_before => with_ending_before: String,
});

impl ToParams for ListPaymentIntents {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("limit", self.limit)
            .set_opt("customer", self.customer.as_ref())
            .set_opt("starting_after", self.starting_after.as_ref())
            .set_opt("ending_before", self.ending_before.as_ref())
            .extend(&self.extra);
        params
    }
}

/// `GET /v1/customers`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCustomers {
    pub limit: Option<i64>,
    pub email: Option<String>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
    pub extra: Params,
}

request_setters!(ListCustomers {
    limit => with_limit: i64,
    email => with_email: String,
    starting_after => with_starting_after: String,
    ending_before => with_ending_before: String,
});

impl ToParams for ListCustomers {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("limit", self.limit)
            .set_opt("email", self.email.as_ref())
            .set_opt("starting_after", self.starting_after.as_ref())
            .set_opt("ending_before", self.ending_before.as_ref())
            .extend(&self.extra);
        params
    }
}

/// `GET /v1/refunds`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRefunds {
    pub limit: Option<i64>,
    pub charge: Option<String>,
    pub payment_intent: Option<String>,
    pub extra: Params,
}

request_setters!(ListRefunds {
    limit => with_limit: i64,
    charge => with_charge: String,
    payment_intent => with_payment_intent: String,
});

impl ToParams for ListRefunds {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("limit", self.limit)
            .set_opt("charge", self.charge.as_ref())
            .set_opt("payment_intent", self.payment_intent.as_ref())
            .extend(&self.extra);
        params
    }
}

/// `GET /v1/charges`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCharges {
    pub limit: Option<i64>,
    pub customer: Option<String>,
    pub payment_intent: Option<String>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
    pub extra: Params,
}

request_setters!(ListCharges {
    limit => with_limit: i64,
    customer => with_customer: String,
    payment_intent => with_payment_intent: String,
    starting_after => with_starting_after: String,
    ending_before => with_ending_before: String,
});

impl ToParams for ListCharges {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set_opt("limit", self.limit)
            .set_opt("customer", self.customer.as_ref())
            .set_opt("payment_intent", self.payment_intent.as_ref())
            .set_opt("starting_after", self.starting_after.as_ref())
            .set_opt("ending_before", self.ending_before.as_ref())
            .extend(&self.extra);
        params
    }
}

/// `GET /v1/customers/search` and `GET /v1/charges/search`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub limit: Option<i64>,
    pub page: Option<String>,
    pub extra: Params,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

request_setters!(SearchParams {
    limit => with_limit: i64,
    page => with_page: String,
});

impl ToParams for SearchParams {
    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params
            .set("query", &self.query)
            .set_opt("limit", self.limit)
            .set_opt("page", self.page.as_ref())
            .extend(&self.extra);
        params
    }
}
