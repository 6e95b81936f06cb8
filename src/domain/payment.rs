use super::money::Currency;
use crate::error::{GatewayError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Path of the shop's payment API, relative to its base URL.
pub const PAYMENT_RESOURCE_PATH: &str = "/api/payment";
pub const ACKNOWLEDGEMENT_PATH: &str = "acknowledgement";

/// The shop a gateway is created for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub slug: String,
}

impl Tenant {
    pub fn new(id: Uuid, slug: impl Into<String>) -> Self {
        Self {
            id,
            slug: slug.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub country_of_residence: Option<String>,
}

/// Raw card details, only ever forwarded to a tokenizing vendor.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last4 = self
            .number
            .get(self.number.len().saturating_sub(4)..)
            .unwrap_or_default();
        f.debug_struct("Card")
            .field("number", &format_args!("**** {last4}"))
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .finish_non_exhaustive()
    }
}

/// Everything the shop knows about a purchase, beyond its amount.
///
/// Gateways pick the fields they need and report the first missing one with
/// [`GatewayError::MissingPaymentData`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentData {
    pub base_url: Option<String>,
    pub order_id: Option<Uuid>,
    pub currency: Option<Currency>,
    pub customer: Option<Customer>,
    pub return_url: Option<String>,
    pub cancel_url: Option<String>,
    pub ipn_url: Option<String>,
    pub card: Option<Card>,
    pub card_token: Option<String>,
    pub description: Option<String>,
}

impl PaymentData {
    pub fn require_base_url(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .ok_or(GatewayError::MissingPaymentData("base_url"))
    }

    pub fn require_order_id(&self) -> Result<Uuid> {
        self.order_id
            .ok_or(GatewayError::MissingPaymentData("order_id"))
    }

    pub fn require_currency(&self) -> Result<Currency> {
        self.currency
            .ok_or(GatewayError::MissingPaymentData("currency"))
    }

    pub fn require_customer(&self) -> Result<&Customer> {
        self.customer
            .as_ref()
            .ok_or(GatewayError::MissingPaymentData("customer"))
    }
}

/// URL the vendor calls (or redirects to) once an order's payment completes.
pub fn acknowledgement_url(base_url: &str, order_id: Uuid, gateway_id: &str) -> String {
    format!(
        "{}{}/{}/{}/{}",
        base_url.trim_end_matches('/'),
        PAYMENT_RESOURCE_PATH,
        order_id,
        ACKNOWLEDGEMENT_PATH,
        gateway_id
    )
}

/// Parameters received on a vendor callback (query string or form body).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams(HashMap<String, Vec<String>>);

impl CallbackParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` string. A leading `?`
    /// is tolerated.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut params = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
        params
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.first(key)
            .ok_or_else(|| GatewayError::MissingParameter(key.to_string()))
    }

    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for CallbackParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
