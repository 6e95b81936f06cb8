use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized outcome of a gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationResult {
    /// The payment has been started; the shopper still has to complete it.
    Initialized,
    Captured,
    Failed,
}

/// The record of one interaction with a vendor, as the shop stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOperation {
    pub gateway_id: String,
    pub external_id: Option<String>,
    pub result: OperationResult,
    #[serde(default)]
    pub memo: BTreeMap<String, String>,
}

impl PaymentOperation {
    pub fn new(gateway_id: impl Into<String>, result: OperationResult) -> Self {
        Self {
            gateway_id: gateway_id.into(),
            external_id: None,
            result,
            memo: BTreeMap::new(),
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn with_memo(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.memo.insert(key.into(), value.into());
        self
    }
}

/// What a gateway hands back to the shop after `purchase` or an
/// acknowledgement.
///
/// Depending on the vendor the shop then redirects the shopper
/// (`redirect_url`), renders an auto-posting form (`form_url` +
/// `form_data`), or answers the vendor's callback with `response_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub successful: bool,
    pub operation: PaymentOperation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_data: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_text: Option<String>,
}

impl GatewayResponse {
    pub fn new(successful: bool, operation: PaymentOperation) -> Self {
        Self {
            successful,
            operation,
            redirect_url: None,
            form_url: None,
            form_data: Vec::new(),
            response_text: None,
        }
    }

    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn with_form(mut self, url: impl Into<String>, data: Vec<(String, String)>) -> Self {
        self.form_url = Some(url.into());
        self.form_data = data;
        self
    }

    pub fn with_response_text(mut self, text: impl Into<String>) -> Self {
        self.response_text = Some(text.into());
        self
    }

    /// First value of a form field, if present.
    pub fn form_value(&self, key: &str) -> Option<&str> {
        self.form_data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
