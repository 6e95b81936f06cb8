use crate::infrastructure::settings::string_or_number;
use serde::Deserialize;

const PROD_ENVIRONMENT: &str = "prod";
const TEST_PAYMENT_ENDPOINT: &str = "https://test.monetaonline.it/monetaweb/hosted/init/http";
const PROD_PAYMENT_ENDPOINT: &str = "https://www.monetaonline.it/monetaweb/hosted/init/http";

/// Per-tenant MonetaWeb terminal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonetaWebTenantConfiguration {
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub password: String,
    #[serde(deserialize_with = "string_or_number")]
    pub action: String,
    #[serde(default = "default_language_id")]
    pub language_id: String,
    /// Shop URL the shopper is sent back to once MonetaWeb is done.
    #[serde(rename = "baseURL")]
    pub base_url: String,
    /// Overrides the environment's init endpoint.
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_environment() -> String {
    "test".to_string()
}

fn default_language_id() -> String {
    "FRA".to_string()
}

impl MonetaWebTenantConfiguration {
    pub fn payment_endpoint(&self) -> &str {
        match &self.endpoint {
            Some(endpoint) => endpoint,
            None if self.environment.eq_ignore_ascii_case(PROD_ENVIRONMENT) => {
                PROD_PAYMENT_ENDPOINT
            }
            None => TEST_PAYMENT_ENDPOINT,
        }
    }
}
