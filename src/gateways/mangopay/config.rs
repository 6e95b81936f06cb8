use crate::error::{GatewayError, Result};
use chrono::NaiveDate;
use serde::Deserialize;

const SANDBOX_BASE_URL: &str = "https://api.sandbox.mangopay.com";
const PRODUCTION_BASE_URL: &str = "https://api.mangopay.com";

/// Platform-wide MangoPay client credentials, shared by all tenants.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangoPayGlobalConfiguration {
    pub client_id: String,
    pub client_password: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_environment() -> String {
    "sandbox".to_string()
}

impl MangoPayGlobalConfiguration {
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() || self.client_password.trim().is_empty() {
            return Err(GatewayError::ConfigurationError(
                "MangoPay clientId and clientPassword must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn api_base(&self) -> &str {
        match &self.base_url {
            Some(base_url) => base_url.trim_end_matches('/'),
            None if self.environment.eq_ignore_ascii_case("production") => PRODUCTION_BASE_URL,
            None => SANDBOX_BASE_URL,
        }
    }
}

/// The tenant's own MangoPay account holder, who receives the funds.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangoPayTenantConfiguration {
    pub beneficiary: Beneficiary,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub country_of_residence: Option<String>,
}
