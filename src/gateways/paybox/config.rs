use crate::error::{GatewayError, Result};
use crate::infrastructure::settings::string_or_number;
use serde::Deserialize;
use std::path::PathBuf;

const PREPROD_FORM_URL: &str = "https://preprod-tpeweb.paybox.com/cgi/MYchoix_pagepaiement.cgi";
const PRODUCTION_FORM_URL: &str = "https://tpeweb.paybox.com/cgi/MYchoix_pagepaiement.cgi";

/// Per-tenant Paybox merchant account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayboxTenantConfiguration {
    #[serde(deserialize_with = "string_or_number")]
    pub site: String,
    #[serde(deserialize_with = "string_or_number")]
    pub rang: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// HMAC key, hex encoded, as issued in the Paybox back office.
    pub secret: String,
    #[serde(default)]
    pub return_url: Option<String>,
    #[serde(default)]
    pub cancel_url: Option<String>,
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Paybox's public key (PEM); defaults to `payments/paybox/pubkey.pem`
    /// under the permanent directory.
    #[serde(default)]
    pub public_key_file: Option<PathBuf>,
}

fn default_environment() -> String {
    "preprod".to_string()
}

impl PayboxTenantConfiguration {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("site", &self.site), ("rang", &self.rang), ("id", &self.id)] {
            if value.trim().is_empty() {
                return Err(GatewayError::ConfigurationError(format!(
                    "Paybox {name} must not be empty"
                )));
            }
        }
        if self.secret.trim().is_empty() || hex::decode(self.secret.trim()).is_err() {
            return Err(GatewayError::ConfigurationError(
                "Paybox secret must be a non-empty hex string".to_string(),
            ));
        }
        Ok(())
    }

    pub fn form_url(&self) -> &'static str {
        if self.environment.eq_ignore_ascii_case("production") {
            PRODUCTION_FORM_URL
        } else {
            PREPROD_FORM_URL
        }
    }
}
