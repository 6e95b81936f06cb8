use crate::error::{GatewayError, Result};
use serde::Deserialize;

const DEFAULT_API_BASE: &str = "https://api.stripe.com";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeTenantConfiguration {
    /// Secret key (`sk_live_...` / `sk_test_...`).
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl StripeTenantConfiguration {
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(GatewayError::ConfigurationError(
                "Stripe apiKey must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: StripeTenantConfiguration =
            serde_yaml::from_str("apiKey: sk_test_123\n").unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(
            config.endpoint("/v1/charges"),
            "https://api.stripe.com/v1/charges"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_api_key() {
        let config: StripeTenantConfiguration =
            serde_yaml::from_str("apiKey: ''\napiBase: http://localhost:12111/\n").unwrap();
        assert_eq!(config.endpoint("/v1/tokens"), "http://localhost:12111/v1/tokens");
        assert!(matches!(
            config.validate(),
            Err(GatewayError::ConfigurationError(_))
        ));
    }
}
