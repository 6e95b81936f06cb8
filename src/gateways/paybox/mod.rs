//! Paybox System (Verifone) hosted payment page.

pub mod config;
pub mod gateway;
pub mod signature;

use self::config::PayboxTenantConfiguration;
use self::gateway::PayboxPaymentGateway;
use super::log_factory_failure;
use crate::domain::payment::Tenant;
use crate::domain::ports::{GatewayFactory, PaymentGatewayBox};
use crate::error::Result;
use crate::infrastructure::settings::FilesSettings;
use std::path::PathBuf;

pub const ID: &str = "paybox";

const DEFAULT_PUBLIC_KEY_FILE: &str = "pubkey.pem";

pub struct PayboxGatewayFactory {
    settings: FilesSettings,
}

impl PayboxGatewayFactory {
    pub fn new(settings: FilesSettings) -> Self {
        Self { settings }
    }

    fn public_key_file(&self, configuration: &PayboxTenantConfiguration) -> PathBuf {
        match &configuration.public_key_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.settings.permanent_directory().join(path),
            None => self
                .settings
                .gateway_directory(ID)
                .join(DEFAULT_PUBLIC_KEY_FILE),
        }
    }

    fn build(&self, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        let configuration: PayboxTenantConfiguration = self.settings.load_tenant(tenant, ID)?;
        configuration.validate()?;
        let public_key_file = self.public_key_file(&configuration);
        Ok(Box::new(PayboxPaymentGateway::new(
            configuration,
            public_key_file,
        )))
    }
}

impl GatewayFactory for PayboxGatewayFactory {
    fn id(&self) -> &'static str {
        ID
    }

    fn create_gateway(&self, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        self.build(tenant)
            .inspect_err(|e| log_factory_failure(ID, tenant, e))
    }
}
