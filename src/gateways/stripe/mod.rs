//! Stripe Charges API.

pub mod config;
pub mod gateway;

use self::config::StripeTenantConfiguration;
use self::gateway::StripePaymentGateway;
use super::log_factory_failure;
use crate::domain::payment::Tenant;
use crate::domain::ports::{GatewayFactory, PaymentGatewayBox};
use crate::error::Result;
use crate::infrastructure::http::{DEFAULT_TIMEOUT, build_client};
use crate::infrastructure::settings::FilesSettings;

pub const ID: &str = "stripe";

pub struct StripeGatewayFactory {
    settings: FilesSettings,
}

impl StripeGatewayFactory {
    pub fn new(settings: FilesSettings) -> Self {
        Self { settings }
    }

    fn build(&self, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        let configuration: StripeTenantConfiguration = self.settings.load_tenant(tenant, ID)?;
        configuration.validate()?;
        let client = build_client(DEFAULT_TIMEOUT)?;
        Ok(Box::new(StripePaymentGateway::new(configuration, client)))
    }
}

impl GatewayFactory for StripeGatewayFactory {
    fn id(&self) -> &'static str {
        ID
    }

    fn create_gateway(&self, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        self.build(tenant)
            .inspect_err(|e| log_factory_failure(ID, tenant, e))
    }
}
