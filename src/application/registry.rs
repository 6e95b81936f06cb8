use crate::domain::payment::Tenant;
use crate::domain::ports::{GatewayDataStoreRef, GatewayFactory, GatewayFactoryBox, PaymentGatewayBox};
use crate::error::{GatewayError, Result};
use crate::gateways::mangopay::MangoPayGatewayFactory;
use crate::gateways::monetaweb::MonetaWebGatewayFactory;
use crate::gateways::paybox::PayboxGatewayFactory;
use crate::gateways::stripe::StripeGatewayFactory;
use crate::infrastructure::settings::FilesSettings;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;

/// The payment gateways available to the shop, keyed by gateway id.
///
/// Factories are registered once at startup; gateways are created per
/// tenant, on demand.
#[derive(Default)]
pub struct GatewayRegistry(BTreeMap<&'static str, GatewayFactoryBox>);

impl Debug for GatewayRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GatewayRegistry").field(&self.ids()).finish()
    }
}

impl GatewayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every gateway this crate ships.
    pub fn with_default_gateways(settings: FilesSettings, data_store: GatewayDataStoreRef) -> Self {
        Self::new()
            .and_register(MangoPayGatewayFactory::new(settings.clone(), data_store))
            .and_register(MonetaWebGatewayFactory::new(settings.clone()))
            .and_register(PayboxGatewayFactory::new(settings.clone()))
            .and_register(StripeGatewayFactory::new(settings))
    }

    pub fn and_register<F: GatewayFactory + 'static>(mut self, factory: F) -> Self {
        self.register(factory);
        self
    }

    /// Registers `factory`, replacing any factory with the same id.
    pub fn register<F: GatewayFactory + 'static>(&mut self, factory: F) {
        self.0.insert(factory.id(), Box::new(factory));
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }

    pub fn factory(&self, id: &str) -> Option<&dyn GatewayFactory> {
        self.0.get(id).map(|factory| factory.deref())
    }

    pub fn create_gateway(&self, id: &str, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        self.factory(id)
            .ok_or_else(|| GatewayError::UnknownGateway(id.to_string()))?
            .create_gateway(tenant)
    }
}
