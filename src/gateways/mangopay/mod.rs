//! MangoPay marketplace payments.

pub mod config;
pub mod gateway;

use self::config::{MangoPayGlobalConfiguration, MangoPayTenantConfiguration};
use self::gateway::MangoPayPaymentGateway;
use super::log_factory_failure;
use crate::domain::payment::Tenant;
use crate::domain::ports::{GatewayDataStoreRef, GatewayFactory, PaymentGatewayBox};
use crate::error::Result;
use crate::infrastructure::http::{DEFAULT_TIMEOUT, build_client};
use crate::infrastructure::settings::FilesSettings;

pub const ID: &str = "mangopay";

/// Reads the global credentials and the tenant's beneficiary, both
/// required.
pub struct MangoPayGatewayFactory {
    settings: FilesSettings,
    data_store: GatewayDataStoreRef,
}

impl MangoPayGatewayFactory {
    pub fn new(settings: FilesSettings, data_store: GatewayDataStoreRef) -> Self {
        Self {
            settings,
            data_store,
        }
    }

    fn build(&self, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        let global: MangoPayGlobalConfiguration = self.settings.load_global(ID)?;
        global.validate()?;
        let tenant_configuration: MangoPayTenantConfiguration =
            self.settings.load_tenant(tenant, ID)?;

        Ok(Box::new(MangoPayPaymentGateway::new(
            global,
            tenant_configuration,
            tenant.clone(),
            self.data_store.clone(),
            build_client(DEFAULT_TIMEOUT)?,
        )))
    }
}

impl GatewayFactory for MangoPayGatewayFactory {
    fn id(&self) -> &'static str {
        ID
    }

    fn create_gateway(&self, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        self.build(tenant)
            .inspect_err(|e| log_factory_failure(ID, tenant, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::PaymentGateway;
    use crate::error::GatewayError;
    use crate::infrastructure::in_memory::InMemoryGatewayDataStore;
    use std::sync::Arc;
    use tempfile::tempdir;
    use uuid::Uuid;

    const TENANT_YAML: &str = "beneficiary:\n  email: owner@acme.example\n  firstName: Ada\n  lastName: Owner\n  birthday: 1984-03-02\n";

    fn write(path: std::path::PathBuf, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_create_gateway() {
        let dir = tempdir().unwrap();
        let settings = FilesSettings::new(dir.path());
        let tenant = Tenant::new(Uuid::new_v4(), "acme");
        write(
            settings.global_configuration_file(ID),
            "clientId: shop\nclientPassword: s3cr3t\n",
        );
        write(settings.tenant_configuration_file(&tenant, ID), TENANT_YAML);

        let factory = MangoPayGatewayFactory::new(settings, Arc::new(InMemoryGatewayDataStore::new()));
        let gateway = factory.create_gateway(&tenant).unwrap();
        assert_eq!(gateway.id(), ID);
    }

    #[test]
    fn test_create_gateway_requires_global_configuration() {
        let dir = tempdir().unwrap();
        let settings = FilesSettings::new(dir.path());
        let tenant = Tenant::new(Uuid::new_v4(), "acme");
        write(settings.tenant_configuration_file(&tenant, ID), TENANT_YAML);

        let factory = MangoPayGatewayFactory::new(settings, Arc::new(InMemoryGatewayDataStore::new()));
        assert!(matches!(
            factory.create_gateway(&tenant),
            Err(GatewayError::ConfigurationNotFound(path)) if path.ends_with("payments/mangopay/configuration.yml")
        ));
    }

    #[test]
    fn test_create_gateway_requires_tenant_configuration() {
        let dir = tempdir().unwrap();
        let settings = FilesSettings::new(dir.path());
        let tenant = Tenant::new(Uuid::new_v4(), "acme");
        write(
            settings.global_configuration_file(ID),
            "clientId: shop\nclientPassword: s3cr3t\n",
        );

        let factory = MangoPayGatewayFactory::new(settings, Arc::new(InMemoryGatewayDataStore::new()));
        assert!(matches!(
            factory.create_gateway(&tenant),
            Err(GatewayError::ConfigurationNotFound(path)) if path.ends_with("tenants/acme/payments/mangopay/configuration.yml")
        ));
    }
}
