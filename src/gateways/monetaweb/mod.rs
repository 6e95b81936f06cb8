//! MonetaWeb (Setefi / Intesa Sanpaolo) hosted payment page.

pub mod config;
pub mod gateway;

use self::config::MonetaWebTenantConfiguration;
use self::gateway::MonetaWebPaymentGateway;
use super::log_factory_failure;
use crate::domain::payment::Tenant;
use crate::domain::ports::{GatewayFactory, PaymentGatewayBox};
use crate::error::Result;
use crate::infrastructure::http::{DEFAULT_TIMEOUT, build_client};
use crate::infrastructure::settings::FilesSettings;

pub const ID: &str = "monetaweb";

pub struct MonetaWebGatewayFactory {
    settings: FilesSettings,
}

impl MonetaWebGatewayFactory {
    pub fn new(settings: FilesSettings) -> Self {
        Self { settings }
    }

    fn build(&self, tenant: &Tenant) -> Result<PaymentGatewayBox> {
        let configuration: MonetaWebTenantConfiguration = self.settings.load_tenant(tenant, ID)?;
        let client = build_client(DEFAULT_TIMEOUT)?;
        Ok(Box::new(MonetaWebPaymentGateway::new(configuration, client)))
    }
}

impl GatewayFactory for MonetaWebGatewayFactory {
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
    use crate::error::GatewayError;
    use tempfile::tempdir;
    use uuid::Uuid;

    #[test]
    fn test_create_gateway_with_incomplete_configuration() {
        let dir = tempdir().unwrap();
        let settings = FilesSettings::new(dir.path());
        let tenant = Tenant::new(Uuid::new_v4(), "acme");
        let path = settings.tenant_configuration_file(&tenant, ID);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "id: 1\npassword: p\n").unwrap();

        let result = MonetaWebGatewayFactory::new(settings).create_gateway(&tenant);
        assert!(matches!(
            result,
            Err(GatewayError::InvalidConfiguration { .. })
        ));
    }
}
