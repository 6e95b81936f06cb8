use super::gateway_data::{GatewayCustomerData, GatewayTenantData};
use super::money::Amount;
use super::operation::GatewayResponse;
use super::payment::{CallbackParams, PaymentData, Tenant};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// One external payment processor, configured for one tenant.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn id(&self) -> &'static str;

    async fn purchase(&self, amount: Amount, data: &PaymentData) -> Result<GatewayResponse>;

    /// Handles a vendor notification that does not carry the order id in
    /// its URL.
    async fn acknowledge(&self, _data: &CallbackParams) -> Result<GatewayResponse> {
        Err(GatewayError::Unsupported {
            gateway: self.id(),
            operation: "acknowledge",
        })
    }

    /// Handles a vendor notification addressed to a known order.
    async fn acknowledge_order(
        &self,
        _order_id: Uuid,
        data: &CallbackParams,
    ) -> Result<GatewayResponse> {
        self.acknowledge(data).await
    }

    async fn callback(&self, _data: &CallbackParams) -> Result<GatewayResponse> {
        Err(GatewayError::Unsupported {
            gateway: self.id(),
            operation: "callback",
        })
    }
}

/// Builds a [`PaymentGateway`] from the configuration of a tenant.
pub trait GatewayFactory: Send + Sync {
    fn id(&self) -> &'static str;

    fn create_gateway(&self, tenant: &Tenant) -> Result<PaymentGatewayBox>;
}

/// Persists vendor-side identifiers across purchases.
#[async_trait]
pub trait GatewayDataStore: Send + Sync {
    async fn customer_data(
        &self,
        customer_id: Uuid,
        gateway_id: &str,
    ) -> Result<Option<GatewayCustomerData>>;
    async fn tenant_data(&self, tenant_id: Uuid, gateway_id: &str)
    -> Result<Option<GatewayTenantData>>;
    async fn store_customer_data(&self, data: GatewayCustomerData) -> Result<()>;
    async fn store_tenant_data(&self, data: GatewayTenantData) -> Result<()>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
pub type GatewayFactoryBox = Box<dyn GatewayFactory>;
pub type GatewayDataStoreRef = Arc<dyn GatewayDataStore>;
