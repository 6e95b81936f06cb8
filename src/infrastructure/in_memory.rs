use crate::domain::gateway_data::{GatewayCustomerData, GatewayTenantData};
use crate::domain::ports::GatewayDataStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type Key = (Uuid, String);

/// A thread-safe in-memory gateway data store.
///
/// Uses `Arc<RwLock<HashMap<..>>>` maps keyed by `(owner id, gateway id)`.
/// Vendor identifiers are lost when the process exits, so every run
/// re-creates them on the vendor side.
#[derive(Default, Clone)]
pub struct InMemoryGatewayDataStore {
    customers: Arc<RwLock<HashMap<Key, GatewayCustomerData>>>,
    tenants: Arc<RwLock<HashMap<Key, GatewayTenantData>>>,
}

impl InMemoryGatewayDataStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GatewayDataStore for InMemoryGatewayDataStore {
    async fn customer_data(
        &self,
        customer_id: Uuid,
        gateway_id: &str,
    ) -> Result<Option<GatewayCustomerData>> {
        let customers = self.customers.read().await;
        Ok(customers
            .get(&(customer_id, gateway_id.to_string()))
            .cloned())
    }

    async fn tenant_data(
        &self,
        tenant_id: Uuid,
        gateway_id: &str,
    ) -> Result<Option<GatewayTenantData>> {
        let tenants = self.tenants.read().await;
        Ok(tenants.get(&(tenant_id, gateway_id.to_string())).cloned())
    }

    async fn store_customer_data(&self, data: GatewayCustomerData) -> Result<()> {
        let mut customers = self.customers.write().await;
        customers.insert((data.customer_id, data.gateway_id.clone()), data);
        Ok(())
    }

    async fn store_tenant_data(&self, data: GatewayTenantData) -> Result<()> {
        let mut tenants = self.tenants.write().await;
        tenants.insert((data.tenant_id, data.gateway_id.clone()), data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_customer_data() {
        let store = InMemoryGatewayDataStore::new();
        let customer_id = Uuid::new_v4();
        let data = GatewayCustomerData::new(customer_id, "mangopay").with("userId", "42");

        store.store_customer_data(data.clone()).await.unwrap();
        let retrieved = store
            .customer_data(customer_id, "mangopay")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved, data);
        assert_eq!(retrieved.get("userId"), Some("42"));

        assert!(store
            .customer_data(customer_id, "stripe")
            .await
            .unwrap()
            .is_none());
        assert!(store
            .customer_data(Uuid::new_v4(), "mangopay")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_in_memory_tenant_data_overwrite() {
        let store = InMemoryGatewayDataStore::new();
        let tenant_id = Uuid::new_v4();

        store
            .store_tenant_data(GatewayTenantData::new(tenant_id, "mangopay").with("userId", "1"))
            .await
            .unwrap();
        store
            .store_tenant_data(GatewayTenantData::new(tenant_id, "mangopay").with("userId", "2"))
            .await
            .unwrap();

        let retrieved = store
            .tenant_data(tenant_id, "mangopay")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(retrieved.get("userId"), Some("2"));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryGatewayDataStore::new();
        let clone = store.clone();
        let tenant_id = Uuid::new_v4();

        clone
            .store_tenant_data(GatewayTenantData::new(tenant_id, "mangopay").with("userId", "7"))
            .await
            .unwrap();
        assert!(store
            .tenant_data(tenant_id, "mangopay")
            .await
            .unwrap()
            .is_some());
    }
}
