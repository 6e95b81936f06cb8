use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Vendor-side state a gateway keeps about one of the shop's customers
/// (e.g. the MangoPay user id created for them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayCustomerData {
    pub customer_id: Uuid,
    pub gateway_id: String,
    pub data: BTreeMap<String, String>,
}

/// Vendor-side state a gateway keeps about the tenant itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayTenantData {
    pub tenant_id: Uuid,
    pub gateway_id: String,
    pub data: BTreeMap<String, String>,
}

impl GatewayCustomerData {
    pub fn new(customer_id: Uuid, gateway_id: impl Into<String>) -> Self {
        Self {
            customer_id,
            gateway_id: gateway_id.into(),
            data: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

impl GatewayTenantData {
    pub fn new(tenant_id: Uuid, gateway_id: impl Into<String>) -> Self {
        Self {
            tenant_id,
            gateway_id: gateway_id.into(),
            data: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}
