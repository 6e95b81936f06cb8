use crate::domain::gateway_data::{GatewayCustomerData, GatewayTenantData};
use crate::domain::ports::GatewayDataStore;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Column Family for vendor data attached to customers.
pub const CF_CUSTOMER_DATA: &str = "customer_data";
/// Column Family for vendor data attached to tenants.
pub const CF_TENANT_DATA: &str = "tenant_data";

/// A persistent gateway data store using RocksDB.
///
/// Customer and tenant records live in separate Column Families, keyed by
/// `<owner uuid>:<gateway id>` with JSON values.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBGatewayDataStore {
    db: Arc<DB>,
}

impl RocksDBGatewayDataStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that both column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_customers = ColumnFamilyDescriptor::new(CF_CUSTOMER_DATA, Options::default());
        let cf_tenants = ColumnFamilyDescriptor::new(CF_TENANT_DATA, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_customers, cf_tenants])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: String, value: &T) -> Result<()> {
        let cf = self.db.cf_handle(cf_name).ok_or_else(|| missing_cf(cf_name))?;
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, key: String) -> Result<Option<T>> {
        let cf = self.db.cf_handle(cf_name).ok_or_else(|| missing_cf(cf_name))?;
        match self.db.get_pinned_cf(cf, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

fn record_key(owner: Uuid, gateway_id: &str) -> String {
    format!("{owner}:{gateway_id}")
}

fn missing_cf(name: &str) -> GatewayError {
    GatewayError::InternalError(Box::new(std::io::Error::other(format!(
        "Column family '{name}' not found"
    ))))
}

#[async_trait]
impl GatewayDataStore for RocksDBGatewayDataStore {
    async fn customer_data(
        &self,
        customer_id: Uuid,
        gateway_id: &str,
    ) -> Result<Option<GatewayCustomerData>> {
        self.fetch(CF_CUSTOMER_DATA, record_key(customer_id, gateway_id))
    }

    async fn tenant_data(
        &self,
        tenant_id: Uuid,
        gateway_id: &str,
    ) -> Result<Option<GatewayTenantData>> {
        self.fetch(CF_TENANT_DATA, record_key(tenant_id, gateway_id))
    }

    async fn store_customer_data(&self, data: GatewayCustomerData) -> Result<()> {
        self.put(
            CF_CUSTOMER_DATA,
            record_key(data.customer_id, &data.gateway_id),
            &data,
        )
    }

    async fn store_tenant_data(&self, data: GatewayTenantData) -> Result<()> {
        self.put(
            CF_TENANT_DATA,
            record_key(data.tenant_id, &data.gateway_id),
            &data,
        )
    }
}
