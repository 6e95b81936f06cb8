use crate::domain::payment::Tenant;
use crate::error::{GatewayError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::io;
use std::path::{Path, PathBuf};

const PAYMENTS_DIRECTORY: &str = "payments";
const TENANTS_DIRECTORY: &str = "tenants";
const CONFIGURATION_FILENAME: &str = "configuration.yml";

/// Locates and reads gateway configuration under the platform's permanent
/// directory.
///
/// ```text
/// <permanent>/payments/<gateway>/configuration.yml
/// <permanent>/tenants/<slug>/payments/<gateway>/configuration.yml
/// ```
#[derive(Debug, Clone)]
pub struct FilesSettings {
    permanent_directory: PathBuf,
}

impl FilesSettings {
    pub fn new(permanent_directory: impl Into<PathBuf>) -> Self {
        Self {
            permanent_directory: permanent_directory.into(),
        }
    }

    pub fn permanent_directory(&self) -> &Path {
        &self.permanent_directory
    }

    /// Directory holding the files shared by all tenants for a gateway.
    pub fn gateway_directory(&self, gateway_id: &str) -> PathBuf {
        self.permanent_directory
            .join(PAYMENTS_DIRECTORY)
            .join(gateway_id)
    }

    pub fn global_configuration_file(&self, gateway_id: &str) -> PathBuf {
        self.gateway_directory(gateway_id)
            .join(CONFIGURATION_FILENAME)
    }

    pub fn tenant_configuration_file(&self, tenant: &Tenant, gateway_id: &str) -> PathBuf {
        self.permanent_directory
            .join(TENANTS_DIRECTORY)
            .join(&tenant.slug)
            .join(PAYMENTS_DIRECTORY)
            .join(gateway_id)
            .join(CONFIGURATION_FILENAME)
    }

    pub fn load_global<T: DeserializeOwned>(&self, gateway_id: &str) -> Result<T> {
        load_yaml(&self.global_configuration_file(gateway_id))
    }

    pub fn load_tenant<T: DeserializeOwned>(&self, tenant: &Tenant, gateway_id: &str) -> Result<T> {
        load_yaml(&self.tenant_configuration_file(tenant, gateway_id))
    }
}

pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GatewayError::ConfigurationNotFound(path.to_path_buf()),
        _ => GatewayError::IoError(e),
    })?;
    serde_yaml::from_str(&content).map_err(|source| GatewayError::InvalidConfiguration {
        path: path.to_path_buf(),
        source,
    })
}

/// Accepts either a YAML string or an unsigned number, since merchant and
/// terminal identifiers are often written unquoted.
pub fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}
