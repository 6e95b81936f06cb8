#![allow(dead_code)]

use shop_payment_gateways::domain::payment::{Customer, Tenant};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use uuid::Uuid;

pub const PAYBOX_SECRET: &str = "0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF\
                                 0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF";

/// A throwaway permanent directory laid out the way `FilesSettings` reads it.
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_global(&self, gateway_id: &str, yaml: &str) {
        write(
            self.path()
                .join("payments")
                .join(gateway_id)
                .join("configuration.yml"),
            yaml,
        );
    }

    pub fn write_tenant(&self, slug: &str, gateway_id: &str, yaml: &str) {
        write(
            self.path()
                .join("tenants")
                .join(slug)
                .join("payments")
                .join(gateway_id)
                .join("configuration.yml"),
            yaml,
        );
    }

    /// Paybox tenant configuration, with the test public key installed at
    /// its default location.
    pub fn with_paybox(&self, slug: &str) {
        self.write_tenant(
            slug,
            "paybox",
            &format!(
                "site: 1999888\nrang: 32\nid: 107904482\nsecret: {PAYBOX_SECRET}\n\
                 returnUrl: https://shop.example.com/checkout/return\n\
                 cancelUrl: https://shop.example.com/checkout/cancel\n"
            ),
        );
        let key = self.path().join("payments/paybox/pubkey.pem");
        fs::create_dir_all(key.parent().unwrap()).unwrap();
        fs::copy(fixture("paybox/test_public.pem"), key).unwrap();
    }
}

fn write(path: PathBuf, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture(name)).unwrap()
}

/// Same derivation as the CLI.
pub fn tenant(slug: &str) -> Tenant {
    Tenant::new(Uuid::new_v5(&Uuid::NAMESPACE_OID, slug.as_bytes()), slug)
}

pub fn customer(email: &str) -> Customer {
    Customer {
        id: Uuid::new_v5(&Uuid::NAMESPACE_OID, email.as_bytes()),
        email: email.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        birthday: None,
        nationality: None,
        country_of_residence: None,
    }
}
