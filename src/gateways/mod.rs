//! Payment gateway adapters, one module per vendor.
//!
//! Each module exposes its `ID`, a factory implementing
//! [`GatewayFactory`](crate::domain::ports::GatewayFactory) and the gateway
//! itself.

pub mod mangopay;
pub mod monetaweb;
pub mod paybox;
pub mod stripe;

use crate::domain::payment::Tenant;
use crate::error::GatewayError;
use tracing::error;

fn log_factory_failure(gateway_id: &str, tenant: &Tenant, e: &GatewayError) {
    error!(
        gateway = gateway_id,
        tenant = %tenant.slug,
        error = %e,
        "Could not create payment gateway"
    );
}
