//! Payment gateway adapters for a multi-tenant shop platform.
//!
//! Each gateway is built per tenant from YAML configuration through a
//! [`GatewayFactory`](domain::ports::GatewayFactory) and exposes the same
//! purchase / acknowledge contract, whatever the vendor's protocol.

pub mod application;
pub mod domain;
pub mod error;
pub mod gateways;
pub mod infrastructure;
pub mod interfaces;
