//! Application layer: the registry through which the shop discovers
//! payment gateways and creates them for a tenant.

pub mod registry;
