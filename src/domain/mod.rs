//! Domain layer: the generic payment vocabulary shared by every gateway and
//! the ports the host platform plugs into.

pub mod gateway_data;
pub mod money;
pub mod operation;
pub mod payment;
pub mod ports;
