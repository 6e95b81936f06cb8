//! Adapters between the command line and the gateways.

pub mod cli;
