//! Aftermarket Device contract bindings
//!
//! - [`aftermarket_device_id`]: Alloy-generated binding for the contract ABI
//! - [`roles`]: the access-control roles the contract checks

pub mod aftermarket_device_id;
pub mod roles;
