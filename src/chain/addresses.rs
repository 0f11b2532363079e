// SPDX-License-Identifier: Apache-2.0
//! Known deployments of the Aftermarket Device contract
//!
//! Addresses point at the upgradeable proxy, which is the address every
//! call, transaction and log filter should target.

use alloy_primitives::{address, Address};

/// <https://polygonscan.com/address/0x9c94C395cBcBDe662235E0A9d3bB87Ad708561BA>
pub const POLYGON_AFTERMARKET_DEVICE_ADDRESS: Address =
    address!("9c94C395cBcBDe662235E0A9d3bB87Ad708561BA");
