//! Chain configuration for Aftermarket Device deployments
//!
//! Maps `alloy_chains::NamedChain` values to the address of the contract
//! deployed on that network.

pub mod addresses;

use alloy_chains::NamedChain;
use alloy_primitives::Address;

use crate::error::{AftermarketDeviceError, Result};
use addresses::POLYGON_AFTERMARKET_DEVICE_ADDRESS;

/// Trait for chains with a known Aftermarket Device deployment
///
/// # Example
///
/// ```rust
/// use aftermarket_device::AftermarketDeviceChain;
/// use alloy_chains::NamedChain;
///
/// assert!(NamedChain::Polygon.supports_aftermarket_device());
/// assert!(NamedChain::Mainnet.aftermarket_device_address().is_err());
/// ```
pub trait AftermarketDeviceChain {
    /// Returns true if the contract is deployed on this chain
    fn supports_aftermarket_device(&self) -> bool;

    /// The proxy address of the contract on this chain
    fn aftermarket_device_address(&self) -> Result<Address>;
}

impl AftermarketDeviceChain for NamedChain {
    fn supports_aftermarket_device(&self) -> bool {
        self.aftermarket_device_address().is_ok()
    }

    fn aftermarket_device_address(&self) -> Result<Address> {
        match self {
            NamedChain::Polygon => Ok(POLYGON_AFTERMARKET_DEVICE_ADDRESS),
            _ => Err(AftermarketDeviceError::ChainNotSupported {
                chain: self.to_string(),
            }),
        }
    }
}
