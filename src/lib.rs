//! # aftermarket-device
//!
//! Typed Rust bindings for the Aftermarket Device contract, the ERC-721 identity
//! token that represents a hardware device and carries time-limited privileges
//! granted to other addresses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aftermarket_device::{AftermarketDevice, AftermarketDeviceError, ContractConfig};
//! use alloy_primitives::U256;
//!
//! # async fn example() -> Result<(), AftermarketDeviceError> {
//! let config = ContractConfig::from_env()?;
//! let device = AftermarketDevice::from_config(&config)?;
//!
//! // Read-only calls
//! let token_id = U256::from(1);
//! let owner = device.caller().owner_of(token_id).await?;
//! let uri = device.caller().token_uri(token_id).await?;
//!
//! // Privileges granted by the owner
//! let record = device.caller().privilege_record(U256::from(1)).await?;
//! let allowed = device
//!     .caller()
//!     .has_privilege(token_id, U256::from(1), owner)
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Sending Transactions
//!
//! ```rust,no_run
//! use aftermarket_device::{
//!     minted_token_ids, AftermarketDevice, AftermarketDeviceError, ContractConfig, TransactOpts,
//! };
//! use alloy_primitives::Address;
//! use std::time::Duration;
//!
//! # async fn example(minter: Address) -> Result<(), AftermarketDeviceError> {
//! let config = ContractConfig::from_env()?;
//! let device = AftermarketDevice::builder()
//!     .address(config.resolve_address()?)
//!     .provider(config.connect())
//!     .transact_opts(TransactOpts::builder().from(minter).build())
//!     .build();
//!
//! let transactor = device.transactor();
//! let tx = transactor.safe_mint_transaction(minter);
//! let receipt = transactor
//!     .send_and_confirm(tx, Duration::from_secs(60))
//!     .await?;
//! let token_ids = minted_token_ids(&receipt, device.address());
//! # Ok(())
//! # }
//! ```
//!
//! ## Public API
//!
//! - [`AftermarketDevice`] - combined handle over all three roles
//! - [`AftermarketDeviceCaller`] - read-only view functions
//! - [`AftermarketDeviceTransactor`] - transaction requests for state-changing functions
//! - [`AftermarketDeviceFilterer`] - historic log queries, live watchers and log parsing
//! - [`decode_receipt_events`] and [`minted_token_ids`] - results of mined transactions
//! - [`ContractConfig`] and the option structs - connection and per-call settings
//! - [`AftermarketDeviceError`] and [`Result`] - error types
//! - [`AftermarketDeviceId`] - the raw Alloy binding, for anything the wrappers omit

mod caller;
mod chain;
mod config;
mod contracts;
mod device;
mod error;
mod filterer;
mod receipt;
#[cfg(test)]
mod testing;
mod transactor;

pub use caller::{AftermarketDeviceCaller, PrivilegeRecord};
pub use chain::addresses::POLYGON_AFTERMARKET_DEVICE_ADDRESS;
pub use chain::AftermarketDeviceChain;
pub use config::{
    CallOpts, ContractConfig, FilterOpts, TransactOpts, WatchOpts, ADDRESS_ENV, CHAIN_ID_ENV,
    RPC_URL_ENV,
};
pub use contracts::aftermarket_device_id::AftermarketDeviceId;
pub use contracts::roles::Role;
pub use device::AftermarketDevice;
pub use error::{AftermarketDeviceError, Result};
pub use filterer::{decode_event, parse_log, AftermarketDeviceFilterer, IntoTopic};
pub use receipt::{
    decode_logs, decode_receipt_events, find_event, minted_token_ids, minted_token_ids_in_logs,
};
pub use transactor::AftermarketDeviceTransactor;

// Public module for advanced users who need custom instrumentation
pub mod spans;
