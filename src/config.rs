//! Configuration for connecting to a deployed Aftermarket Device contract
//!
//! [`ContractConfig`] describes where the contract lives and how to reach it. It can
//! be deserialized from JSON or loaded from the environment (a `.env` file is
//! honoured). The option structs tune individual calls, transactions and log
//! queries the same way for every wrapper.

use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::{BlockId, BlockNumberOrTag};
use bon::Builder;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::chain::AftermarketDeviceChain;
use crate::error::{AftermarketDeviceError, Result};

/// Environment variable holding the JSON-RPC endpoint
pub const RPC_URL_ENV: &str = "AFTERMARKET_DEVICE_RPC_URL";
/// Environment variable holding an explicit contract address
pub const ADDRESS_ENV: &str = "AFTERMARKET_DEVICE_ADDRESS";
/// Environment variable holding the chain id used to look up a known deployment
pub const CHAIN_ID_ENV: &str = "AFTERMARKET_DEVICE_CHAIN_ID";

/// Where the contract lives and how to reach it.
///
/// An explicit `address` always wins; otherwise the address of the known
/// deployment on `chain_id` is used.
///
/// # Example
///
/// ```rust
/// use aftermarket_device::ContractConfig;
///
/// let config = ContractConfig::from_json_str(
///     r#"{ "rpc_url": "http://localhost:8545", "chain_id": 137 }"#,
/// ).unwrap();
/// assert!(config.resolve_address().is_ok());
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractConfig {
    pub rpc_url: Url,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl ContractConfig {
    /// Parses a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from the process environment, after reading `.env` if present
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), event = "dotenv_loaded");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let rpc_url = lookup(RPC_URL_ENV)
            .ok_or_else(|| {
                AftermarketDeviceError::InvalidConfig(format!("{RPC_URL_ENV} is not set"))
            })?
            .parse::<Url>()?;

        let address = lookup(ADDRESS_ENV)
            .map(|value| value.parse::<Address>())
            .transpose()?;

        let chain_id = lookup(CHAIN_ID_ENV)
            .map(|value| {
                value.parse::<u64>().map_err(|e| {
                    AftermarketDeviceError::InvalidConfig(format!("{CHAIN_ID_ENV}: {e}"))
                })
            })
            .transpose()?;

        Ok(Self {
            rpc_url,
            address,
            chain_id,
        })
    }

    /// Resolves the contract address, falling back to the known deployment on `chain_id`
    pub fn resolve_address(&self) -> Result<Address> {
        if let Some(address) = self.address {
            return Ok(address);
        }

        let chain_id = self.chain_id.ok_or_else(|| {
            AftermarketDeviceError::InvalidConfig(
                "either an address or a chain id is required".to_string(),
            )
        })?;

        NamedChain::try_from(chain_id)
            .map_err(|_| AftermarketDeviceError::ChainNotSupported {
                chain: chain_id.to_string(),
            })?
            .aftermarket_device_address()
    }

    /// Builds a type-erased HTTP provider for `rpc_url`
    pub fn connect(&self) -> DynProvider {
        debug!(rpc_url = %self.rpc_url, event = "provider_connected");
        ProviderBuilder::new()
            .connect_http(self.rpc_url.clone())
            .erased()
    }
}

/// Options applied to every read-only call.
#[derive(Builder, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOpts {
    /// Address the call is simulated from
    pub from: Option<Address>,
    /// Block the call is executed against; latest when unset
    pub block: Option<BlockId>,
}

/// Options applied to every transaction request built by a transactor.
///
/// Unset fields are left for the provider's fillers to populate.
#[derive(Builder, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactOpts {
    pub from: Option<Address>,
    pub value: Option<U256>,
    pub gas_limit: Option<u64>,
    pub nonce: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

/// Block range for historic log queries.
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOpts {
    #[builder(default = BlockNumberOrTag::Earliest)]
    pub from_block: BlockNumberOrTag,
    /// Inclusive upper bound; latest when unset
    pub to_block: Option<BlockNumberOrTag>,
}

impl Default for FilterOpts {
    fn default() -> Self {
        Self {
            from_block: BlockNumberOrTag::Earliest,
            to_block: None,
        }
    }
}

/// Options for live log watching.
#[derive(Builder, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchOpts {
    /// First block to report; only new blocks when unset
    pub from_block: Option<BlockNumberOrTag>,
    /// How often the provider is polled for new logs
    pub poll_interval: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_json_with_address() {
        let config = ContractConfig::from_json_str(
            r#"{
                "rpc_url": "http://localhost:8545",
                "address": "0x00000000000000000000000000000000000000aa"
            }"#,
        )
        .unwrap();

        assert_eq!(config.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(
            config.resolve_address().unwrap(),
            address!("00000000000000000000000000000000000000aa")
        );
        assert_eq!(config.chain_id, None);
    }

    #[test]
    fn test_from_json_rejects_bad_url() {
        let result = ContractConfig::from_json_str(r#"{ "rpc_url": "not a url" }"#);
        assert!(matches!(result, Err(AftermarketDeviceError::Json(_))));
    }

    #[test]
    fn test_from_lookup_requires_rpc_url() {
        let result = ContractConfig::from_lookup(env(&[]));
        assert!(matches!(
            result,
            Err(AftermarketDeviceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_lookup_parses_all_fields() {
        let config = ContractConfig::from_lookup(env(&[
            (RPC_URL_ENV, "https://polygon-rpc.com"),
            (CHAIN_ID_ENV, "137"),
        ]))
        .unwrap();

        assert_eq!(config.chain_id, Some(137));
        assert_eq!(config.address, None);
        assert!(config.resolve_address().is_ok());
    }

    #[test]
    fn test_from_lookup_bad_address() {
        let result = ContractConfig::from_lookup(env(&[
            (RPC_URL_ENV, "http://localhost:8545"),
            (ADDRESS_ENV, "0x1234"),
        ]));
        assert!(matches!(result, Err(AftermarketDeviceError::Hex(_))));
    }

    #[test]
    fn test_from_lookup_bad_chain_id() {
        let result = ContractConfig::from_lookup(env(&[
            (RPC_URL_ENV, "http://localhost:8545"),
            (CHAIN_ID_ENV, "polygon"),
        ]));
        assert!(matches!(
            result,
            Err(AftermarketDeviceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_resolve_address_needs_address_or_chain() {
        let config = ContractConfig::builder()
            .rpc_url("http://localhost:8545".parse().unwrap())
            .build();
        assert!(matches!(
            config.resolve_address(),
            Err(AftermarketDeviceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_resolve_address_unsupported_chain() {
        let config = ContractConfig::builder()
            .rpc_url("http://localhost:8545".parse().unwrap())
            .chain_id(1)
            .build();
        assert!(matches!(
            config.resolve_address(),
            Err(AftermarketDeviceError::ChainNotSupported { .. })
        ));
    }

    #[test]
    fn test_filter_opts_defaults_to_full_history() {
        let opts = FilterOpts::default();
        assert_eq!(opts.from_block, BlockNumberOrTag::Earliest);
        assert_eq!(opts.to_block, None);
        assert_eq!(FilterOpts::builder().build(), opts);
    }

    #[test]
    fn test_transact_opts_builder() {
        let opts = TransactOpts::builder()
            .from(Address::ZERO)
            .gas_limit(100_000)
            .build();
        assert_eq!(opts.from, Some(Address::ZERO));
        assert_eq!(opts.gas_limit, Some(100_000));
        assert_eq!(opts.nonce, None);
    }
}
