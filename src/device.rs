//! Combined handle over the caller, transactor and filterer roles

use alloy_network::Ethereum;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider};
use bon::Builder;
use tracing::info;

use crate::caller::AftermarketDeviceCaller;
use crate::config::{CallOpts, ContractConfig, TransactOpts};
use crate::error::Result;
use crate::filterer::AftermarketDeviceFilterer;
use crate::transactor::AftermarketDeviceTransactor;

/// An Aftermarket Device contract bound to one address and one provider
///
/// The three roles share the binding; each accessor hands out a fresh wrapper
/// carrying the configured options.
///
/// # Example
///
/// ```rust,no_run
/// use aftermarket_device::{AftermarketDevice, AftermarketDeviceError, CallOpts};
/// use alloy_primitives::U256;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), AftermarketDeviceError> {
/// let provider = ProviderBuilder::new().connect_http("http://localhost:8545".parse()?);
/// let device = AftermarketDevice::builder()
///     .address("0x9c94C395cBcBDe662235E0A9d3bB87Ad708561BA".parse()?)
///     .provider(provider)
///     .call_opts(CallOpts::default())
///     .build();
///
/// let owner = device.caller().owner_of(U256::from(1)).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
pub struct AftermarketDevice<P: Provider<Ethereum> + Clone> {
    address: Address,
    provider: P,
    #[builder(default)]
    call_opts: CallOpts,
    #[builder(default)]
    transact_opts: TransactOpts,
}

impl<P: Provider<Ethereum> + Clone> AftermarketDevice<P> {
    /// Returns the contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the provider the contract is bound to
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Read-only view of the contract
    pub fn caller(&self) -> AftermarketDeviceCaller<P> {
        AftermarketDeviceCaller::new(self.address, self.provider.clone()).with_opts(self.call_opts)
    }

    /// Transaction builder for the contract
    pub fn transactor(&self) -> AftermarketDeviceTransactor<P> {
        AftermarketDeviceTransactor::new(self.address, self.provider.clone())
            .with_opts(self.transact_opts)
    }

    /// Event log access for the contract
    pub fn filterer(&self) -> AftermarketDeviceFilterer<P> {
        AftermarketDeviceFilterer::new(self.address, self.provider.clone())
    }
}

impl AftermarketDevice<DynProvider> {
    /// Connects to the contract described by `config`
    pub fn from_config(config: &ContractConfig) -> Result<Self> {
        let address = config.resolve_address()?;
        info!(
            contract_address = %address,
            rpc_url = %config.rpc_url,
            event = "aftermarket_device_connected"
        );

        Ok(Self::builder()
            .address(address)
            .provider(config.connect())
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::addresses::POLYGON_AFTERMARKET_DEVICE_ADDRESS;
    use crate::error::AftermarketDeviceError;
    use alloy_primitives::address;
    use alloy_provider::ProviderBuilder;

    fn provider() -> DynProvider {
        ProviderBuilder::new()
            .connect_http("http://localhost:8545".parse().unwrap())
            .erased()
    }

    #[test]
    fn test_roles_share_address_and_opts() {
        let address = address!("00000000000000000000000000000000000000aa");
        let from = address!("00000000000000000000000000000000000000bb");
        let device = AftermarketDevice::builder()
            .address(address)
            .provider(provider())
            .call_opts(CallOpts::builder().from(from).build())
            .transact_opts(TransactOpts::builder().from(from).gas_limit(21_000).build())
            .build();

        assert_eq!(device.address(), address);
        assert_eq!(device.caller().address(), address);
        assert_eq!(device.caller().opts().from, Some(from));
        assert_eq!(device.transactor().address(), address);
        assert_eq!(device.transactor().opts().gas_limit, Some(21_000));
        assert_eq!(device.filterer().address(), address);
    }

    #[test]
    fn test_default_opts() {
        let device = AftermarketDevice::builder()
            .address(Address::ZERO)
            .provider(provider())
            .build();

        assert_eq!(*device.caller().opts(), CallOpts::default());
        assert_eq!(*device.transactor().opts(), TransactOpts::default());
    }

    #[test]
    fn test_from_config_uses_known_deployment() {
        let config = ContractConfig::builder()
            .rpc_url("http://localhost:8545".parse().unwrap())
            .chain_id(137)
            .build();

        let device = AftermarketDevice::from_config(&config).unwrap();
        assert_eq!(device.address(), POLYGON_AFTERMARKET_DEVICE_ADDRESS);
    }

    #[test]
    fn test_from_config_requires_address() {
        let config = ContractConfig::builder()
            .rpc_url("http://localhost:8545".parse().unwrap())
            .build();

        assert!(matches!(
            AftermarketDevice::from_config(&config),
            Err(AftermarketDeviceError::InvalidConfig(_))
        ));
    }
}
