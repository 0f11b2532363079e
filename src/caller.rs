//! Read-only access to the Aftermarket Device contract
//!
//! Every method performs a single `eth_call` against the bound contract, applying
//! the caller's [`CallOpts`] (simulated sender and target block).

use std::fmt;

use alloy_contract::SolCallBuilder;
use alloy_network::Ethereum;
use alloy_primitives::{Address, FixedBytes, B256, U256};
use alloy_provider::Provider;
use alloy_sol_types::SolCall;
use tracing::{debug, info, Instrument};

use crate::config::CallOpts;
use crate::contracts::aftermarket_device_id::AftermarketDeviceId::{
    privilegeRecordReturn, AftermarketDeviceIdInstance,
};
use crate::error::Result;
use crate::spans;

/// Definition of a privilege as stored by the contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeRecord {
    pub enabled: bool,
    pub description: String,
}

impl From<privilegeRecordReturn> for PrivilegeRecord {
    fn from(record: privilegeRecordReturn) -> Self {
        Self {
            enabled: record.enabled,
            description: record.description,
        }
    }
}

/// Read-only wrapper around the Aftermarket Device contract
///
/// # Example
///
/// ```rust,no_run
/// use aftermarket_device::{AftermarketDeviceCaller, CallOpts};
/// use alloy_primitives::{address, U256};
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let contract = address!("9c94C395cBcBDe662235E0A9d3bB87Ad708561BA");
///
/// let caller = AftermarketDeviceCaller::new(contract, provider);
/// let owner = caller.owner_of(U256::from(1)).await?;
/// let name = caller.name().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AftermarketDeviceCaller<P: Provider<Ethereum>> {
    instance: AftermarketDeviceIdInstance<P>,
    opts: CallOpts,
}

impl<P: Provider<Ethereum>> AftermarketDeviceCaller<P> {
    /// Create a new caller with default call options
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "aftermarket_device_caller_initialized"
        );
        Self {
            instance: AftermarketDeviceIdInstance::new(address, provider),
            opts: CallOpts::default(),
        }
    }

    /// Replace the options applied to every call
    pub fn with_opts(mut self, opts: CallOpts) -> Self {
        self.opts = opts;
        self
    }

    /// The options applied to every call
    pub fn opts(&self) -> &CallOpts {
        &self.opts
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Returns the underlying bound contract
    pub fn instance(&self) -> &AftermarketDeviceIdInstance<P> {
        &self.instance
    }

    fn apply<'a, C: SolCall>(
        &self,
        builder: SolCallBuilder<&'a P, C>,
    ) -> SolCallBuilder<&'a P, C> {
        let mut builder = builder;
        if let Some(from) = self.opts.from {
            builder = builder.from(from);
        }
        if let Some(block) = self.opts.block {
            builder = builder.block(block);
        }
        builder
    }

    async fn execute<C>(&self, builder: SolCallBuilder<&P, C>) -> Result<C::Return>
    where
        C: SolCall,
        C::Return: fmt::Debug,
    {
        let contract_address = self.address();
        let span = spans::call(&contract_address, C::SIGNATURE);
        let builder = self.apply(builder);

        async move {
            debug!(
                function = C::SIGNATURE,
                contract_address = %contract_address,
                block = ?self.opts.block,
                event = "contract_call_started"
            );

            let result = builder.call().await.inspect_err(|e| {
                spans::record_error(e);
            })?;

            info!(
                function = C::SIGNATURE,
                result = ?result,
                contract_address = %contract_address,
                event = "contract_call_completed"
            );

            Ok(result)
        }
        .instrument(span)
        .await
    }

    /// `DEFAULT_ADMIN_ROLE()`
    pub async fn default_admin_role(&self) -> Result<B256> {
        self.execute(self.instance.DEFAULT_ADMIN_ROLE()).await
    }

    /// `UPGRADER_ROLE()`
    pub async fn upgrader_role(&self) -> Result<B256> {
        self.execute(self.instance.UPGRADER_ROLE()).await
    }

    /// `MINTER_ROLE()`
    pub async fn minter_role(&self) -> Result<B256> {
        self.execute(self.instance.MINTER_ROLE()).await
    }

    /// `BURNER_ROLE()`
    pub async fn burner_role(&self) -> Result<B256> {
        self.execute(self.instance.BURNER_ROLE()).await
    }

    /// `TRANSFERER_ROLE()`
    pub async fn transferer_role(&self) -> Result<B256> {
        self.execute(self.instance.TRANSFERER_ROLE()).await
    }

    /// Address of the registry contract allowed to drive registry-only transfers
    pub async fn dimo_registry(&self) -> Result<Address> {
        self.execute(self.instance._dimoRegistry()).await
    }

    /// Number of device tokens held by `owner`
    pub async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.execute(self.instance.balanceOf(owner)).await
    }

    /// Owner of `token_id`; reverts for tokens that do not exist
    pub async fn owner_of(&self, token_id: U256) -> Result<Address> {
        self.execute(self.instance.ownerOf(token_id)).await
    }

    /// Address approved to transfer `token_id`, zero when none
    pub async fn get_approved(&self, token_id: U256) -> Result<Address> {
        self.execute(self.instance.getApproved(token_id)).await
    }

    pub async fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool> {
        self.execute(self.instance.isApprovedForAll(owner, operator)).await
    }

    /// Collection name
    pub async fn name(&self) -> Result<String> {
        self.execute(self.instance.name()).await
    }

    /// Collection symbol
    pub async fn symbol(&self) -> Result<String> {
        self.execute(self.instance.symbol()).await
    }

    /// Metadata URI of `token_id`
    pub async fn token_uri(&self, token_id: U256) -> Result<String> {
        self.execute(self.instance.tokenURI(token_id)).await
    }

    /// ERC165 interface detection
    pub async fn supports_interface(&self, interface_id: FixedBytes<4>) -> Result<bool> {
        self.execute(self.instance.supportsInterface(interface_id)).await
    }

    /// Admin role of `role`
    pub async fn get_role_admin(&self, role: impl Into<B256>) -> Result<B256> {
        self.execute(self.instance.getRoleAdmin(role.into())).await
    }

    /// Whether `account` holds `role`
    ///
    /// Accepts either a raw identifier or a [`Role`](crate::Role).
    pub async fn has_role(&self, role: impl Into<B256>, account: Address) -> Result<bool> {
        self.execute(self.instance.hasRole(role.into(), account)).await
    }

    /// Whether `user` currently holds `priv_id` on `token_id`
    ///
    /// Grants expire on their own and are invalidated when the token changes hands.
    pub async fn has_privilege(
        &self,
        token_id: U256,
        priv_id: U256,
        user: Address,
    ) -> Result<bool> {
        self.execute(self.instance.hasPrivilege(token_id, priv_id, user)).await
    }

    /// Expiry timestamp of the `priv_id` grant to `user` on `token_id`
    pub async fn privilege_expires_at(
        &self,
        token_id: U256,
        priv_id: U256,
        user: Address,
    ) -> Result<U256> {
        self.execute(self.instance.privilegeExpiresAt(token_id, priv_id, user)).await
    }

    /// Definition of privilege `priv_id`
    pub async fn privilege_record(&self, priv_id: U256) -> Result<PrivilegeRecord> {
        self.execute(self.instance.privilegeRecord(priv_id))
            .await
            .map(PrivilegeRecord::from)
    }

    /// Grant version of `token_id`, bumped on every transfer
    pub async fn token_id_to_version(&self, token_id: U256) -> Result<U256> {
        self.execute(self.instance.tokenIdToVersion(token_id)).await
    }

    /// Whether `token_id` has been minted and not burned
    pub async fn exists(&self, token_id: U256) -> Result<bool> {
        self.execute(self.instance.exists(token_id)).await
    }

    pub async fn trusted_forwarders(&self, forwarder: Address) -> Result<bool> {
        self.execute(self.instance.trustedForwarders(forwarder)).await
    }

    /// ERC2771 trusted forwarder check
    pub async fn is_trusted_forwarder(&self, forwarder: Address) -> Result<bool> {
        self.execute(self.instance.isTrustedForwarder(forwarder)).await
    }

    /// ERC1822 implementation slot, used to validate upgrades
    pub async fn proxiable_uuid(&self) -> Result<B256> {
        self.execute(self.instance.proxiableUUID()).await
    }
}
