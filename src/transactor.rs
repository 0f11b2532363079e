//! State-changing access to the Aftermarket Device contract
//!
//! Transaction builders encode a call and apply the transactor's [`TransactOpts`],
//! returning a `TransactionRequest` without sending it. Signing and submission are
//! left to the provider, either directly or through [`send`](AftermarketDeviceTransactor::send).

use std::time::Duration;

use alloy_contract::SolCallBuilder;
use alloy_network::Ethereum;
use alloy_primitives::{Address, Bytes, TxHash, B256, U256};
use alloy_provider::{PendingTransactionBuilder, Provider};
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use alloy_sol_types::SolCall;
use tokio::time::sleep;
use tracing::{debug, error, info, Instrument};

use crate::config::TransactOpts;
use crate::contracts::aftermarket_device_id::AftermarketDeviceId::{
    AftermarketDeviceIdInstance, SetPrivilegeData,
};
use crate::error::{AftermarketDeviceError, Result};
use crate::spans;

/// Delay between receipt lookups while a transaction is pending
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Transaction-building wrapper around the Aftermarket Device contract
///
/// # Example
///
/// ```rust,no_run
/// use aftermarket_device::{AftermarketDeviceTransactor, TransactOpts};
/// use alloy_primitives::address;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let contract = address!("9c94C395cBcBDe662235E0A9d3bB87Ad708561BA");
/// let minter = address!("1234567890123456789012345678901234567890");
///
/// let transactor = AftermarketDeviceTransactor::new(contract, provider)
///     .with_opts(TransactOpts::builder().from(minter).build());
///
/// let tx = transactor.safe_mint_transaction(minter);
/// let pending = transactor.send(tx).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AftermarketDeviceTransactor<P: Provider<Ethereum>> {
    instance: AftermarketDeviceIdInstance<P>,
    opts: TransactOpts,
}

impl<P: Provider<Ethereum>> AftermarketDeviceTransactor<P> {
    /// Create a new transactor with default transaction options
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "aftermarket_device_transactor_initialized"
        );
        Self {
            instance: AftermarketDeviceIdInstance::new(address, provider),
            opts: TransactOpts::default(),
        }
    }

    /// Replace the options applied to every transaction
    pub fn with_opts(mut self, opts: TransactOpts) -> Self {
        self.opts = opts;
        self
    }

    /// The options applied to every transaction
    pub fn opts(&self) -> &TransactOpts {
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

    fn apply(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if let Some(from) = self.opts.from {
            tx = tx.from(from);
        }
        if let Some(value) = self.opts.value {
            tx = tx.value(value);
        }
        if let Some(gas_limit) = self.opts.gas_limit {
            tx = tx.gas_limit(gas_limit);
        }
        if let Some(nonce) = self.opts.nonce {
            tx = tx.nonce(nonce);
        }
        if let Some(max_fee) = self.opts.max_fee_per_gas {
            tx = tx.max_fee_per_gas(max_fee);
        }
        if let Some(priority_fee) = self.opts.max_priority_fee_per_gas {
            tx = tx.max_priority_fee_per_gas(priority_fee);
        }
        tx
    }

    fn build<C: SolCall>(&self, builder: SolCallBuilder<&P, C>) -> TransactionRequest {
        let contract_address = self.address();
        let span = spans::transaction(&contract_address, C::SIGNATURE, self.opts.from.as_ref());
        let _guard = span.enter();

        let tx = self.apply(builder.into_transaction_request());

        info!(
            function = C::SIGNATURE,
            contract_address = %contract_address,
            calldata_len = tx.input.input().map_or(0, |input| input.len()),
            event = "transaction_request_created"
        );

        tx
    }

    /// Create a transaction targeting the contract with pre-encoded calldata
    ///
    /// Useful for functions added to the implementation after these bindings were written.
    pub fn raw_transaction(&self, calldata: Bytes) -> TransactionRequest {
        info!(
            contract_address = %self.address(),
            calldata_len = calldata.len(),
            event = "raw_transaction_request_created"
        );

        self.apply(
            TransactionRequest::default()
                .to(self.address())
                .input(calldata.into()),
        )
    }

    /// `initialize(name, symbol, baseUri)`, callable once on a fresh proxy
    pub fn initialize_transaction(
        &self,
        name: String,
        symbol: String,
        base_uri: String,
    ) -> TransactionRequest {
        self.build(self.instance.initialize(name, symbol, base_uri))
    }

    /// Approve `to` to transfer `token_id`
    pub fn approve_transaction(&self, to: Address, token_id: U256) -> TransactionRequest {
        self.build(self.instance.approve(to, token_id))
    }

    /// Burn `token_id`; requires `BURNER_ROLE`
    pub fn burn_transaction(&self, token_id: U256) -> TransactionRequest {
        self.build(self.instance.burn(token_id))
    }

    /// Define a new privilege
    pub fn create_privilege_transaction(
        &self,
        enabled: bool,
        description: String,
    ) -> TransactionRequest {
        self.build(self.instance.createPrivilege(enabled, description))
    }

    pub fn enable_privilege_transaction(&self, priv_id: U256) -> TransactionRequest {
        self.build(self.instance.enablePrivilege(priv_id))
    }

    pub fn disable_privilege_transaction(&self, priv_id: U256) -> TransactionRequest {
        self.build(self.instance.disablePrivilege(priv_id))
    }

    /// Grant `role` to `account`
    pub fn grant_role_transaction(
        &self,
        role: impl Into<B256>,
        account: Address,
    ) -> TransactionRequest {
        self.build(self.instance.grantRole(role.into(), account))
    }

    /// Revoke `role` from `account`
    pub fn revoke_role_transaction(
        &self,
        role: impl Into<B256>,
        account: Address,
    ) -> TransactionRequest {
        self.build(self.instance.revokeRole(role.into(), account))
    }

    /// Give up `role`; `account` must be the sender
    pub fn renounce_role_transaction(
        &self,
        role: impl Into<B256>,
        account: Address,
    ) -> TransactionRequest {
        self.build(self.instance.renounceRole(role.into(), account))
    }

    /// Mint the next device token to `to`; requires `MINTER_ROLE`
    ///
    /// The new token id is only known once mined, see
    /// [`minted_token_ids`](crate::minted_token_ids).
    pub fn safe_mint_transaction(&self, to: Address) -> TransactionRequest {
        self.build(self.instance.safeMint(to))
    }

    /// Registry-driven transfer that bypasses owner approval; requires `TRANSFERER_ROLE`
    pub fn safe_transfer_by_registry_transaction(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> TransactionRequest {
        self.build(self.instance.safeTransferByRegistry(from, to, token_id))
    }

    /// `safeTransferFrom(from, to, tokenId)`
    pub fn safe_transfer_from_transaction(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> TransactionRequest {
        self.build(self.instance.safeTransferFrom_0(from, to, token_id))
    }

    /// `safeTransferFrom(from, to, tokenId, data)`
    pub fn safe_transfer_from_with_data_transaction(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> TransactionRequest {
        self.build(self.instance.safeTransferFrom_1(from, to, token_id, data))
    }

    pub fn set_approval_for_all_transaction(
        &self,
        operator: Address,
        approved: bool,
    ) -> TransactionRequest {
        self.build(self.instance.setApprovalForAll(operator, approved))
    }

    pub fn set_base_uri_transaction(&self, base_uri: String) -> TransactionRequest {
        self.build(self.instance.setBaseURI(base_uri))
    }

    pub fn set_dimo_registry_address_transaction(&self, registry: Address) -> TransactionRequest {
        self.build(self.instance.setDimoRegistryAddress(registry))
    }

    /// Grant `priv_id` on `token_id` to `user` until the `expires` timestamp
    pub fn set_privilege_transaction(
        &self,
        token_id: U256,
        priv_id: U256,
        user: Address,
        expires: U256,
    ) -> TransactionRequest {
        self.build(self.instance.setPrivilege(token_id, priv_id, user, expires))
    }

    /// Batch form of [`set_privilege_transaction`](Self::set_privilege_transaction)
    pub fn set_privileges_transaction(
        &self,
        privileges: Vec<SetPrivilegeData>,
    ) -> TransactionRequest {
        self.build(self.instance.setPrivileges(privileges))
    }

    pub fn set_trusted_forwarder_transaction(
        &self,
        forwarder: Address,
        trusted: bool,
    ) -> TransactionRequest {
        self.build(self.instance.setTrustedForwarder(forwarder, trusted))
    }

    pub fn transfer_from_transaction(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> TransactionRequest {
        self.build(self.instance.transferFrom(from, to, token_id))
    }

    /// Point the proxy at `new_implementation`; requires `UPGRADER_ROLE`
    pub fn upgrade_to_transaction(&self, new_implementation: Address) -> TransactionRequest {
        self.build(self.instance.upgradeTo(new_implementation))
    }

    /// Upgrade and call `data` on the new implementation in one transaction
    ///
    /// `value` is forwarded with the call and takes precedence over the transactor's value.
    pub fn upgrade_to_and_call_transaction(
        &self,
        new_implementation: Address,
        data: Bytes,
        value: U256,
    ) -> TransactionRequest {
        self.build(self.instance.upgradeToAndCall(new_implementation, data))
            .value(value)
    }

    /// Submit a transaction through the provider
    ///
    /// The provider is responsible for filling and signing the request.
    pub async fn send(
        &self,
        tx: TransactionRequest,
    ) -> Result<PendingTransactionBuilder<Ethereum>> {
        let contract_address = self.address();
        let span = spans::send_transaction(&contract_address);

        async move {
            let pending = self
                .instance
                .provider()
                .send_transaction(tx)
                .await
                .inspect_err(|e| {
                    spans::record_error_with_context(
                        "SendTransactionFailed",
                        &format!("Failed to send transaction: {e}"),
                        None,
                    );
                    error!(
                        error = %e,
                        contract_address = %contract_address,
                        event = "send_transaction_failed"
                    );
                })?;

            tracing::Span::current().record("tx_hash", tracing::field::display(pending.tx_hash()));
            info!(
                tx_hash = %pending.tx_hash(),
                contract_address = %contract_address,
                event = "transaction_sent"
            );

            Ok(pending)
        }
        .instrument(span)
        .await
    }

    /// Poll for the receipt of `tx_hash` until it is mined or `timeout` elapses
    ///
    /// # Errors
    ///
    /// Returns [`AftermarketDeviceError::ReceiptTimeout`] when no receipt shows up in time.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        timeout: Duration,
    ) -> Result<TransactionReceipt> {
        let provider = self.instance.provider();

        let poll = async {
            let mut attempt: u32 = 0;
            loop {
                attempt += 1;
                if let Some(receipt) = provider.get_transaction_receipt(tx_hash).await? {
                    return Ok::<_, AftermarketDeviceError>(receipt);
                }

                debug!(
                    tx_hash = %tx_hash,
                    attempt = attempt,
                    poll_interval_secs = RECEIPT_POLL_INTERVAL.as_secs(),
                    event = "receipt_pending"
                );
                sleep(RECEIPT_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(timeout, poll).await.map_err(|_| {
            error!(
                tx_hash = %tx_hash,
                timeout_secs = timeout.as_secs(),
                event = "receipt_timeout"
            );
            AftermarketDeviceError::ReceiptTimeout {
                tx_hash: tx_hash.to_string(),
                timeout_secs: timeout.as_secs(),
            }
        })?
    }

    /// Submit a transaction and wait up to `timeout` for a successful receipt
    ///
    /// # Errors
    ///
    /// Returns [`AftermarketDeviceError::TransactionFailed`] when the transaction is
    /// mined but reverted.
    pub async fn send_and_confirm(
        &self,
        tx: TransactionRequest,
        timeout: Duration,
    ) -> Result<TransactionReceipt> {
        let pending = self.send(tx).await?;
        let tx_hash = *pending.tx_hash();

        let receipt = self.wait_for_receipt(tx_hash, timeout).await?;

        if !receipt.status() {
            error!(
                tx_hash = %tx_hash,
                block_number = ?receipt.block_number,
                event = "transaction_reverted"
            );
            return Err(AftermarketDeviceError::TransactionFailed {
                reason: format!("transaction {tx_hash} reverted"),
            });
        }

        info!(
            tx_hash = %tx_hash,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            event = "transaction_confirmed"
        );

        Ok(receipt)
    }
}
