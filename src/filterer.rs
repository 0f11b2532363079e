//! Event log access for the Aftermarket Device contract
//!
//! Each contract event gets three entry points: `filter_*` queries historic logs,
//! `watch_*` streams new logs as the provider reports them, and `parse_*` decodes
//! a single raw log. Indexed arguments are passed as slices: an empty slice
//! matches any value, several values match any one of them.

use alloy_contract::Event;
use alloy_network::Ethereum;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types::Log;
use alloy_sol_types::{SolEvent, SolEventInterface};
use futures_util::{Stream, StreamExt};
use tracing::{debug, info, Instrument};

use crate::config::{FilterOpts, WatchOpts};
use crate::contracts::aftermarket_device_id::AftermarketDeviceId::{
    AdminChanged, AftermarketDeviceIdEvents, AftermarketDeviceIdInstance, Approval,
    ApprovalForAll, BeaconUpgraded, Initialized, PrivilegeCreated, PrivilegeDisabled,
    PrivilegeEnabled, PrivilegeSet, RoleAdminChanged, RoleGranted, RoleRevoked, Transfer,
    Upgraded,
};
use crate::error::{AftermarketDeviceError, Result};
use crate::spans;

/// A value that can be matched against an indexed event topic
pub trait IntoTopic: Copy {
    /// The 32-byte topic word for this value
    fn into_topic(self) -> B256;
}

impl IntoTopic for Address {
    fn into_topic(self) -> B256 {
        self.into_word()
    }
}

impl IntoTopic for U256 {
    fn into_topic(self) -> B256 {
        B256::from(self.to_be_bytes::<32>())
    }
}

impl IntoTopic for B256 {
    fn into_topic(self) -> B256 {
        self
    }
}

/// Restricts the indexed argument at `position` (1-based) to `values`
fn select<'a, P, E, T>(event: Event<&'a P, E>, position: usize, values: &[T]) -> Event<&'a P, E>
where
    P: Provider<Ethereum>,
    E: SolEvent,
    T: IntoTopic,
{
    if values.is_empty() {
        return event;
    }

    let topic: Vec<B256> = values.iter().map(|value| value.into_topic()).collect();
    match position {
        1 => event.topic1(topic),
        2 => event.topic2(topic),
        _ => event.topic3(topic),
    }
}

/// Decode a raw log as event `E`
///
/// Fails when the log's first topic is not the signature hash of `E`.
pub fn parse_log<E: SolEvent>(log: &Log) -> Result<E> {
    Ok(log.log_decode::<E>()?.inner.data)
}

/// Decode a raw log as whichever contract event it carries
pub fn decode_event(log: &Log) -> Result<AftermarketDeviceIdEvents> {
    Ok(AftermarketDeviceIdEvents::decode_raw_log(
        log.topics(),
        &log.data().data,
    )?)
}

/// Event log wrapper around the Aftermarket Device contract
///
/// # Example
///
/// ```rust,no_run
/// use aftermarket_device::{AftermarketDeviceFilterer, FilterOpts};
/// use alloy_primitives::{address, Address};
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let contract = address!("9c94C395cBcBDe662235E0A9d3bB87Ad708561BA");
///
/// let filterer = AftermarketDeviceFilterer::new(contract, provider);
///
/// // Every mint: transfers out of the zero address, any recipient, any token
/// let mints = filterer
///     .filter_transfer(&[Address::ZERO], &[], &[], &FilterOpts::default())
///     .await?;
/// for (transfer, log) in mints {
///     println!("minted {} in block {:?}", transfer.tokenId, log.block_number);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AftermarketDeviceFilterer<P: Provider<Ethereum>> {
    instance: AftermarketDeviceIdInstance<P>,
}

impl<P: Provider<Ethereum>> AftermarketDeviceFilterer<P> {
    /// Create a new filterer
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "aftermarket_device_filterer_initialized"
        );
        Self {
            instance: AftermarketDeviceIdInstance::new(address, provider),
        }
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Returns the underlying bound contract
    pub fn instance(&self) -> &AftermarketDeviceIdInstance<P> {
        &self.instance
    }

    async fn query<E: SolEvent>(
        &self,
        event: Event<&P, E>,
        opts: &FilterOpts,
    ) -> Result<Vec<(E, Log)>> {
        let contract_address = self.address();
        let span = spans::filter_logs(
            &contract_address,
            E::SIGNATURE,
            &opts.from_block,
            opts.to_block.as_ref(),
        );

        let mut event = event.from_block(opts.from_block);
        if let Some(to_block) = opts.to_block {
            event = event.to_block(to_block);
        }

        async move {
            debug!(
                event_name = E::SIGNATURE,
                contract_address = %contract_address,
                event = "log_query_started"
            );

            let logs = event.query().await.inspect_err(|e| {
                spans::record_error(e);
            })?;

            info!(
                event_name = E::SIGNATURE,
                log_count = logs.len(),
                contract_address = %contract_address,
                event = "log_query_completed"
            );

            Ok(logs)
        }
        .instrument(span)
        .await
    }

    async fn watch<E: SolEvent + 'static>(
        &self,
        event: Event<&P, E>,
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(E, Log)>>> {
        let contract_address = self.address();
        let span = spans::watch_logs(&contract_address, E::SIGNATURE);
        let poll_interval = opts.poll_interval;

        let mut event = event;
        if let Some(from_block) = opts.from_block {
            event = event.from_block(from_block);
        }

        async move {
            let mut poller = event.watch().await.inspect_err(|e| {
                spans::record_error(e);
            })?;
            if let Some(interval) = poll_interval {
                poller.poller.set_poll_interval(interval);
            }

            info!(
                event_name = E::SIGNATURE,
                contract_address = %contract_address,
                poll_interval_ms = poll_interval.map(|i| i.as_millis() as u64),
                event = "log_watch_started"
            );

            Ok(poller
                .into_stream()
                .map(|item| item.map_err(AftermarketDeviceError::from)))
        }
        .instrument(span)
        .await
    }

    /// Decode a raw log as whichever contract event it carries
    pub fn parse_any(&self, log: &Log) -> Result<AftermarketDeviceIdEvents> {
        decode_event(log)
    }

    fn approval_event(
        &self,
        owner: &[Address],
        approved: &[Address],
        token_id: &[U256],
    ) -> Event<&P, Approval> {
        let event = self.instance.Approval_filter();
        let event = select(event, 1, owner);
        let event = select(event, 2, approved);
        select(event, 3, token_id)
    }

    /// Historic `Approval` logs: `owner` approved `approved` to transfer `tokenId`
    pub async fn filter_approval(
        &self,
        owner: &[Address],
        approved: &[Address],
        token_id: &[U256],
        opts: &FilterOpts,
    ) -> Result<Vec<(Approval, Log)>> {
        self.query(self.approval_event(owner, approved, token_id), opts).await
    }

    /// Live `Approval` logs
    pub async fn watch_approval(
        &self,
        owner: &[Address],
        approved: &[Address],
        token_id: &[U256],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(Approval, Log)>>> {
        self.watch(self.approval_event(owner, approved, token_id), opts).await
    }

    /// Decode a raw `Approval` log
    pub fn parse_approval(&self, log: &Log) -> Result<Approval> {
        parse_log(log)
    }

    fn approval_for_all_event(
        &self,
        owner: &[Address],
        operator: &[Address],
    ) -> Event<&P, ApprovalForAll> {
        let event = self.instance.ApprovalForAll_filter();
        let event = select(event, 1, owner);
        select(event, 2, operator)
    }

    /// Historic `ApprovalForAll` logs: `owner` enabled or disabled `operator` for all of its tokens
    pub async fn filter_approval_for_all(
        &self,
        owner: &[Address],
        operator: &[Address],
        opts: &FilterOpts,
    ) -> Result<Vec<(ApprovalForAll, Log)>> {
        self.query(self.approval_for_all_event(owner, operator), opts).await
    }

    /// Live `ApprovalForAll` logs
    pub async fn watch_approval_for_all(
        &self,
        owner: &[Address],
        operator: &[Address],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(ApprovalForAll, Log)>>> {
        self.watch(self.approval_for_all_event(owner, operator), opts).await
    }

    /// Decode a raw `ApprovalForAll` log
    pub fn parse_approval_for_all(&self, log: &Log) -> Result<ApprovalForAll> {
        parse_log(log)
    }

    fn transfer_event(
        &self,
        from: &[Address],
        to: &[Address],
        token_id: &[U256],
    ) -> Event<&P, Transfer> {
        let event = self.instance.Transfer_filter();
        let event = select(event, 1, from);
        let event = select(event, 2, to);
        select(event, 3, token_id)
    }

    /// Historic `Transfer` logs: `tokenId` moved from `from` to `to`
    ///
    /// Mints come from the zero address and burns go to it.
    pub async fn filter_transfer(
        &self,
        from: &[Address],
        to: &[Address],
        token_id: &[U256],
        opts: &FilterOpts,
    ) -> Result<Vec<(Transfer, Log)>> {
        self.query(self.transfer_event(from, to, token_id), opts).await
    }

    /// Live `Transfer` logs
    pub async fn watch_transfer(
        &self,
        from: &[Address],
        to: &[Address],
        token_id: &[U256],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(Transfer, Log)>>> {
        self.watch(self.transfer_event(from, to, token_id), opts).await
    }

    /// Decode a raw `Transfer` log
    pub fn parse_transfer(&self, log: &Log) -> Result<Transfer> {
        parse_log(log)
    }

    fn role_admin_changed_event(
        &self,
        role: &[B256],
        previous_admin_role: &[B256],
        new_admin_role: &[B256],
    ) -> Event<&P, RoleAdminChanged> {
        let event = self.instance.RoleAdminChanged_filter();
        let event = select(event, 1, role);
        let event = select(event, 2, previous_admin_role);
        select(event, 3, new_admin_role)
    }

    /// Historic `RoleAdminChanged` logs: the admin role of `role` changed
    pub async fn filter_role_admin_changed(
        &self,
        role: &[B256],
        previous_admin_role: &[B256],
        new_admin_role: &[B256],
        opts: &FilterOpts,
    ) -> Result<Vec<(RoleAdminChanged, Log)>> {
        let event = self.role_admin_changed_event(role, previous_admin_role, new_admin_role);
        self.query(event, opts).await
    }

    /// Live `RoleAdminChanged` logs
    pub async fn watch_role_admin_changed(
        &self,
        role: &[B256],
        previous_admin_role: &[B256],
        new_admin_role: &[B256],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(RoleAdminChanged, Log)>>> {
        let event = self.role_admin_changed_event(role, previous_admin_role, new_admin_role);
        self.watch(event, opts).await
    }

    /// Decode a raw `RoleAdminChanged` log
    pub fn parse_role_admin_changed(&self, log: &Log) -> Result<RoleAdminChanged> {
        parse_log(log)
    }

    fn role_granted_event(
        &self,
        role: &[B256],
        account: &[Address],
        sender: &[Address],
    ) -> Event<&P, RoleGranted> {
        let event = self.instance.RoleGranted_filter();
        let event = select(event, 1, role);
        let event = select(event, 2, account);
        select(event, 3, sender)
    }

    /// Historic `RoleGranted` logs: `account` was granted `role` by `sender`
    pub async fn filter_role_granted(
        &self,
        role: &[B256],
        account: &[Address],
        sender: &[Address],
        opts: &FilterOpts,
    ) -> Result<Vec<(RoleGranted, Log)>> {
        self.query(self.role_granted_event(role, account, sender), opts).await
    }

    /// Live `RoleGranted` logs
    pub async fn watch_role_granted(
        &self,
        role: &[B256],
        account: &[Address],
        sender: &[Address],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(RoleGranted, Log)>>> {
        self.watch(self.role_granted_event(role, account, sender), opts).await
    }

    /// Decode a raw `RoleGranted` log
    pub fn parse_role_granted(&self, log: &Log) -> Result<RoleGranted> {
        parse_log(log)
    }

    fn role_revoked_event(
        &self,
        role: &[B256],
        account: &[Address],
        sender: &[Address],
    ) -> Event<&P, RoleRevoked> {
        let event = self.instance.RoleRevoked_filter();
        let event = select(event, 1, role);
        let event = select(event, 2, account);
        select(event, 3, sender)
    }

    /// Historic `RoleRevoked` logs: `account` lost `role`, revoked by `sender`
    pub async fn filter_role_revoked(
        &self,
        role: &[B256],
        account: &[Address],
        sender: &[Address],
        opts: &FilterOpts,
    ) -> Result<Vec<(RoleRevoked, Log)>> {
        self.query(self.role_revoked_event(role, account, sender), opts).await
    }

    /// Live `RoleRevoked` logs
    pub async fn watch_role_revoked(
        &self,
        role: &[B256],
        account: &[Address],
        sender: &[Address],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(RoleRevoked, Log)>>> {
        self.watch(self.role_revoked_event(role, account, sender), opts).await
    }

    /// Decode a raw `RoleRevoked` log
    pub fn parse_role_revoked(&self, log: &Log) -> Result<RoleRevoked> {
        parse_log(log)
    }

    /// Historic `Initialized` logs: the proxy was initialized at `version`
    pub async fn filter_initialized(
        &self,
        opts: &FilterOpts,
    ) -> Result<Vec<(Initialized, Log)>> {
        self.query(self.instance.Initialized_filter(), opts).await
    }

    /// Live `Initialized` logs
    pub async fn watch_initialized(
        &self,
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(Initialized, Log)>>> {
        self.watch(self.instance.Initialized_filter(), opts).await
    }

    /// Decode a raw `Initialized` log
    pub fn parse_initialized(&self, log: &Log) -> Result<Initialized> {
        parse_log(log)
    }

    fn upgraded_event(&self, implementation: &[Address]) -> Event<&P, Upgraded> {
        select(self.instance.Upgraded_filter(), 1, implementation)
    }

    /// Historic `Upgraded` logs: the proxy now points at `implementation`
    pub async fn filter_upgraded(
        &self,
        implementation: &[Address],
        opts: &FilterOpts,
    ) -> Result<Vec<(Upgraded, Log)>> {
        self.query(self.upgraded_event(implementation), opts).await
    }

    /// Live `Upgraded` logs
    pub async fn watch_upgraded(
        &self,
        implementation: &[Address],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(Upgraded, Log)>>> {
        self.watch(self.upgraded_event(implementation), opts).await
    }

    /// Decode a raw `Upgraded` log
    pub fn parse_upgraded(&self, log: &Log) -> Result<Upgraded> {
        parse_log(log)
    }

    /// Historic `AdminChanged` logs: the proxy admin changed
    pub async fn filter_admin_changed(
        &self,
        opts: &FilterOpts,
    ) -> Result<Vec<(AdminChanged, Log)>> {
        self.query(self.instance.AdminChanged_filter(), opts).await
    }

    /// Live `AdminChanged` logs
    pub async fn watch_admin_changed(
        &self,
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(AdminChanged, Log)>>> {
        self.watch(self.instance.AdminChanged_filter(), opts).await
    }

    /// Decode a raw `AdminChanged` log
    pub fn parse_admin_changed(&self, log: &Log) -> Result<AdminChanged> {
        parse_log(log)
    }

    fn beacon_upgraded_event(&self, beacon: &[Address]) -> Event<&P, BeaconUpgraded> {
        select(self.instance.BeaconUpgraded_filter(), 1, beacon)
    }

    /// Historic `BeaconUpgraded` logs: the proxy beacon changed
    pub async fn filter_beacon_upgraded(
        &self,
        beacon: &[Address],
        opts: &FilterOpts,
    ) -> Result<Vec<(BeaconUpgraded, Log)>> {
        self.query(self.beacon_upgraded_event(beacon), opts).await
    }

    /// Live `BeaconUpgraded` logs
    pub async fn watch_beacon_upgraded(
        &self,
        beacon: &[Address],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(BeaconUpgraded, Log)>>> {
        self.watch(self.beacon_upgraded_event(beacon), opts).await
    }

    /// Decode a raw `BeaconUpgraded` log
    pub fn parse_beacon_upgraded(&self, log: &Log) -> Result<BeaconUpgraded> {
        parse_log(log)
    }

    fn privilege_created_event(&self, privilege_id: &[U256]) -> Event<&P, PrivilegeCreated> {
        select(self.instance.PrivilegeCreated_filter(), 1, privilege_id)
    }

    /// Historic `PrivilegeCreated` logs: a new privilege was defined
    pub async fn filter_privilege_created(
        &self,
        privilege_id: &[U256],
        opts: &FilterOpts,
    ) -> Result<Vec<(PrivilegeCreated, Log)>> {
        self.query(self.privilege_created_event(privilege_id), opts).await
    }

    /// Live `PrivilegeCreated` logs
    pub async fn watch_privilege_created(
        &self,
        privilege_id: &[U256],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(PrivilegeCreated, Log)>>> {
        self.watch(self.privilege_created_event(privilege_id), opts).await
    }

    /// Decode a raw `PrivilegeCreated` log
    pub fn parse_privilege_created(&self, log: &Log) -> Result<PrivilegeCreated> {
        parse_log(log)
    }

    fn privilege_enabled_event(&self, privilege_id: &[U256]) -> Event<&P, PrivilegeEnabled> {
        select(self.instance.PrivilegeEnabled_filter(), 1, privilege_id)
    }

    /// Historic `PrivilegeEnabled` logs: a privilege was enabled
    pub async fn filter_privilege_enabled(
        &self,
        privilege_id: &[U256],
        opts: &FilterOpts,
    ) -> Result<Vec<(PrivilegeEnabled, Log)>> {
        self.query(self.privilege_enabled_event(privilege_id), opts).await
    }

    /// Live `PrivilegeEnabled` logs
    pub async fn watch_privilege_enabled(
        &self,
        privilege_id: &[U256],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(PrivilegeEnabled, Log)>>> {
        self.watch(self.privilege_enabled_event(privilege_id), opts).await
    }

    /// Decode a raw `PrivilegeEnabled` log
    pub fn parse_privilege_enabled(&self, log: &Log) -> Result<PrivilegeEnabled> {
        parse_log(log)
    }

    fn privilege_disabled_event(&self, privilege_id: &[U256]) -> Event<&P, PrivilegeDisabled> {
        select(self.instance.PrivilegeDisabled_filter(), 1, privilege_id)
    }

    /// Historic `PrivilegeDisabled` logs: a privilege was disabled
    pub async fn filter_privilege_disabled(
        &self,
        privilege_id: &[U256],
        opts: &FilterOpts,
    ) -> Result<Vec<(PrivilegeDisabled, Log)>> {
        self.query(self.privilege_disabled_event(privilege_id), opts).await
    }

    /// Live `PrivilegeDisabled` logs
    pub async fn watch_privilege_disabled(
        &self,
        privilege_id: &[U256],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(PrivilegeDisabled, Log)>>> {
        self.watch(self.privilege_disabled_event(privilege_id), opts).await
    }

    /// Decode a raw `PrivilegeDisabled` log
    pub fn parse_privilege_disabled(&self, log: &Log) -> Result<PrivilegeDisabled> {
        parse_log(log)
    }

    fn privilege_set_event(
        &self,
        token_id: &[U256],
        priv_id: &[U256],
        user: &[Address],
    ) -> Event<&P, PrivilegeSet> {
        let event = self.instance.PrivilegeSet_filter();
        let event = select(event, 1, token_id);
        let event = select(event, 2, priv_id);
        select(event, 3, user)
    }

    /// Historic `PrivilegeSet` logs: `user` was granted `privId` on `tokenId` until `expires`
    pub async fn filter_privilege_set(
        &self,
        token_id: &[U256],
        priv_id: &[U256],
        user: &[Address],
        opts: &FilterOpts,
    ) -> Result<Vec<(PrivilegeSet, Log)>> {
        self.query(self.privilege_set_event(token_id, priv_id, user), opts).await
    }

    /// Live `PrivilegeSet` logs
    pub async fn watch_privilege_set(
        &self,
        token_id: &[U256],
        priv_id: &[U256],
        user: &[Address],
        opts: &WatchOpts,
    ) -> Result<impl Stream<Item = Result<(PrivilegeSet, Log)>>> {
        self.watch(self.privilege_set_event(token_id, priv_id, user), opts).await
    }

    /// Decode a raw `PrivilegeSet` log
    pub fn parse_privilege_set(&self, log: &Log) -> Result<PrivilegeSet> {
        parse_log(log)
    }
}
