// SPDX-License-Identifier: Apache-2.0
//! Follow Aftermarket Device mints and transfers as they happen
//!
//! Reads the connection from the environment (`AFTERMARKET_DEVICE_RPC_URL` plus
//! either `AFTERMARKET_DEVICE_ADDRESS` or `AFTERMARKET_DEVICE_CHAIN_ID`), prints
//! the last mints in the recent block range, then streams every new transfer.
//!
//! Run with: `RUST_LOG=aftermarket_device=debug cargo run --example watch_transfers`

use aftermarket_device::{
    AftermarketDevice, AftermarketDeviceError, ContractConfig, FilterOpts, WatchOpts,
};
use alloy_primitives::Address;
use alloy_provider::Provider;
use alloy_rpc_types::BlockNumberOrTag;
use futures_util::StreamExt;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const LOOKBACK_BLOCKS: u64 = 5_000;

#[tokio::main]
async fn main() -> Result<(), AftermarketDeviceError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ContractConfig::from_env()?;
    let device = AftermarketDevice::from_config(&config)?;
    let caller = device.caller();
    let filterer = device.filterer();

    println!(
        "Aftermarket Device {} ({} / {})",
        device.address(),
        caller.name().await?,
        caller.symbol().await?
    );

    let latest = device.provider().get_block_number().await?;
    let opts = FilterOpts::builder()
        .from_block(BlockNumberOrTag::Number(
            latest.saturating_sub(LOOKBACK_BLOCKS),
        ))
        .build();

    let mints = filterer
        .filter_transfer(&[Address::ZERO], &[], &[], &opts)
        .await?;
    println!("{} mints in the last {LOOKBACK_BLOCKS} blocks", mints.len());
    for (mint, log) in mints.iter().rev().take(10) {
        println!(
            "  token {} minted to {} in block {:?}",
            mint.tokenId, mint.to, log.block_number
        );
    }

    let watch_opts = WatchOpts::builder()
        .poll_interval(Duration::from_secs(4))
        .build();
    let transfers = filterer.watch_transfer(&[], &[], &[], &watch_opts).await?;
    let mut transfers = Box::pin(transfers);

    println!("Watching for transfers, press Ctrl+C to stop");
    while let Some(item) = transfers.next().await {
        match item {
            Ok((transfer, log)) => println!(
                "token {}: {} -> {} (tx {:?})",
                transfer.tokenId, transfer.from, transfer.to, log.transaction_hash
            ),
            Err(e) => eprintln!("failed to decode transfer: {e}"),
        }
    }

    Ok(())
}
