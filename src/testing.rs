//! Shared fixtures for unit tests

use alloy_primitives::{address, Address, Bloom, B256};
use alloy_rpc_types::{Log, TransactionReceipt};
use serde_json::{json, Value};

pub(crate) const CONTRACT: Address = address!("9c94C395cBcBDe662235E0A9d3bB87Ad708561BA");
pub(crate) const SENDER: Address = address!("1234567890123456789012345678901234567890");

/// JSON-RPC shape of an EIP-1559 receipt mined in block 100
pub(crate) fn receipt_json(tx_hash: B256, success: bool, logs: &[Log]) -> Value {
    json!({
        "type": "0x2",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x1e8480",
        "logs": logs,
        "logsBloom": Bloom::ZERO,
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0xbb),
        "blockNumber": "0x64",
        "gasUsed": "0x186a0",
        "effectiveGasPrice": "0x3b9aca00",
        "from": SENDER,
        "to": CONTRACT,
        "contractAddress": null
    })
}

pub(crate) fn receipt(tx_hash: B256, success: bool, logs: &[Log]) -> TransactionReceipt {
    serde_json::from_value(receipt_json(tx_hash, success, logs)).expect("valid receipt json")
}
