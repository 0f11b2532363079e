use thiserror::Error;

#[derive(Error, Debug)]
pub enum AftermarketDeviceError {
    #[error("Chain not supported: {chain}")]
    ChainNotSupported { chain: String },

    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy_contract::Error),

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Event not found: {event}")]
    EventNotFound { event: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("No receipt for transaction {tx_hash} after {timeout_secs}s")]
    ReceiptTimeout { tx_hash: String, timeout_secs: u64 },

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, AftermarketDeviceError>;
