//! OpenTelemetry span helpers for Aftermarket Device contract operations
//!
//! Span names are static and every attribute is a structured field, so spans
//! can be aggregated by backends without cardinality blowups. The wrappers in
//! this crate enter these spans internally; they are public for callers who
//! want to wrap their own operations the same way.
//!
//! # Example
//!
//! ```rust,no_run
//! use aftermarket_device::spans;
//! use alloy_primitives::Address;
//!
//! let span = spans::call(&Address::ZERO, "ownerOf");
//! let _guard = span.enter();
//! // Your custom call here
//! ```

use alloy_primitives::{Address, TxHash};
use alloy_rpc_types::BlockNumberOrTag;
use tracing::Span;

/// Create span for a read-only contract call.
///
/// Parent: Caller operation span
/// Children: Provider RPC calls (`eth_call`)
#[inline]
pub fn call(contract_address: &Address, function: &'static str) -> Span {
    tracing::debug_span!(
        "aftermarket_device.call",
        contract_address = %contract_address,
        function = function,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for building a state-changing transaction request.
///
/// Parent: Top-level operation span
/// Children: None
#[inline]
pub fn transaction(
    contract_address: &Address,
    function: &'static str,
    from: Option<&Address>,
) -> Span {
    tracing::info_span!(
        "aftermarket_device.transaction",
        contract_address = %contract_address,
        function = function,
        from = from.map(tracing::field::display),
    )
}

/// Create span for submitting a transaction to the provider.
///
/// Parent: Top-level operation span
/// Children: Provider RPC calls (`eth_sendTransaction`, receipt polling)
#[inline]
pub fn send_transaction(contract_address: &Address) -> Span {
    tracing::info_span!(
        "aftermarket_device.send_transaction",
        contract_address = %contract_address,
        tx_hash = tracing::field::Empty,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a historic event log query.
///
/// Parent: Filterer operation span
/// Children: Provider RPC calls (`eth_getLogs`)
#[inline]
pub fn filter_logs(
    contract_address: &Address,
    event: &'static str,
    from_block: &BlockNumberOrTag,
    to_block: Option<&BlockNumberOrTag>,
) -> Span {
    tracing::debug_span!(
        "aftermarket_device.filter_logs",
        contract_address = %contract_address,
        event_name = event,
        from_block = %from_block,
        to_block = to_block.map(tracing::field::display),
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for installing a live event watcher.
///
/// Parent: Filterer operation span
/// Children: Provider RPC calls (`eth_newFilter`)
#[inline]
pub fn watch_logs(contract_address: &Address, event: &'static str) -> Span {
    tracing::debug_span!(
        "aftermarket_device.watch_logs",
        contract_address = %contract_address,
        event_name = event,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for decoding the events of a transaction receipt.
///
/// Parent: Top-level operation span
/// Children: None
#[inline]
pub fn decode_receipt(tx_hash: TxHash, contract_address: &Address) -> Span {
    tracing::debug_span!(
        "aftermarket_device.decode_receipt",
        tx_hash = %tx_hash,
        contract_address = %contract_address,
    )
}

/// Create span for locating one event among a set of logs.
///
/// Parent: Receipt decoding or top-level operation span
/// Children: None
#[inline]
pub fn find_event(contract_address: &Address, event: &'static str, log_count: usize) -> Span {
    tracing::debug_span!(
        "aftermarket_device.find_event",
        contract_address = %contract_address,
        event_name = event,
        log_count = log_count,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error type/variant
/// - error.message: Human-readable error message
/// - error.source: The underlying cause, when there is one
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    if let Some(source) = error.source() {
        current_span.record("error.source", source.to_string());
    }
}

/// Record error attributes with custom context on the current span.
///
/// # Example
///
/// ```rust,no_run
/// use aftermarket_device::spans;
///
/// # fn example() {
/// let span = tracing::info_span!("aftermarket_device.operation");
/// let _guard = span.enter();
///
/// if let Err(e) = some_operation() {
///     spans::record_error_with_context(
///         "TransactionFailed",
///         &format!("Failed to submit transaction: {}", e),
///         Some("Transaction may have been dropped from mempool"),
///     );
/// }
/// # }
/// # fn some_operation() -> Result<(), String> { Ok(()) }
/// ```
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
