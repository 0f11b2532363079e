//! Decoding Aftermarket Device events out of transaction receipts
//!
//! State-changing calls report their results through events, so the outcome of a
//! mined transaction (the id of a freshly minted token, for instance) is read from
//! its receipt rather than from a return value.

use alloy_primitives::{Address, U256};
use alloy_rpc_types::{Log, TransactionReceipt};
use alloy_sol_types::SolEvent;
use tracing::{debug, info};

use crate::contracts::aftermarket_device_id::AftermarketDeviceId::{
    AftermarketDeviceIdEvents, Transfer,
};
use crate::error::{AftermarketDeviceError, Result};
use crate::filterer::{decode_event, parse_log};
use crate::spans;

/// Decode every log emitted by `contract`, in log order
///
/// Logs from other contracts and logs that do not match any known event are skipped.
pub fn decode_logs(logs: &[Log], contract: Address) -> Vec<AftermarketDeviceIdEvents> {
    logs.iter()
        .filter(|log| log.address() == contract)
        .filter_map(|log| match decode_event(log) {
            Ok(event) => Some(event),
            Err(e) => {
                debug!(
                    error = %e,
                    log_index = ?log.log_index,
                    event = "unknown_contract_log_skipped"
                );
                None
            }
        })
        .collect()
}

/// Decode every event `contract` emitted in `receipt`
pub fn decode_receipt_events(
    receipt: &TransactionReceipt,
    contract: Address,
) -> Vec<AftermarketDeviceIdEvents> {
    let span = spans::decode_receipt(receipt.transaction_hash, &contract);
    let _guard = span.enter();

    let events = decode_logs(receipt.inner.logs(), contract);

    info!(
        available_logs = receipt.inner.logs().len(),
        decoded_events = events.len(),
        event = "receipt_events_decoded"
    );

    events
}

/// Token ids minted by `contract` among `logs`
pub fn minted_token_ids_in_logs(logs: &[Log], contract: Address) -> Vec<U256> {
    decode_logs(logs, contract)
        .into_iter()
        .filter_map(|event| match event {
            AftermarketDeviceIdEvents::Transfer(Transfer { from, tokenId, .. })
                if from == Address::ZERO =>
            {
                Some(tokenId)
            }
            _ => None,
        })
        .collect()
}

/// Token ids minted by `contract` in `receipt`, typically the result of `safeMint`
pub fn minted_token_ids(receipt: &TransactionReceipt, contract: Address) -> Vec<U256> {
    minted_token_ids_in_logs(receipt.inner.logs(), contract)
}

/// The first `E` event emitted by `contract` among `logs`
///
/// # Errors
///
/// Returns [`AftermarketDeviceError::EventNotFound`] if no log carries the event.
pub fn find_event<E: SolEvent>(logs: &[Log], contract: Address) -> Result<E> {
    let span = spans::find_event(&contract, E::SIGNATURE, logs.len());
    let _guard = span.enter();

    let log = logs
        .iter()
        .find(|log| log.address() == contract && log.topic0() == Some(&E::SIGNATURE_HASH))
        .ok_or_else(|| {
            spans::record_error_with_context(
                "EventNotFound",
                &format!("{} event not found in logs", E::SIGNATURE),
                Some(&format!(
                    "{} logs available but none matched the event signature",
                    logs.len()
                )),
            );
            AftermarketDeviceError::EventNotFound {
                event: E::SIGNATURE.to_string(),
            }
        })?;

    debug!(
        event_name = E::SIGNATURE,
        log_index = ?log.log_index,
        event = "event_found"
    );
    parse_log(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::aftermarket_device_id::AftermarketDeviceId::{
        PrivilegeEnabled, PrivilegeSet,
    };
    use crate::testing::receipt;
    use alloy_primitives::{address, LogData, B256};

    const CONTRACT: Address = address!("9c94C395cBcBDe662235E0A9d3bB87Ad708561BA");
    const OTHER: Address = address!("00000000000000000000000000000000000000bb");
    const OWNER: Address = address!("00000000000000000000000000000000000000aa");

    fn log_at(address: Address, data: LogData) -> Log {
        Log {
            inner: alloy_primitives::Log { address, data },
            ..Default::default()
        }
    }

    fn transfer(from: Address, to: Address, token_id: u64) -> LogData {
        Transfer {
            from,
            to,
            tokenId: U256::from(token_id),
        }
        .encode_log_data()
    }

    #[test]
    fn test_minted_token_ids_only_counts_mints_from_contract() {
        let logs = vec![
            log_at(CONTRACT, transfer(Address::ZERO, OWNER, 11)),
            log_at(CONTRACT, transfer(OWNER, OTHER, 12)),
            log_at(OTHER, transfer(Address::ZERO, OWNER, 13)),
            log_at(CONTRACT, transfer(Address::ZERO, OTHER, 14)),
        ];

        assert_eq!(
            minted_token_ids_in_logs(&logs, CONTRACT),
            vec![U256::from(11), U256::from(14)]
        );
    }

    #[test]
    fn test_decode_logs_skips_unknown() {
        let logs = vec![
            log_at(
                CONTRACT,
                LogData::new_unchecked(vec![B256::repeat_byte(0x01)], Default::default()),
            ),
            log_at(
                CONTRACT,
                PrivilegeEnabled {
                    privilegeId: U256::from(2),
                }
                .encode_log_data(),
            ),
        ];

        let events = decode_logs(&logs, CONTRACT);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            AftermarketDeviceIdEvents::PrivilegeEnabled(_)
        ));
    }

    #[test]
    fn test_find_event() {
        let set = PrivilegeSet {
            tokenId: U256::from(1),
            version: U256::ZERO,
            privId: U256::from(3),
            user: OWNER,
            expires: U256::from(99),
        };
        let logs = vec![
            log_at(CONTRACT, transfer(Address::ZERO, OWNER, 1)),
            log_at(CONTRACT, set.encode_log_data()),
        ];

        let found: PrivilegeSet = find_event(&logs, CONTRACT).unwrap();
        assert_eq!(found.privId, U256::from(3));
        assert_eq!(found.user, OWNER);
    }

    #[test]
    fn test_find_event_missing() {
        let logs = vec![log_at(OTHER, transfer(Address::ZERO, OWNER, 1))];

        let result = find_event::<Transfer>(&logs, CONTRACT);
        assert!(matches!(
            result,
            Err(AftermarketDeviceError::EventNotFound { .. })
        ));
    }

    #[test]
    fn test_minted_token_ids_from_receipt() {
        let receipt = receipt(
            B256::repeat_byte(0x01),
            true,
            &[
                log_at(CONTRACT, transfer(Address::ZERO, OWNER, 21)),
                log_at(OTHER, transfer(Address::ZERO, OWNER, 22)),
            ],
        );

        assert_eq!(minted_token_ids(&receipt, CONTRACT), vec![U256::from(21)]);
    }

    #[test]
    fn test_decode_receipt_events_keeps_log_order() {
        let receipt = receipt(
            B256::repeat_byte(0x02),
            true,
            &[
                log_at(
                    CONTRACT,
                    PrivilegeEnabled {
                        privilegeId: U256::from(4),
                    }
                    .encode_log_data(),
                ),
                log_at(OTHER, transfer(OWNER, OTHER, 1)),
                log_at(CONTRACT, transfer(OWNER, OTHER, 5)),
            ],
        );

        let events = decode_receipt_events(&receipt, CONTRACT);
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            AftermarketDeviceIdEvents::PrivilegeEnabled(_)
        ));
        assert!(matches!(
            &events[1],
            AftermarketDeviceIdEvents::Transfer(Transfer { to, .. }) if *to == OTHER
        ));
        assert!(minted_token_ids(&receipt, CONTRACT).is_empty());
    }
}
