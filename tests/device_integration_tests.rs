//! Integration tests for the Aftermarket Device bindings against a mocked JSON-RPC transport
//!
//! Each test drives the public API end to end: a single [`AftermarketDevice`] hands out
//! the caller, transactor and filterer, and the mocked transport answers the RPC requests
//! they issue in order.

use aftermarket_device::AftermarketDeviceId::{
    privilegeRecordCall, setPrivilegeCall, PrivilegeCreated, PrivilegeSet, Transfer,
};
use aftermarket_device::{
    decode_logs, find_event, minted_token_ids_in_logs, AftermarketDevice, AftermarketDeviceError,
    CallOpts, FilterOpts, Role, TransactOpts,
};
use alloy_primitives::{address, Address, Bytes, LogData, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::{BlockId, BlockNumberOrTag, Log};
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use alloy_transport::mock::Asserter;
use rstest::rstest;

const CONTRACT: Address = address!("9c94C395cBcBDe662235E0A9d3bB87Ad708561BA");
const OWNER: Address = address!("00000000000000000000000000000000000000aa");
const DRIVER: Address = address!("00000000000000000000000000000000000000bb");

fn device(asserter: &Asserter) -> AftermarketDevice<impl Provider + Clone> {
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter.clone());
    AftermarketDevice::builder()
        .address(CONTRACT)
        .provider(provider)
        .call_opts(CallOpts::builder().block(BlockId::latest()).build())
        .transact_opts(TransactOpts::builder().from(OWNER).build())
        .build()
}

fn encoded<T: SolValue>(value: T) -> Bytes {
    Bytes::from((value,).abi_encode_params())
}

fn rpc_log(data: LogData, block_number: u64) -> Log {
    Log {
        inner: alloy_primitives::Log {
            address: CONTRACT,
            data,
        },
        block_number: Some(block_number),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_owner_grants_and_driver_holds_privilege() {
    let asserter = Asserter::new();
    let device = device(&asserter);
    let token_id = U256::from(42);
    let priv_id = U256::from(1);

    // The owner reads the privilege definition before granting it
    asserter.push_success(&Bytes::from(
        (true, "Minimal data".to_string()).abi_encode_params(),
    ));
    let record = device.caller().privilege_record(priv_id).await.unwrap();
    assert!(record.enabled);
    assert_eq!(record.description, "Minimal data");

    // Granting is a transaction request addressed to the contract
    let expires = U256::from(1_900_000_000u64);
    let tx = device
        .transactor()
        .set_privilege_transaction(token_id, priv_id, DRIVER, expires);
    assert_eq!(tx.from, Some(OWNER));
    let input = tx.input.input().unwrap();
    let decoded = setPrivilegeCall::abi_decode(input).unwrap();
    assert_eq!(decoded.tokenId, token_id);
    assert_eq!(decoded.user, DRIVER);
    assert_eq!(decoded.expires, expires);

    // Once mined, the driver holds the privilege
    asserter.push_success(&encoded(true));
    let allowed = device
        .caller()
        .has_privilege(token_id, priv_id, DRIVER)
        .await
        .unwrap();
    assert!(allowed);
}

#[tokio::test]
async fn test_history_of_privilege_grants() {
    let asserter = Asserter::new();
    let device = device(&asserter);
    let grant = PrivilegeSet {
        tokenId: U256::from(42),
        version: U256::ZERO,
        privId: U256::from(1),
        user: DRIVER,
        expires: U256::from(1_900_000_000u64),
    };
    asserter.push_success(&vec![rpc_log(grant.encode_log_data(), 100)]);

    let grants = device
        .filterer()
        .filter_privilege_set(
            &[U256::from(42)],
            &[U256::from(1)],
            &[DRIVER],
            &FilterOpts::builder()
                .from_block(BlockNumberOrTag::Number(50))
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(grants.len(), 1);
    let (event, log) = &grants[0];
    assert_eq!(event.user, DRIVER);
    assert_eq!(event.expires, grant.expires);
    assert_eq!(log.block_number, Some(100));
}

#[tokio::test]
async fn test_role_check_uses_role_id() {
    let asserter = Asserter::new();
    let device = device(&asserter);
    asserter.push_success(&encoded(false));

    let is_minter = device
        .caller()
        .has_role(Role::Minter, OWNER)
        .await
        .unwrap();
    assert!(!is_minter);
}

#[tokio::test]
async fn test_rpc_failure_surfaces_as_contract_error() {
    let asserter = Asserter::new();
    let device = device(&asserter);
    asserter.push_failure_msg("execution reverted: ERC721: invalid token ID");

    let result = device.caller().owner_of(U256::from(7)).await;
    assert!(matches!(result, Err(AftermarketDeviceError::Contract(_))));
}

#[test]
fn test_mint_receipt_logs() {
    let logs = vec![
        rpc_log(
            Transfer {
                from: Address::ZERO,
                to: OWNER,
                tokenId: U256::from(5),
            }
            .encode_log_data(),
            10,
        ),
        rpc_log(
            PrivilegeCreated {
                privilegeId: U256::from(2),
                enabled: true,
                description: "Commands".to_string(),
            }
            .encode_log_data(),
            10,
        ),
    ];

    assert_eq!(minted_token_ids_in_logs(&logs, CONTRACT), vec![U256::from(5)]);
    assert_eq!(decode_logs(&logs, CONTRACT).len(), 2);

    let created: PrivilegeCreated = find_event(&logs, CONTRACT).unwrap();
    assert_eq!(created.description, "Commands");
}

#[rstest]
#[case(U256::from(1))]
#[case(U256::from(4))]
fn test_privilege_record_selector_is_stable(#[case] priv_id: U256) {
    let call = privilegeRecordCall { privId: priv_id };
    let data = call.abi_encode();
    assert_eq!(&data[..4], privilegeRecordCall::SELECTOR.as_slice());
    assert_eq!(data.len(), 36);
}
