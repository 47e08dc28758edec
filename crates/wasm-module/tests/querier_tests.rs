// End-to-end coverage of the query dispatcher and handlers against the
// in-memory keeper.

use serde_json::Value;

use wasm_module::test_utils::{code_hash, test_address, MockKeeper};
use wasm_module::{Addr, CodeInfo, ContractInfo, Querier, WasmError};

fn contract_info(creator: &Addr, code_id: u64, label: &str) -> ContractInfo {
    ContractInfo {
        code_id,
        creator: creator.clone(),
        admin: None,
        label: label.to_string(),
        created: 1000,
    }
}

fn code_info(creator: &Addr, bytecode: &[u8]) -> CodeInfo {
    CodeInfo {
        creator: creator.clone(),
        code_hash: code_hash(bytecode),
        source: String::new(),
        builder: String::new(),
    }
}

fn parse(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response is json")
}

#[test]
fn contract_info_roundtrip() {
    let creator = test_address("creator");
    let contract = test_address("contract-1");
    let mut keeper = MockKeeper::default();
    keeper.add_contract(contract.clone(), contract_info(&creator, 1, "my contract"));

    let querier = Querier::new(&keeper);
    let res = querier
        .dispatch(&["contract-info", contract.as_str()], b"")
        .unwrap();

    let json = parse(&res);
    assert_eq!(json["code_id"], 1);
    assert_eq!(json["creator"], creator.as_str());
    assert_eq!(json["label"], "my contract");
    assert_eq!(json["admin"], Value::Null);
    // indented output, not compact
    assert!(res.starts_with(b"{\n"));
}

#[test]
fn contract_info_for_unknown_contract_is_null() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);
    let unknown = test_address("nobody-home");

    let res = querier
        .dispatch(&["contract-info", unknown.as_str()], b"")
        .unwrap();
    assert_eq!(res, b"null");
}

#[test]
fn handlers_reject_invalid_addresses() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);

    for path in [
        vec!["contract-info", "not-an-address"],
        vec!["contract-state", "not-an-address", "all"],
        vec!["contract-state", "not-an-address", "raw"],
        vec!["contract-state", "not-an-address", "smart"],
    ] {
        let err = querier.dispatch(&path, b"").unwrap_err();
        assert!(matches!(err, WasmError::InvalidAddress(_)), "{path:?}");
    }
}

#[test]
fn contract_list_preserves_keeper_order() {
    let creator = test_address("creator");
    let mut keeper = MockKeeper::default();
    // insertion order is deliberately not sorted
    let addrs = [
        test_address("zeta"),
        test_address("alpha"),
        test_address("middle"),
    ];
    for (i, addr) in addrs.iter().enumerate() {
        keeper.add_contract(addr.clone(), contract_info(&creator, i as u64 + 1, "c"));
    }

    let querier = Querier::new(&keeper);
    let res = querier.dispatch(&["list-contracts"], b"").unwrap();
    let listed: Vec<String> = serde_json::from_slice(&res).unwrap();
    let expected: Vec<String> = addrs.iter().map(|a| a.to_string()).collect();
    assert_eq!(listed, expected);
}

#[test]
fn contract_list_is_empty_array_without_contracts() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);
    let res = querier.dispatch(&["list-contracts"], b"").unwrap();
    assert_eq!(res, b"[]");
}

#[test]
fn state_all_returns_entries_in_key_order() {
    let contract = test_address("stateful");
    let mut keeper = MockKeeper::default();
    keeper.set_state_entry(&contract, b"config".to_vec(), b"{}".to_vec());
    keeper.set_state_entry(&contract, b"balance:alice".to_vec(), b"100".to_vec());
    keeper.set_state_entry(&contract, b"balance:bob".to_vec(), b"7".to_vec());

    let querier = Querier::new(&keeper);
    let res = querier
        .dispatch(&["contract-state", contract.as_str(), "all"], b"")
        .unwrap();
    let json = parse(&res);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    // lexicographic raw key order
    assert_eq!(entries[0]["key"], "balance:alice");
    assert_eq!(entries[1]["key"], "balance:bob");
    assert_eq!(entries[2]["key"], "config");
    assert_eq!(entries[0]["value"], "100");
}

#[test]
fn state_all_on_empty_contract_is_empty_array() {
    let contract = test_address("empty");
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);

    let res = querier
        .dispatch(&["contract-state", contract.as_str(), "all"], b"")
        .unwrap();
    assert_eq!(res, b"[]");
}

#[test]
fn state_raw_returns_zero_or_one_models() {
    let contract = test_address("stateful");
    let mut keeper = MockKeeper::default();
    keeper.set_state_entry(&contract, b"config".to_vec(), b"{}".to_vec());
    let querier = Querier::new(&keeper);

    let hit = querier
        .dispatch(&["contract-state", contract.as_str(), "raw"], b"config")
        .unwrap();
    let json = parse(&hit);
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["key"], "config");
    assert_eq!(entries[0]["value"], "{}");

    // a missing key is an empty sequence, not an error
    let miss = querier
        .dispatch(&["contract-state", contract.as_str(), "raw"], b"missing")
        .unwrap();
    assert_eq!(miss, b"[]");
}

#[test]
fn state_smart_is_byte_for_byte_passthrough() {
    let contract = test_address("smart");
    let mut keeper = MockKeeper::default();
    // deliberately not valid json, to prove no wrapping happens
    let vm_response = vec![0x00, 0xff, b'{', 0x01];
    keeper.set_smart_response(&contract, vm_response.clone());

    let querier = Querier::new(&keeper);
    let res = querier
        .dispatch(&["contract-state", contract.as_str(), "smart"], b"{\"q\":{}}")
        .unwrap();
    assert_eq!(res, vm_response);
}

#[test]
fn state_unknown_submode_is_rejected() {
    let contract = test_address("stateful");
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);

    let err = querier
        .dispatch(&["contract-state", contract.as_str(), "partial"], b"")
        .unwrap_err();
    assert!(matches!(err, WasmError::UnknownSubmode(ref m) if m == "partial"));
}

#[test]
fn code_query_returns_base64_bytecode() {
    let creator = test_address("creator");
    let bytecode = b"\x00asm\x01\x00\x00\x00".to_vec();
    let mut keeper = MockKeeper::default();
    keeper.add_code(1, code_info(&creator, &bytecode), bytecode.clone());

    let querier = Querier::new(&keeper);
    let res = querier.dispatch(&["code", "1"], b"").unwrap();
    let json = parse(&res);
    let encoded = json["code"].as_str().unwrap();

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    assert_eq!(STANDARD.decode(encoded).unwrap(), bytecode);
}

#[test]
fn code_query_rejects_non_numeric_id() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);
    let err = querier.dispatch(&["code", "first"], b"").unwrap_err();
    assert!(matches!(err, WasmError::InvalidCodeId(_)));
}

#[test]
fn code_query_propagates_keeper_error_when_missing() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);
    let err = querier.dispatch(&["code", "42"], b"").unwrap_err();
    assert!(matches!(err, WasmError::Keeper(_)));
}

#[test]
fn code_list_stops_at_first_gap() {
    let creator = test_address("creator");
    let mut keeper = MockKeeper::default();
    for id in [1u64, 2, 4] {
        let bytecode = vec![id as u8; 4];
        keeper.add_code(id, code_info(&creator, &bytecode), bytecode);
    }

    let querier = Querier::new(&keeper);
    let res = querier.dispatch(&["list-code"], b"").unwrap();
    let json = parse(&res);
    let entries = json.as_array().unwrap();
    // id 3 is missing, so id 4 is never reached
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["id"], 1);
    assert_eq!(entries[1]["id"], 2);
    assert_eq!(entries[0]["creator"], creator.as_str());
    assert_eq!(
        entries[0]["code_hash"],
        hex::encode(code_hash(&[1u8; 4]))
    );
}

#[test]
fn code_list_is_empty_array_without_codes() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);
    let res = querier.dispatch(&["list-code"], b"").unwrap();
    assert_eq!(res, b"[]");
}

#[test]
fn unknown_query_kind_is_rejected() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);
    let err = querier.dispatch(&["balances"], b"").unwrap_err();
    assert!(matches!(err, WasmError::UnknownQueryKind(ref k) if k == "balances"));
}

#[test]
fn wire_errors_redact_unless_debug() {
    let keeper = MockKeeper::default();

    let redacting = Querier::new(&keeper);
    let wire = redacting
        .query(&["contract-info", "garbage"], b"")
        .unwrap_err();
    assert_eq!(wire.codespace, "wasm");
    assert_eq!(wire.code, 3);
    assert_eq!(wire.log, "internal error");

    let debugging = Querier::with_debug(&keeper);
    let wire = debugging
        .query(&["contract-info", "garbage"], b"")
        .unwrap_err();
    assert_eq!(wire.code, 3);
    assert!(wire.log.contains("invalid address"), "{}", wire.log);
}

#[test]
fn successful_queries_pass_wire_translation_untouched() {
    let keeper = MockKeeper::default();
    let querier = Querier::new(&keeper);
    let res = querier.query(&["list-contracts"], b"").unwrap();
    assert_eq!(res, b"[]");
}
