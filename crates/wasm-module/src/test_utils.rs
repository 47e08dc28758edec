// In-memory keeper and fixture helpers for exercising the querier and
// message validation without a real state store.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::address::{Addr, DEFAULT_BECH32_PREFIX};
use crate::error::WasmError;
use crate::keeper::{Keeper, StateIter};
use crate::types::{CodeId, CodeInfo, ContractInfo, Model};

/// Deterministic bech32 address derived from a seed string.
pub fn test_address(seed: &str) -> Addr {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    let hash = hasher.finalize();
    Addr::from_payload(DEFAULT_BECH32_PREFIX, &hash[..20]).expect("valid test prefix")
}

/// Content hash matching what a real keeper would record on store-code.
pub fn code_hash(bytecode: &[u8]) -> Vec<u8> {
    Sha256::digest(bytecode).to_vec()
}

/// In-memory keeper.
///
/// Contracts keep insertion order so tests can observe that list handlers
/// do not re-sort; per-contract storage uses a btree so iteration follows
/// raw key byte order like a real store.
#[derive(Default)]
pub struct MockKeeper {
    contracts: Vec<(Addr, ContractInfo)>,
    states: BTreeMap<String, BTreeMap<Vec<u8>, Vec<u8>>>,
    codes: BTreeMap<CodeId, (CodeInfo, Vec<u8>)>,
    smart_responses: BTreeMap<String, Vec<u8>>,
}

impl MockKeeper {
    pub fn add_contract(&mut self, addr: Addr, info: ContractInfo) {
        self.contracts.push((addr, info));
    }

    pub fn set_state_entry(&mut self, addr: &Addr, key: Vec<u8>, value: Vec<u8>) {
        self.states
            .entry(addr.to_string())
            .or_default()
            .insert(key, value);
    }

    pub fn add_code(&mut self, id: CodeId, info: CodeInfo, bytecode: Vec<u8>) {
        self.codes.insert(id, (info, bytecode));
    }

    pub fn set_smart_response(&mut self, addr: &Addr, response: Vec<u8>) {
        self.smart_responses.insert(addr.to_string(), response);
    }
}

impl Keeper for MockKeeper {
    fn get_contract_info(&self, addr: &Addr) -> Option<ContractInfo> {
        self.contracts
            .iter()
            .find(|(a, _)| a == addr)
            .map(|(_, info)| info.clone())
    }

    fn list_contract_info(&self, visit: &mut dyn FnMut(&Addr, &ContractInfo) -> bool) {
        for (addr, info) in &self.contracts {
            if visit(addr, info) {
                break;
            }
        }
    }

    fn contract_state<'a>(&'a self, addr: &Addr) -> StateIter<'a> {
        match self.states.get(addr.as_str()) {
            Some(entries) => Box::new(entries.iter().map(|(k, v)| (k.clone(), v.clone()))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn query_raw(&self, addr: &Addr, key: &[u8]) -> Vec<Model> {
        self.states
            .get(addr.as_str())
            .and_then(|entries| entries.get(key))
            .map(|value| vec![Model::from_raw(key, value)])
            .unwrap_or_default()
    }

    fn query_smart(&self, addr: &Addr, _payload: &[u8]) -> Result<Vec<u8>, WasmError> {
        self.smart_responses
            .get(addr.as_str())
            .cloned()
            .ok_or_else(|| WasmError::Keeper(format!("contract not found: {addr}")))
    }

    fn get_byte_code(&self, code_id: CodeId) -> Result<Vec<u8>, WasmError> {
        self.codes
            .get(&code_id)
            .map(|(_, bytecode)| bytecode.clone())
            .ok_or_else(|| WasmError::Keeper(format!("code id not found: {code_id}")))
    }

    fn get_code_info(&self, code_id: CodeId) -> Option<CodeInfo> {
        self.codes.get(&code_id).map(|(info, _)| info.clone())
    }
}
