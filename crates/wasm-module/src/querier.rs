// Path-based query dispatcher over a keeper.
//
// Routes an ordered path plus an opaque payload to the matching handler,
// serializes structured results as indented JSON, and translates failures
// to the wire error form at the boundary.

use serde::Serialize;
use tracing::debug;

use crate::address::Addr;
use crate::error::{WasmError, WireError};
use crate::keeper::Keeper;
use crate::types::{CodeId, GetCodeResponse, ListCodeResponse, Model};

/// First path segment for each query kind.
pub const QUERY_LIST_CONTRACTS: &str = "list-contracts";
pub const QUERY_GET_CONTRACT: &str = "contract-info";
pub const QUERY_GET_CONTRACT_STATE: &str = "contract-state";
pub const QUERY_GET_CODE: &str = "code";
pub const QUERY_LIST_CODE: &str = "list-code";

/// Contract state submodes (third path segment).
pub const QUERY_METHOD_CONTRACT_STATE_ALL: &str = "all";
pub const QUERY_METHOD_CONTRACT_STATE_RAW: &str = "raw";
pub const QUERY_METHOD_CONTRACT_STATE_SMART: &str = "smart";

/// Stateless query router. Holds no state of its own; every answer is a
/// function of the path, the payload, and the injected keeper.
pub struct Querier<'a, K: Keeper> {
    keeper: &'a K,
    /// When set, wire errors carry the full failure message instead of the
    /// redacted generic log.
    debug: bool,
}

impl<'a, K: Keeper> Querier<'a, K> {
    pub fn new(keeper: &'a K) -> Self {
        Querier {
            keeper,
            debug: false,
        }
    }

    /// A querier whose wire errors keep full failure detail.
    pub fn with_debug(keeper: &'a K) -> Self {
        Querier {
            keeper,
            debug: true,
        }
    }

    /// Route a query and translate any failure to its wire form.
    pub fn query(&self, path: &[&str], data: &[u8]) -> Result<Vec<u8>, WireError> {
        self.dispatch(path, data)
            .map_err(|err| WireError::from_error(&err, self.debug))
    }

    /// Routing before wire translation; errors keep full detail here so
    /// tests and embedders can inspect them.
    pub fn dispatch(&self, path: &[&str], data: &[u8]) -> Result<Vec<u8>, WasmError> {
        let kind = path
            .first()
            .copied()
            .ok_or_else(|| WasmError::UnknownQueryKind("<empty>".to_string()))?;
        debug!(kind, segments = path.len(), "dispatching wasm query");
        match kind {
            QUERY_GET_CONTRACT => self.contract_info(segment(path, 1)?),
            QUERY_LIST_CONTRACTS => self.contract_list(),
            QUERY_GET_CONTRACT_STATE => {
                if path.len() < 3 {
                    return Err(WasmError::UnknownQueryKind(path.join("/")));
                }
                self.contract_state(path[1], path[2], data)
            }
            QUERY_GET_CODE => self.code(segment(path, 1)?),
            QUERY_LIST_CODE => self.code_list(),
            other => Err(WasmError::UnknownQueryKind(other.to_string())),
        }
    }

    fn contract_info(&self, bech: &str) -> Result<Vec<u8>, WasmError> {
        let addr = Addr::from_bech32(bech)?;
        let info = self.keeper.get_contract_info(&addr);
        // an unknown contract serializes the keeper's absence value: null
        to_indented_json(&info)
    }

    fn contract_list(&self) -> Result<Vec<u8>, WasmError> {
        let mut addrs: Vec<String> = Vec::new();
        self.keeper.list_contract_info(&mut |addr, _info| {
            addrs.push(addr.to_string());
            false
        });
        to_indented_json(&addrs)
    }

    fn contract_state(&self, bech: &str, method: &str, data: &[u8]) -> Result<Vec<u8>, WasmError> {
        let addr = Addr::from_bech32(bech)?;
        let models: Vec<Model> = match method {
            QUERY_METHOD_CONTRACT_STATE_ALL => self
                .keeper
                .contract_state(&addr)
                .map(|(key, value)| Model::from_raw(&key, &value))
                .collect(),
            QUERY_METHOD_CONTRACT_STATE_RAW => self.keeper.query_raw(&addr, data),
            QUERY_METHOD_CONTRACT_STATE_SMART => {
                // raw passthrough: the contract's own response bytes,
                // without the JSON wrapping of the other submodes
                return self.keeper.query_smart(&addr, data);
            }
            other => return Err(WasmError::UnknownSubmode(other.to_string())),
        };
        to_indented_json(&models)
    }

    fn code(&self, id_str: &str) -> Result<Vec<u8>, WasmError> {
        let code_id: CodeId = id_str
            .parse()
            .map_err(|e| WasmError::InvalidCodeId(format!("{id_str}: {e}")))?;
        let code = self.keeper.get_byte_code(code_id)?;
        to_indented_json(&GetCodeResponse { code })
    }

    fn code_list(&self) -> Result<Vec<u8>, WasmError> {
        let mut info: Vec<ListCodeResponse> = Vec::new();
        // ids are assigned sequentially from 1; the first unassigned id
        // ends the scan
        let mut id: CodeId = 1;
        while let Some(res) = self.keeper.get_code_info(id) {
            info.push(ListCodeResponse {
                id,
                creator: res.creator,
                code_hash: res.code_hash,
            });
            id += 1;
        }
        to_indented_json(&info)
    }
}

fn segment<'p>(path: &[&'p str], idx: usize) -> Result<&'p str, WasmError> {
    path.get(idx)
        .copied()
        .ok_or_else(|| WasmError::UnknownQueryKind(path.join("/")))
}

/// Indented JSON as served to wire clients.
fn to_indented_json<T: Serialize>(value: &T) -> Result<Vec<u8>, WasmError> {
    Ok(serde_json::to_vec_pretty(value)?)
}
