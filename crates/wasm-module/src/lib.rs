//! Query routing and message validation for CosmWasm contract state.
//!
//! Sits between wire clients and the contract keeper: a path-based query
//! dispatcher answering read-only state queries, and the validation rules
//! each state-changing message must pass before it enters the transaction
//! pipeline. Contract execution, storage persistence, and consensus live
//! behind the [`Keeper`] interface and are not implemented here.

pub mod address;
pub mod error;
pub mod keeper;
pub mod msg;
pub mod querier;
pub mod test_utils;
pub mod types;

// Re-export the public surface
pub use address::{Addr, DEFAULT_BECH32_PREFIX};
pub use error::{WasmError, WireError, CODESPACE};
pub use keeper::{Keeper, StateIter};
pub use msg::{
    Codec, Msg, MsgExecuteContract, MsgInstantiateContract, MsgStoreCode, SourceProbe,
    ValidationConfig, ValidationContext, BUILD_TAG_PREFIX, MAX_WASM_SIZE, ROUTER_KEY,
};
pub use querier::Querier;
pub use types::{
    CodeId, CodeInfo, Coin, Coins, ContractInfo, GetCodeResponse, ListCodeResponse, Model,
};
