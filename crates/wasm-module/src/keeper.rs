// State access consumed by the query dispatcher and handlers.
//
// The keeper owns contract metadata, stored code, and per-contract storage
// partitions. This module only reads through it; the trait is injected
// wherever queries run so callers decide which keeper backs them.

use crate::address::Addr;
use crate::error::WasmError;
use crate::types::{CodeId, CodeInfo, ContractInfo, Model};

/// Scoped iterator over one contract's raw storage partition.
///
/// Yields `(key, value)` byte pairs in the store's native key order
/// (lexicographic over raw key bytes). The iterator borrows the keeper and
/// is released when dropped, on every exit path.
pub type StateIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// Capability interface over the contract state store.
pub trait Keeper {
    /// Metadata for one contract, or `None` if the address is unknown.
    fn get_contract_info(&self, addr: &Addr) -> Option<ContractInfo>;

    /// Visit every stored contract in the keeper's native order.
    /// Returning `true` from the visitor stops the iteration early.
    fn list_contract_info(&self, visit: &mut dyn FnMut(&Addr, &ContractInfo) -> bool);

    /// Open an iterator over the raw storage partition of one contract.
    fn contract_state<'a>(&'a self, addr: &Addr) -> StateIter<'a>;

    /// Look up a single raw key; yields zero or one models.
    fn query_raw(&self, addr: &Addr, key: &[u8]) -> Vec<Model>;

    /// Delegate a query to the contract's own logic in the virtual machine.
    /// The payload and the response bytes are both opaque to this module.
    fn query_smart(&self, addr: &Addr, payload: &[u8]) -> Result<Vec<u8>, WasmError>;

    /// Raw stored bytecode for a code id.
    fn get_byte_code(&self, code_id: CodeId) -> Result<Vec<u8>, WasmError>;

    /// Metadata for a code id, or `None` if the id is unassigned.
    fn get_code_info(&self, code_id: CodeId) -> Option<CodeInfo>;
}
