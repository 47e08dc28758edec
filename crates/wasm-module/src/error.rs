// Error taxonomy for the wasm module and its translation to the
// three-part wire form returned to query clients.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Error domain reported on the wire for every failure in this module.
pub const CODESPACE: &str = "wasm";

/// Log text substituted for the real failure message when debug output
/// is disabled.
const REDACTED_LOG: &str = "internal error";

/// Errors surfaced by query handling and message validation.
#[derive(Error, Debug)]
pub enum WasmError {
    #[error("unknown data query endpoint: {0}")]
    UnknownQueryKind(String),

    #[error("unknown contract state query method: {0}")]
    UnknownSubmode(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid code id: {0}")]
    InvalidCodeId(String),

    #[error("json encoding failed: {0}")]
    JsonEncoding(#[from] serde_json::Error),

    #[error("empty wasm code")]
    EmptyCode,

    #[error("wasm code too large: {0} bytes")]
    CodeTooLarge(usize),

    #[error("source should be a valid absolute url: {0}")]
    InvalidSourceUri(String),

    #[error("source url is not reachable: {0}")]
    SourceUnreachable(String),

    #[error("invalid tag supplied for builder: {0}")]
    InvalidBuilderTag(String),

    #[error("negative funds: {0}")]
    NegativeFunds(String),

    /// Failure reported by the external keeper, passed through unchanged.
    #[error("keeper error: {0}")]
    Keeper(String),
}

impl WasmError {
    /// Error domain identifier carried in the wire error.
    pub fn codespace(&self) -> &'static str {
        CODESPACE
    }

    /// Stable numeric code per failure class. Codes are part of the wire
    /// contract and must not be renumbered.
    pub fn code(&self) -> u32 {
        match self {
            WasmError::UnknownQueryKind(_) => 1,
            WasmError::UnknownSubmode(_) => 2,
            WasmError::InvalidAddress(_) => 3,
            WasmError::InvalidCodeId(_) => 4,
            WasmError::JsonEncoding(_) => 5,
            WasmError::EmptyCode => 6,
            WasmError::CodeTooLarge(_) => 7,
            WasmError::InvalidSourceUri(_) => 8,
            WasmError::SourceUnreachable(_) => 9,
            WasmError::InvalidBuilderTag(_) => 10,
            WasmError::NegativeFunds(_) => 11,
            WasmError::Keeper(_) => 12,
        }
    }
}

/// Three-part error as returned to wire clients.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{codespace} ({code}): {log}")]
pub struct WireError {
    pub codespace: String,
    pub code: u32,
    pub log: String,
}

impl WireError {
    /// Translate an internal error to its wire form. The log keeps the full
    /// failure message only when `debug` is set; otherwise it is redacted to
    /// a generic string. Codespace and code always identify the failure
    /// class.
    pub fn from_error(err: &WasmError, debug: bool) -> Self {
        let log = if debug {
            err.to_string()
        } else {
            debug!(code = err.code(), "redacting query error: {err}");
            REDACTED_LOG.to_string()
        };
        WireError {
            codespace: err.codespace().to_string(),
            code: err.code(),
            log,
        }
    }
}
