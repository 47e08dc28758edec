// The three state-changing wasm module messages and their validation
// rules, following the Cosmos SDK message contract: every message knows its
// route, its type identifier, how to validate itself, its canonical sign
// bytes, and its signers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::address::Addr;
use crate::error::WasmError;
use crate::types::{serde_base64, CodeId, Coins};

/// Module router key shared by all wasm messages.
pub const ROUTER_KEY: &str = "wasm";

/// Maximum accepted bytecode size in bytes, raw or gzip compressed.
pub const MAX_WASM_SIZE: usize = 500 * 1024;

/// Required prefix for the optional builder tag.
pub const BUILD_TAG_PREFIX: &str = "cosmwasm-opt:";

/// Configuration for message validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Timeout applied to the store-code source reachability probe.
    pub probe_timeout: Duration,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// Blocking reachability probe for store-code source URIs.
///
/// The probe performs live network I/O and can observe different results on
/// different machines or at different times; it belongs in pre-submission
/// checks, not in replicated validation.
pub struct SourceProbe {
    client: reqwest::blocking::Client,
}

impl SourceProbe {
    pub fn new(config: &ValidationConfig) -> Result<Self, WasmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.probe_timeout)
            .build()
            .map_err(|e| WasmError::SourceUnreachable(format!("probe client: {e}")))?;
        Ok(SourceProbe { client })
    }

    /// GET the source and require a success status. Transport failures and
    /// timeouts surface as `SourceUnreachable`.
    pub fn check(&self, source: &Url) -> Result<(), WasmError> {
        debug!(%source, "probing store-code source");
        let resp = self
            .client
            .get(source.clone())
            .send()
            .map_err(|e| WasmError::SourceUnreachable(format!("{source}: {e}")))?;
        if !resp.status().is_success() {
            return Err(WasmError::SourceUnreachable(format!(
                "{source}: status {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

/// Dependencies handed to `Msg::validate_basic`. Passed explicitly so
/// validation stays free of ambient globals.
pub struct ValidationContext {
    probe: SourceProbe,
}

impl ValidationContext {
    pub fn new(config: &ValidationConfig) -> Result<Self, WasmError> {
        Ok(ValidationContext {
            probe: SourceProbe::new(config)?,
        })
    }

    pub fn probe(&self) -> &SourceProbe {
        &self.probe
    }
}

/// JSON codec producing canonical sign bytes.
///
/// Passed explicitly wherever sign bytes are produced; one shared instance
/// keeps the encoding deterministic across the process without global
/// state.
#[derive(Debug, Clone, Default)]
pub struct Codec;

impl Codec {
    /// Canonical JSON with object keys sorted at every nesting level.
    pub fn canonical_json<T: Serialize>(&self, msg: &T) -> Result<Vec<u8>, WasmError> {
        // serde_json value maps are key-ordered, so a value round trip sorts.
        let value = serde_json::to_value(msg)?;
        Ok(serde_json::to_vec(&value)?)
    }
}

/// Common contract implemented by every wasm module message.
///
/// A closed set: exactly the three message kinds below implement it.
pub trait Msg {
    /// Router key the message is dispatched under.
    fn route(&self) -> &'static str;

    /// Type identifier used in the transaction envelope.
    fn type_str(&self) -> &'static str;

    /// Stateless precondition check; must pass before the message enters
    /// the transaction pipeline. Never mutates state.
    fn validate_basic(&self, ctx: &ValidationContext) -> Result<(), WasmError>;

    /// Canonical bytes covered by the sender's signature. Signature
    /// verification itself happens outside this module.
    fn sign_bytes(&self, codec: &Codec) -> Result<Vec<u8>, WasmError>;

    /// Addresses that must sign the message.
    fn signers(&self) -> Vec<Addr>;
}

/// Uploads contract bytecode to the chain.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MsgStoreCode {
    pub sender: Addr,
    /// Raw or gzip compressed bytecode.
    #[serde(with = "serde_base64")]
    pub wasm_byte_code: Vec<u8>,
    /// URI reference to the contract's source code, optional.
    pub source: Option<String>,
    /// Docker build tag, optional.
    pub builder: Option<String>,
}

impl Msg for MsgStoreCode {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn type_str(&self) -> &'static str {
        "store-code"
    }

    fn validate_basic(&self, ctx: &ValidationContext) -> Result<(), WasmError> {
        if self.wasm_byte_code.is_empty() {
            return Err(WasmError::EmptyCode);
        }
        if self.wasm_byte_code.len() > MAX_WASM_SIZE {
            return Err(WasmError::CodeTooLarge(self.wasm_byte_code.len()));
        }
        if let Some(source) = self.source.as_deref().filter(|s| !s.is_empty()) {
            // url parsing only succeeds for absolute references, so the
            // probe is never attempted for a relative source
            let url = Url::parse(source)
                .map_err(|e| WasmError::InvalidSourceUri(format!("{source}: {e}")))?;
            ctx.probe().check(&url)?;
        }
        if let Some(builder) = self.builder.as_deref().filter(|b| !b.is_empty()) {
            if !builder.starts_with(BUILD_TAG_PREFIX) {
                return Err(WasmError::InvalidBuilderTag(builder.to_string()));
            }
        }
        Ok(())
    }

    fn sign_bytes(&self, codec: &Codec) -> Result<Vec<u8>, WasmError> {
        codec.canonical_json(self)
    }

    fn signers(&self) -> Vec<Addr> {
        vec![self.sender.clone()]
    }
}

/// Creates a new contract instance from stored code.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MsgInstantiateContract {
    pub sender: Addr,
    pub code_id: CodeId,
    /// Initialization payload, uninterpreted by this module.
    pub init_msg: Value,
    pub init_funds: Coins,
}

impl Msg for MsgInstantiateContract {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn type_str(&self) -> &'static str {
        "instantiate"
    }

    fn validate_basic(&self, _ctx: &ValidationContext) -> Result<(), WasmError> {
        if let Some(coin) = self.init_funds.first_negative() {
            return Err(WasmError::NegativeFunds(format!(
                "init_funds: {}{}",
                coin.amount, coin.denom
            )));
        }
        Ok(())
    }

    fn sign_bytes(&self, codec: &Codec) -> Result<Vec<u8>, WasmError> {
        codec.canonical_json(self)
    }

    fn signers(&self) -> Vec<Addr> {
        vec![self.sender.clone()]
    }
}

/// Calls into an instantiated contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MsgExecuteContract {
    pub sender: Addr,
    pub contract: Addr,
    /// Call payload, uninterpreted by this module.
    pub msg: Value,
    pub sent_funds: Coins,
}

impl Msg for MsgExecuteContract {
    fn route(&self) -> &'static str {
        ROUTER_KEY
    }

    fn type_str(&self) -> &'static str {
        "execute"
    }

    fn validate_basic(&self, _ctx: &ValidationContext) -> Result<(), WasmError> {
        if let Some(coin) = self.sent_funds.first_negative() {
            return Err(WasmError::NegativeFunds(format!(
                "sent_funds: {}{}",
                coin.amount, coin.denom
            )));
        }
        Ok(())
    }

    fn sign_bytes(&self, codec: &Codec) -> Result<Vec<u8>, WasmError> {
        codec.canonical_json(self)
    }

    fn signers(&self) -> Vec<Addr> {
        vec![self.sender.clone()]
    }
}
