// Bech32 account addresses as used across queries and messages.

use std::fmt;

use bech32::{FromBase32, ToBase32, Variant};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::WasmError;

/// Default bech32 prefix for account addresses.
pub const DEFAULT_BECH32_PREFIX: &str = "cosmos";

/// A validated bech32 account address.
///
/// Holds both the textual form and the decoded payload; construction is the
/// only place validation happens, so every `Addr` in the system is known
/// good.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Addr {
    bech: String,
    payload: Vec<u8>,
}

impl Addr {
    /// Decode and validate a bech32 address string.
    pub fn from_bech32(s: &str) -> Result<Self, WasmError> {
        let (_hrp, data, variant) =
            bech32::decode(s).map_err(|e| WasmError::InvalidAddress(format!("{s}: {e}")))?;
        if variant != Variant::Bech32 {
            return Err(WasmError::InvalidAddress(format!("{s}: wrong bech32 variant")));
        }
        let payload = Vec::<u8>::from_base32(&data)
            .map_err(|e| WasmError::InvalidAddress(format!("{s}: {e}")))?;
        if payload.is_empty() {
            return Err(WasmError::InvalidAddress(format!("{s}: empty payload")));
        }
        Ok(Addr {
            bech: s.to_string(),
            payload,
        })
    }

    /// Encode raw payload bytes under the given prefix.
    pub fn from_payload(hrp: &str, payload: &[u8]) -> Result<Self, WasmError> {
        let bech = bech32::encode(hrp, payload.to_base32(), Variant::Bech32)
            .map_err(|e| WasmError::InvalidAddress(format!("{hrp}: {e}")))?;
        Ok(Addr {
            bech,
            payload: payload.to_vec(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.bech
    }

    /// Raw payload bytes of the address.
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bech)
    }
}

impl Serialize for Addr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.bech)
    }
}

impl<'de> Deserialize<'de> for Addr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Addr::from_bech32(&s).map_err(serde::de::Error::custom)
    }
}
