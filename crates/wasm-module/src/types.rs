// Core data model for the wasm module: contract and code metadata, raw
// storage entries, coins, and the query response envelopes.

use serde::{Deserialize, Serialize};

use crate::address::Addr;

/// CodeId uniquely identifies stored contract bytecode. Assigned
/// sequentially starting at 1.
pub type CodeId = u64;

/// Metadata for one instantiated contract.
///
/// Created by the keeper at instantiation and never mutated through this
/// module.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ContractInfo {
    pub code_id: CodeId,
    pub creator: Addr,
    pub admin: Option<Addr>,
    pub label: String,
    /// Block height the contract was created at.
    pub created: u64,
}

/// Metadata recorded when code is stored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CodeInfo {
    pub creator: Addr,
    /// Content hash of the stored bytecode.
    #[serde(with = "serde_hex")]
    pub code_hash: Vec<u8>,
    pub source: String,
    pub builder: String,
}

/// One raw key/value entry of a contract's storage partition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Model {
    pub key: String,
    pub value: String,
}

impl Model {
    /// Build a model from raw store bytes, as served by the `all` and `raw`
    /// state queries.
    pub fn from_raw(key: &[u8], value: &[u8]) -> Self {
        Model {
            key: String::from_utf8_lossy(key).into_owned(),
            value: String::from_utf8_lossy(value).into_owned(),
        }
    }
}

/// A token amount in one denomination. Amounts serialize as decimal strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "string_amount")]
    pub amount: i128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: i128) -> Self {
        Coin {
            denom: denom.into(),
            amount,
        }
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }
}

/// Funds attached to an instantiate or execute message.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Coins(pub Vec<Coin>);

impl Coins {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_any_negative(&self) -> bool {
        self.0.iter().any(Coin::is_negative)
    }

    /// The first negative coin, if any. Used to name the offender in
    /// validation failures.
    pub fn first_negative(&self) -> Option<&Coin> {
        self.0.iter().find(|c| c.is_negative())
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Coins(coins)
    }
}

/// Response envelope for a `code/<id>` query.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GetCodeResponse {
    #[serde(with = "serde_base64")]
    pub code: Vec<u8>,
}

/// One entry of a `list-code` response.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListCodeResponse {
    pub id: CodeId,
    pub creator: Addr,
    #[serde(with = "serde_hex")]
    pub code_hash: Vec<u8>,
}

/// Byte fields that travel as base64 strings in JSON.
pub(crate) mod serde_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// Hash fields that travel as hex strings in JSON.
pub(crate) mod serde_hex {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}

/// Coin amounts travel as decimal strings, signed.
mod string_amount {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<i128>().map_err(serde::de::Error::custom)
    }
}
