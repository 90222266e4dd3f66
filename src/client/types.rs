//! JSON-RPC response types
//!
//! The fullnode encodes most u64 values as decimal strings ("BigInt") but a
//! few (e.g. `initial_shared_version`) as plain numbers, so every numeric
//! field goes through [`u64_from_str_or_num`].

use crate::error::SubmissionError;
use crate::types::{ObjectDigest, ObjectId, ObjectRef, TransactionDigest};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn u64_from_str_or_num<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn invalid<E: std::fmt::Display>(what: &str) -> impl FnOnce(E) -> SubmissionError + '_ {
    move |e| SubmissionError::InvalidResponse(format!("{}: {}", what, e))
}

/// JSON-RPC 2.0 envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

impl<T> JsonRpcResponse<T> {
    pub fn into_result(self) -> Result<T, SubmissionError> {
        if let Some(error) = self.error {
            return Err(SubmissionError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| SubmissionError::InvalidResponse("missing result".to_string()))
    }
}

/// Object ownership as reported by `sui_getObject`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum Owner {
    AddressOwner(String),
    ObjectOwner(String),
    Shared {
        #[serde(deserialize_with = "u64_from_str_or_num")]
        initial_shared_version: u64,
    },
    Immutable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuiObjectResponse {
    pub data: Option<SuiObjectData>,
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectData {
    pub object_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: String,
    pub owner: Option<Owner>,
}

/// An object's current reference and ownership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    pub object_ref: ObjectRef,
    pub owner: Owner,
}

impl SuiObjectResponse {
    pub fn into_object_info(self, requested: ObjectId) -> Result<ObjectInfo, SubmissionError> {
        let data = match self.data {
            Some(data) => data,
            None => {
                tracing::debug!(object_id = %requested, error = ?self.error, "Object lookup failed");
                return Err(SubmissionError::ObjectNotFound(requested.to_string()));
            }
        };
        let owner = data.owner.clone().ok_or_else(|| {
            SubmissionError::InvalidResponse(format!("object {} has no owner field", requested))
        })?;
        Ok(ObjectInfo {
            object_ref: data.object_ref()?,
            owner,
        })
    }
}

impl SuiObjectData {
    pub fn object_ref(&self) -> Result<ObjectRef, SubmissionError> {
        Ok(ObjectRef {
            object_id: self.object_id.parse().map_err(invalid("objectId"))?,
            version: self.version,
            digest: self.digest.parse().map_err(invalid("digest"))?,
        })
    }
}

/// One page of `suix_getCoins`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<RpcCoin>,
    pub next_cursor: Option<String>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcCoin {
    pub coin_type: String,
    pub coin_object_id: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub balance: u64,
}

impl RpcCoin {
    pub fn object_id(&self) -> Result<ObjectId, SubmissionError> {
        self.coin_object_id
            .parse()
            .map_err(invalid("coinObjectId"))
    }

    pub fn object_ref(&self) -> Result<ObjectRef, SubmissionError> {
        let digest: ObjectDigest = self.digest.parse().map_err(invalid("digest"))?;
        Ok(ObjectRef {
            object_id: self.object_id()?,
            version: self.version,
            digest,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecutionStatus {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The failure message, if the transaction did not succeed
    pub fn failure(&self) -> Option<String> {
        if self.is_success() {
            None
        } else {
            Some(
                self.error
                    .clone()
                    .unwrap_or_else(|| format!("status {}", self.status)),
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub computation_cost: u64,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_cost: u64,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub storage_rebate: u64,
    #[serde(default, deserialize_with = "u64_from_str_or_num")]
    pub non_refundable_storage_fee: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    pub status: ExecutionStatus,
    pub gas_used: GasCostSummary,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DryRunResponse {
    pub effects: TransactionEffects,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    pub digest: String,
    pub effects: Option<TransactionEffects>,
}

impl ExecuteResponse {
    /// The digest, unless the effects report an on-chain failure
    pub fn into_digest(self) -> Result<TransactionDigest, SubmissionError> {
        if let Some(error) = self.effects.as_ref().and_then(|e| e.status.failure()) {
            return Err(SubmissionError::ExecutionFailed {
                digest: self.digest,
                error,
            });
        }
        Ok(TransactionDigest::new(self.digest))
    }
}

/// `sui_getNormalizedMoveFunction`, reduced to what input resolution needs
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizedMoveFunction {
    pub parameters: Vec<Value>,
}

/// True when a normalized parameter type is `&T` (not `&mut T` or by value)
pub fn is_immutable_reference(parameter: &Value) -> bool {
    parameter.get("Reference").is_some()
}
