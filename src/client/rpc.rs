//! Sui JSON-RPC client over reqwest

use super::types::{
    u64_from_str_or_num, CoinPage, DryRunResponse, ExecuteResponse, JsonRpcResponse,
    NormalizedMoveFunction, ObjectInfo, SuiObjectResponse, TransactionEffects,
};
use super::{ChainReader, Submitter};
use crate::config::RpcConfig;
use crate::error::SubmissionError;
use crate::types::{ObjectId, SuiAddress, TransactionDigest};
use crate::wallet::SignedTransaction;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

/// Client for a single fullnode endpoint
///
/// No request timeout is set; a call waits as long as the transport does.
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_rpc_config(config: &RpcConfig) -> Self {
        Self::new(config.url().clone())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn request_body(&self, method: &str, params: Value) -> Value {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, SubmissionError> {
        let body = self.request_body(method, params);
        tracing::debug!(method, id = %body["id"], "JSON-RPC request");

        let response: JsonRpcResponse<T> = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_result()
    }
}

#[async_trait]
impl ChainReader for JsonRpcClient {
    async fn get_object(&self, id: ObjectId) -> Result<ObjectInfo, SubmissionError> {
        let response: SuiObjectResponse = self
            .call(
                "sui_getObject",
                json!([id.to_hex(), { "showOwner": true }]),
            )
            .await?;
        response.into_object_info(id)
    }

    async fn get_coins(
        &self,
        owner: SuiAddress,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, SubmissionError> {
        self.call(
            "suix_getCoins",
            json!([owner.to_hex(), coin_type, cursor, Value::Null]),
        )
        .await
    }

    async fn reference_gas_price(&self) -> Result<u64, SubmissionError> {
        let value: Value = self
            .call("suix_getReferenceGasPrice", json!([]))
            .await?;
        u64_from_str_or_num(value)
            .map_err(|e| SubmissionError::InvalidResponse(format!("gas price: {}", e)))
    }

    async fn move_function_parameters(
        &self,
        package: ObjectId,
        module: &str,
        function: &str,
    ) -> Result<Vec<Value>, SubmissionError> {
        let normalized: NormalizedMoveFunction = self
            .call(
                "sui_getNormalizedMoveFunction",
                json!([package.to_hex(), module, function]),
            )
            .await?;
        Ok(normalized.parameters)
    }

    async fn dry_run(&self, tx_bytes: &[u8]) -> Result<TransactionEffects, SubmissionError> {
        let response: DryRunResponse = self
            .call(
                "sui_dryRunTransactionBlock",
                json!([general_purpose::STANDARD.encode(tx_bytes)]),
            )
            .await?;
        Ok(response.effects)
    }
}

#[async_trait]
impl Submitter for JsonRpcClient {
    async fn submit(&self, tx: &SignedTransaction) -> Result<TransactionDigest, SubmissionError> {
        let response: ExecuteResponse = self
            .call(
                "sui_executeTransactionBlock",
                json!([
                    tx.tx_bytes_base64(),
                    tx.signatures_base64(),
                    { "showEffects": true },
                    "WaitForLocalExecution"
                ]),
            )
            .await?;
        tracing::debug!(digest = %response.digest, "Transaction executed");
        response.into_digest()
    }
}
