//! Fullnode access
//!
//! Request building never talks to the network. Everything that does goes
//! through two traits so tests can stand in for the fullnode:
//! - [`ChainReader`]: the reads needed to turn a request into transaction data
//! - [`Submitter`]: hands a signed transaction to the network

mod rpc;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

use crate::error::SubmissionError;
use crate::types::{ObjectId, SuiAddress, TransactionDigest};
use crate::wallet::SignedTransaction;
use async_trait::async_trait;
use serde_json::Value;

pub use rpc::JsonRpcClient;
pub use types::{
    CoinPage, ExecutionStatus, GasCostSummary, ObjectInfo, Owner, RpcCoin, TransactionEffects,
};

#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Current reference and owner of an object
    async fn get_object(&self, id: ObjectId) -> Result<ObjectInfo, SubmissionError>;

    /// One page of coins of `coin_type` owned by `owner`
    async fn get_coins(
        &self,
        owner: SuiAddress,
        coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, SubmissionError>;

    async fn reference_gas_price(&self) -> Result<u64, SubmissionError>;

    /// Normalized parameter types of a Move function
    async fn move_function_parameters(
        &self,
        package: ObjectId,
        module: &str,
        function: &str,
    ) -> Result<Vec<Value>, SubmissionError>;

    /// Execute without committing; `tx_bytes` is BCS `TransactionData`
    async fn dry_run(&self, tx_bytes: &[u8]) -> Result<TransactionEffects, SubmissionError>;
}

#[async_trait]
pub trait Submitter: Send + Sync {
    /// Execute a signed transaction and wait for its effects
    async fn submit(&self, tx: &SignedTransaction) -> Result<TransactionDigest, SubmissionError>;
}
