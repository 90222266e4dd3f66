//! In-memory fullnode for tests

use super::types::{CoinPage, ExecutionStatus, GasCostSummary, ObjectInfo, RpcCoin};
use super::{ChainReader, Submitter, TransactionEffects};
use crate::error::SubmissionError;
use crate::types::{ObjectDigest, ObjectId, ObjectRef, SuiAddress, TransactionDigest};
use crate::wallet::SignedTransaction;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub(crate) enum SubmitBehaviour {
    Succeed(String),
    Reject(String),
}

pub(crate) struct MockChain {
    pub objects: HashMap<ObjectId, ObjectInfo>,
    pub coins: Vec<RpcCoin>,
    pub coin_page_size: usize,
    pub gas_price: u64,
    pub parameters: Vec<Value>,
    pub dry_run_status: ExecutionStatus,
    pub gas_used: GasCostSummary,
    pub submit: SubmitBehaviour,
    pub reads: AtomicUsize,
    pub submissions: AtomicUsize,
    pub dry_runs: Mutex<Vec<Vec<u8>>>,
    pub submitted: Mutex<Vec<SignedTransaction>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            coins: Vec::new(),
            coin_page_size: 50,
            gas_price: 1_000,
            parameters: vec![
                json!({ "MutableReference": { "Struct": {} } }),
                json!({ "Vector": "U8" }),
            ],
            dry_run_status: ExecutionStatus {
                status: "success".to_string(),
                error: None,
            },
            gas_used: GasCostSummary {
                computation_cost: 1_000_000,
                storage_cost: 2_000_000,
                storage_rebate: 500_000,
                non_refundable_storage_fee: 0,
            },
            submit: SubmitBehaviour::Succeed("ABC123".to_string()),
            reads: AtomicUsize::new(0),
            submissions: AtomicUsize::new(0),
            dry_runs: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_object(mut self, info: ObjectInfo) -> Self {
        self.objects.insert(info.object_ref.object_id, info);
        self
    }

    pub fn with_coin(mut self, id_byte: u8, balance: u64) -> Self {
        self.coins.push(RpcCoin {
            coin_type: "0x2::sui::SUI".to_string(),
            coin_object_id: ObjectId::new([id_byte; 32]).to_hex(),
            version: 10 + id_byte as u64,
            digest: ObjectDigest::new([id_byte; 32]).to_string(),
            balance,
        });
        self
    }

    pub fn with_submit(mut self, submit: SubmitBehaviour) -> Self {
        self.submit = submit;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst) + self.submissions.load(Ordering::SeqCst)
    }

    fn read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

pub(crate) fn coin_ref(id_byte: u8) -> ObjectRef {
    ObjectRef {
        object_id: ObjectId::new([id_byte; 32]),
        version: 10 + id_byte as u64,
        digest: ObjectDigest::new([id_byte; 32]),
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn get_object(&self, id: ObjectId) -> Result<ObjectInfo, SubmissionError> {
        self.read();
        self.objects
            .get(&id)
            .cloned()
            .ok_or_else(|| SubmissionError::ObjectNotFound(id.to_string()))
    }

    async fn get_coins(
        &self,
        _owner: SuiAddress,
        _coin_type: &str,
        cursor: Option<String>,
    ) -> Result<CoinPage, SubmissionError> {
        self.read();
        let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let end = (start + self.coin_page_size).min(self.coins.len());
        let has_next_page = end < self.coins.len();
        Ok(CoinPage {
            data: self.coins[start..end].to_vec(),
            next_cursor: has_next_page.then(|| end.to_string()),
            has_next_page,
        })
    }

    async fn reference_gas_price(&self) -> Result<u64, SubmissionError> {
        self.read();
        Ok(self.gas_price)
    }

    async fn move_function_parameters(
        &self,
        _package: ObjectId,
        _module: &str,
        _function: &str,
    ) -> Result<Vec<Value>, SubmissionError> {
        self.read();
        Ok(self.parameters.clone())
    }

    async fn dry_run(&self, tx_bytes: &[u8]) -> Result<TransactionEffects, SubmissionError> {
        self.read();
        self.dry_runs.lock().unwrap().push(tx_bytes.to_vec());
        Ok(TransactionEffects {
            status: self.dry_run_status.clone(),
            gas_used: self.gas_used,
        })
    }
}

#[async_trait]
impl Submitter for MockChain {
    async fn submit(&self, tx: &SignedTransaction) -> Result<TransactionDigest, SubmissionError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(tx.clone());
        match &self.submit {
            SubmitBehaviour::Succeed(digest) => Ok(TransactionDigest::new(digest.clone())),
            SubmitBehaviour::Reject(message) => Err(SubmissionError::Rpc {
                code: -32002,
                message: message.clone(),
            }),
        }
    }
}
