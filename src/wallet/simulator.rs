//! Transaction simulation before signing
//!
//! Dry-runs a transaction to size its gas budget:
//! - the probe carries no gas payment, so the fullnode uses a mock coin
//! - the probe budget is the configured maximum
//! - the budget is what the dry run charged plus a safety margin
//!
//! SECURITY NOTE: read-only. Nothing here signs or submits.

use crate::client::{ChainReader, GasCostSummary};
use crate::error::SubmissionError;
use crate::types::{ProgrammableTransaction, SuiAddress, TransactionData};

/// Extra computation units added on top of the dry-run cost
pub const GAS_SAFE_OVERHEAD: u64 = 1_000;

/// Budget for `used`: computation plus overhead, plus net storage when positive
pub fn budget_from_gas_used(used: &GasCostSummary, gas_price: u64) -> u64 {
    let overhead = GAS_SAFE_OVERHEAD.saturating_mul(gas_price);
    let base = used.computation_cost.saturating_add(overhead);
    let with_storage = base
        .saturating_add(used.storage_cost)
        .saturating_sub(used.storage_rebate);
    base.max(with_storage)
}

/// Gas budget estimator backed by `sui_dryRunTransactionBlock`
pub struct TransactionSimulator<'a, C: ?Sized> {
    client: &'a C,
}

impl<'a, C: ChainReader + ?Sized> TransactionSimulator<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Dry-run `pt` for `sender` and derive a gas budget from its cost
    pub async fn estimate_budget(
        &self,
        sender: SuiAddress,
        pt: &ProgrammableTransaction,
        gas_price: u64,
        max_budget: u64,
    ) -> Result<u64, SubmissionError> {
        let probe =
            TransactionData::new_programmable(sender, Vec::new(), pt.clone(), max_budget, gas_price);
        let effects = self.client.dry_run(&probe.to_bytes()?).await?;

        if let Some(error) = effects.status.failure() {
            return Err(SubmissionError::DryRun(error));
        }

        let budget = budget_from_gas_used(&effects.gas_used, gas_price);
        tracing::debug!(
            computation = effects.gas_used.computation_cost,
            storage = effects.gas_used.storage_cost,
            rebate = effects.gas_used.storage_rebate,
            budget,
            "Estimated gas budget"
        );
        Ok(budget)
    }
}
