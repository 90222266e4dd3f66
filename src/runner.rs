//! Submission runner
//!
//! One run is: load key -> build request -> resolve -> sign -> submit -> report.
//! Key and build failures are fatal and returned as errors before anything
//! is sent. Everything from resolution onward is caught and reported as a
//! single console line, so a failed submission still ends the run cleanly.

use crate::builder::{build_enroll_request, build_sweep_request, TransactionRequest};
use crate::client::{ChainReader, Submitter};
use crate::config::{EnrollParams, ExplorerLink, GasSettings, TransferParams};
use crate::error::SubmissionError;
use crate::resolver::Resolver;
use crate::types::TransactionDigest;
use crate::wallet::{load_keypair, SignedTransaction, TransactionSigner};
use crate::{Error, Result};
use std::io::Write;
use tracing::{info, warn};

/// How a submission ended
#[derive(Debug)]
pub enum Outcome {
    Submitted(TransactionDigest),
    Failed(SubmissionError),
}

impl Outcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Outcome::Submitted(_))
    }
}

/// Write the one-line result of a run
pub fn report<W: Write>(out: &mut W, outcome: &Outcome, explorer: &ExplorerLink) -> Result<()> {
    match outcome {
        Outcome::Submitted(digest) => writeln!(
            out,
            "Success! Check out your TX here: {}",
            explorer.transaction_url(digest)
        )?,
        Outcome::Failed(error) => writeln!(out, "Oops, something went wrong: {}", error)?,
    }
    Ok(())
}

/// Drives enroll and transfer runs against one backend
pub struct SubmissionRunner<'a, B: ?Sized> {
    backend: &'a B,
    gas: GasSettings,
    explorer: ExplorerLink,
}

impl<'a, B: ChainReader + Submitter + ?Sized> SubmissionRunner<'a, B> {
    pub fn new(backend: &'a B, explorer: ExplorerLink) -> Self {
        Self {
            backend,
            gas: GasSettings::default(),
            explorer,
        }
    }

    pub fn with_gas(mut self, gas: GasSettings) -> Self {
        self.gas = gas;
        self
    }

    /// Call `enroll(cohort, github)` signed with the enrollment key
    pub async fn run_enroll<W: Write>(&self, params: &EnrollParams, out: &mut W) -> Result<Outcome> {
        let keypair = load_keypair(&params.key_file)?;
        info!(address = %keypair.address(), "Loaded enrollment key");

        let request = build_enroll_request(params)?;
        self.run(&keypair, &request, out).await
    }

    /// Send the whole gas coin of the key's address to the recipient
    pub async fn run_transfer<W: Write>(
        &self,
        params: &TransferParams,
        out: &mut W,
    ) -> Result<Outcome> {
        let keypair = load_keypair(&params.key_file)?;
        info!(address = %keypair.address(), "Loaded transfer key");

        let request = build_sweep_request(params)?;
        self.run(&keypair, &request, out).await
    }

    async fn run<W: Write>(
        &self,
        signer: &dyn TransactionSigner,
        request: &TransactionRequest,
        out: &mut W,
    ) -> Result<Outcome> {
        let outcome = match self.submit(signer, request).await {
            Ok(digest) => {
                info!(%digest, "Transaction submitted");
                Outcome::Submitted(digest)
            }
            Err(Error::Submission(error)) => {
                warn!(%error, "Submission failed");
                Outcome::Failed(error)
            }
            Err(other) => return Err(other),
        };
        report(out, &outcome, &self.explorer)?;
        Ok(outcome)
    }

    /// Resolve, sign and submit `request` as `signer`
    pub async fn submit(
        &self,
        signer: &dyn TransactionSigner,
        request: &TransactionRequest,
    ) -> Result<TransactionDigest> {
        let data = Resolver::new(self.backend, &self.gas)
            .resolve(signer.address(), request)
            .await?;
        let signed = SignedTransaction::new(data, signer)?;
        let digest = signed.digest()?;
        tracing::debug!(%digest, "Signed transaction");

        Ok(self.backend.submit(&signed).await?)
    }
}
