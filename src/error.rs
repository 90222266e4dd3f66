//! Error types for the Sui submitters
//!
//! Failures fall into three kinds that callers can branch on:
//! - [`KeyLoadError`]: the signing key could not be loaded (fatal, before any network call)
//! - [`BuildError`]: the transaction could not be constructed or encoded (fatal)
//! - [`SubmissionError`]: anything that went wrong talking to the fullnode (reported, not rethrown)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Key load error: {0}")]
    KeyLoad(#[from] KeyLoadError),

    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to turn a key file into a signing keypair
#[derive(Error, Debug)]
pub enum KeyLoadError {
    #[error("cannot read key file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized key file format: {0}")]
    Format(String),

    #[error("invalid hex private key: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("secret key must be {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("public key in key file does not match the secret key")]
    PublicKeyMismatch,
}

/// Failure to construct or encode a transaction
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid Move identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("identifier to enroll must not be empty")]
    EmptyIdentifier,

    #[error("too many inputs in one transaction")]
    TooManyInputs,

    #[error("too many commands in one transaction")]
    TooManyCommands,

    #[error("BCS encoding failed: {0}")]
    Bcs(#[from] bcs::Error),
}

/// Failure anywhere between the first RPC call and the execution result
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("object {0} not found")]
    ObjectNotFound(String),

    #[error("no SUI coins owned by {0} to pay for gas")]
    NoGasCoins(String),

    #[error("dry run failed, could not determine a gas budget: {0}")]
    DryRun(String),

    #[error("transaction {digest} failed on chain: {error}")]
    ExecutionFailed { digest: String, error: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("cannot encode transaction: {0}")]
    Encoding(#[from] bcs::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
