//! Sui enrollment and gas-sweep submitters
//!
//! Two one-shot transactions, each signed with an Ed25519 key file and
//! submitted to a Sui fullnode over JSON-RPC:
//! - `enroll`: calls `<package>::enrollment::enroll(cohort, github)`
//! - `transfer`: sends the sender's whole gas coin to a recipient
//!
//! # Pipeline
//!
//! key file -> [`builder`] request -> [`resolver`] (object versions, gas) ->
//! [`wallet`] signature -> [`client`] submission -> one console line.
//!
//! The private key never leaves the [`wallet`] module.

pub mod builder;
pub mod client;
pub mod config;
pub mod resolver;
pub mod runner;
pub mod types;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use client::{ChainReader, JsonRpcClient, Submitter};
pub use config::{Config, EnrollParams, GasSettings, Network, RpcConfig, TransferParams};
pub use error::{BuildError, Error, KeyLoadError, Result, SubmissionError};
pub use runner::{Outcome, SubmissionRunner};
