//! Key management and signing
//!
//! This module handles private key loading and transaction signing.
//! The private key NEVER leaves this module.

mod keyfile;
mod signer;
mod simulator;

pub use keyfile::{load_keypair, parse_keypair, SECRET_KEY_LENGTH};
pub use signer::{
    address_from_public_key, SignedTransaction, SuiKeypair, TransactionSigner, UserSignature,
    ED25519_FLAG,
};
pub use simulator::{budget_from_gas_used, TransactionSimulator, GAS_SAFE_OVERHEAD};
