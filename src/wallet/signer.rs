//! Ed25519 keypair and transaction signing
//!
//! SECURITY: the signing key lives only inside [`SuiKeypair`].
//! - It is never serialized and never logged
//! - `Debug` redacts it
//! - Callers only see the address and finished signatures

use crate::error::BuildError;
use crate::types::transaction::Blake2b256;
use crate::types::{Intent, SuiAddress, TransactionData, TransactionDigest};
use base64::{engine::general_purpose, Engine as _};
use blake2::Digest;
use ed25519_dalek::{Signer, SigningKey};
use secrecy::{ExposeSecret, SecretBox};

/// Signature scheme flag for Ed25519
pub const ED25519_FLAG: u8 = 0x00;

const SIGNATURE_LENGTH: usize = 1 + 64 + 32;

/// `flag || signature || public key`, the form the fullnode expects
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UserSignature([u8; SIGNATURE_LENGTH]);

impl UserSignature {
    pub fn from_parts(flag: u8, signature: &[u8; 64], public_key: &[u8; 32]) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[0] = flag;
        bytes[1..65].copy_from_slice(signature);
        bytes[65..].copy_from_slice(public_key);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn flag(&self) -> u8 {
        self.0[0]
    }

    pub fn signature_bytes(&self) -> &[u8] {
        &self.0[1..65]
    }

    pub fn public_key_bytes(&self) -> &[u8] {
        &self.0[65..]
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(self.0)
    }
}

impl std::fmt::Debug for UserSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("UserSignature")
            .field(&self.to_base64())
            .finish()
    }
}

/// Anything that can sign Sui intent messages
///
/// Request building never touches this; only the runner hands a finished
/// transaction to it.
pub trait TransactionSigner: Send + Sync {
    /// Address the signatures are attributable to
    fn address(&self) -> SuiAddress;

    /// Sign an intent message (`intent || bcs(data)`)
    fn sign(&self, message: &[u8]) -> UserSignature;
}

/// Ed25519 keypair for a Sui account
pub struct SuiKeypair {
    signing_key: SigningKey,
    address: SuiAddress,
}

impl SuiKeypair {
    /// Build a keypair from a 32-byte Ed25519 seed
    pub fn from_seed(seed: &SecretBox<[u8; 32]>) -> Self {
        let signing_key = SigningKey::from_bytes(seed.expose_secret());
        let address = address_from_public_key(signing_key.verifying_key().as_bytes());
        Self {
            signing_key,
            address,
        }
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }
}

impl TransactionSigner for SuiKeypair {
    fn address(&self) -> SuiAddress {
        self.address
    }

    fn sign(&self, message: &[u8]) -> UserSignature {
        let digest = Blake2b256::digest(message);
        let signature = self.signing_key.sign(digest.as_slice());
        UserSignature::from_parts(
            ED25519_FLAG,
            &signature.to_bytes(),
            &self.public_key_bytes(),
        )
    }
}

// Implement Debug manually to avoid exposing the signing key
impl std::fmt::Debug for SuiKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiKeypair")
            .field("address", &self.address)
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}

/// `blake2b256(flag || public key)`
pub fn address_from_public_key(public_key: &[u8; 32]) -> SuiAddress {
    let mut hasher = Blake2b256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(public_key);
    SuiAddress::new(hasher.finalize().into())
}

/// Transaction data plus the signatures authorizing it
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    data: TransactionData,
    tx_bytes: Vec<u8>,
    signatures: Vec<UserSignature>,
}

impl SignedTransaction {
    /// Encode `data` and sign it under the Sui transaction intent
    pub fn new(data: TransactionData, signer: &dyn TransactionSigner) -> Result<Self, BuildError> {
        let tx_bytes = data.to_bytes()?;
        let message = Intent::SUI_TRANSACTION.message(&data)?;
        let signature = signer.sign(&message);
        Ok(Self {
            data,
            tx_bytes,
            signatures: vec![signature],
        })
    }

    pub fn data(&self) -> &TransactionData {
        &self.data
    }

    pub fn tx_bytes(&self) -> &[u8] {
        &self.tx_bytes
    }

    pub fn signatures(&self) -> &[UserSignature] {
        &self.signatures
    }

    pub fn tx_bytes_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.tx_bytes)
    }

    pub fn signatures_base64(&self) -> Vec<String> {
        self.signatures.iter().map(UserSignature::to_base64).collect()
    }

    /// Digest computed locally; matches what the fullnode reports
    pub fn digest(&self) -> Result<TransactionDigest, BuildError> {
        Ok(self.data.digest()?)
    }
}
