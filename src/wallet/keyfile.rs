//! Key file loading
//!
//! Two JSON layouts are in circulation for the same Ed25519 secret:
//!
//! ```json
//! [12, 200, 7, ...]                 // raw bytes
//! { "privateKey": "0x9c41..." }      // hex string
//! { "secretKey": [12, 200, ...] }    // raw bytes under a field
//! ```
//!
//! The secret is either the 32-byte seed or the 64-byte `seed || public key`
//! export; in the latter case the public half must match the seed.

use super::signer::{SuiKeypair, TransactionSigner};
use crate::error::KeyLoadError;
use ed25519_dalek::SigningKey;
use secrecy::{ExposeSecret, SecretBox, SecretString};
use serde::Deserialize;
use std::path::Path;

/// Ed25519 seed length
pub const SECRET_KEY_LENGTH: usize = 32;

#[derive(Deserialize)]
#[serde(untagged)]
enum KeyFile {
    Bytes(Vec<u8>),
    Hex {
        #[serde(rename = "privateKey")]
        private_key: String,
    },
    SecretKey {
        #[serde(rename = "secretKey")]
        secret_key: Vec<u8>,
    },
}

/// Read a key file and turn it into a signing keypair
pub fn load_keypair(path: &Path) -> Result<SuiKeypair, KeyLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| KeyLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let keypair = parse_keypair(&contents)?;
    tracing::debug!(path = %path.display(), address = %keypair.address(), "Loaded key file");
    Ok(keypair)
}

/// Parse key file contents
pub fn parse_keypair(contents: &str) -> Result<SuiKeypair, KeyLoadError> {
    let file: KeyFile =
        serde_json::from_str(contents).map_err(|e| KeyLoadError::Format(e.to_string()))?;

    let secret = match file {
        KeyFile::Bytes(bytes) | KeyFile::SecretKey { secret_key: bytes } => {
            SecretBox::new(Box::new(bytes))
        }
        KeyFile::Hex { private_key } => {
            let private_key = SecretString::from(private_key);
            let digits = private_key.expose_secret().trim();
            let digits = digits.strip_prefix("0x").unwrap_or(digits);
            SecretBox::new(Box::new(hex::decode(digits)?))
        }
    };

    let seed = seed_from_secret(&secret)?;
    Ok(SuiKeypair::from_seed(&seed))
}

fn seed_from_secret(secret: &SecretBox<Vec<u8>>) -> Result<SecretBox<[u8; 32]>, KeyLoadError> {
    let bytes = secret.expose_secret();
    match bytes.len() {
        SECRET_KEY_LENGTH => Ok(SecretBox::init_with_mut(|seed: &mut [u8; 32]| {
            seed.copy_from_slice(bytes)
        })),
        64 => {
            let seed = SecretBox::init_with_mut(|seed: &mut [u8; 32]| {
                seed.copy_from_slice(&bytes[..SECRET_KEY_LENGTH])
            });
            let derived = SigningKey::from_bytes(seed.expose_secret()).verifying_key();
            if derived.as_bytes()[..] != bytes[SECRET_KEY_LENGTH..] {
                return Err(KeyLoadError::PublicKeyMismatch);
            }
            Ok(seed)
        }
        actual => Err(KeyLoadError::Length {
            expected: SECRET_KEY_LENGTH,
            actual,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Test seed (DO NOT use with real funds!)
    const SEED: [u8; 32] = [
        0x9c, 0x41, 0x1b, 0x2d, 0x55, 0x07, 0xe3, 0x6a, 0x4f, 0x10, 0x88, 0xc2, 0x3e, 0x71, 0x0d,
        0xb4, 0x62, 0x19, 0xfa, 0x03, 0x8e, 0x5c, 0x27, 0xd1, 0x46, 0xab, 0x90, 0x3f, 0x11, 0xe8,
        0x74, 0x5a,
    ];

    fn byte_array_json(bytes: &[u8]) -> String {
        serde_json::to_string(bytes).unwrap()
    }

    fn write_key_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn formats_agree_on_the_address() {
        let from_array = parse_keypair(&byte_array_json(&SEED)).unwrap();
        let from_hex =
            parse_keypair(&format!(r#"{{"privateKey": "{}"}}"#, hex::encode(SEED))).unwrap();
        let from_prefixed_hex =
            parse_keypair(&format!(r#"{{"privateKey": "0x{}"}}"#, hex::encode(SEED))).unwrap();
        let from_field =
            parse_keypair(&format!(r#"{{"secretKey": {}}}"#, byte_array_json(&SEED))).unwrap();

        assert_eq!(from_array.address(), from_hex.address());
        assert_eq!(from_array.address(), from_prefixed_hex.address());
        assert_eq!(from_array.address(), from_field.address());
    }

    #[test]
    fn accepts_seed_with_matching_public_key() {
        let seed_only = parse_keypair(&byte_array_json(&SEED)).unwrap();
        let mut full = SEED.to_vec();
        full.extend_from_slice(&seed_only.public_key_bytes());

        let keypair = parse_keypair(&byte_array_json(&full)).unwrap();
        assert_eq!(keypair.address(), seed_only.address());
    }

    #[test]
    fn rejects_mismatched_public_key() {
        let mut full = SEED.to_vec();
        full.extend_from_slice(&[0u8; 32]);
        let err = parse_keypair(&byte_array_json(&full)).unwrap_err();
        assert!(matches!(err, KeyLoadError::PublicKeyMismatch));
    }

    #[test]
    fn rejects_short_secret() {
        let err = parse_keypair(&byte_array_json(&SEED[..31])).unwrap_err();
        assert!(matches!(
            err,
            KeyLoadError::Length {
                expected: 32,
                actual: 31
            }
        ));
    }

    #[test]
    fn rejects_bad_hex() {
        let err = parse_keypair(r#"{"privateKey": "0xnothex"}"#).unwrap_err();
        assert!(matches!(err, KeyLoadError::Hex(_)));
    }

    #[test]
    fn rejects_unknown_layout() {
        let err = parse_keypair(r#"{"mnemonic": "abandon abandon"}"#).unwrap_err();
        assert!(matches!(err, KeyLoadError::Format(_)));

        let err = parse_keypair("[1, 2, 300]").unwrap_err();
        assert!(matches!(err, KeyLoadError::Format(_)));
    }

    #[test]
    fn loads_from_disk() {
        let file = write_key_file(&byte_array_json(&SEED));
        let keypair = load_keypair(file.path()).unwrap();
        let expected = parse_keypair(&byte_array_json(&SEED)).unwrap();
        assert_eq!(keypair.address(), expected.address());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev-wallet.json");
        let err = load_keypair(&path).unwrap_err();
        match err {
            KeyLoadError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
