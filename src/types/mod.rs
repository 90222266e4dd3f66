//! Sui identifiers: addresses, object ids, digests
//!
//! Addresses and object ids are 32 raw bytes on the wire and `0x`-prefixed hex
//! in text. Sui addresses carry no checksum, so any 1 to 64 hex digits parse
//! (left-padded with zeros), matching how the fullnode normalizes them.

pub mod transaction;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub use transaction::{
    Argument, CallArg, Command, GasData, Intent, ObjectArg, ProgrammableMoveCall,
    ProgrammableTransaction, StructTag, TransactionData, TransactionDataV1, TransactionExpiration,
    TransactionKind, TypeTag,
};

/// Length of addresses, object ids and digests
pub const SUI_ADDRESS_LENGTH: usize = 32;

/// Coin type used for gas payment
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    #[error("empty hex string")]
    Empty,

    #[error("hex string too long: {0} digits (max 64)")]
    TooLong(usize),

    #[error("invalid hex: {0}")]
    Hex(String),

    #[error("invalid base58 digest: {0}")]
    Base58(String),

    #[error("digest must be 32 bytes, got {0}")]
    DigestLength(usize),
}

fn parse_hex32(s: &str) -> Result<[u8; SUI_ADDRESS_LENGTH], ParseIdError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() {
        return Err(ParseIdError::Empty);
    }
    if digits.len() > SUI_ADDRESS_LENGTH * 2 {
        return Err(ParseIdError::TooLong(digits.len()));
    }
    let padded = format!("{:0>64}", digits);
    let mut out = [0u8; SUI_ADDRESS_LENGTH];
    hex::decode_to_slice(&padded, &mut out).map_err(|e| ParseIdError::Hex(e.to_string()))?;
    Ok(out)
}

macro_rules! hex_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name([u8; SUI_ADDRESS_LENGTH]);

        impl $name {
            pub const ZERO: Self = Self([0u8; SUI_ADDRESS_LENGTH]);

            pub const fn new(bytes: [u8; SUI_ADDRESS_LENGTH]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; SUI_ADDRESS_LENGTH] {
                &self.0
            }

            /// Full-length `0x`-prefixed lowercase hex
            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_hex32(s.trim()).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }
    };
}

hex_id!(
    /// Account address
    SuiAddress
);

hex_id!(
    /// On-chain object id (packages included)
    ObjectId
);

/// Object content digest: base58 in JSON, a 32-byte BCS byte vector on the wire
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectDigest([u8; SUI_ADDRESS_LENGTH]);

impl ObjectDigest {
    pub const fn new(bytes: [u8; SUI_ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SUI_ADDRESS_LENGTH] {
        &self.0
    }
}

impl FromStr for ObjectDigest {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ParseIdError::Base58(e.to_string()))?;
        let len = bytes.len();
        let array: [u8; SUI_ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| ParseIdError::DigestLength(len))?;
        Ok(Self(array))
    }
}

impl fmt::Display for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for ObjectDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectDigest({})", self)
    }
}

impl Serialize for ObjectDigest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectDigest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        let len = bytes.len();
        let array: [u8; SUI_ADDRESS_LENGTH] = bytes.try_into().map_err(|_| {
            serde::de::Error::custom(format!("object digest must be 32 bytes, got {}", len))
        })?;
        Ok(Self(array))
    }
}

/// Reference to a specific version of an owned object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: ObjectDigest,
}

/// Digest of a submitted transaction, as returned by the fullnode
///
/// Opaque: used only to look the transaction up in an explorer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDigest(String);

impl TransactionDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "0x09ed82ad567fd6a0abeda80b3072b16cc818e6260149bce7692bd22af6a0155b";

    #[test]
    fn address_roundtrips_through_text() {
        let addr: SuiAddress = RECIPIENT.parse().unwrap();
        assert_eq!(addr.to_string(), RECIPIENT);
        assert_eq!(addr.as_bytes()[0], 0x09);
        assert_eq!(addr.as_bytes()[31], 0x5b);
    }

    #[test]
    fn short_address_is_left_padded() {
        let addr: SuiAddress = "0x2".parse().unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 2;
        assert_eq!(addr, SuiAddress::new(expected));
    }

    #[test]
    fn prefix_is_optional_and_case_insensitive() {
        let upper = RECIPIENT.trim_start_matches("0x").to_uppercase();
        let addr: SuiAddress = upper.parse().unwrap();
        assert_eq!(addr.to_string(), RECIPIENT);
    }

    #[test]
    fn no_checksum_is_enforced() {
        // Flipping a digit yields a different, equally valid address.
        let tampered = RECIPIENT.replacen("09ed", "09ee", 1);
        let a: SuiAddress = RECIPIENT.parse().unwrap();
        let b: SuiAddress = tampered.parse().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        assert_eq!("0x".parse::<SuiAddress>(), Err(ParseIdError::Empty));
        assert!(matches!(
            format!("0x{}", "1".repeat(65)).parse::<SuiAddress>(),
            Err(ParseIdError::TooLong(65))
        ));
        assert!(matches!(
            "0xzz".parse::<SuiAddress>(),
            Err(ParseIdError::Hex(_))
        ));
    }

    #[test]
    fn address_is_32_raw_bytes_in_bcs() {
        let addr: SuiAddress = RECIPIENT.parse().unwrap();
        let bytes = bcs::to_bytes(&addr).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..], addr.as_bytes());
    }

    #[test]
    fn object_digest_is_length_prefixed_in_bcs() {
        let digest = ObjectDigest::new([7u8; 32]);
        let bytes = bcs::to_bytes(&digest).unwrap();
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 32);
        let decoded: ObjectDigest = bcs::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, digest);
    }

    #[test]
    fn object_digest_parses_base58() {
        let digest = ObjectDigest::new([42u8; 32]);
        let text = digest.to_string();
        assert_eq!(text.parse::<ObjectDigest>().unwrap(), digest);
        assert!(matches!(
            "3yZe7d".parse::<ObjectDigest>(),
            Err(ParseIdError::DigestLength(_))
        ));
    }

    #[test]
    fn object_ref_layout() {
        let object_ref = ObjectRef {
            object_id: ObjectId::new([1u8; 32]),
            version: 5,
            digest: ObjectDigest::new([2u8; 32]),
        };
        let bytes = bcs::to_bytes(&object_ref).unwrap();
        assert_eq!(bytes.len(), 32 + 8 + 33);
        assert_eq!(&bytes[32..40], &5u64.to_le_bytes());
    }
}
