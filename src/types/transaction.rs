//! Transaction wire types
//!
//! These mirror the fullnode's `TransactionData` layout and are encoded with
//! `bcs`. Variant order is part of the format: BCS writes the variant index,
//! so enums only ever grow at the end.

use super::{ObjectId, ObjectRef, SuiAddress, TransactionDigest};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

pub(crate) type Blake2b256 = Blake2b<U32>;

/// Versioned transaction payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: SuiAddress,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

/// Only user-submittable programmable transactions are modelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// BCS bytes of a primitive value
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    /// Objects to transfer, then the recipient address
    TransferObjects(Vec<Argument>, Argument),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

impl ProgrammableMoveCall {
    /// `<package>::<module>::<function>`
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The coin paying for gas
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "u8")]
    U8,
    #[serde(rename = "u64")]
    U64,
    #[serde(rename = "u128")]
    U128,
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "signer")]
    Signer,
    #[serde(rename = "vector")]
    Vector(Box<TypeTag>),
    #[serde(rename = "struct")]
    Struct(Box<StructTag>),
    #[serde(rename = "u16")]
    U16,
    #[serde(rename = "u32")]
    U32,
    #[serde(rename = "u256")]
    U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructTag {
    pub address: SuiAddress,
    pub module: String,
    pub name: String,
    pub type_params: Vec<TypeTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: SuiAddress,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionExpiration {
    None,
    Epoch(u64),
}

impl TransactionData {
    pub fn new_programmable(
        sender: SuiAddress,
        payment: Vec<ObjectRef>,
        pt: ProgrammableTransaction,
        budget: u64,
        price: u64,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(pt),
            sender,
            gas_data: GasData {
                payment,
                owner: sender,
                price,
                budget,
            },
            expiration: TransactionExpiration::None,
        })
    }

    pub fn sender(&self) -> SuiAddress {
        match self {
            TransactionData::V1(v1) => v1.sender,
        }
    }

    pub fn gas_data(&self) -> &GasData {
        match self {
            TransactionData::V1(v1) => &v1.gas_data,
        }
    }

    pub fn programmable(&self) -> &ProgrammableTransaction {
        match self {
            TransactionData::V1(v1) => match &v1.kind {
                TransactionKind::ProgrammableTransaction(pt) => pt,
            },
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, bcs::Error> {
        bcs::to_bytes(self)
    }

    /// Digest the fullnode will assign to this transaction
    pub fn digest(&self) -> Result<TransactionDigest, bcs::Error> {
        let mut hasher = Blake2b256::new();
        hasher.update(b"TransactionData::");
        hasher.update(self.to_bytes()?);
        let hash = hasher.finalize();
        Ok(TransactionDigest::new(bs58::encode(hash).into_string()))
    }
}

/// Intent prefix prepended to the BCS payload before signing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub scope: u8,
    pub version: u8,
    pub app_id: u8,
}

impl Intent {
    /// Scope `TransactionData`, version 0, app `Sui`
    pub const SUI_TRANSACTION: Intent = Intent {
        scope: 0,
        version: 0,
        app_id: 0,
    };

    pub fn to_bytes(self) -> [u8; 3] {
        [self.scope, self.version, self.app_id]
    }

    /// `intent || bcs(data)`: the exact bytes a signer commits to
    pub fn message(self, data: &TransactionData) -> Result<Vec<u8>, bcs::Error> {
        let payload = data.to_bytes()?;
        let mut message = Vec::with_capacity(3 + payload.len());
        message.extend_from_slice(&self.to_bytes());
        message.extend_from_slice(&payload);
        Ok(message)
    }
}
