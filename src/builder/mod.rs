//! Transaction requests
//!
//! A [`TransactionRequest`] is the network-independent description of what a
//! transaction does: its commands, and inputs that are still unresolved
//! (object ids rather than versioned references). Gas payment is implicit.
//! [`crate::resolver::Resolver`] fills in the rest from the chain.

mod enroll;
mod transfer;

pub use enroll::{build_enroll_request, encode_identifier, ENROLL_FUNCTION, ENROLL_MODULE};
pub use transfer::build_sweep_request;

use crate::error::BuildError;
use crate::types::{Argument, Command, ObjectId, ProgrammableMoveCall, SuiAddress, TypeTag};
use serde::Serialize;

/// An input before chain lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedInput {
    /// BCS-encoded value
    Pure(Vec<u8>),
    /// Object whose version, digest and ownership are looked up at resolution
    Object(ObjectId),
}

/// Immutable description of one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    inputs: Vec<UnresolvedInput>,
    commands: Vec<Command>,
}

impl TransactionRequest {
    pub fn inputs(&self) -> &[UnresolvedInput] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn move_calls(&self) -> impl Iterator<Item = &ProgrammableMoveCall> {
        self.commands.iter().filter_map(|command| match command {
            Command::MoveCall(call) => Some(call.as_ref()),
            _ => None,
        })
    }

    /// Fully-qualified target of the first Move call
    pub fn target(&self) -> Option<String> {
        self.move_calls().next().map(ProgrammableMoveCall::target)
    }

    /// Object ids referenced as inputs
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.inputs.iter().filter_map(|input| match input {
            UnresolvedInput::Object(id) => Some(*id),
            UnresolvedInput::Pure(_) => None,
        })
    }

    /// Decoded recipient of each `TransferObjects` command
    pub fn transfer_recipients(&self) -> Vec<SuiAddress> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::TransferObjects(_, Argument::Input(idx)) => {
                    match self.inputs.get(*idx as usize) {
                        Some(UnresolvedInput::Pure(bytes)) => bcs::from_bytes(bytes).ok(),
                        _ => None,
                    }
                }
                _ => None,
            })
            .collect()
    }
}

/// Accumulates inputs and commands; `finish` freezes the request
#[derive(Debug, Default)]
pub struct RequestBuilder {
    inputs: Vec<UnresolvedInput>,
    commands: Vec<Command>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// BCS-encode `value` as a pure input
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<Argument, BuildError> {
        let bytes = bcs::to_bytes(value)?;
        self.pure_bytes(bytes)
    }

    /// Add already-encoded BCS bytes as a pure input
    pub fn pure_bytes(&mut self, bytes: Vec<u8>) -> Result<Argument, BuildError> {
        self.push_input(UnresolvedInput::Pure(bytes))
    }

    /// Reference an object; repeated ids share one input
    pub fn object(&mut self, id: ObjectId) -> Result<Argument, BuildError> {
        let existing = self
            .inputs
            .iter()
            .position(|input| *input == UnresolvedInput::Object(id));
        match existing {
            Some(idx) => Ok(Argument::Input(idx as u16)),
            None => self.push_input(UnresolvedInput::Object(id)),
        }
    }

    /// The coin paying for this transaction
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    pub fn move_call(
        &mut self,
        package: ObjectId,
        module: &str,
        function: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<Argument>,
    ) -> Result<Argument, BuildError> {
        for name in [module, function] {
            if !is_valid_identifier(name) {
                return Err(BuildError::InvalidIdentifier(name.to_string()));
            }
        }
        self.push_command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module: module.to_string(),
            function: function.to_string(),
            type_arguments,
            arguments,
        })))
    }

    pub fn transfer_objects(
        &mut self,
        objects: Vec<Argument>,
        recipient: Argument,
    ) -> Result<Argument, BuildError> {
        self.push_command(Command::TransferObjects(objects, recipient))
    }

    pub fn finish(self) -> TransactionRequest {
        TransactionRequest {
            inputs: self.inputs,
            commands: self.commands,
        }
    }

    fn push_input(&mut self, input: UnresolvedInput) -> Result<Argument, BuildError> {
        let idx = u16::try_from(self.inputs.len()).map_err(|_| BuildError::TooManyInputs)?;
        self.inputs.push(input);
        Ok(Argument::Input(idx))
    }

    fn push_command(&mut self, command: Command) -> Result<Argument, BuildError> {
        let idx = u16::try_from(self.commands.len()).map_err(|_| BuildError::TooManyCommands)?;
        self.commands.push(command);
        Ok(Argument::Result(idx))
    }
}

/// Move identifier: `[a-zA-Z][a-zA-Z0-9_]*` or `_[a-zA-Z0-9_]+`
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let head_ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('_') => name.len() > 1,
        _ => false,
    };
    head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
