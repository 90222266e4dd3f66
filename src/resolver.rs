//! Turns a [`TransactionRequest`] into signable [`TransactionData`]
//!
//! Resolution reads the chain to:
//! - pin every object input to its current reference (or shared version)
//! - pick a gas price (configured, or the reference price)
//! - pick SUI coins to pay with
//! - size the gas budget (configured, or by dry run)

use crate::builder::{TransactionRequest, UnresolvedInput};
use crate::client::types::is_immutable_reference;
use crate::client::{ChainReader, Owner};
use crate::config::GasSettings;
use crate::error::SubmissionError;
use crate::types::{
    Argument, CallArg, Command, ObjectArg, ObjectId, ObjectRef, ProgrammableTransaction,
    SuiAddress, TransactionData, SUI_COIN_TYPE,
};
use crate::wallet::TransactionSimulator;
use tracing::{debug, info};

/// Most coins a single transaction may pay with
pub const MAX_GAS_OBJECTS: usize = 256;

pub struct Resolver<'a, C: ?Sized> {
    client: &'a C,
    gas: &'a GasSettings,
}

impl<'a, C: ChainReader + ?Sized> Resolver<'a, C> {
    pub fn new(client: &'a C, gas: &'a GasSettings) -> Self {
        Self { client, gas }
    }

    pub async fn resolve(
        &self,
        sender: SuiAddress,
        request: &TransactionRequest,
    ) -> Result<TransactionData, SubmissionError> {
        let pt = self.resolve_inputs(request).await?;

        let input_objects: Vec<ObjectId> = request.object_ids().collect();
        let payment = self.select_gas_coins(sender, &input_objects).await?;

        let gas_price = match self.gas.price {
            Some(price) => price,
            None => self.client.reference_gas_price().await?,
        };

        let budget = match self.gas.budget {
            Some(budget) => budget,
            None => {
                TransactionSimulator::new(self.client)
                    .estimate_budget(sender, &pt, gas_price, self.gas.max_budget)
                    .await?
            }
        };

        info!(
            %sender,
            gas_coins = payment.len(),
            gas_price,
            budget,
            "Resolved transaction"
        );
        Ok(TransactionData::new_programmable(
            sender, payment, pt, budget, gas_price,
        ))
    }

    async fn resolve_inputs(
        &self,
        request: &TransactionRequest,
    ) -> Result<ProgrammableTransaction, SubmissionError> {
        let mut inputs = Vec::with_capacity(request.inputs().len());
        for (idx, input) in request.inputs().iter().enumerate() {
            let arg = match input {
                UnresolvedInput::Pure(bytes) => CallArg::Pure(bytes.clone()),
                UnresolvedInput::Object(id) => {
                    let info = self.client.get_object(*id).await?;
                    let object_arg = match info.owner {
                        Owner::Shared {
                            initial_shared_version,
                        } => ObjectArg::SharedObject {
                            id: *id,
                            initial_shared_version,
                            mutable: self.is_used_mutably(request, idx as u16).await?,
                        },
                        Owner::AddressOwner(_) | Owner::ObjectOwner(_) | Owner::Immutable => {
                            ObjectArg::ImmOrOwnedObject(info.object_ref)
                        }
                    };
                    debug!(object = %id, ?object_arg, "Resolved object input");
                    CallArg::Object(object_arg)
                }
            };
            inputs.push(arg);
        }

        Ok(ProgrammableTransaction {
            inputs,
            commands: request.commands().to_vec(),
        })
    }

    /// A shared input is taken immutably only when every use is a `&T` parameter
    async fn is_used_mutably(
        &self,
        request: &TransactionRequest,
        input: u16,
    ) -> Result<bool, SubmissionError> {
        let target = Argument::Input(input);
        let mut used = false;

        for command in request.commands() {
            match command {
                Command::MoveCall(call) => {
                    for (position, argument) in call.arguments.iter().enumerate() {
                        if *argument != target {
                            continue;
                        }
                        used = true;
                        let parameters = self
                            .client
                            .move_function_parameters(call.package, &call.module, &call.function)
                            .await?;
                        let immutable = parameters
                            .get(position)
                            .is_some_and(is_immutable_reference);
                        if !immutable {
                            return Ok(true);
                        }
                    }
                }
                Command::TransferObjects(objects, recipient) => {
                    if objects.contains(&target) || *recipient == target {
                        return Ok(true);
                    }
                }
            }
        }

        Ok(!used)
    }

    /// Owner's SUI coins, skipping coins already used as inputs
    async fn select_gas_coins(
        &self,
        owner: SuiAddress,
        exclude: &[ObjectId],
    ) -> Result<Vec<ObjectRef>, SubmissionError> {
        let mut payment = Vec::new();
        let mut cursor = None;

        loop {
            let page = self.client.get_coins(owner, SUI_COIN_TYPE, cursor).await?;
            for coin in &page.data {
                let coin_ref = coin.object_ref()?;
                if exclude.contains(&coin_ref.object_id) {
                    continue;
                }
                payment.push(coin_ref);
                if payment.len() == MAX_GAS_OBJECTS {
                    return Ok(payment);
                }
            }
            match page.next_cursor {
                Some(next) if page.has_next_page => cursor = Some(next),
                _ => break,
            }
        }

        if payment.is_empty() {
            return Err(SubmissionError::NoGasCoins(owner.to_string()));
        }
        Ok(payment)
    }
}
