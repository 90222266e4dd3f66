use super::{RequestBuilder, TransactionRequest};
use crate::config::TransferParams;
use crate::error::BuildError;

/// Sweep the full gas balance to the recipient.
///
/// The gas coin itself is transferred, so no amount is given: after the
/// transaction the recipient owns the coin minus what this transaction
/// spent on gas.
pub fn build_sweep_request(params: &TransferParams) -> Result<TransactionRequest, BuildError> {
    let mut builder = RequestBuilder::new();
    let recipient = builder.pure(&params.recipient)?;
    let gas = builder.gas();
    builder.transfer_objects(vec![gas], recipient)?;

    tracing::debug!(recipient = %params.recipient, "Built sweep request");
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::UnresolvedInput;
    use crate::types::{Argument, Command, SuiAddress};
    use std::path::PathBuf;

    #[test]
    fn sweep_moves_the_gas_coin_without_amount() {
        let recipient: SuiAddress = "0x2a".parse().unwrap();
        let request = build_sweep_request(&TransferParams {
            key_file: PathBuf::from("unused.json"),
            recipient,
        })
        .unwrap();

        assert_eq!(request.transfer_recipients(), vec![recipient]);
        assert_eq!(
            request.commands(),
            &[Command::TransferObjects(vec![Argument::GasCoin], Argument::Input(0))]
        );
        // The recipient is the only input
        assert_eq!(
            request.inputs(),
            &[UnresolvedInput::Pure(recipient.as_bytes().to_vec())]
        );
        assert!(request.target().is_none());
    }
}
