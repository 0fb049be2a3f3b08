use alloy_primitives::{Address, B256, U256};

/// An error returned by the messenger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessengerError {
    /// The attached value does not cover the transferred value and the fee.
    #[error("insufficient msg.value: required {required}, provided {provided}")]
    InsufficientMsgValue {
        /// The required value.
        required: U256,
        /// The attached value.
        provided: U256,
    },
    /// The message was not committed by the sending domain.
    #[error("message {0} was not committed by the sending domain")]
    MessageNotCommitted(B256),
    /// The message was already executed on the receiving domain.
    #[error("message {0} was already successfully executed")]
    MessageAlreadyExecuted(B256),
    /// An earlier message from the sending domain has not executed yet.
    #[error("message with nonce {got} relayed before nonce {expected}")]
    MessageOutOfOrder {
        /// The nonce of the next message to execute.
        expected: U256,
        /// The nonce of the relayed message.
        got: U256,
    },
    /// The receiver is not the target of the message.
    #[error("message targets {expected} but was relayed to {got}")]
    UnexpectedTarget {
        /// The target of the message.
        expected: Address,
        /// The address of the receiver.
        got: Address,
    },
}
