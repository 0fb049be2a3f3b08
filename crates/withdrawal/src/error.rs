use alloy_primitives::{Address, B256, U256};
use settlement_messenger::MessengerError;
use settlement_queue::QueueError;

/// An error occurring in the [`crate::Withdrawal`] contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WithdrawalError {
    /// The contract was not initialized.
    #[error("withdrawal is not initialized")]
    NotInitialized,
    /// The contract was already initialized.
    #[error("withdrawal is already initialized")]
    AlreadyInitialized,
    /// The stored state has a version this contract cannot migrate from.
    #[error("unsupported state version {0}")]
    UnsupportedStateVersion(u8),
    /// A configured address is zero.
    #[error("address is zero")]
    AddressZero,
    /// The caller is not the owner.
    #[error("{0} is not the owner")]
    Unauthorized(Address),
    /// The aggregator committed in the public inputs is not the caller.
    #[error("withdrawal aggregator mismatch")]
    WithdrawalAggregatorMismatch,
    /// The withdrawals do not reproduce the committed chain hash.
    #[error("withdrawal chain verification failed")]
    WithdrawalChainVerificationFailed,
    /// The proof verifier rejected the proof.
    #[error("withdrawal proof verification failed")]
    WithdrawalProofVerificationFailed,
    /// A withdrawal references a block the rollup did not post.
    #[error("block hash {0} does not exist")]
    BlockHashNotExists(B256),
    /// The token index is already withdrawn directly.
    #[error("token index {0} already exists")]
    TokenAlreadyExist(u32),
    /// The token index is not withdrawn directly.
    #[error("token index {0} does not exist")]
    TokenNotExist(u32),
    /// The value attached to the call does not cover the relay fee.
    #[error("insufficient relay fee, required {required}, provided {provided}")]
    InsufficientRelayFee {
        /// The relay fee.
        required: U256,
        /// The attached value.
        provided: U256,
    },
    /// A withdrawal queue operation failed.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// The messenger rejected the relay message.
    #[error(transparent)]
    Messenger(#[from] MessengerError),
}
