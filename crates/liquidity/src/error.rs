use alloy_primitives::{Address, B256, U256};
use settlement_messenger::MessengerError;
use settlement_queue::DepositQueueError;

/// The role an operation is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Role {
    /// May pause and unpause deposits.
    #[display("admin")]
    Admin,
    /// May analyze and relay deposits.
    #[display("analyzer")]
    Analyzer,
}

/// An error occurring in the [`crate::Liquidity`] contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiquidityError {
    /// The contract was not initialized.
    #[error("liquidity is not initialized")]
    NotInitialized,
    /// The contract was already initialized.
    #[error("liquidity is already initialized")]
    AlreadyInitialized,
    /// The stored state has a version this contract cannot migrate from.
    #[error("unsupported state version {0}")]
    UnsupportedStateVersion(u8),
    /// A configured address is zero.
    #[error("address is zero")]
    AddressZero,
    /// The caller lacks the role required by the operation.
    #[error("{account} is missing role {role}")]
    Unauthorized {
        /// The caller.
        account: Address,
        /// The required role.
        role: Role,
    },
    /// Deposits are paused.
    #[error("deposits are paused")]
    EnforcedPause,
    /// Deposits are not paused.
    #[error("deposits are not paused")]
    ExpectedPause,
    /// The deposited amount is zero.
    #[error("tried to deposit zero")]
    TriedToDepositZero,
    /// A non-native token has the zero address.
    #[error("invalid token address")]
    InvalidTokenAddress,
    /// No token is registered at the index.
    #[error("token index {0} not found")]
    TokenIndexNotFound(u32),
    /// The deposit exceeds the current limit of the token.
    #[error("deposit amount {amount} exceeds limit {limit}")]
    DepositAmountExceedsLimit {
        /// The deposited amount.
        amount: U256,
        /// The current limit.
        limit: U256,
    },
    /// A deposit with the same hash was already made.
    #[error("deposit hash {0} already exists")]
    DepositHashAlreadyExists(B256),
    /// A token transfer failed.
    #[error("token transfer failed for token index {0}")]
    TransferFailed(u32),
    /// The value attached to the relay call does not cover the relay fee.
    #[error("insufficient relay fee: required {required}, provided {provided}")]
    InsufficientRelayFee {
        /// The relay fee.
        required: U256,
        /// The attached value.
        provided: U256,
    },
    /// The caller is not the depositor, or the deposit no longer exists.
    #[error("only the sender can cancel deposit {0}")]
    OnlySenderCanCancelDeposit(u64),
    /// The provided deposit does not match the stored hash.
    #[error("invalid deposit hash: stored {stored}, given {given}")]
    InvalidDepositHash {
        /// The stored deposit hash.
        stored: B256,
        /// The hash of the provided deposit.
        given: B256,
    },
    /// The deposit was analyzed and can no longer be canceled.
    #[error("deposit {0} was already analyzed")]
    AlreadyAnalyzed(u64),
    /// The deposit was not analyzed yet.
    #[error("deposit {0} was not analyzed yet")]
    DepositNotAnalyzed(u64),
    /// The deposit was accepted and relayed.
    #[error("deposit {0} was already relayed")]
    AlreadyRelayed(u64),
    /// The message was not delivered by the messenger.
    #[error("sender {0} is not the messenger")]
    SenderIsNotMessenger(Address),
    /// The message was not sent by the withdrawal contract.
    #[error("invalid withdrawal contract address {0}")]
    InvalidWithdrawalAddress(Address),
    /// A withdrawal batch holds more entries than its watermark allows.
    #[error("withdrawal batch of {len} entries ends at id {last_id}")]
    InvalidWithdrawalBatch {
        /// The number of entries.
        len: usize,
        /// The id of the last entry.
        last_id: u64,
    },
    /// A withdrawal batch skips ids that were not processed yet.
    #[error("withdrawal batch starts at id {first_id}, expected at most {expected}")]
    WithdrawalBatchOutOfOrder {
        /// The id of the first entry.
        first_id: u64,
        /// The next unprocessed id.
        expected: u64,
    },
    /// The withdrawal is not claimable.
    #[error("withdrawal {0} not found")]
    WithdrawalNotFound(B256),
    /// The message could not be decoded.
    #[error("unknown message")]
    UnknownMessage,
    /// A deposit queue error.
    #[error(transparent)]
    DepositQueue(#[from] DepositQueueError),
    /// A messenger error.
    #[error(transparent)]
    Messenger(#[from] MessengerError),
}
