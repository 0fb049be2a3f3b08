use alloy_primitives::{Address, B256, U256};
use settlement_tree::{BlockHashChainError, DepositTreeError};

/// An error occurring in the [`crate::Rollup`] contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RollupError {
    /// The contract was not initialized.
    #[error("rollup is not initialized")]
    NotInitialized,
    /// The contract was already initialized.
    #[error("rollup is already initialized")]
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
    /// The rate limit smoothing factor is not below one.
    #[error("invalid rate limit constants")]
    InvalidConstants,
    /// The block expired before it was posted.
    #[error("block expired at {expiry}, now is {timestamp}")]
    Expired {
        /// The expiry of the block.
        expiry: u64,
        /// The timestamp of the call.
        timestamp: u64,
    },
    /// A registration block lists more senders than a block holds.
    #[error("too many sender public keys: {0}")]
    TooManySenderPublicKeys(usize),
    /// A non-registration block lists more senders than a block holds.
    #[error("too many account ids: {0}")]
    TooManyAccountIds(usize),
    /// The packed account ids are not a whole number of ids.
    #[error("sender account ids have invalid length {0}")]
    SenderAccountIdsInvalidLength(usize),
    /// The builder nonce was already used.
    #[error("invalid nonce {given}, expected at least {expected}")]
    InvalidNonce {
        /// The next nonce of the builder.
        expected: u32,
        /// The given nonce.
        given: u32,
    },
    /// The attached value does not cover the rate limit penalty.
    #[error("insufficient penalty fee: required {required}, provided {provided}")]
    InsufficientPenaltyFee {
        /// The penalty fee.
        required: U256,
        /// The attached value.
        provided: U256,
    },
    /// The aggregated signature does not verify.
    #[error("pairing check failed")]
    PairingCheckFailed,
    /// The caller of a cross-domain call is not the messenger.
    #[error("sender {0} is not the messenger")]
    SenderIsNotMessenger(Address),
    /// The cross-domain sender is not the liquidity contract.
    #[error("cross-domain sender {0} is not the liquidity contract")]
    SenderIsNotLiquidity(Address),
    /// The deposit batch was already processed.
    #[error("stale deposit batch {given}, deposits were processed up to {last_processed}")]
    StaleDepositBatch {
        /// The last deposit id of the batch.
        given: u64,
        /// The last processed deposit id.
        last_processed: u64,
    },
    /// The deposit batch holds more hashes than its id range.
    #[error("deposit batch of {len} hashes does not fit in {id_range} deposit ids")]
    DepositBatchLengthMismatch {
        /// The number of deposit hashes.
        len: usize,
        /// The number of deposit ids covered by the batch.
        id_range: u64,
    },
    /// The relayed message is not a deposit batch.
    #[error("unknown message")]
    UnknownMessage,
    /// A deposit tree error.
    #[error(transparent)]
    DepositTree(#[from] DepositTreeError),
    /// A block hash chain error.
    #[error(transparent)]
    BlockHashChain(#[from] BlockHashChainError),
}

/// An error occurring in the [`crate::BlockBuilderRegistry`] contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The contract was not initialized.
    #[error("registry is not initialized")]
    NotInitialized,
    /// The contract was already initialized.
    #[error("registry is already initialized")]
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
    /// The block builder url is empty.
    #[error("url is empty")]
    URLIsEmpty,
    /// The total stake is below the minimum.
    #[error("insufficient stake amount {provided}, minimum is {required}")]
    InsufficientStakeAmount {
        /// The minimum stake.
        required: U256,
        /// The total stake after the update.
        provided: U256,
    },
    /// The block builder has no stake.
    #[error("block builder {0} not found")]
    BlockBuilderNotFound(Address),
    /// The block builder is running or stopped too recently.
    #[error("cannot unstake within the challenge duration")]
    CannotUnstakeWithinChallengeDuration,
    /// The challenged block hash is not the posted one.
    #[error("fraud proof block hash {given} does not match {expected}")]
    FraudProofBlockHashMismatch {
        /// The hash in the public inputs.
        given: B256,
        /// The hash of the posted block.
        expected: B256,
    },
    /// The challenger in the public inputs is not the caller.
    #[error("fraud proof challenger does not match the caller")]
    FraudProofChallengerMismatch,
    /// The block was already proven fraudulent.
    #[error("fraud proof already submitted")]
    FraudProofAlreadySubmitted,
    /// The fraud proof does not verify.
    #[error("fraud proof verification failed")]
    FraudProofVerificationFailed,
}
