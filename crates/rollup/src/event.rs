use alloy_primitives::{Address, B256, U256};

/// An event emitted by the [`crate::Rollup`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollupEvent {
    /// A block was posted.
    BlockPosted {
        /// The hash of the previous block.
        prev_block_hash: B256,
        /// The builder of the block.
        block_builder: Address,
        /// The timestamp the block was posted at.
        timestamp: u64,
        /// The number of the block.
        block_number: u32,
        /// The deposit tree root committed by the block.
        deposit_tree_root: B256,
        /// The signature hash of the block.
        signature_hash: B256,
    },
    /// A deposit was inserted into the deposit tree.
    DepositLeafInserted {
        /// The leaf index of the deposit.
        deposit_index: u32,
        /// The hash of the deposit.
        deposit_hash: B256,
    },
    /// A deposit batch relayed from the liquidity domain was processed.
    DepositsProcessed {
        /// The id of the last deposit of the batch.
        last_processed_deposit_id: u64,
        /// The deposit tree root after the batch.
        deposit_tree_root: B256,
    },
    /// The rate limit constants were updated.
    RateLimitConstantsUpdated {
        /// The target interval between blocks.
        target_interval: U256,
        /// The smoothing factor of the interval average.
        alpha: U256,
        /// The penalty coefficient.
        k: U256,
    },
    /// The collected penalty fees were withdrawn.
    PenaltyFeeWithdrawn {
        /// The recipient of the fees.
        to: Address,
        /// The withdrawn amount.
        amount: U256,
    },
}

/// An event emitted by the [`crate::BlockBuilderRegistry`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A block builder was registered, restaked or unstaked.
    BlockBuilderUpdated {
        /// The block builder.
        block_builder: Address,
        /// The url of the block builder.
        url: String,
        /// The stake of the block builder, or the unstaked amount.
        stake_amount: U256,
    },
    /// A block builder stopped building blocks.
    BlockBuilderStopped {
        /// The block builder.
        block_builder: Address,
    },
    /// A block was proven fraudulent.
    BlockFraudProofSubmitted {
        /// The number of the block.
        block_number: u32,
        /// The builder of the block.
        block_builder: Address,
        /// The account that proved the fraud.
        challenger: Address,
    },
    /// A block builder was slashed.
    BlockBuilderSlashed {
        /// The block builder.
        block_builder: Address,
        /// The account rewarded for the challenge.
        challenger: Address,
    },
    /// The burn address was updated.
    BurnAddressUpdated(Address),
}
