/// An error returned by the [`crate::DepositTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DepositTreeError {
    /// The tree holds the maximum number of leaves.
    #[error("merkle tree is full")]
    MerkleTreeFull,
}

/// An error returned by the [`crate::BlockHashChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockHashChainError {
    /// The genesis block was not pushed.
    #[error("no blocks yet")]
    NoBlocksYet,
    /// The genesis block was already pushed.
    #[error("genesis block already pushed")]
    GenesisAlreadyPushed,
    /// The block was not posted.
    #[error("block number {block_number} is out of range, next is {next_block_number}")]
    BlockNumberOutOfRange {
        /// The requested block number.
        block_number: u32,
        /// The number the next block will get.
        next_block_number: u32,
    },
}
