use crate::BlockHashChainError;

use alloy_primitives::B256;
use settlement_primitives::block_hash;

/// The append-only chain of posted block hashes, seeded by a genesis block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlockHashChain {
    hashes: Vec<B256>,
}

impl BlockHashChain {
    /// Returns an empty chain.
    pub const fn new() -> Self {
        Self { hashes: Vec::new() }
    }

    /// Pushes the genesis block, with a zero previous hash and signature hash.
    pub fn push_genesis_block_hash(
        &mut self,
        deposit_tree_root: B256,
    ) -> Result<B256, BlockHashChainError> {
        if !self.hashes.is_empty() {
            return Err(BlockHashChainError::GenesisAlreadyPushed);
        }
        let hash = block_hash(B256::ZERO, deposit_tree_root, B256::ZERO, 0);
        self.hashes.push(hash);
        Ok(hash)
    }

    /// Appends a block linked to the latest one and returns its hash.
    pub fn push_block_hash(
        &mut self,
        deposit_tree_root: B256,
        signature_hash: B256,
    ) -> Result<B256, BlockHashChainError> {
        let prev_hash = self.prev_hash()?;
        let block_number = self.block_number()?;
        let hash = block_hash(prev_hash, deposit_tree_root, signature_hash, block_number);
        self.hashes.push(hash);
        Ok(hash)
    }

    /// Returns the hash of the block at the given number.
    pub fn get_block_hash(&self, block_number: u32) -> Result<B256, BlockHashChainError> {
        self.hashes.get(block_number as usize).copied().ok_or_else(|| {
            BlockHashChainError::BlockNumberOutOfRange {
                block_number,
                next_block_number: self.hashes.len() as u32,
            }
        })
    }

    /// Returns the number the next block will get.
    pub fn block_number(&self) -> Result<u32, BlockHashChainError> {
        if self.hashes.is_empty() {
            return Err(BlockHashChainError::NoBlocksYet);
        }
        Ok(self.hashes.len() as u32)
    }

    /// Returns the hash of the latest block.
    pub fn prev_hash(&self) -> Result<B256, BlockHashChainError> {
        self.hashes.last().copied().ok_or(BlockHashChainError::NoBlocksYet)
    }

    /// Returns every block hash, indexed by block number.
    pub fn hashes(&self) -> &[B256] {
        &self.hashes
    }
}
