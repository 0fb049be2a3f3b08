//! Append-only commitments maintained by the rollup: the deposit tree and the block hash chain.

pub use block::BlockHashChain;
mod block;

pub use deposit::{DepositTree, DEPOSIT_TREE_DEPTH, MAX_DEPOSIT_COUNT};
mod deposit;

pub use error::{BlockHashChainError, DepositTreeError};
mod error;
