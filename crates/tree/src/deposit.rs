use crate::DepositTreeError;

use alloy_primitives::{keccak256, B256};
use settlement_primitives::Deposit;

/// The depth of the deposit tree.
pub const DEPOSIT_TREE_DEPTH: usize = 32;

/// The maximum number of leaves in the deposit tree.
pub const MAX_DEPOSIT_COUNT: u32 = u32::MAX;

/// An incremental Merkle tree over deposit hashes.
///
/// Only the rightmost path is cached, so appending a leaf and recomputing the root are both
/// `O(depth)`. Empty leaves hold the hash of the zero deposit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositTree {
    branch: [B256; DEPOSIT_TREE_DEPTH],
    deposit_count: u32,
    zero_hashes: [B256; DEPOSIT_TREE_DEPTH],
}

impl Default for DepositTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DepositTree {
    /// Returns an empty deposit tree.
    pub fn new() -> Self {
        let mut zero_hashes = [B256::ZERO; DEPOSIT_TREE_DEPTH];
        zero_hashes[0] = Deposit::default().hash();
        for height in 1..DEPOSIT_TREE_DEPTH {
            zero_hashes[height] = hash_pair(zero_hashes[height - 1], zero_hashes[height - 1]);
        }
        Self { branch: [B256::ZERO; DEPOSIT_TREE_DEPTH], deposit_count: 0, zero_hashes }
    }

    /// Appends a leaf and returns the new root.
    pub fn deposit(&mut self, leaf: B256) -> Result<B256, DepositTreeError> {
        if self.deposit_count == MAX_DEPOSIT_COUNT {
            return Err(DepositTreeError::MerkleTreeFull);
        }

        self.deposit_count += 1;
        let mut size = self.deposit_count;
        let mut node = leaf;
        for branch in &mut self.branch {
            if size & 1 == 1 {
                *branch = node;
                break;
            }
            node = hash_pair(*branch, node);
            size >>= 1;
        }

        Ok(self.root())
    }

    /// Returns the root of the tree.
    pub fn root(&self) -> B256 {
        let mut node = self.zero_hashes[0];
        let mut size = self.deposit_count;
        for height in 0..DEPOSIT_TREE_DEPTH {
            node = if size & 1 == 1 {
                hash_pair(self.branch[height], node)
            } else {
                hash_pair(node, self.zero_hashes[height])
            };
            size >>= 1;
        }
        node
    }

    /// Returns the cached rightmost path.
    pub const fn branch(&self) -> &[B256; DEPOSIT_TREE_DEPTH] {
        &self.branch
    }

    /// Returns the number of leaves.
    pub const fn deposit_count(&self) -> u32 {
        self.deposit_count
    }

    /// Returns the hash of an empty leaf.
    pub const fn default_hash(&self) -> B256 {
        self.zero_hashes[0]
    }
}

fn hash_pair(left: B256, right: B256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_slice());
    buf[32..].copy_from_slice(right.as_slice());
    keccak256(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{b256, U256};
    use settlement_primitives::random;

    /// Builds the root level by level, padding with the empty subtree hash.
    fn reference_root(leaves: &[B256]) -> B256 {
        let tree = DepositTree::new();
        let mut zero = tree.default_hash();
        let mut nodes = leaves.to_vec();
        for _ in 0..DEPOSIT_TREE_DEPTH {
            if nodes.is_empty() {
                nodes.push(zero);
            }
            if nodes.len() % 2 == 1 {
                nodes.push(zero);
            }
            nodes = nodes.chunks(2).map(|pair| hash_pair(pair[0], pair[1])).collect();
            zero = hash_pair(zero, zero);
        }
        nodes[0]
    }

    #[test]
    fn test_empty_tree_root() {
        let tree = DepositTree::new();
        assert_eq!(
            tree.default_hash(),
            b256!("5706de766d5661c754fb7b4c89db363309a9f89fa2945c9d8c7a303b79943963")
        );
        assert_eq!(
            tree.root(),
            b256!("b6155ab566bbd2e341525fd88c43b4d69572bf4afe7df45cd74d6901a172e41c")
        );
        assert_eq!(tree.root(), reference_root(&[]));
    }

    #[test]
    fn test_should_match_reference_root() -> eyre::Result<()> {
        let mut tree = DepositTree::new();
        let mut leaves = Vec::new();
        for i in 0..33u64 {
            let leaf = Deposit::new(B256::repeat_byte(i as u8), 3, U256::from(i)).hash();
            leaves.push(leaf);

            let root = tree.deposit(leaf)?;
            assert_eq!(root, reference_root(&leaves));
            assert_eq!(root, tree.root());
        }
        assert_eq!(tree.deposit_count(), 33);

        Ok(())
    }

    #[test]
    fn test_random_leaves_match_reference_root() -> eyre::Result<()> {
        for _ in 0..8 {
            let mut tree = DepositTree::new();
            let count = 1 + usize::from(random!(u8) % 96);
            let leaves: Vec<_> = (0..count).map(|_| random!(Deposit).hash()).collect();
            for leaf in &leaves {
                tree.deposit(*leaf)?;
            }
            assert_eq!(tree.root(), reference_root(&leaves));
            assert_eq!(tree.deposit_count() as usize, count);
        }

        Ok(())
    }

    #[test]
    fn test_single_leaf_branch() -> eyre::Result<()> {
        let mut tree = DepositTree::new();
        let leaf = B256::repeat_byte(0x11);
        tree.deposit(leaf)?;

        assert_eq!(tree.branch()[0], leaf);
        assert!(tree.branch()[1..].iter().all(|node| node.is_zero()));

        Ok(())
    }

    #[test]
    fn test_full_tree_rejects_deposits() {
        let mut tree = DepositTree::new();
        tree.deposit_count = MAX_DEPOSIT_COUNT;
        assert_eq!(tree.deposit(B256::ZERO), Err(DepositTreeError::MerkleTreeFull));
        assert_eq!(tree.deposit_count(), MAX_DEPOSIT_COUNT);
    }
}
