use alloy_primitives::B256;

/// An item that can be folded into a hash chain.
pub trait Chained {
    /// Returns the next accumulator value given the previous one.
    fn hash_with_prev(&self, prev_hash: B256) -> B256;
}

/// Folds the ordered items into a hash chain starting at the zero hash and returns the last
/// accumulator value. The empty chain hashes to zero.
pub fn chain_hash<T: Chained>(items: &[T]) -> B256 {
    items.iter().fold(B256::ZERO, |prev, item| item.hash_with_prev(prev))
}

/// Returns true if the items reproduce the committed last hash.
pub fn verify_chain<T: Chained>(items: &[T], last_hash: B256) -> bool {
    chain_hash(items) == last_hash
}
