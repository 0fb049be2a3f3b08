use alloy_primitives::B256;
use parking_lot::RwLock;

/// Verifies zero-knowledge proofs against the hash of their public inputs.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait ProofVerifier {
    /// Returns true if the proof is valid for the public inputs hash.
    fn verify(&self, proof: &[u8], public_inputs_hash: B256) -> bool;
}

/// Checks the aggregated signature of a block.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait PairingVerifier {
    /// Returns true if the pairing check passes.
    fn pairing(
        &self,
        agg_pubkey: &[B256; 2],
        agg_signature: &[B256; 4],
        message_point: &[B256; 4],
    ) -> bool;
}

/// Provides the hashes of posted rollup blocks.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait BlockHashProvider {
    /// Returns the hash of the block at the given number, if posted.
    fn block_hash(&self, block_number: u32) -> Option<B256>;
}

impl<T: BlockHashProvider> BlockHashProvider for RwLock<T> {
    fn block_hash(&self, block_number: u32) -> Option<B256> {
        self.read().block_hash(block_number)
    }
}
