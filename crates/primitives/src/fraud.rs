use alloy_primitives::{bytes::BufMut, keccak256, Address, B256};

/// The public inputs of a block fraud proof.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FraudProofPublicInputs {
    /// The hash of the challenged block.
    pub block_hash: B256,
    /// The number of the challenged block.
    pub block_number: u32,
    /// The account submitting the challenge.
    pub challenger: Address,
}

impl FraudProofPublicInputs {
    /// Returns the hash passed to the proof verifier.
    pub fn hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(32 + 4 + 20);
        buf.put_slice(self.block_hash.as_slice());
        buf.put_u32(self.block_number);
        buf.put_slice(self.challenger.as_slice());
        keccak256(buf)
    }
}
