use crate::Chained;

use alloy_primitives::{bytes::BufMut, keccak256, Address, B256, U256};

/// A reward claim proven against a rollup block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ChainedClaim {
    /// The claiming account.
    pub recipient: Address,
    /// The claimed amount.
    pub amount: U256,
    /// A unique value preventing double claims.
    pub nullifier: B256,
    /// The hash of the block the claim was proven against.
    pub block_hash: B256,
    /// The number of the block the claim was proven against.
    pub block_number: u32,
}

impl Chained for ChainedClaim {
    fn hash_with_prev(&self, prev_hash: B256) -> B256 {
        let mut buf = Vec::with_capacity(32 + 20 + 32 + 32 + 32 + 4);
        buf.put_slice(prev_hash.as_slice());
        buf.put_slice(self.recipient.as_slice());
        buf.put_slice(&self.amount.to_be_bytes::<32>());
        buf.put_slice(self.nullifier.as_slice());
        buf.put_slice(self.block_hash.as_slice());
        buf.put_u32(self.block_number);
        keccak256(buf)
    }
}

/// The public inputs of a claim proof.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClaimProofPublicInputs {
    /// The last hash of the claim chain.
    pub last_claim_hash: B256,
    /// The account allowed to submit the proof.
    pub claim_aggregator: Address,
}

impl ClaimProofPublicInputs {
    /// Returns the hash passed to the proof verifier.
    pub fn hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(32 + 20);
        buf.put_slice(self.last_claim_hash.as_slice());
        buf.put_slice(self.claim_aggregator.as_slice());
        keccak256(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chain_hash, verify_chain};
    use alloy_primitives::b256;

    fn claim(amount: u64, nullifier: &[u8], block_hash: &[u8], block_number: u32) -> ChainedClaim {
        ChainedClaim {
            recipient: Address::ZERO,
            amount: U256::from(amount),
            nullifier: B256::right_padding_from(nullifier),
            block_hash: B256::right_padding_from(block_hash),
            block_number,
        }
    }

    #[test]
    fn test_should_verify_claim_chain() {
        let claims = [claim(1, b"claim1", b"hash1", 1), claim(2, b"claim2", b"hash2", 2)];
        let expected = b256!("706f58db10ec2a4758cf48d239690dbfb704e2dba1470f0253e539b7d29f8c3f");

        assert_eq!(chain_hash(&claims), expected);
        assert!(verify_chain(&claims, expected));
        assert!(!verify_chain(&claims[1..], expected));
    }

    #[test]
    fn test_should_hash_claim_public_inputs() {
        let inputs = ClaimProofPublicInputs {
            last_claim_hash: B256::right_padding_from(b"arg1"),
            claim_aggregator: Address::ZERO,
        };
        assert_eq!(
            inputs.hash(),
            b256!("d715f19b6a5b20d5d567063de333780e7cd74aec6dccabbeaa2c8851b16f488a")
        );
    }
}
