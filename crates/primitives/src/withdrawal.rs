use crate::Chained;

use alloy_primitives::{bytes::BufMut, keccak256, Address, B256, U256};

/// A withdrawal as queued on the rollup domain and paid on the liquidity domain.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Withdrawal {
    /// The account receiving the funds.
    pub recipient: Address,
    /// The index of the withdrawn token.
    pub token_index: u32,
    /// The withdrawn amount.
    pub amount: U256,
    /// A unique value preventing the same withdrawal from being processed twice.
    pub nullifier: B256,
}

impl Withdrawal {
    /// Returns a new [`Withdrawal`].
    pub const fn new(recipient: Address, token_index: u32, amount: U256, nullifier: B256) -> Self {
        Self { recipient, token_index, amount, nullifier }
    }

    /// Returns the withdrawal hash used as its identity for replay prevention.
    pub fn hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(20 + 4 + 32 + 32);
        self.put_packed(&mut buf);
        keccak256(buf)
    }

    fn put_packed(&self, buf: &mut Vec<u8>) {
        buf.put_slice(self.recipient.as_slice());
        buf.put_u32(self.token_index);
        buf.put_slice(&self.amount.to_be_bytes::<32>());
        buf.put_slice(self.nullifier.as_slice());
    }
}

/// A withdrawal together with the block it was proven against.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ChainedWithdrawal {
    /// The account receiving the funds.
    pub recipient: Address,
    /// The index of the withdrawn token.
    pub token_index: u32,
    /// The withdrawn amount.
    pub amount: U256,
    /// A unique value preventing the same withdrawal from being processed twice.
    pub nullifier: B256,
    /// The hash of the block the withdrawal was proven against.
    pub block_hash: B256,
    /// The number of the block the withdrawal was proven against.
    pub block_number: u32,
}

impl ChainedWithdrawal {
    /// Returns the withdrawal without its block context.
    pub const fn withdrawal(&self) -> Withdrawal {
        Withdrawal {
            recipient: self.recipient,
            token_index: self.token_index,
            amount: self.amount,
            nullifier: self.nullifier,
        }
    }
}

impl Chained for ChainedWithdrawal {
    fn hash_with_prev(&self, prev_hash: B256) -> B256 {
        let mut buf = Vec::with_capacity(32 + 20 + 4 + 32 + 32 + 32 + 4);
        buf.put_slice(prev_hash.as_slice());
        self.withdrawal().put_packed(&mut buf);
        buf.put_slice(self.block_hash.as_slice());
        buf.put_u32(self.block_number);
        keccak256(buf)
    }
}

/// The public inputs of a withdrawal proof.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithdrawalProofPublicInputs {
    /// The last hash of the withdrawal chain.
    pub last_withdrawal_hash: B256,
    /// The account allowed to submit the proof.
    pub withdrawal_aggregator: Address,
}

impl WithdrawalProofPublicInputs {
    /// Returns the hash passed to the proof verifier.
    pub fn hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(32 + 20);
        buf.put_slice(self.last_withdrawal_hash.as_slice());
        buf.put_slice(self.withdrawal_aggregator.as_slice());
        keccak256(buf)
    }
}
