use alloy_primitives::{bytes::BufMut, keccak256, Address, B256, U256};

/// A deposit made on the liquidity domain, as committed into the rollup deposit tree.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Deposit {
    /// Hash binding the recipient and a salt without revealing either.
    pub recipient_salt_hash: B256,
    /// The index of the deposited token.
    pub token_index: u32,
    /// The deposited amount.
    pub amount: U256,
}

impl Deposit {
    /// The length of the packed deposit encoding.
    pub const ENCODED_LENGTH: usize = 32 + 4 + 32;

    /// Returns a new [`Deposit`].
    pub const fn new(recipient_salt_hash: B256, token_index: u32, amount: U256) -> Self {
        Self { recipient_salt_hash, token_index, amount }
    }

    /// Returns the deposit hash, `keccak256(recipient_salt_hash ‖ token_index ‖ amount)` over
    /// the packed encoding.
    pub fn hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(Self::ENCODED_LENGTH);
        buf.put_slice(self.recipient_salt_hash.as_slice());
        buf.put_u32(self.token_index);
        buf.put_slice(&self.amount.to_be_bytes::<32>());
        keccak256(buf)
    }
}

/// The queue entry stored for a pending deposit.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositData {
    /// The hash of the deposit.
    pub deposit_hash: B256,
    /// The account that made the deposit.
    pub sender: Address,
    /// Whether the deposit was rejected during analysis.
    pub is_rejected: bool,
}

impl DepositData {
    /// Returns a new, non-rejected [`DepositData`].
    pub const fn new(deposit_hash: B256, sender: Address) -> Self {
        Self { deposit_hash, sender, is_rejected: false }
    }

    /// Returns true if the entry was deleted or never written.
    pub fn is_empty(&self) -> bool {
        self.deposit_hash.is_zero() && self.sender.is_zero()
    }
}
