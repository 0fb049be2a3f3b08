use alloy_primitives::{Address, B256};

/// An event emitted by the [`crate::Withdrawal`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawalEvent {
    /// A withdrawal was queued for direct payout.
    DirectWithdrawalQueued {
        /// The hash of the withdrawal.
        withdrawal_hash: B256,
        /// The recipient of the withdrawal.
        recipient: Address,
        /// The withdrawal.
        withdrawal: settlement_primitives::Withdrawal,
    },
    /// A withdrawal was queued to be claimed by its recipient.
    ClaimableWithdrawalQueued {
        /// The hash of the withdrawal.
        withdrawal_hash: B256,
        /// The recipient of the withdrawal.
        recipient: Address,
        /// The withdrawal.
        withdrawal: settlement_primitives::Withdrawal,
    },
    /// The queued withdrawals were relayed to the liquidity domain.
    WithdrawalsRelayed {
        /// The id of the last relayed direct withdrawal.
        last_direct_withdrawal_id: u64,
        /// The id of the last relayed claimable withdrawal.
        last_claimable_withdrawal_id: u64,
        /// The hash of the relay message.
        message_hash: B256,
    },
    /// Token indices were added to the direct withdrawal set.
    DirectWithdrawalTokenIndicesAdded(Vec<u32>),
    /// Token indices were removed from the direct withdrawal set.
    DirectWithdrawalTokenIndicesRemoved(Vec<u32>),
    /// The proof verifier was replaced.
    VerifierUpdated,
}
