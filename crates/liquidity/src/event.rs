use alloy_primitives::{Address, B256, U256};
use settlement_primitives::Withdrawal;

/// An event emitted by the [`crate::Liquidity`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiquidityEvent {
    /// A deposit was enqueued.
    Deposited {
        /// The id of the deposit.
        deposit_id: u64,
        /// The depositor.
        sender: Address,
        /// The hash binding the recipient and its salt.
        recipient_salt_hash: B256,
        /// The index of the deposited token.
        token_index: u32,
        /// The deposited amount.
        amount: U256,
        /// The timestamp of the deposit.
        deposited_at: u64,
    },
    /// Deposits were analyzed and the accepted ones relayed to the rollup.
    DepositsRelayed {
        /// The id of the last analyzed deposit.
        up_to_deposit_id: u64,
        /// The number of relayed deposit hashes.
        relayed: usize,
        /// The gas limit of the relay message.
        gas_limit: U256,
        /// The hash of the relay message.
        message_hash: B256,
    },
    /// A pending deposit was canceled and refunded.
    DepositCanceled {
        /// The id of the deposit.
        deposit_id: u64,
    },
    /// A rejected deposit was returned to its depositor.
    RejectedDepositClaimed {
        /// The id of the deposit.
        deposit_id: u64,
    },
    /// A direct withdrawal was paid out.
    DirectWithdrawalSucceeded {
        /// The hash of the withdrawal.
        withdrawal_hash: B256,
        /// The recipient of the withdrawal.
        recipient: Address,
    },
    /// A direct withdrawal payout failed and the withdrawal became claimable.
    DirectWithdrawalFailed {
        /// The hash of the withdrawal.
        withdrawal_hash: B256,
        /// The withdrawal.
        withdrawal: Withdrawal,
    },
    /// A withdrawal can be claimed by its recipient.
    WithdrawalClaimable {
        /// The hash of the withdrawal.
        withdrawal_hash: B256,
    },
    /// A claimable withdrawal was paid out.
    ClaimedWithdrawal {
        /// The recipient of the withdrawal.
        recipient: Address,
        /// The hash of the withdrawal.
        withdrawal_hash: B256,
    },
    /// Deposits were paused.
    Paused(Address),
    /// Deposits were unpaused.
    Unpaused(Address),
}
