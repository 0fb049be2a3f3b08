//! The calls exchanged between the liquidity and rollup domains.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    struct Withdrawal {
        address recipient;
        uint32 tokenIndex;
        uint256 amount;
        bytes32 nullifier;
    }

    #[derive(Debug, PartialEq, Eq)]
    function processDeposits(
        uint256 lastProcessedDepositId,
        bytes32[] depositHashes
    ) external;

    #[derive(Debug, PartialEq, Eq)]
    function processWithdrawals(
        uint256 lastProcessedDirectWithdrawalId,
        Withdrawal[] withdrawals,
        uint256 lastProcessedClaimableWithdrawalId,
        bytes32[] withdrawalHashes
    ) external;

    #[derive(Debug)]
    function relayMessage(
        address from,
        address to,
        uint256 value,
        uint256 nonce,
        bytes message
    ) external;
}

impl From<settlement_primitives::Withdrawal> for Withdrawal {
    fn from(value: settlement_primitives::Withdrawal) -> Self {
        Self {
            recipient: value.recipient,
            tokenIndex: value.token_index,
            amount: value.amount,
            nullifier: value.nullifier,
        }
    }
}

impl From<Withdrawal> for settlement_primitives::Withdrawal {
    fn from(value: Withdrawal) -> Self {
        Self {
            recipient: value.recipient,
            token_index: value.tokenIndex,
            amount: value.amount,
            nullifier: value.nullifier,
        }
    }
}

impl processDepositsCall {
    /// Returns a new call relaying the accepted deposit hashes.
    pub fn new(last_processed_deposit_id: u64, deposit_hashes: Vec<B256>) -> Self {
        Self {
            lastProcessedDepositId: U256::from(last_processed_deposit_id),
            depositHashes: deposit_hashes,
        }
    }
}

impl processWithdrawalsCall {
    /// Returns a new call relaying the direct withdrawals and the claimable withdrawal hashes.
    pub fn new(
        last_direct_withdrawal_id: u64,
        withdrawals: Vec<settlement_primitives::Withdrawal>,
        last_claimable_withdrawal_id: u64,
        withdrawal_hashes: Vec<B256>,
    ) -> Self {
        Self {
            lastProcessedDirectWithdrawalId: U256::from(last_direct_withdrawal_id),
            withdrawals: withdrawals.into_iter().map(Into::into).collect(),
            lastProcessedClaimableWithdrawalId: U256::from(last_claimable_withdrawal_id),
            withdrawalHashes: withdrawal_hashes,
        }
    }
}

/// Encodes the calldata of a relayed message, as committed by the messenger.
pub fn encode_relay_message(
    from: Address,
    to: Address,
    value: U256,
    nonce: U256,
    message: Bytes,
) -> Vec<u8> {
    relayMessageCall { from, to, value, nonce, message }.abi_encode()
}

/// A call delivered to a settlement contract over the messenger.
#[derive(Debug, PartialEq, Eq, derive_more::From)]
pub enum CrossDomainCall {
    /// Deposits accepted on the liquidity domain.
    ProcessDeposits(processDepositsCall),
    /// Withdrawals relayed from the rollup domain.
    ProcessWithdrawals(processWithdrawalsCall),
}

impl CrossDomainCall {
    /// Tries to decode the message into a [`CrossDomainCall`].
    pub fn try_decode(message: &[u8]) -> Option<Self> {
        let selector: [u8; 4] = message.get(0..4)?.try_into().ok()?;
        match selector {
            processDepositsCall::SELECTOR => {
                processDepositsCall::abi_decode(message).map(Into::into).ok()
            }
            processWithdrawalsCall::SELECTOR => {
                processWithdrawalsCall::abi_decode(message).map(Into::into).ok()
            }
            _ => None,
        }
    }

    /// Returns the encoded call.
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            Self::ProcessDeposits(call) => call.abi_encode(),
            Self::ProcessWithdrawals(call) => call.abi_encode(),
        }
    }
}
