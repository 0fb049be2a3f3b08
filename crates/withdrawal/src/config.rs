use crate::WithdrawalError;

use alloy_primitives::{Address, U256};
use std::collections::HashSet;

/// The configuration of the [`crate::Withdrawal`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithdrawalConfig {
    /// The address of the withdrawal contract.
    pub address: Address,
    /// The account allowed to rotate the verifier and manage the direct token indices.
    pub owner: Address,
    /// The messenger carrying relayed withdrawals to the liquidity domain.
    pub messenger: Address,
    /// The liquidity contract paying out the withdrawals.
    pub liquidity: Address,
    /// The rollup contract the withdrawals are proven against.
    pub rollup: Address,
    /// The gas limit of the relay messages.
    pub gas_limit: U256,
    /// The token indices withdrawn directly at initialization.
    pub direct_withdrawal_token_indices: Vec<u32>,
}

impl WithdrawalConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), WithdrawalError> {
        let addresses = [self.address, self.owner, self.messenger, self.liquidity, self.rollup];
        if addresses.iter().any(|address| address.is_zero()) {
            return Err(WithdrawalError::AddressZero);
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) =
            self.direct_withdrawal_token_indices.iter().find(|index| !seen.insert(**index))
        {
            return Err(WithdrawalError::TokenAlreadyExist(*duplicate));
        }
        Ok(())
    }
}
