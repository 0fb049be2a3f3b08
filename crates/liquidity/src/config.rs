use crate::LiquidityError;

use alloy_primitives::Address;

/// The configuration of the [`crate::Liquidity`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiquidityConfig {
    /// The address of the liquidity contract.
    pub address: Address,
    /// The account allowed to pause and unpause deposits.
    pub admin: Address,
    /// The account allowed to analyze and relay deposits.
    pub analyzer: Address,
    /// The messenger delivering messages from the rollup domain.
    pub messenger: Address,
    /// The rollup contract receiving the relayed deposits.
    pub rollup: Address,
    /// The withdrawal contract allowed to relay withdrawals.
    pub withdrawal: Address,
    /// The fungible tokens registered at initialization, from token index 1 onwards.
    pub initial_erc20_tokens: Vec<Address>,
    /// The deployment timestamp the deposit limits are computed from.
    pub deployment_time: u64,
}

impl LiquidityConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), LiquidityError> {
        let addresses =
            [self.address, self.admin, self.analyzer, self.messenger, self.rollup, self.withdrawal];
        if addresses.iter().any(|address| address.is_zero()) {
            return Err(LiquidityError::AddressZero);
        }
        if self.initial_erc20_tokens.iter().any(|address| address.is_zero()) {
            return Err(LiquidityError::InvalidTokenAddress);
        }
        Ok(())
    }
}
