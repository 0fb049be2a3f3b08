use crate::{RateLimitConstants, RegistryError, RollupError};

use alloy_primitives::Address;

/// The configuration of the [`crate::Rollup`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollupConfig {
    /// The address of the rollup contract.
    pub address: Address,
    /// The account allowed to tune the rate limiter and withdraw penalty fees.
    pub owner: Address,
    /// The messenger delivering messages from the liquidity domain.
    pub messenger: Address,
    /// The liquidity contract allowed to relay deposits.
    pub liquidity: Address,
    /// The constants of the block rate limiter.
    pub rate_limit: RateLimitConstants,
}

impl RollupConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RollupError> {
        let addresses = [self.address, self.owner, self.messenger, self.liquidity];
        if addresses.iter().any(|address| address.is_zero()) {
            return Err(RollupError::AddressZero);
        }
        self.rate_limit.validate()
    }
}

/// The configuration of the [`crate::BlockBuilderRegistry`] contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    /// The address of the registry contract.
    pub address: Address,
    /// The account allowed to submit fraud proofs and set the burn address.
    pub owner: Address,
    /// The rollup contract the challenged blocks are read from.
    pub rollup: Address,
}

impl RegistryConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if [self.address, self.owner, self.rollup].iter().any(|address| address.is_zero()) {
            return Err(RegistryError::AddressZero);
        }
        Ok(())
    }
}
