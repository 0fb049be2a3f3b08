//! The rollup contract of the settlement protocol and the block builder registry.
//!
//! [`Rollup`] accepts posted blocks, folds the deposits relayed from the liquidity domain into
//! the deposit tree and commits both into the block hash chain. [`BlockBuilderRegistry`] keeps
//! track of the staked block builders and slashes them on proven fraud.

pub use block::BlockSubmission;
mod block;

pub use config::{RegistryConfig, RollupConfig};
mod config;

pub use constants::{
    ACCOUNT_ID_BYTES, CHALLENGE_DURATION_SECONDS, DEFAULT_BURN_ADDRESS, FIXED_POINT_ONE,
    MIN_STAKE_AMOUNT,
};
mod constants;

pub use error::{RegistryError, RollupError};
mod error;

pub use event::{RegistryEvent, RollupEvent};
mod event;

mod metrics;

pub use rate_limit::{RateLimitConstants, RateLimiter};
mod rate_limit;

pub use registry::{
    BlockBuilderInfo, BlockBuilderRegistry, RegistryState, SlashOutcome, REGISTRY_STATE_VERSION,
};
mod registry;

pub use rollup::{PostedBlock, Rollup, RollupState, STATE_VERSION};
mod rollup;

use alloy_primitives::Address;
use parking_lot::RwLock;
use settlement_primitives::BlockHashProvider;

/// Provides the builders of posted rollup blocks.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait BlockBuilderProvider: BlockHashProvider {
    /// Returns the builder of the block at the given number, if posted.
    fn block_builder(&self, block_number: u32) -> Option<Address>;
}

impl<T: BlockBuilderProvider> BlockBuilderProvider for RwLock<T> {
    fn block_builder(&self, block_number: u32) -> Option<Address> {
        self.read().block_builder(block_number)
    }
}
