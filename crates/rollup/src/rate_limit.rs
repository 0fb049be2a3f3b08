use crate::{
    constants::{DEFAULT_ALPHA, DEFAULT_K, DEFAULT_TARGET_INTERVAL},
    RollupError, FIXED_POINT_ONE,
};

use alloy_primitives::U256;

/// The constants of the [`RateLimiter`], as fixed point numbers scaled by [`FIXED_POINT_ONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateLimitConstants {
    /// The target interval between blocks, in seconds.
    pub target_interval: U256,
    /// The weight of the latest interval in the moving average, below one.
    pub alpha: U256,
    /// The penalty coefficient.
    pub k: U256,
}

impl Default for RateLimitConstants {
    fn default() -> Self {
        Self { target_interval: DEFAULT_TARGET_INTERVAL, alpha: DEFAULT_ALPHA, k: DEFAULT_K }
    }
}

impl RateLimitConstants {
    /// Validates the constants.
    pub fn validate(&self) -> Result<(), RollupError> {
        if self.alpha >= FIXED_POINT_ONE {
            return Err(RollupError::InvalidConstants);
        }
        Ok(())
    }
}

/// Charges a penalty for posting blocks faster than the target interval.
///
/// The limiter tracks an exponential moving average of the intervals between posted blocks.
/// While the average is below the target interval, a block costs
/// `k * (target_interval - average)^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateLimiter {
    constants: RateLimitConstants,
    last_call_time: u64,
    ema_interval: U256,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self {
            constants: RateLimitConstants::default(),
            last_call_time: 0,
            ema_interval: U256::ZERO,
        }
    }
}

impl RateLimiter {
    /// Returns a limiter that has not seen any block.
    pub fn new(constants: RateLimitConstants) -> Result<Self, RollupError> {
        constants.validate()?;
        Ok(Self { constants, last_call_time: 0, ema_interval: U256::ZERO })
    }

    /// Replaces the constants, keeping the moving average.
    pub fn set_constants(&mut self, constants: RateLimitConstants) -> Result<(), RollupError> {
        constants.validate()?;
        self.constants = constants;
        Ok(())
    }

    /// Returns the penalty a block posted at `now` would pay.
    pub fn penalty(&self, now: u64) -> U256 {
        if self.last_call_time == 0 {
            return U256::ZERO;
        }
        self.penalty_for(self.next_ema(now))
    }

    /// Records a block posted at `now` and returns its penalty.
    pub fn update(&mut self, now: u64) -> U256 {
        if self.last_call_time == 0 {
            self.last_call_time = now;
            self.ema_interval = self.constants.target_interval;
            return U256::ZERO;
        }

        self.ema_interval = self.next_ema(now);
        self.last_call_time = now;
        self.penalty_for(self.ema_interval)
    }

    /// Returns the constants.
    pub const fn constants(&self) -> &RateLimitConstants {
        &self.constants
    }

    /// Returns the moving average of the block intervals.
    pub const fn ema_interval(&self) -> U256 {
        self.ema_interval
    }

    /// Returns the time the last block was posted at, zero if none was.
    pub const fn last_call_time(&self) -> u64 {
        self.last_call_time
    }

    fn next_ema(&self, now: u64) -> U256 {
        let RateLimitConstants { alpha, .. } = self.constants;
        let interval = U256::from(now.saturating_sub(self.last_call_time)) * FIXED_POINT_ONE;
        alpha * interval / FIXED_POINT_ONE +
            (FIXED_POINT_ONE - alpha) * self.ema_interval / FIXED_POINT_ONE
    }

    fn penalty_for(&self, ema_interval: U256) -> U256 {
        let RateLimitConstants { target_interval, k, .. } = self.constants;
        if ema_interval >= target_interval {
            return U256::ZERO;
        }
        let deviation = target_interval - ema_interval;
        deviation * k / FIXED_POINT_ONE * deviation / FIXED_POINT_ONE
    }
}
