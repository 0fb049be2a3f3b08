use alloy_primitives::{address, uint, Address, U256};

/// The fixed point representation of one used by the rate limiter.
pub const FIXED_POINT_ONE: U256 = uint!(1_000_000_000_000_000_000_U256);

/// The default target interval between blocks, 30 seconds.
pub(crate) const DEFAULT_TARGET_INTERVAL: U256 = uint!(30_000_000_000_000_000_000_U256);

/// The default smoothing factor of the interval average, one third.
pub(crate) const DEFAULT_ALPHA: U256 = uint!(333_333_333_333_333_333_U256);

/// The default penalty coefficient, one thousandth.
pub(crate) const DEFAULT_K: U256 = uint!(1_000_000_000_000_000_U256);

/// The number of bytes a sender account id is packed into.
pub const ACCOUNT_ID_BYTES: usize = 5;

/// The minimum stake of a valid block builder, 0.1 ether.
pub const MIN_STAKE_AMOUNT: U256 = uint!(100_000_000_000_000_000_U256);

/// The time after stopping during which a block builder can still be challenged.
pub const CHALLENGE_DURATION_SECONDS: u64 = 86_400;

/// The address receiving the burned part of a slashed stake.
pub const DEFAULT_BURN_ADDRESS: Address = address!("000000000000000000000000000000000000dEaD");
