use alloy_primitives::{uint, U256};

/// The number of seconds in a day.
pub(crate) const ONE_DAY_SECONDS: u64 = 86_400;

/// The number of days since deployment after which each deposit limit tier applies. After the
/// last period deposits are unlimited.
pub(crate) const LIMIT_PERIOD_DAYS: [u64; 4] = [182, 364, 546, 728];

/// The token index of wrapped bitcoin.
pub const WBTC_TOKEN_INDEX: u32 = 2;

/// The token index of USDC.
pub const USDC_TOKEN_INDEX: u32 = 3;

/// The native currency deposit limit per period.
pub(crate) const ETH_LIMITS: [U256; 4] = [
    uint!(100_000_000_000_000_000_000_U256),
    uint!(500_000_000_000_000_000_000_U256),
    uint!(1_000_000_000_000_000_000_000_U256),
    uint!(5_000_000_000_000_000_000_000_U256),
];

/// The wrapped bitcoin deposit limit per period, in satoshis.
pub(crate) const WBTC_LIMITS: [U256; 4] = [
    uint!(500_000_000_U256),
    uint!(1_000_000_000_U256),
    uint!(5_000_000_000_U256),
    uint!(10_000_000_000_U256),
];

/// The USDC deposit limit per period, with six decimals.
pub(crate) const USDC_LIMITS: [U256; 4] = [
    uint!(500_000_000_000_U256),
    uint!(1_000_000_000_000_U256),
    uint!(5_000_000_000_000_U256),
    uint!(10_000_000_000_000_U256),
];
