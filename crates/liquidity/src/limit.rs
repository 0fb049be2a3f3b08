use crate::constants::{
    ETH_LIMITS, LIMIT_PERIOD_DAYS, ONE_DAY_SECONDS, USDC_LIMITS, USDC_TOKEN_INDEX, WBTC_LIMITS,
    WBTC_TOKEN_INDEX,
};

use alloy_primitives::U256;
use settlement_primitives::NATIVE_TOKEN_INDEX;

/// Returns the maximum amount of a single deposit of the token at `timestamp`.
///
/// Limits step up with the number of days elapsed since `deployment_time` and disappear after
/// the last period. Tokens without a tier table are unlimited. A timestamp before the
/// deployment gets the first tier.
pub fn deposit_limit(token_index: u32, deployment_time: u64, timestamp: u64) -> U256 {
    let limits = match token_index {
        NATIVE_TOKEN_INDEX => &ETH_LIMITS,
        WBTC_TOKEN_INDEX => &WBTC_LIMITS,
        USDC_TOKEN_INDEX => &USDC_LIMITS,
        _ => return U256::MAX,
    };

    let days = timestamp.saturating_sub(deployment_time) / ONE_DAY_SECONDS;
    match LIMIT_PERIOD_DAYS.iter().rposition(|&period| days >= period) {
        Some(3) => U256::MAX,
        Some(period) => limits[period + 1],
        None => limits[0],
    }
}
