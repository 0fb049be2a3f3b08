//! The liquidity contract of the settlement protocol.
//!
//! [`Liquidity`] custodies the assets deposited on the liquidity domain, relays the accepted
//! deposits to the rollup domain and pays out the withdrawals relayed back.

pub use config::LiquidityConfig;
mod config;

pub use constants::{USDC_TOKEN_INDEX, WBTC_TOKEN_INDEX};
mod constants;

pub use error::{LiquidityError, Role};
mod error;

pub use event::LiquidityEvent;
mod event;

pub use limit::deposit_limit;
mod limit;

pub use liquidity::{Liquidity, LiquidityState, STATE_VERSION};
mod liquidity;

mod metrics;

pub use token::TokenData;
mod token;

pub mod transfer;

pub use vault::{CallOutcome, TokenVault};
mod vault;

/// Test utilities for the liquidity contract.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
