//! The withdrawal contract of the settlement protocol.
//!
//! [`Withdrawal`] accepts proven withdrawal batches on the rollup domain, splits them into
//! direct withdrawals paid out automatically and claimable withdrawals the recipient pulls, and
//! relays both queues to the liquidity domain.

pub use config::WithdrawalConfig;
mod config;

pub use error::WithdrawalError;
mod error;

pub use event::WithdrawalEvent;
mod event;

mod metrics;

pub use withdrawal::{Withdrawal, WithdrawalState, STATE_VERSION};
mod withdrawal;
