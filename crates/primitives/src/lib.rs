//! Primitive types shared by the settlement contracts on both domains.

pub use block::{
    account_ids_hash, block_hash, pubkeys_hash, BlockSignContent, FullBlock, NUM_SENDERS_IN_BLOCK,
};
mod block;

pub use chain::{chain_hash, verify_chain, Chained};
mod chain;

pub use claim::{ChainedClaim, ClaimProofPublicInputs};
mod claim;

pub use context::CallContext;
mod context;

pub use deposit::{Deposit, DepositData};
mod deposit;

pub use fraud::FraudProofPublicInputs;
mod fraud;

pub use token::{TokenInfo, TokenType, NATIVE_TOKEN_INDEX};
mod token;

pub use verifier::{BlockHashProvider, PairingVerifier, ProofVerifier};
mod verifier;

pub use withdrawal::{ChainedWithdrawal, Withdrawal, WithdrawalProofPublicInputs};
mod withdrawal;

/// Test utilities for the settlement crates.
#[cfg(feature = "test-utils")]
pub mod test_utils;
