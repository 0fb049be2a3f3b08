use alloy_primitives::{Address, Bytes, U256};

/// The result of a call into a token contract.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallOutcome {
    /// Whether the call completed without reverting.
    pub success: bool,
    /// The data returned by the call.
    pub return_data: Bytes,
}

impl CallOutcome {
    /// Returns a successful outcome with the given return data.
    pub const fn success(return_data: Bytes) -> Self {
        Self { success: true, return_data }
    }

    /// Returns a reverted outcome.
    pub const fn revert() -> Self {
        Self { success: false, return_data: Bytes::new() }
    }
}

/// The ledger holding the assets custodied by the liquidity contract.
#[auto_impl::auto_impl(&mut, Box)]
pub trait TokenVault {
    /// Moves native currency between accounts. Returns false if the recipient rejected it or
    /// the sender lacks the funds.
    fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Calls a token contract on behalf of `caller`.
    fn call(&mut self, caller: Address, token: Address, calldata: &[u8]) -> CallOutcome;

    /// Returns the fungible token balance of the account.
    fn erc20_balance_of(&self, token: Address, account: Address) -> U256;
}
