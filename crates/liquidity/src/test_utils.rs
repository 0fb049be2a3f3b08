use crate::{
    transfer::{IERC1155, IERC20, IERC721},
    CallOutcome, TokenVault,
};

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use std::collections::{HashMap, HashSet};

/// The behavior of a mocked fungible token.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Erc20Mode {
    /// Moves the funds and returns `true`.
    #[default]
    Standard,
    /// Moves the funds and returns nothing.
    NoReturnValue,
    /// Moves nothing and returns `false`.
    ReturnsFalse,
    /// Moves nothing and returns nothing.
    SilentNoop,
    /// Reverts every transfer.
    Reverts,
}

/// An in-memory ledger of native and token balances.
///
/// Allowances are not tracked: a `transferFrom` succeeds whenever the owner holds the funds.
#[derive(Debug, Default, Clone)]
pub struct MockVault {
    native: HashMap<Address, U256>,
    erc20: HashMap<(Address, Address), U256>,
    erc20_modes: HashMap<Address, Erc20Mode>,
    erc721_owners: HashMap<(Address, U256), Address>,
    erc1155: HashMap<(Address, U256, Address), U256>,
    rejecting: HashSet<Address>,
}

impl MockVault {
    /// Credits native currency to the account.
    pub fn mint_native(&mut self, account: Address, amount: U256) {
        *self.native.entry(account).or_default() += amount;
    }

    /// Returns the native balance of the account.
    pub fn native_balance(&self, account: Address) -> U256 {
        self.native.get(&account).copied().unwrap_or_default()
    }

    /// Credits fungible tokens to the account.
    pub fn mint_erc20(&mut self, token: Address, account: Address, amount: U256) {
        *self.erc20.entry((token, account)).or_default() += amount;
    }

    /// Sets the behavior of the fungible token.
    pub fn set_erc20_mode(&mut self, token: Address, mode: Erc20Mode) {
        self.erc20_modes.insert(token, mode);
    }

    /// Assigns a non-fungible token to the owner.
    pub fn mint_erc721(&mut self, token: Address, token_id: U256, owner: Address) {
        self.erc721_owners.insert((token, token_id), owner);
    }

    /// Returns the owner of a non-fungible token.
    pub fn erc721_owner(&self, token: Address, token_id: U256) -> Option<Address> {
        self.erc721_owners.get(&(token, token_id)).copied()
    }

    /// Credits multi tokens to the account.
    pub fn mint_erc1155(&mut self, token: Address, token_id: U256, account: Address, amount: U256) {
        *self.erc1155.entry((token, token_id, account)).or_default() += amount;
    }

    /// Returns the multi token balance of the account.
    pub fn erc1155_balance(&self, token: Address, token_id: U256, account: Address) -> U256 {
        self.erc1155.get(&(token, token_id, account)).copied().unwrap_or_default()
    }

    /// Makes the account reject native currency and safe token transfers.
    pub fn reject_transfers_to(&mut self, account: Address) {
        self.rejecting.insert(account);
    }

    /// Makes the account accept transfers again.
    pub fn accept_transfers_to(&mut self, account: Address) {
        self.rejecting.remove(&account);
    }

    fn move_erc20(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> CallOutcome {
        let mode = self.erc20_modes.get(&token).copied().unwrap_or_default();
        let moved = match mode {
            Erc20Mode::Reverts => return CallOutcome::revert(),
            Erc20Mode::ReturnsFalse => return CallOutcome::success(encode_bool(false)),
            Erc20Mode::SilentNoop => return CallOutcome::success(Bytes::new()),
            Erc20Mode::Standard => encode_bool(true),
            Erc20Mode::NoReturnValue => Bytes::new(),
        };

        let balance = self.erc20_balance_of(token, from);
        if balance < amount {
            return CallOutcome::revert();
        }
        self.erc20.insert((token, from), balance - amount);
        *self.erc20.entry((token, to)).or_default() += amount;
        CallOutcome::success(moved)
    }

    fn move_erc721(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> CallOutcome {
        if self.rejecting.contains(&to) || self.erc721_owner(token, token_id) != Some(from) {
            return CallOutcome::revert();
        }
        self.erc721_owners.insert((token, token_id), to);
        CallOutcome::success(Bytes::new())
    }

    fn move_erc1155(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        token_id: U256,
        amount: U256,
    ) -> CallOutcome {
        let balance = self.erc1155_balance(token, token_id, from);
        if self.rejecting.contains(&to) || balance < amount {
            return CallOutcome::revert();
        }
        self.erc1155.insert((token, token_id, from), balance - amount);
        *self.erc1155.entry((token, token_id, to)).or_default() += amount;
        CallOutcome::success(Bytes::new())
    }
}

impl TokenVault for MockVault {
    fn transfer_native(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let balance = self.native_balance(from);
        if self.rejecting.contains(&to) || balance < amount {
            return false;
        }
        self.native.insert(from, balance - amount);
        *self.native.entry(to).or_default() += amount;
        true
    }

    fn call(&mut self, caller: Address, token: Address, calldata: &[u8]) -> CallOutcome {
        let Some(selector) = calldata.get(0..4).and_then(|s| <[u8; 4]>::try_from(s).ok()) else {
            return CallOutcome::revert();
        };

        match selector {
            IERC20::transferCall::SELECTOR => match IERC20::transferCall::abi_decode(calldata) {
                Ok(call) => self.move_erc20(token, caller, call.to, call.amount),
                Err(_) => CallOutcome::revert(),
            },
            IERC20::transferFromCall::SELECTOR => {
                match IERC20::transferFromCall::abi_decode(calldata) {
                    Ok(call) => self.move_erc20(token, call.from, call.to, call.amount),
                    Err(_) => CallOutcome::revert(),
                }
            }
            IERC721::safeTransferFromCall::SELECTOR => {
                match IERC721::safeTransferFromCall::abi_decode(calldata) {
                    Ok(call) => self.move_erc721(token, call.from, call.to, call.tokenId),
                    Err(_) => CallOutcome::revert(),
                }
            }
            IERC1155::safeTransferFromCall::SELECTOR => {
                match IERC1155::safeTransferFromCall::abi_decode(calldata) {
                    Ok(call) => self.move_erc1155(token, call.from, call.to, call.id, call.value),
                    Err(_) => CallOutcome::revert(),
                }
            }
            _ => CallOutcome::revert(),
        }
    }

    fn erc20_balance_of(&self, token: Address, account: Address) -> U256 {
        self.erc20.get(&(token, account)).copied().unwrap_or_default()
    }
}

fn encode_bool(value: bool) -> Bytes {
    Bytes::from(U256::from(value).to_be_bytes_vec())
}
