//! Token transfers issued by the liquidity contract.
//!
//! Fungible transfers follow the call-optional policy: a transfer succeeded if the call did not
//! revert and either returned `true`, or returned nothing and moved exactly `amount` to the
//! recipient. Tokens that return nothing are therefore supported, but only when the balance
//! change confirms the transfer.

use crate::TokenVault;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, sol_data, SolCall, SolType};

sol! {
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);
    }

    interface IERC721 {
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
    }

    interface IERC1155 {
        function safeTransferFrom(
            address from,
            address to,
            uint256 id,
            uint256 value,
            bytes data
        ) external;
    }
}

/// Transfers fungible tokens held by `caller` to `to`.
pub fn transfer<V: TokenVault>(
    vault: &mut V,
    caller: Address,
    token: Address,
    to: Address,
    amount: U256,
) -> bool {
    let calldata = IERC20::transferCall { to, amount }.abi_encode();
    call_optional_return(vault, caller, token, to, amount, &calldata)
}

/// Transfers fungible tokens from `from` to `to` using the allowance of `caller`.
pub fn transfer_from<V: TokenVault>(
    vault: &mut V,
    caller: Address,
    token: Address,
    from: Address,
    to: Address,
    amount: U256,
) -> bool {
    let calldata = IERC20::transferFromCall { from, to, amount }.abi_encode();
    call_optional_return(vault, caller, token, to, amount, &calldata)
}

/// Transfers a non-fungible token. Succeeds if the call did not revert.
pub fn transfer_erc721<V: TokenVault>(
    vault: &mut V,
    caller: Address,
    token: Address,
    from: Address,
    to: Address,
    token_id: U256,
) -> bool {
    let calldata = IERC721::safeTransferFromCall { from, to, tokenId: token_id }.abi_encode();
    vault.call(caller, token, &calldata).success
}

/// Transfers multi tokens. Succeeds if the call did not revert.
pub fn transfer_erc1155<V: TokenVault>(
    vault: &mut V,
    caller: Address,
    token: Address,
    from: Address,
    to: Address,
    token_id: U256,
    amount: U256,
) -> bool {
    let calldata = IERC1155::safeTransferFromCall {
        from,
        to,
        id: token_id,
        value: amount,
        data: Bytes::new(),
    }
    .abi_encode();
    vault.call(caller, token, &calldata).success
}

fn call_optional_return<V: TokenVault>(
    vault: &mut V,
    caller: Address,
    token: Address,
    recipient: Address,
    amount: U256,
    calldata: &[u8],
) -> bool {
    if token.is_zero() {
        return false;
    }

    let balance_before = vault.erc20_balance_of(token, recipient);
    let outcome = vault.call(caller, token, calldata);
    if !outcome.success {
        return false;
    }
    if outcome.return_data.is_empty() {
        let balance_after = vault.erc20_balance_of(token, recipient);
        return balance_after.checked_sub(balance_before) == Some(amount);
    }
    sol_data::Bool::abi_decode(&outcome.return_data).unwrap_or(false)
}
