use alloy_primitives::{Address, U256};

/// The token index of the native currency.
pub const NATIVE_TOKEN_INDEX: u32 = 0;

/// The kind of asset a token index refers to.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum TokenType {
    /// The native currency of the liquidity domain.
    #[default]
    #[display("native")]
    Native,
    /// A fungible token.
    #[display("erc20")]
    Erc20,
    /// A non-fungible token.
    #[display("erc721")]
    Erc721,
    /// A multi token.
    #[display("erc1155")]
    Erc1155,
}

impl TokenType {
    /// Returns true if tokens of this type are identified by a token id.
    pub const fn has_token_id(&self) -> bool {
        matches!(self, Self::Erc721 | Self::Erc1155)
    }
}

/// The asset a token index refers to.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct TokenInfo {
    /// The kind of asset.
    pub token_type: TokenType,
    /// The token contract, zero for the native currency.
    pub token_address: Address,
    /// The token id, zero for fungible tokens.
    pub token_id: U256,
}

impl TokenInfo {
    /// Returns the [`TokenInfo`] of the native currency.
    pub const fn native() -> Self {
        Self { token_type: TokenType::Native, token_address: Address::ZERO, token_id: U256::ZERO }
    }

    /// Returns a new [`TokenInfo`].
    pub const fn new(token_type: TokenType, token_address: Address, token_id: U256) -> Self {
        Self { token_type, token_address, token_id }
    }
}
