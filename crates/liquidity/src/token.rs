use crate::LiquidityError;

use alloy_primitives::{Address, U256};
use settlement_primitives::{TokenInfo, TokenType};
use std::collections::HashMap;

/// The registry assigning token indices to deposited assets.
///
/// The native currency always has index 0. Fungible tokens are identified by their address,
/// non-fungible and multi tokens by their address and token id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenData {
    tokens: Vec<TokenInfo>,
    indices: HashMap<TokenInfo, u32>,
}

impl Default for TokenData {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenData {
    /// Returns a registry holding only the native currency.
    pub fn new() -> Self {
        let native = TokenInfo::native();
        Self { tokens: vec![native], indices: HashMap::from([(native, 0)]) }
    }

    /// Returns a registry with the given fungible tokens registered from index 1 onwards.
    pub fn with_erc20_tokens(addresses: &[Address]) -> Result<Self, LiquidityError> {
        let mut token_data = Self::new();
        for &address in addresses {
            token_data.get_or_create_token_index(TokenType::Erc20, address, U256::ZERO)?;
        }
        Ok(token_data)
    }

    /// Returns the index of the token, if registered.
    pub fn get_token_index(
        &self,
        token_type: TokenType,
        token_address: Address,
        token_id: U256,
    ) -> Result<Option<u32>, LiquidityError> {
        let info = Self::token_info(token_type, token_address, token_id)?;
        Ok(self.indices.get(&info).copied())
    }

    /// Returns the index of the token, registering it if needed.
    pub fn get_or_create_token_index(
        &mut self,
        token_type: TokenType,
        token_address: Address,
        token_id: U256,
    ) -> Result<u32, LiquidityError> {
        let info = Self::token_info(token_type, token_address, token_id)?;
        if let Some(&index) = self.indices.get(&info) {
            return Ok(index);
        }

        let index = self.next_token_index();
        self.tokens.push(info);
        self.indices.insert(info, index);
        tracing::debug!(
            target: "settlement::liquidity",
            %token_type,
            %token_address,
            index,
            "registered token"
        );
        Ok(index)
    }

    /// Returns the token registered at the index.
    pub fn get_token_info(&self, token_index: u32) -> Result<TokenInfo, LiquidityError> {
        self.tokens
            .get(token_index as usize)
            .copied()
            .ok_or(LiquidityError::TokenIndexNotFound(token_index))
    }

    /// Returns the index the next registered token gets.
    pub fn next_token_index(&self) -> u32 {
        self.tokens.len() as u32
    }

    fn token_info(
        token_type: TokenType,
        token_address: Address,
        token_id: U256,
    ) -> Result<TokenInfo, LiquidityError> {
        if token_type == TokenType::Native {
            return Ok(TokenInfo::native());
        }
        if token_address.is_zero() {
            return Err(LiquidityError::InvalidTokenAddress);
        }
        let token_id = if token_type.has_token_id() { token_id } else { U256::ZERO };
        Ok(TokenInfo::new(token_type, token_address, token_id))
    }
}
