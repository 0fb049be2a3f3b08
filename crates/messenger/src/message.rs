use crate::abi::encode_relay_message;

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};

/// A message committed by the sending domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossDomainMessage {
    /// The contract that sent the message.
    pub sender: Address,
    /// The contract the message is addressed to.
    pub target: Address,
    /// The native value transferred with the message.
    pub value: U256,
    /// The nonce of the message in the sending domain.
    pub nonce: U256,
    /// The calldata delivered to the target.
    pub message: Bytes,
    /// The gas limit for executing the message.
    pub gas_limit: U256,
}

impl CrossDomainMessage {
    /// Returns the hash identifying the message on both domains.
    pub fn hash(&self) -> B256 {
        keccak256(encode_relay_message(
            self.sender,
            self.target,
            self.value,
            self.nonce,
            self.message.clone(),
        ))
    }
}

/// The receipt of a committed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    /// The nonce of the message.
    pub nonce: U256,
    /// The hash of the message.
    pub hash: B256,
    /// The relay fee charged.
    pub fee: U256,
    /// The part of the attached value returned to the sender.
    pub refund: U256,
}

/// The context a relayed message executes in on the receiving domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XDomainContext {
    /// The immediate caller, the messenger of the receiving domain.
    pub caller: Address,
    /// The sender on the other domain, as attested by the messenger.
    pub x_domain_message_sender: Address,
    /// The native value transferred with the message.
    pub value: U256,
}
