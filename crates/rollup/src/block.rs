use alloy_primitives::{Address, FixedBytes, B256};
use settlement_primitives::BlockSignContent;

/// The signed header of a block submitted by its builder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockSubmission {
    /// The root of the transaction tree.
    pub tx_tree_root: B256,
    /// The timestamp after which the block can no longer be posted, zero for no expiry.
    pub expiry: u64,
    /// The nonce of the builder, zero to skip the nonce check.
    pub builder_nonce: u32,
    /// The bitmap of senders that signed the block.
    pub sender_flags: FixedBytes<16>,
    /// The aggregated public key.
    pub agg_pubkey: [B256; 2],
    /// The aggregated signature.
    pub agg_signature: [B256; 4],
    /// The message point the signature is checked against.
    pub message_point: [B256; 4],
}

impl BlockSubmission {
    /// Returns the content signed by the senders when `block_builder` posts this block.
    pub(crate) const fn sign_content(
        &self,
        block_builder: Address,
        is_registration_block: bool,
        pubkeys_hash: B256,
        account_ids_hash: B256,
    ) -> BlockSignContent {
        BlockSignContent {
            is_registration_block,
            tx_tree_root: self.tx_tree_root,
            expiry: self.expiry,
            block_builder,
            builder_nonce: self.builder_nonce,
            sender_flags: self.sender_flags,
            pubkeys_hash,
            account_ids_hash,
            agg_pubkey: self.agg_pubkey,
            agg_signature: self.agg_signature,
            message_point: self.message_point,
        }
    }
}
