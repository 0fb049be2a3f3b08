use alloy_primitives::{bytes::BufMut, keccak256, Address, Bytes, FixedBytes, B256, U256};

/// The maximum number of senders in a block.
pub const NUM_SENDERS_IN_BLOCK: usize = 128;

/// The value used to pad the sender public key list.
const PUBKEY_PADDING: U256 = U256::from_limbs([1, 0, 0, 0]);

/// Returns the hash of a block, `keccak256(prev_hash ‖ deposit_tree_root ‖ signature_hash ‖
/// block_number)`.
pub fn block_hash(
    prev_block_hash: B256,
    deposit_tree_root: B256,
    signature_hash: B256,
    block_number: u32,
) -> B256 {
    let mut buf = Vec::with_capacity(32 * 3 + 4);
    buf.put_slice(prev_block_hash.as_slice());
    buf.put_slice(deposit_tree_root.as_slice());
    buf.put_slice(signature_hash.as_slice());
    buf.put_u32(block_number);
    keccak256(buf)
}

/// Returns the hash of the sender public keys padded to [`NUM_SENDERS_IN_BLOCK`] entries.
///
/// The caller is responsible for bounding the list length.
pub fn pubkeys_hash(sender_public_keys: &[U256]) -> B256 {
    let mut buf = Vec::with_capacity(NUM_SENDERS_IN_BLOCK * 32);
    for key in sender_public_keys {
        buf.put_slice(&key.to_be_bytes::<32>());
    }
    for _ in sender_public_keys.len()..NUM_SENDERS_IN_BLOCK {
        buf.put_slice(&PUBKEY_PADDING.to_be_bytes::<32>());
    }
    keccak256(buf)
}

/// Returns the hash of the packed sender account ids.
pub fn account_ids_hash(sender_account_ids: &[u8]) -> B256 {
    keccak256(sender_account_ids)
}

/// The content signed by the senders of a block.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockSignContent {
    /// Whether the block registers its senders.
    pub is_registration_block: bool,
    /// The root of the transaction tree.
    pub tx_tree_root: B256,
    /// The timestamp after which the block can no longer be posted, zero for no expiry.
    pub expiry: u64,
    /// The block builder.
    pub block_builder: Address,
    /// The nonce of the block builder.
    pub builder_nonce: u32,
    /// The bitmap of senders that signed the block.
    pub sender_flags: FixedBytes<16>,
    /// The hash of the sender public keys.
    pub pubkeys_hash: B256,
    /// The hash of the sender account ids.
    pub account_ids_hash: B256,
    /// The aggregated public key.
    pub agg_pubkey: [B256; 2],
    /// The aggregated signature.
    pub agg_signature: [B256; 4],
    /// The message point the signature is checked against.
    pub message_point: [B256; 4],
}

impl BlockSignContent {
    /// Returns the signature hash committed into the block hash.
    pub fn signature_hash(&self) -> B256 {
        let mut buf = Vec::with_capacity(4 + 32 + 8 + 20 + 4 + 16 + 32 * 12);
        buf.put_u32(u32::from(self.is_registration_block));
        buf.put_slice(self.tx_tree_root.as_slice());
        buf.put_u64(self.expiry);
        buf.put_slice(self.block_builder.as_slice());
        buf.put_u32(self.builder_nonce);
        buf.put_slice(self.sender_flags.as_slice());
        buf.put_slice(self.pubkeys_hash.as_slice());
        buf.put_slice(self.account_ids_hash.as_slice());
        for word in self.agg_pubkey.iter().chain(&self.agg_signature).chain(&self.message_point) {
            buf.put_slice(word.as_slice());
        }
        keccak256(buf)
    }
}

/// A posted block with everything needed to recompute its hash.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FullBlock {
    /// The hash of the previous block.
    pub prev_block_hash: B256,
    /// The deposit tree root at the time the block was posted.
    pub deposit_tree_root: B256,
    /// The signature hash of the block.
    pub signature_hash: B256,
    /// The timestamp the block was posted at.
    pub timestamp: u64,
    /// The number of the block.
    pub block_number: u32,
    /// The signed content.
    pub sign_content: BlockSignContent,
    /// The sender public keys of a registration block.
    pub sender_public_keys: Option<Vec<U256>>,
    /// The packed sender account ids of a non-registration block.
    pub sender_account_ids: Option<Bytes>,
}

impl FullBlock {
    /// Returns the block hash recomputed from the stored fields.
    pub fn hash(&self) -> B256 {
        block_hash(
            self.prev_block_hash,
            self.deposit_tree_root,
            self.signature_hash,
            self.block_number,
        )
    }

    /// Returns true if the signed content and sender lists reproduce the stored signature hash.
    pub fn is_consistent(&self) -> bool {
        let senders_match = match (&self.sender_public_keys, &self.sender_account_ids) {
            (Some(keys), None) => {
                self.sign_content.is_registration_block &&
                    pubkeys_hash(keys) == self.sign_content.pubkeys_hash
            }
            (None, Some(ids)) => {
                !self.sign_content.is_registration_block &&
                    account_ids_hash(ids) == self.sign_content.account_ids_hash
            }
            _ => false,
        };
        senders_match && self.sign_content.signature_hash() == self.signature_hash
    }
}
