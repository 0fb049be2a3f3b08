use crate::{
    metrics::RollupMetrics, BlockBuilderProvider, BlockSubmission, RateLimitConstants,
    RateLimiter, RollupConfig, RollupError, RollupEvent, ACCOUNT_ID_BYTES,
};

use alloy_primitives::{Address, Bytes, B256, U256};
use settlement_messenger::{CrossDomainCall, MessageReceiver, XDomainContext};
use settlement_primitives::{
    account_ids_hash, pubkeys_hash, BlockHashProvider, BlockSignContent, CallContext, FullBlock,
    PairingVerifier, NUM_SENDERS_IN_BLOCK,
};
use settlement_tree::{BlockHashChain, DepositTree, DepositTreeError, MAX_DEPOSIT_COUNT};
use std::collections::HashMap;

/// The version of the [`RollupState`] layout.
pub const STATE_VERSION: u8 = 1;

/// The persistent state of the [`Rollup`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollupState {
    /// The version of the state layout.
    pub version: u8,
    /// The configuration, set on initialization.
    pub config: Option<RollupConfig>,
    /// The tree of the deposits relayed from the liquidity domain.
    pub deposit_tree: DepositTree,
    /// The hashes of the posted blocks.
    pub block_hash_chain: BlockHashChain,
    /// The builder of every posted block, indexed by block number.
    pub block_builders: Vec<Address>,
    /// The next registration block nonce of each builder.
    pub registration_nonces: HashMap<Address, u32>,
    /// The next non-registration block nonce of each builder.
    pub non_registration_nonces: HashMap<Address, u32>,
    /// The block rate limiter.
    pub rate_limiter: RateLimiter,
    /// The penalty fees collected and not yet withdrawn.
    pub collected_penalty_fees: U256,
    /// The id of the last deposit inserted into the deposit tree.
    pub last_processed_deposit_id: u64,
}

impl Default for RollupState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            config: None,
            deposit_tree: DepositTree::new(),
            block_hash_chain: BlockHashChain::new(),
            block_builders: Vec::new(),
            registration_nonces: HashMap::new(),
            non_registration_nonces: HashMap::new(),
            rate_limiter: RateLimiter::default(),
            collected_penalty_fees: U256::ZERO,
            last_processed_deposit_id: 0,
        }
    }
}

impl RollupState {
    /// Migrates the state to [`STATE_VERSION`].
    pub fn migrate(self) -> Result<Self, RollupError> {
        match self.version {
            STATE_VERSION => Ok(self),
            version => Err(RollupError::UnsupportedStateVersion(version)),
        }
    }
}

/// A block accepted by the [`Rollup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedBlock {
    /// The hash of the block.
    pub block_hash: B256,
    /// Everything needed to recompute the block hash.
    pub block: FullBlock,
    /// The rate limit penalty kept by the rollup.
    pub penalty_fee: U256,
    /// The part of the attached value returned to the builder.
    pub refund: U256,
}

/// The contract accepting blocks and deposits on the rollup domain.
///
/// Every posted block commits the current deposit tree root and the signature hash of its
/// senders into the block hash chain.
#[derive(Debug)]
pub struct Rollup<P> {
    state: RollupState,
    pairing_verifier: P,
    events: Vec<RollupEvent>,
    metrics: RollupMetrics,
}

impl<P: PairingVerifier> Rollup<P> {
    /// Returns a new, uninitialized contract.
    pub fn new(pairing_verifier: P) -> Self {
        Self::with_state(RollupState::default(), pairing_verifier)
    }

    /// Returns a contract resuming from a previously persisted state.
    pub fn from_state(state: RollupState, pairing_verifier: P) -> Result<Self, RollupError> {
        Ok(Self::with_state(state.migrate()?, pairing_verifier))
    }

    fn with_state(state: RollupState, pairing_verifier: P) -> Self {
        Self { state, pairing_verifier, events: Vec::new(), metrics: RollupMetrics::default() }
    }

    /// Consumes the contract and returns its state.
    pub fn into_state(self) -> RollupState {
        self.state
    }

    /// Initializes the contract and pushes the genesis block. Can only be called once.
    pub fn initialize(&mut self, config: RollupConfig) -> Result<(), RollupError> {
        if self.state.config.is_some() {
            return Err(RollupError::AlreadyInitialized);
        }
        config.validate()?;

        self.state.rate_limiter = RateLimiter::new(config.rate_limit)?;
        let deposit_tree_root = self.state.deposit_tree.root();
        let genesis = self.state.block_hash_chain.push_genesis_block_hash(deposit_tree_root)?;
        self.state.block_builders.push(Address::ZERO);

        tracing::info!(
            target: "settlement::rollup",
            address = %config.address,
            ?genesis,
            "initialized rollup"
        );
        self.state.config = Some(config);
        Ok(())
    }

    /// Posts a block registering the public keys of its senders.
    ///
    /// The value attached to the call pays the rate limit penalty, the excess is refunded.
    pub fn post_registration_block(
        &mut self,
        ctx: &CallContext,
        submission: BlockSubmission,
        sender_public_keys: Vec<U256>,
    ) -> Result<PostedBlock, RollupError> {
        self.config()?;
        if sender_public_keys.len() > NUM_SENDERS_IN_BLOCK {
            return Err(RollupError::TooManySenderPublicKeys(sender_public_keys.len()));
        }

        let sign_content = submission.sign_content(
            ctx.sender,
            true,
            pubkeys_hash(&sender_public_keys),
            B256::ZERO,
        );
        let block = FullBlock {
            sign_content,
            sender_public_keys: Some(sender_public_keys),
            ..Default::default()
        };
        self.post_block(ctx, block)
    }

    /// Posts a block whose senders are referenced by their account ids.
    ///
    /// `sender_account_ids` packs each id into [`ACCOUNT_ID_BYTES`] bytes.
    pub fn post_non_registration_block(
        &mut self,
        ctx: &CallContext,
        submission: BlockSubmission,
        public_keys_hash: B256,
        sender_account_ids: Bytes,
    ) -> Result<PostedBlock, RollupError> {
        self.config()?;
        let len = sender_account_ids.len();
        if len % ACCOUNT_ID_BYTES != 0 {
            return Err(RollupError::SenderAccountIdsInvalidLength(len));
        }
        if len / ACCOUNT_ID_BYTES > NUM_SENDERS_IN_BLOCK {
            return Err(RollupError::TooManyAccountIds(len / ACCOUNT_ID_BYTES));
        }

        let sign_content = submission.sign_content(
            ctx.sender,
            false,
            public_keys_hash,
            account_ids_hash(&sender_account_ids),
        );
        let block = FullBlock {
            sign_content,
            sender_account_ids: Some(sender_account_ids),
            ..Default::default()
        };
        self.post_block(ctx, block)
    }

    fn post_block(
        &mut self,
        ctx: &CallContext,
        mut block: FullBlock,
    ) -> Result<PostedBlock, RollupError> {
        let BlockSignContent {
            is_registration_block,
            expiry,
            block_builder,
            builder_nonce,
            ..
        } = block.sign_content;
        if expiry != 0 && expiry < ctx.timestamp {
            return Err(RollupError::Expired { expiry, timestamp: ctx.timestamp });
        }

        let expected = self.builder_nonce(block_builder, is_registration_block);
        if builder_nonce != 0 && builder_nonce < expected {
            return Err(RollupError::InvalidNonce { expected, given: builder_nonce });
        }

        let penalty_fee = self.state.rate_limiter.penalty(ctx.timestamp);
        if ctx.value < penalty_fee {
            return Err(RollupError::InsufficientPenaltyFee {
                required: penalty_fee,
                provided: ctx.value,
            });
        }

        let sign_content = &block.sign_content;
        if !self.pairing_verifier.pairing(
            &sign_content.agg_pubkey,
            &sign_content.agg_signature,
            &sign_content.message_point,
        ) {
            return Err(RollupError::PairingCheckFailed);
        }

        let chain = &self.state.block_hash_chain;
        block.prev_block_hash = chain.prev_hash()?;
        block.block_number = chain.block_number()?;
        block.deposit_tree_root = self.state.deposit_tree.root();
        block.signature_hash = sign_content.signature_hash();
        block.timestamp = ctx.timestamp;

        self.state.rate_limiter.update(ctx.timestamp);
        self.state.collected_penalty_fees += penalty_fee;
        if builder_nonce != 0 {
            let nonces = if is_registration_block {
                &mut self.state.registration_nonces
            } else {
                &mut self.state.non_registration_nonces
            };
            nonces.insert(block_builder, builder_nonce.saturating_add(1));
        }
        let block_hash = self
            .state
            .block_hash_chain
            .push_block_hash(block.deposit_tree_root, block.signature_hash)?;
        self.state.block_builders.push(block_builder);

        if is_registration_block {
            self.metrics.registration_blocks.increment(1);
        } else {
            self.metrics.non_registration_blocks.increment(1);
        }
        if !penalty_fee.is_zero() {
            self.metrics.penalized_blocks.increment(1);
        }
        tracing::info!(
            target: "settlement::rollup",
            block_number = block.block_number,
            %block_builder,
            ?block_hash,
            %penalty_fee,
            "posted block"
        );
        self.events.push(RollupEvent::BlockPosted {
            prev_block_hash: block.prev_block_hash,
            block_builder,
            timestamp: block.timestamp,
            block_number: block.block_number,
            deposit_tree_root: block.deposit_tree_root,
            signature_hash: block.signature_hash,
        });

        Ok(PostedBlock { block_hash, block, penalty_fee, refund: ctx.value - penalty_fee })
    }

    /// Inserts the deposits relayed from the liquidity domain into the deposit tree.
    ///
    /// `deposit_hashes` are the accepted deposits among the ids following the last processed
    /// one up to `last_processed_deposit_id`. A batch that does not advance the last processed
    /// deposit id is rejected, so a redelivered batch inserts nothing. Batches carry no first
    /// id, so insertion order relies on the messenger relaying them in nonce order.
    pub fn process_deposits(
        &mut self,
        ctx: &XDomainContext,
        last_processed_deposit_id: u64,
        deposit_hashes: Vec<B256>,
    ) -> Result<(), RollupError> {
        let config = self.config()?;
        if ctx.caller != config.messenger {
            return Err(RollupError::SenderIsNotMessenger(ctx.caller));
        }
        if ctx.x_domain_message_sender != config.liquidity {
            return Err(RollupError::SenderIsNotLiquidity(ctx.x_domain_message_sender));
        }

        let last_processed = self.state.last_processed_deposit_id;
        if last_processed_deposit_id <= last_processed {
            return Err(RollupError::StaleDepositBatch {
                given: last_processed_deposit_id,
                last_processed,
            });
        }
        let id_range = last_processed_deposit_id - last_processed;
        if deposit_hashes.len() as u64 > id_range {
            return Err(RollupError::DepositBatchLengthMismatch {
                len: deposit_hashes.len(),
                id_range,
            });
        }
        let deposit_count = u64::from(self.state.deposit_tree.deposit_count());
        if deposit_count + deposit_hashes.len() as u64 > u64::from(MAX_DEPOSIT_COUNT) {
            return Err(DepositTreeError::MerkleTreeFull.into());
        }

        let inserted = deposit_hashes.len();
        for deposit_hash in deposit_hashes {
            let deposit_index = self.state.deposit_tree.deposit_count();
            self.state.deposit_tree.deposit(deposit_hash)?;
            self.events.push(RollupEvent::DepositLeafInserted { deposit_index, deposit_hash });
        }
        self.state.last_processed_deposit_id = last_processed_deposit_id;

        let deposit_tree_root = self.state.deposit_tree.root();
        self.metrics.deposits_processed.increment(inserted as u64);
        tracing::info!(
            target: "settlement::rollup",
            last_processed_deposit_id,
            inserted,
            ?deposit_tree_root,
            "processed deposits"
        );
        self.events
            .push(RollupEvent::DepositsProcessed { last_processed_deposit_id, deposit_tree_root });
        Ok(())
    }

    /// Replaces the rate limit constants.
    pub fn set_rate_limit_constants(
        &mut self,
        ctx: &CallContext,
        constants: RateLimitConstants,
    ) -> Result<(), RollupError> {
        self.ensure_owner(ctx.sender)?;
        self.state.rate_limiter.set_constants(constants)?;

        let RateLimitConstants { target_interval, alpha, k } = constants;
        tracing::info!(
            target: "settlement::rollup",
            %target_interval,
            %alpha,
            %k,
            "updated rate limit constants"
        );
        self.events.push(RollupEvent::RateLimitConstantsUpdated { target_interval, alpha, k });
        Ok(())
    }

    /// Withdraws the collected penalty fees and returns the withdrawn amount.
    pub fn withdraw_penalty_fee(
        &mut self,
        ctx: &CallContext,
        to: Address,
    ) -> Result<U256, RollupError> {
        self.ensure_owner(ctx.sender)?;
        if to.is_zero() {
            return Err(RollupError::AddressZero);
        }

        let amount = std::mem::take(&mut self.state.collected_penalty_fees);
        tracing::info!(target: "settlement::rollup", %to, %amount, "withdrew penalty fees");
        self.events.push(RollupEvent::PenaltyFeeWithdrawn { to, amount });
        Ok(amount)
    }

    /// Returns the hash of the block at the given number.
    pub fn get_block_hash(&self, block_number: u32) -> Result<B256, RollupError> {
        Ok(self.state.block_hash_chain.get_block_hash(block_number)?)
    }

    /// Returns the number the next block will get.
    pub fn block_number(&self) -> Result<u32, RollupError> {
        Ok(self.state.block_hash_chain.block_number()?)
    }

    /// Returns the hash of the latest block.
    pub fn latest_block_hash(&self) -> Result<B256, RollupError> {
        Ok(self.state.block_hash_chain.prev_hash()?)
    }

    /// Returns the root of the deposit tree.
    pub fn deposit_tree_root(&self) -> B256 {
        self.state.deposit_tree.root()
    }

    /// Returns the deposit tree.
    pub const fn deposit_tree(&self) -> &DepositTree {
        &self.state.deposit_tree
    }

    /// Returns the id of the last deposit inserted into the deposit tree.
    pub const fn last_processed_deposit_id(&self) -> u64 {
        self.state.last_processed_deposit_id
    }

    /// Returns the next nonce of the builder for the given kind of block.
    pub fn builder_nonce(&self, block_builder: Address, is_registration_block: bool) -> u32 {
        let nonces = if is_registration_block {
            &self.state.registration_nonces
        } else {
            &self.state.non_registration_nonces
        };
        nonces.get(&block_builder).copied().unwrap_or_default()
    }

    /// Returns the penalty a block posted at `timestamp` would pay.
    pub fn penalty(&self, timestamp: u64) -> U256 {
        self.state.rate_limiter.penalty(timestamp)
    }

    /// Returns the rate limiter.
    pub const fn rate_limiter(&self) -> &RateLimiter {
        &self.state.rate_limiter
    }

    /// Returns the penalty fees collected and not yet withdrawn.
    pub const fn collected_penalty_fees(&self) -> U256 {
        self.state.collected_penalty_fees
    }

    /// Returns the events emitted since the last call, draining them.
    pub fn take_events(&mut self) -> Vec<RollupEvent> {
        std::mem::take(&mut self.events)
    }

    fn config(&self) -> Result<&RollupConfig, RollupError> {
        self.state.config.as_ref().ok_or(RollupError::NotInitialized)
    }

    fn ensure_owner(&self, account: Address) -> Result<(), RollupError> {
        if account != self.config()?.owner {
            return Err(RollupError::Unauthorized(account));
        }
        Ok(())
    }
}

impl<P> BlockHashProvider for Rollup<P> {
    fn block_hash(&self, block_number: u32) -> Option<B256> {
        self.state.block_hash_chain.get_block_hash(block_number).ok()
    }
}

impl<P> BlockBuilderProvider for Rollup<P> {
    fn block_builder(&self, block_number: u32) -> Option<Address> {
        self.state.block_builders.get(block_number as usize).copied()
    }
}

impl<P: PairingVerifier> MessageReceiver for Rollup<P> {
    type Error = RollupError;

    fn address(&self) -> Address {
        self.state.config.as_ref().map(|config| config.address).unwrap_or_default()
    }

    fn on_message_received(
        &mut self,
        ctx: &XDomainContext,
        message: &[u8],
    ) -> Result<(), Self::Error> {
        let Some(CrossDomainCall::ProcessDeposits(call)) = CrossDomainCall::try_decode(message)
        else {
            return Err(RollupError::UnknownMessage);
        };

        let last_processed_deposit_id = u64::try_from(call.lastProcessedDepositId)
            .map_err(|_| RollupError::UnknownMessage)?;
        self.process_deposits(ctx, last_processed_deposit_id, call.depositHashes)
    }
}
