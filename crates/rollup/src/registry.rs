use crate::{
    metrics::RegistryMetrics, BlockBuilderProvider, RegistryConfig, RegistryError,
    RegistryEvent, CHALLENGE_DURATION_SECONDS, DEFAULT_BURN_ADDRESS, MIN_STAKE_AMOUNT,
};

use alloy_primitives::{Address, B256, U256};
use settlement_primitives::{CallContext, FraudProofPublicInputs, ProofVerifier};
use std::collections::{HashMap, HashSet};

/// The version of the [`RegistryState`] layout.
pub const REGISTRY_STATE_VERSION: u8 = 1;

/// The registration of a block builder.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockBuilderInfo {
    /// The url the block builder serves at.
    pub url: String,
    /// The staked amount.
    pub stake_amount: U256,
    /// The time the block builder stopped, zero while running.
    pub stop_time: u64,
    /// The number of times the block builder was slashed.
    pub num_slashes: u32,
    /// Whether the block builder is running with at least the minimum stake.
    pub is_valid: bool,
}

impl BlockBuilderInfo {
    fn refresh_validity(&mut self) {
        self.is_valid = self.stop_time == 0 && self.stake_amount >= MIN_STAKE_AMOUNT;
    }
}

/// The split of a slashed stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlashOutcome {
    /// The slashed block builder.
    pub block_builder: Address,
    /// The amount paid to the challenger.
    pub challenger_reward: U256,
    /// The address receiving the burned amount.
    pub burn_address: Address,
    /// The burned amount.
    pub burned: U256,
}

/// The persistent state of the [`BlockBuilderRegistry`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryState {
    /// The version of the state layout.
    pub version: u8,
    /// The configuration, set on initialization.
    pub config: Option<RegistryConfig>,
    /// The address receiving the burned part of slashed stakes.
    pub burn_address: Address,
    /// The registered block builders.
    pub block_builders: HashMap<Address, BlockBuilderInfo>,
    /// The registered block builders in registration order.
    pub block_builder_order: Vec<Address>,
    /// The hashes of the blocks proven fraudulent.
    pub slashed_blocks: HashSet<B256>,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            version: REGISTRY_STATE_VERSION,
            config: None,
            burn_address: DEFAULT_BURN_ADDRESS,
            block_builders: HashMap::new(),
            block_builder_order: Vec::new(),
            slashed_blocks: HashSet::new(),
        }
    }
}

impl RegistryState {
    /// Migrates the state to [`REGISTRY_STATE_VERSION`].
    pub fn migrate(self) -> Result<Self, RegistryError> {
        match self.version {
            REGISTRY_STATE_VERSION => Ok(self),
            version => Err(RegistryError::UnsupportedStateVersion(version)),
        }
    }
}

/// The registry of staked block builders.
///
/// A block builder stakes to become valid, stops when it no longer builds blocks and can
/// unstake once the challenge duration after stopping has passed. A block proven fraudulent
/// slashes up to [`MIN_STAKE_AMOUNT`] from the stake of its builder.
#[derive(Debug)]
pub struct BlockBuilderRegistry<V, R> {
    state: RegistryState,
    verifier: V,
    rollup: R,
    events: Vec<RegistryEvent>,
    metrics: RegistryMetrics,
}

impl<V: ProofVerifier, R: BlockBuilderProvider> BlockBuilderRegistry<V, R> {
    /// Returns a new, uninitialized contract reading blocks from `rollup`.
    pub fn new(verifier: V, rollup: R) -> Self {
        Self::with_state(RegistryState::default(), verifier, rollup)
    }

    /// Returns a contract resuming from a previously persisted state.
    pub fn from_state(state: RegistryState, verifier: V, rollup: R) -> Result<Self, RegistryError> {
        Ok(Self::with_state(state.migrate()?, verifier, rollup))
    }

    fn with_state(state: RegistryState, verifier: V, rollup: R) -> Self {
        Self { state, verifier, rollup, events: Vec::new(), metrics: RegistryMetrics::default() }
    }

    /// Consumes the contract and returns its state.
    pub fn into_state(self) -> RegistryState {
        self.state
    }

    /// Initializes the contract. Can only be called once.
    pub fn initialize(&mut self, config: RegistryConfig) -> Result<(), RegistryError> {
        if self.state.config.is_some() {
            return Err(RegistryError::AlreadyInitialized);
        }
        config.validate()?;

        tracing::info!(
            target: "settlement::registry",
            address = %config.address,
            rollup = %config.rollup,
            "initialized block builder registry"
        );
        self.state.config = Some(config);
        Ok(())
    }

    /// Registers the caller as a block builder or updates its url, adding the value attached
    /// to the call to its stake. A stopped block builder resumes.
    pub fn update_block_builder(
        &mut self,
        ctx: &CallContext,
        url: String,
    ) -> Result<(), RegistryError> {
        self.config()?;
        if url.is_empty() {
            return Err(RegistryError::URLIsEmpty);
        }
        let current = self.state.block_builders.get(&ctx.sender);
        let stake_amount =
            current.map(|info| info.stake_amount).unwrap_or_default().saturating_add(ctx.value);
        if stake_amount < MIN_STAKE_AMOUNT {
            return Err(RegistryError::InsufficientStakeAmount {
                required: MIN_STAKE_AMOUNT,
                provided: stake_amount,
            });
        }

        if current.is_none() {
            self.state.block_builder_order.push(ctx.sender);
        }
        let info = self.state.block_builders.entry(ctx.sender).or_default();
        info.url.clone_from(&url);
        info.stake_amount = stake_amount;
        info.stop_time = 0;
        info.refresh_validity();

        self.metrics.builder_updates.increment(1);
        tracing::info!(
            target: "settlement::registry",
            block_builder = %ctx.sender,
            %url,
            %stake_amount,
            "updated block builder"
        );
        self.events.push(RegistryEvent::BlockBuilderUpdated {
            block_builder: ctx.sender,
            url,
            stake_amount,
        });
        Ok(())
    }

    /// Stops the caller from building blocks, starting its challenge duration.
    pub fn stop_block_builder(&mut self, ctx: &CallContext) -> Result<(), RegistryError> {
        self.config()?;
        let info = self
            .state
            .block_builders
            .get_mut(&ctx.sender)
            .ok_or(RegistryError::BlockBuilderNotFound(ctx.sender))?;
        info.stop_time = ctx.timestamp;
        info.refresh_validity();

        self.metrics.builders_stopped.increment(1);
        tracing::info!(
            target: "settlement::registry",
            block_builder = %ctx.sender,
            "stopped block builder"
        );
        self.events.push(RegistryEvent::BlockBuilderStopped { block_builder: ctx.sender });
        Ok(())
    }

    /// Removes the stopped caller from the registry and returns its stake.
    pub fn unstake(&mut self, ctx: &CallContext) -> Result<U256, RegistryError> {
        self.config()?;
        let info = self
            .state
            .block_builders
            .get(&ctx.sender)
            .ok_or(RegistryError::BlockBuilderNotFound(ctx.sender))?;
        if info.stop_time == 0 ||
            ctx.timestamp < info.stop_time.saturating_add(CHALLENGE_DURATION_SECONDS)
        {
            return Err(RegistryError::CannotUnstakeWithinChallengeDuration);
        }

        let Some(info) = self.state.block_builders.remove(&ctx.sender) else {
            return Err(RegistryError::BlockBuilderNotFound(ctx.sender));
        };
        self.state.block_builder_order.retain(|builder| *builder != ctx.sender);

        self.metrics.unstakes.increment(1);
        tracing::info!(
            target: "settlement::registry",
            block_builder = %ctx.sender,
            stake_amount = %info.stake_amount,
            "unstaked block builder"
        );
        self.events.push(RegistryEvent::BlockBuilderUpdated {
            block_builder: ctx.sender,
            url: info.url,
            stake_amount: info.stake_amount,
        });
        Ok(info.stake_amount)
    }

    /// Proves a posted block fraudulent and slashes its builder, rewarding the caller.
    pub fn submit_block_fraud_proof(
        &mut self,
        ctx: &CallContext,
        public_inputs: FraudProofPublicInputs,
        proof: &[u8],
    ) -> Result<SlashOutcome, RegistryError> {
        self.ensure_owner(ctx.sender)?;
        let FraudProofPublicInputs { block_hash, block_number, challenger } = public_inputs;
        if challenger != ctx.sender {
            return Err(RegistryError::FraudProofChallengerMismatch);
        }
        let expected = self.rollup.block_hash(block_number).unwrap_or_default();
        if block_hash != expected {
            return Err(RegistryError::FraudProofBlockHashMismatch { given: block_hash, expected });
        }
        if self.state.slashed_blocks.contains(&block_hash) {
            return Err(RegistryError::FraudProofAlreadySubmitted);
        }
        if !self.verifier.verify(proof, public_inputs.hash()) {
            return Err(RegistryError::FraudProofVerificationFailed);
        }
        let block_builder = self.rollup.block_builder(block_number).unwrap_or_default();
        if self.stake_amount(block_builder).is_zero() {
            return Err(RegistryError::BlockBuilderNotFound(block_builder));
        }

        self.state.slashed_blocks.insert(block_hash);
        self.events.push(RegistryEvent::BlockFraudProofSubmitted {
            block_number,
            block_builder,
            challenger,
        });
        self.slash(block_builder, challenger)
    }

    fn slash(
        &mut self,
        block_builder: Address,
        challenger: Address,
    ) -> Result<SlashOutcome, RegistryError> {
        let burn_address = self.state.burn_address;
        let info = self
            .state
            .block_builders
            .get_mut(&block_builder)
            .ok_or(RegistryError::BlockBuilderNotFound(block_builder))?;

        let slashed = info.stake_amount.min(MIN_STAKE_AMOUNT);
        info.stake_amount -= slashed;
        info.num_slashes += 1;
        info.refresh_validity();

        let half = MIN_STAKE_AMOUNT / U256::from(2);
        let (challenger_reward, burned) =
            if slashed < half { (slashed, U256::ZERO) } else { (half, slashed - half) };

        self.metrics.slashes.increment(1);
        tracing::warn!(
            target: "settlement::registry",
            %block_builder,
            %challenger,
            %challenger_reward,
            %burned,
            "slashed block builder"
        );
        self.events.push(RegistryEvent::BlockBuilderSlashed { block_builder, challenger });
        Ok(SlashOutcome { block_builder, challenger_reward, burn_address, burned })
    }

    /// Sets the address receiving the burned part of slashed stakes.
    pub fn set_burn_address(
        &mut self,
        ctx: &CallContext,
        burn_address: Address,
    ) -> Result<(), RegistryError> {
        self.ensure_owner(ctx.sender)?;
        if burn_address.is_zero() {
            return Err(RegistryError::AddressZero);
        }
        self.state.burn_address = burn_address;
        self.events.push(RegistryEvent::BurnAddressUpdated(burn_address));
        Ok(())
    }

    /// Returns the registration of the block builder, empty if unknown.
    pub fn block_builder_info(&self, block_builder: Address) -> BlockBuilderInfo {
        self.state.block_builders.get(&block_builder).cloned().unwrap_or_default()
    }

    /// Returns true if the block builder is running with at least the minimum stake.
    pub fn is_valid_block_builder(&self, block_builder: Address) -> bool {
        self.state.block_builders.get(&block_builder).is_some_and(|info| info.is_valid)
    }

    /// Returns the valid block builders in registration order.
    pub fn valid_block_builders(&self) -> Vec<Address> {
        self.state
            .block_builder_order
            .iter()
            .copied()
            .filter(|builder| self.is_valid_block_builder(*builder))
            .collect()
    }

    /// Returns the address receiving the burned part of slashed stakes.
    pub const fn burn_address(&self) -> Address {
        self.state.burn_address
    }

    /// Returns the events emitted since the last call, draining them.
    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    fn stake_amount(&self, block_builder: Address) -> U256 {
        self.state
            .block_builders
            .get(&block_builder)
            .map(|info| info.stake_amount)
            .unwrap_or_default()
    }

    fn config(&self) -> Result<&RegistryConfig, RegistryError> {
        self.state.config.as_ref().ok_or(RegistryError::NotInitialized)
    }

    fn ensure_owner(&self, account: Address) -> Result<(), RegistryError> {
        if account != self.config()?.owner {
            return Err(RegistryError::Unauthorized(account));
        }
        Ok(())
    }
}
