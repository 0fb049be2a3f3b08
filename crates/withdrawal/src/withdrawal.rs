use crate::{metrics::WithdrawalMetrics, WithdrawalConfig, WithdrawalError, WithdrawalEvent};

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use settlement_messenger::{abi::processWithdrawalsCall, CrossDomainMessenger, SentMessage};
use settlement_primitives::{
    self as primitives, verify_chain, BlockHashProvider, CallContext, ChainedWithdrawal,
    ProofVerifier, WithdrawalProofPublicInputs,
};
use settlement_queue::{Bytes32Queue, QueueError, WithdrawalQueue};
use std::collections::HashSet;

/// The version of the [`WithdrawalState`] layout.
pub const STATE_VERSION: u8 = 1;

/// The persistent state of the [`Withdrawal`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalState {
    /// The version of the state layout.
    pub version: u8,
    /// The configuration, set on initialization.
    pub config: Option<WithdrawalConfig>,
    /// The token indices withdrawn directly, in insertion order.
    pub direct_withdrawal_token_indices: Vec<u32>,
    /// The hashes of every queued withdrawal.
    pub processed_withdrawals: HashSet<B256>,
    /// The withdrawals waiting to be relayed for direct payout.
    pub direct_withdrawal_queue: WithdrawalQueue,
    /// The hashes of the withdrawals waiting to be relayed as claimable.
    pub claimable_withdrawal_queue: Bytes32Queue,
}

impl Default for WithdrawalState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            config: None,
            direct_withdrawal_token_indices: Vec::new(),
            processed_withdrawals: HashSet::new(),
            direct_withdrawal_queue: WithdrawalQueue::new(),
            claimable_withdrawal_queue: Bytes32Queue::new(),
        }
    }
}

impl WithdrawalState {
    /// Migrates the state to [`STATE_VERSION`].
    pub fn migrate(self) -> Result<Self, WithdrawalError> {
        match self.version {
            STATE_VERSION => Ok(self),
            version => Err(WithdrawalError::UnsupportedStateVersion(version)),
        }
    }
}

/// The contract accepting proven withdrawals on the rollup domain.
///
/// A batch of withdrawals is authenticated by a hash chain committed in the proof, and every
/// withdrawal must reference a block posted to the rollup. Withdrawals of the direct token
/// indices are relayed to the liquidity domain right away, the others wait to be relayed as
/// claimable.
#[derive(Debug)]
pub struct Withdrawal<V, M, R> {
    state: WithdrawalState,
    verifier: V,
    messenger: M,
    rollup: R,
    events: Vec<WithdrawalEvent>,
    metrics: WithdrawalMetrics,
}

impl<V, M, R> Withdrawal<V, M, R>
where
    V: ProofVerifier,
    M: CrossDomainMessenger,
    R: BlockHashProvider,
{
    /// Returns a new, uninitialized contract.
    pub fn new(verifier: V, messenger: M, rollup: R) -> Self {
        Self::with_state(WithdrawalState::default(), verifier, messenger, rollup)
    }

    /// Returns a contract resuming from a previously persisted state.
    pub fn from_state(
        state: WithdrawalState,
        verifier: V,
        messenger: M,
        rollup: R,
    ) -> Result<Self, WithdrawalError> {
        Ok(Self::with_state(state.migrate()?, verifier, messenger, rollup))
    }

    fn with_state(state: WithdrawalState, verifier: V, messenger: M, rollup: R) -> Self {
        Self {
            state,
            verifier,
            messenger,
            rollup,
            events: Vec::new(),
            metrics: WithdrawalMetrics::default(),
        }
    }

    /// Consumes the contract and returns its state.
    pub fn into_state(self) -> WithdrawalState {
        self.state
    }

    /// Initializes the contract. Can only be called once.
    pub fn initialize(&mut self, config: WithdrawalConfig) -> Result<(), WithdrawalError> {
        if self.state.config.is_some() {
            return Err(WithdrawalError::AlreadyInitialized);
        }
        config.validate()?;

        let indices = config.direct_withdrawal_token_indices.clone();
        tracing::info!(
            target: "settlement::withdrawal",
            address = %config.address,
            direct_withdrawal_token_indices = ?indices,
            "initialized withdrawal"
        );
        self.state.direct_withdrawal_token_indices.clone_from(&indices);
        self.state.config = Some(config);
        self.events.push(WithdrawalEvent::DirectWithdrawalTokenIndicesAdded(indices));
        Ok(())
    }

    /// Replaces the proof verifier.
    pub fn update_verifier(
        &mut self,
        ctx: &CallContext,
        verifier: V,
    ) -> Result<(), WithdrawalError> {
        self.ensure_owner(ctx.sender)?;
        self.verifier = verifier;
        tracing::info!(target: "settlement::withdrawal", "updated verifier");
        self.events.push(WithdrawalEvent::VerifierUpdated);
        Ok(())
    }

    /// Submits a proven batch of withdrawals.
    ///
    /// Withdrawals that were already queued are skipped. If a direct withdrawal was queued,
    /// every pending withdrawal is relayed to the liquidity domain, paid for by the value
    /// attached to the call.
    pub fn submit_withdrawal_proof(
        &mut self,
        ctx: &CallContext,
        withdrawals: &[ChainedWithdrawal],
        public_inputs: WithdrawalProofPublicInputs,
        proof: &[u8],
    ) -> Result<Option<SentMessage>, WithdrawalError> {
        let gas_limit = self.config()?.gas_limit;
        if public_inputs.withdrawal_aggregator != ctx.sender {
            return Err(WithdrawalError::WithdrawalAggregatorMismatch);
        }
        if !verify_chain(withdrawals, public_inputs.last_withdrawal_hash) {
            return Err(WithdrawalError::WithdrawalChainVerificationFailed);
        }
        if !self.verifier.verify(proof, public_inputs.hash()) {
            return Err(WithdrawalError::WithdrawalProofVerificationFailed);
        }
        if let Some(unknown) = withdrawals.iter().find(|withdrawal| {
            self.rollup.block_hash(withdrawal.block_number) != Some(withdrawal.block_hash)
        }) {
            return Err(WithdrawalError::BlockHashNotExists(unknown.block_hash));
        }

        let mut queued = HashSet::new();
        let pending: Vec<_> = withdrawals
            .iter()
            .map(ChainedWithdrawal::withdrawal)
            .filter(|withdrawal| {
                let hash = withdrawal.hash();
                !self.state.processed_withdrawals.contains(&hash) && queued.insert(hash)
            })
            .collect();
        let relay = pending.iter().any(|withdrawal| self.is_direct(withdrawal.token_index));
        if relay {
            self.ensure_relay_fee(ctx.value, gas_limit)?;
        }

        let skipped = withdrawals.len() - pending.len();
        for withdrawal in pending {
            self.enqueue(withdrawal);
        }
        self.metrics.proofs.increment(1);
        self.metrics.skipped_withdrawals.increment(skipped as u64);
        tracing::info!(
            target: "settlement::withdrawal",
            withdrawals = withdrawals.len(),
            skipped,
            last_withdrawal_hash = ?public_inputs.last_withdrawal_hash,
            "accepted withdrawal proof"
        );

        if !relay {
            return Ok(None);
        }
        let last_direct_withdrawal_id = self.state.direct_withdrawal_queue.next_index() - 1;
        let last_claimable_withdrawal_id = self.state.claimable_withdrawal_queue.next_index() - 1;
        self.relay(ctx, last_direct_withdrawal_id, last_claimable_withdrawal_id).map(Some)
    }

    fn enqueue(&mut self, withdrawal: primitives::Withdrawal) {
        let withdrawal_hash = withdrawal.hash();
        self.state.processed_withdrawals.insert(withdrawal_hash);
        let recipient = withdrawal.recipient;

        if self.is_direct(withdrawal.token_index) {
            self.state.direct_withdrawal_queue.enqueue(withdrawal);
            self.metrics.direct_withdrawals.increment(1);
            self.events.push(WithdrawalEvent::DirectWithdrawalQueued {
                withdrawal_hash,
                recipient,
                withdrawal,
            });
        } else {
            self.state.claimable_withdrawal_queue.enqueue(withdrawal_hash);
            self.metrics.claimable_withdrawals.increment(1);
            self.events.push(WithdrawalEvent::ClaimableWithdrawalQueued {
                withdrawal_hash,
                recipient,
                withdrawal,
            });
        }
    }

    /// Relays the direct withdrawals up to `up_to_direct_withdrawal_id` and the claimable
    /// withdrawal hashes up to `up_to_claimable_withdrawal_id` to the liquidity domain in one
    /// message. The value attached to the call pays the relay fee.
    pub fn relay_withdrawals(
        &mut self,
        ctx: &CallContext,
        up_to_direct_withdrawal_id: u64,
        up_to_claimable_withdrawal_id: u64,
    ) -> Result<SentMessage, WithdrawalError> {
        let gas_limit = self.config()?.gas_limit;
        self.ensure_relay_fee(ctx.value, gas_limit)?;
        self.relay(ctx, up_to_direct_withdrawal_id, up_to_claimable_withdrawal_id)
    }

    fn relay(
        &mut self,
        ctx: &CallContext,
        last_direct_withdrawal_id: u64,
        last_claimable_withdrawal_id: u64,
    ) -> Result<SentMessage, WithdrawalError> {
        let config = self.config()?;
        let (address, liquidity, gas_limit) = (config.address, config.liquidity, config.gas_limit);
        for (up_to, queue_next) in [
            (last_direct_withdrawal_id, self.state.direct_withdrawal_queue.next_index()),
            (last_claimable_withdrawal_id, self.state.claimable_withdrawal_queue.next_index()),
        ] {
            if up_to >= queue_next {
                return Err(QueueError::IndexOutOfRange {
                    index: up_to,
                    next_index: queue_next,
                }
                .into());
            }
        }

        let withdrawals =
            self.state.direct_withdrawal_queue.dequeue_up_to(last_direct_withdrawal_id)?;
        let withdrawal_hashes =
            self.state.claimable_withdrawal_queue.dequeue_up_to(last_claimable_withdrawal_id)?;
        let (direct, claimable) = (withdrawals.len(), withdrawal_hashes.len());

        let message = processWithdrawalsCall::new(
            last_direct_withdrawal_id,
            withdrawals,
            last_claimable_withdrawal_id,
            withdrawal_hashes,
        )
        .abi_encode();
        let sent = self.messenger.send_message(
            address,
            liquidity,
            U256::ZERO,
            message.into(),
            gas_limit,
            ctx.value,
        )?;

        self.metrics.relays.increment(1);
        tracing::info!(
            target: "settlement::withdrawal",
            last_direct_withdrawal_id,
            last_claimable_withdrawal_id,
            direct,
            claimable,
            message_hash = ?sent.hash,
            "relayed withdrawals"
        );
        self.events.push(WithdrawalEvent::WithdrawalsRelayed {
            last_direct_withdrawal_id,
            last_claimable_withdrawal_id,
            message_hash: sent.hash,
        });
        Ok(sent)
    }

    /// Adds token indices to the direct withdrawal set.
    pub fn add_direct_withdrawal_token_indices(
        &mut self,
        ctx: &CallContext,
        token_indices: &[u32],
    ) -> Result<(), WithdrawalError> {
        self.ensure_owner(ctx.sender)?;
        let mut added = HashSet::new();
        if let Some(existing) = token_indices
            .iter()
            .find(|index| self.is_direct(**index) || !added.insert(**index))
        {
            return Err(WithdrawalError::TokenAlreadyExist(*existing));
        }

        self.state.direct_withdrawal_token_indices.extend_from_slice(token_indices);
        self.events
            .push(WithdrawalEvent::DirectWithdrawalTokenIndicesAdded(token_indices.to_vec()));
        Ok(())
    }

    /// Removes token indices from the direct withdrawal set.
    pub fn remove_direct_withdrawal_token_indices(
        &mut self,
        ctx: &CallContext,
        token_indices: &[u32],
    ) -> Result<(), WithdrawalError> {
        self.ensure_owner(ctx.sender)?;
        if let Some(missing) = token_indices.iter().find(|index| !self.is_direct(**index)) {
            return Err(WithdrawalError::TokenNotExist(*missing));
        }

        self.state.direct_withdrawal_token_indices.retain(|index| !token_indices.contains(index));
        self.events
            .push(WithdrawalEvent::DirectWithdrawalTokenIndicesRemoved(token_indices.to_vec()));
        Ok(())
    }

    /// Returns the token indices withdrawn directly.
    pub fn direct_withdrawal_token_indices(&self) -> &[u32] {
        &self.state.direct_withdrawal_token_indices
    }

    /// Returns true if the withdrawal hash was already queued.
    pub fn is_processed(&self, withdrawal_hash: &B256) -> bool {
        self.state.processed_withdrawals.contains(withdrawal_hash)
    }

    /// Returns the queue of direct withdrawals.
    pub const fn direct_withdrawal_queue(&self) -> &WithdrawalQueue {
        &self.state.direct_withdrawal_queue
    }

    /// Returns the queue of claimable withdrawal hashes.
    pub const fn claimable_withdrawal_queue(&self) -> &Bytes32Queue {
        &self.state.claimable_withdrawal_queue
    }

    /// Returns the events emitted since the last call, draining them.
    pub fn take_events(&mut self) -> Vec<WithdrawalEvent> {
        std::mem::take(&mut self.events)
    }

    fn is_direct(&self, token_index: u32) -> bool {
        self.state.direct_withdrawal_token_indices.contains(&token_index)
    }

    fn ensure_relay_fee(&self, provided: U256, gas_limit: U256) -> Result<(), WithdrawalError> {
        let required = self.messenger.relay_fee(gas_limit);
        if provided < required {
            return Err(WithdrawalError::InsufficientRelayFee { required, provided });
        }
        Ok(())
    }

    fn config(&self) -> Result<&WithdrawalConfig, WithdrawalError> {
        self.state.config.as_ref().ok_or(WithdrawalError::NotInitialized)
    }

    fn ensure_owner(&self, account: Address) -> Result<(), WithdrawalError> {
        if account != self.config()?.owner {
            return Err(WithdrawalError::Unauthorized(account));
        }
        Ok(())
    }
}
