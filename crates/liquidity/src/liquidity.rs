use crate::{
    deposit_limit, metrics::LiquidityMetrics, transfer, LiquidityConfig, LiquidityError,
    LiquidityEvent, Role, TokenData, TokenVault,
};

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolCall;
use settlement_messenger::{
    abi::processDepositsCall, CrossDomainCall, CrossDomainMessenger, MessageReceiver,
    SentMessage, XDomainContext,
};
use settlement_primitives::{CallContext, Deposit, DepositData, TokenInfo, TokenType, Withdrawal};
use settlement_queue::DepositQueue;
use std::collections::HashSet;

/// The version of the [`LiquidityState`] layout.
pub const STATE_VERSION: u8 = 1;

/// The persistent state of the [`Liquidity`] contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidityState {
    /// The version of the state layout.
    pub version: u8,
    /// The configuration, set on initialization.
    pub config: Option<LiquidityConfig>,
    /// Whether deposits are paused.
    pub paused: bool,
    /// The token registry.
    pub token_data: TokenData,
    /// The pending deposits.
    pub deposit_queue: DepositQueue,
    /// The hashes of every deposit made.
    pub deposit_hashes: HashSet<B256>,
    /// The id of the last processed direct withdrawal.
    pub last_direct_withdrawal_id: u64,
    /// The id of the last processed claimable withdrawal.
    pub last_claimable_withdrawal_id: u64,
    /// The hashes of the withdrawals waiting to be claimed.
    pub claimable_withdrawals: HashSet<B256>,
}

impl Default for LiquidityState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            config: None,
            paused: false,
            token_data: TokenData::new(),
            deposit_queue: DepositQueue::new(),
            deposit_hashes: HashSet::new(),
            last_direct_withdrawal_id: 0,
            last_claimable_withdrawal_id: 0,
            claimable_withdrawals: HashSet::new(),
        }
    }
}

impl LiquidityState {
    /// Migrates the state to [`STATE_VERSION`].
    pub fn migrate(self) -> Result<Self, LiquidityError> {
        match self.version {
            STATE_VERSION => Ok(self),
            version => Err(LiquidityError::UnsupportedStateVersion(version)),
        }
    }
}

/// The contract custodying user assets on the liquidity domain.
///
/// Deposits are queued, analyzed and relayed to the rollup domain in order. Withdrawals relayed
/// back from the rollup domain are either paid out directly or made claimable.
#[derive(Debug)]
pub struct Liquidity<V, M> {
    state: LiquidityState,
    vault: V,
    messenger: M,
    events: Vec<LiquidityEvent>,
    metrics: LiquidityMetrics,
}

impl<V: TokenVault, M: CrossDomainMessenger> Liquidity<V, M> {
    /// Returns a new, uninitialized contract.
    pub fn new(vault: V, messenger: M) -> Self {
        Self::with_state(LiquidityState::default(), vault, messenger)
    }

    /// Returns a contract resuming from a previously persisted state.
    pub fn from_state(
        state: LiquidityState,
        vault: V,
        messenger: M,
    ) -> Result<Self, LiquidityError> {
        Ok(Self::with_state(state.migrate()?, vault, messenger))
    }

    fn with_state(state: LiquidityState, vault: V, messenger: M) -> Self {
        Self { state, vault, messenger, events: Vec::new(), metrics: LiquidityMetrics::default() }
    }

    /// Consumes the contract and returns its state.
    pub fn into_state(self) -> LiquidityState {
        self.state
    }

    /// Initializes the contract. Can only be called once.
    pub fn initialize(&mut self, config: LiquidityConfig) -> Result<(), LiquidityError> {
        if self.state.config.is_some() {
            return Err(LiquidityError::AlreadyInitialized);
        }
        config.validate()?;

        self.state.token_data = TokenData::with_erc20_tokens(&config.initial_erc20_tokens)?;
        tracing::info!(
            target: "settlement::liquidity",
            address = %config.address,
            "initialized liquidity"
        );
        self.state.config = Some(config);
        Ok(())
    }

    /// Deposits the native value attached to the call.
    pub fn deposit_native(
        &mut self,
        ctx: &CallContext,
        recipient_salt_hash: B256,
    ) -> Result<u64, LiquidityError> {
        let token = TokenInfo::native();
        self.deposit(ctx, token, recipient_salt_hash, ctx.value)
    }

    /// Deposits fungible tokens.
    pub fn deposit_erc20(
        &mut self,
        ctx: &CallContext,
        token_address: Address,
        recipient_salt_hash: B256,
        amount: U256,
    ) -> Result<u64, LiquidityError> {
        let token = TokenInfo::new(TokenType::Erc20, token_address, U256::ZERO);
        self.deposit(ctx, token, recipient_salt_hash, amount)
    }

    /// Deposits a non-fungible token.
    pub fn deposit_erc721(
        &mut self,
        ctx: &CallContext,
        token_address: Address,
        recipient_salt_hash: B256,
        token_id: U256,
    ) -> Result<u64, LiquidityError> {
        let token = TokenInfo::new(TokenType::Erc721, token_address, token_id);
        self.deposit(ctx, token, recipient_salt_hash, U256::from(1))
    }

    /// Deposits multi tokens.
    pub fn deposit_erc1155(
        &mut self,
        ctx: &CallContext,
        token_address: Address,
        recipient_salt_hash: B256,
        token_id: U256,
        amount: U256,
    ) -> Result<u64, LiquidityError> {
        let token = TokenInfo::new(TokenType::Erc1155, token_address, token_id);
        self.deposit(ctx, token, recipient_salt_hash, amount)
    }

    fn deposit(
        &mut self,
        ctx: &CallContext,
        token: TokenInfo,
        recipient_salt_hash: B256,
        amount: U256,
    ) -> Result<u64, LiquidityError> {
        let deployment_time = self.config()?.deployment_time;
        if self.state.paused {
            return Err(LiquidityError::EnforcedPause);
        }
        if amount.is_zero() {
            return Err(LiquidityError::TriedToDepositZero);
        }

        let TokenInfo { token_type, token_address, token_id } = token;
        let token_index = self
            .state
            .token_data
            .get_token_index(token_type, token_address, token_id)?
            .unwrap_or_else(|| self.state.token_data.next_token_index());
        if !token_type.has_token_id() {
            let limit = deposit_limit(token_index, deployment_time, ctx.timestamp);
            if amount > limit {
                return Err(LiquidityError::DepositAmountExceedsLimit { amount, limit });
            }
        }

        let deposit_hash = Deposit::new(recipient_salt_hash, token_index, amount).hash();
        if self.state.deposit_hashes.contains(&deposit_hash) {
            return Err(LiquidityError::DepositHashAlreadyExists(deposit_hash));
        }
        if !self.transfer_in(ctx.sender, token, amount)? {
            return Err(LiquidityError::TransferFailed(token_index));
        }

        self.state.token_data.get_or_create_token_index(token_type, token_address, token_id)?;
        self.state.deposit_hashes.insert(deposit_hash);
        let deposit_id = self.state.deposit_queue.enqueue(deposit_hash, ctx.sender);

        self.metrics.deposits.increment(1);
        tracing::info!(
            target: "settlement::liquidity",
            deposit_id,
            sender = %ctx.sender,
            token_index,
            %amount,
            "deposited"
        );
        self.events.push(LiquidityEvent::Deposited {
            deposit_id,
            sender: ctx.sender,
            recipient_salt_hash,
            token_index,
            amount,
            deposited_at: ctx.timestamp,
        });

        Ok(deposit_id)
    }

    /// Analyzes the deposits up to `up_to_deposit_id`, rejecting the given ids, and relays the
    /// accepted deposit hashes to the rollup. The value attached to the call pays the relay
    /// fee.
    pub fn analyze_and_relay_deposits(
        &mut self,
        ctx: &CallContext,
        up_to_deposit_id: u64,
        rejected_deposit_ids: &[u64],
        gas_limit: U256,
    ) -> Result<SentMessage, LiquidityError> {
        let config = self.config()?;
        let (address, rollup) = (config.address, config.rollup);
        self.ensure_role(ctx.sender, Role::Analyzer)?;

        let required = self.messenger.relay_fee(gas_limit);
        if ctx.value < required {
            return Err(LiquidityError::InsufficientRelayFee { required, provided: ctx.value });
        }

        let queue = &mut self.state.deposit_queue;
        queue.analyze(up_to_deposit_id, rejected_deposit_ids)?;
        let deposit_hashes = queue.collect_accepted_deposits(up_to_deposit_id)?;
        let relayed = deposit_hashes.len();

        let message = processDepositsCall::new(up_to_deposit_id, deposit_hashes).abi_encode();
        let sent = self.messenger.send_message(
            address,
            rollup,
            U256::ZERO,
            message.into(),
            gas_limit,
            ctx.value,
        )?;

        self.metrics.relayed_deposits.increment(relayed as u64);
        self.metrics.rejected_deposits.increment(rejected_deposit_ids.len() as u64);
        tracing::info!(
            target: "settlement::liquidity",
            up_to_deposit_id,
            relayed,
            rejected = rejected_deposit_ids.len(),
            message_hash = ?sent.hash,
            "relayed deposits"
        );
        self.events.push(LiquidityEvent::DepositsRelayed {
            up_to_deposit_id,
            relayed,
            gas_limit,
            message_hash: sent.hash,
        });

        Ok(sent)
    }

    /// Cancels a deposit that was not analyzed yet and refunds it to its depositor.
    pub fn cancel_pending_deposit(
        &mut self,
        ctx: &CallContext,
        deposit_id: u64,
        deposit: &Deposit,
    ) -> Result<(), LiquidityError> {
        self.sender_deposit(ctx.sender, deposit_id, deposit)?;
        if deposit_id <= self.state.deposit_queue.last_analyzed_deposit_id() {
            return Err(LiquidityError::AlreadyAnalyzed(deposit_id));
        }

        self.refund(ctx.sender, deposit_id, deposit)?;
        self.events.push(LiquidityEvent::DepositCanceled { deposit_id });
        Ok(())
    }

    /// Returns a rejected deposit to its depositor.
    pub fn claim_rejected_deposit(
        &mut self,
        ctx: &CallContext,
        deposit_id: u64,
        deposit: &Deposit,
    ) -> Result<(), LiquidityError> {
        let data = self.sender_deposit(ctx.sender, deposit_id, deposit)?;
        if deposit_id > self.state.deposit_queue.last_analyzed_deposit_id() {
            return Err(LiquidityError::DepositNotAnalyzed(deposit_id));
        }
        if !data.is_rejected {
            return Err(LiquidityError::AlreadyRelayed(deposit_id));
        }

        self.refund(ctx.sender, deposit_id, deposit)?;
        self.events.push(LiquidityEvent::RejectedDepositClaimed { deposit_id });
        Ok(())
    }

    /// Returns the stored entry of a deposit owned by `sender` and matching `deposit`.
    fn sender_deposit(
        &self,
        sender: Address,
        deposit_id: u64,
        deposit: &Deposit,
    ) -> Result<DepositData, LiquidityError> {
        self.config()?;
        let data = self.deposit_data(deposit_id);
        if data.is_empty() || data.sender != sender {
            return Err(LiquidityError::OnlySenderCanCancelDeposit(deposit_id));
        }
        let given = deposit.hash();
        if data.deposit_hash != given {
            return Err(LiquidityError::InvalidDepositHash { stored: data.deposit_hash, given });
        }
        Ok(data)
    }

    fn refund(
        &mut self,
        recipient: Address,
        deposit_id: u64,
        deposit: &Deposit,
    ) -> Result<(), LiquidityError> {
        let token = self.state.token_data.get_token_info(deposit.token_index)?;
        if !self.transfer_out(recipient, token, deposit.amount)? {
            return Err(LiquidityError::TransferFailed(deposit.token_index));
        }
        self.state.deposit_queue.delete_deposit(deposit_id);

        self.metrics.refunded_deposits.increment(1);
        tracing::info!(target: "settlement::liquidity", deposit_id, %recipient, "refunded deposit");
        Ok(())
    }

    /// Processes the withdrawals relayed from the rollup domain.
    ///
    /// `withdrawals` are the direct withdrawals ending at id `last_direct_withdrawal_id`, and
    /// `withdrawal_hashes` the claimable withdrawals ending at id
    /// `last_claimable_withdrawal_id`. Entries at or below the recorded watermarks were
    /// already processed and are skipped, so a redelivered message is a no-op. A batch starting
    /// past the next unprocessed id is rejected, leaving it deliverable once the gap is filled.
    /// A direct withdrawal that cannot be paid becomes claimable instead of failing the batch.
    pub fn process_withdrawals(
        &mut self,
        ctx: &XDomainContext,
        last_direct_withdrawal_id: u64,
        withdrawals: Vec<Withdrawal>,
        last_claimable_withdrawal_id: u64,
        withdrawal_hashes: Vec<B256>,
    ) -> Result<(), LiquidityError> {
        let config = self.config()?;
        if ctx.caller != config.messenger {
            return Err(LiquidityError::SenderIsNotMessenger(ctx.caller));
        }
        if ctx.x_domain_message_sender != config.withdrawal {
            return Err(LiquidityError::InvalidWithdrawalAddress(ctx.x_domain_message_sender));
        }
        let first_direct_id = first_batch_id(withdrawals.len(), last_direct_withdrawal_id)?;
        let first_claimable_id =
            first_batch_id(withdrawal_hashes.len(), last_claimable_withdrawal_id)?;
        ensure_contiguous(first_direct_id, self.state.last_direct_withdrawal_id)?;
        ensure_contiguous(first_claimable_id, self.state.last_claimable_withdrawal_id)?;

        for (id, withdrawal) in (first_direct_id..).zip(withdrawals) {
            if id <= self.state.last_direct_withdrawal_id {
                continue;
            }
            self.pay_direct_withdrawal(withdrawal)?;
            self.state.last_direct_withdrawal_id = id;
        }

        for (id, withdrawal_hash) in (first_claimable_id..).zip(withdrawal_hashes) {
            if id <= self.state.last_claimable_withdrawal_id {
                continue;
            }
            self.state.claimable_withdrawals.insert(withdrawal_hash);
            self.state.last_claimable_withdrawal_id = id;

            self.metrics.claimable_withdrawals.increment(1);
            self.events.push(LiquidityEvent::WithdrawalClaimable { withdrawal_hash });
        }

        tracing::info!(
            target: "settlement::liquidity",
            last_direct_withdrawal_id = self.state.last_direct_withdrawal_id,
            last_claimable_withdrawal_id = self.state.last_claimable_withdrawal_id,
            "processed withdrawals"
        );
        Ok(())
    }

    fn pay_direct_withdrawal(&mut self, withdrawal: Withdrawal) -> Result<(), LiquidityError> {
        let withdrawal_hash = withdrawal.hash();
        let paid = match self.state.token_data.get_token_info(withdrawal.token_index) {
            Ok(token) => self.transfer_out(withdrawal.recipient, token, withdrawal.amount)?,
            Err(_) => false,
        };

        if paid {
            self.metrics.direct_withdrawals.increment(1);
            self.events.push(LiquidityEvent::DirectWithdrawalSucceeded {
                withdrawal_hash,
                recipient: withdrawal.recipient,
            });
        } else {
            self.state.claimable_withdrawals.insert(withdrawal_hash);
            self.metrics.failed_direct_withdrawals.increment(1);
            tracing::warn!(
                target: "settlement::liquidity",
                ?withdrawal_hash,
                recipient = %withdrawal.recipient,
                "direct withdrawal failed, made claimable"
            );
            self.events
                .push(LiquidityEvent::DirectWithdrawalFailed { withdrawal_hash, withdrawal });
        }
        Ok(())
    }

    /// Pays out claimable withdrawals to their recipients.
    ///
    /// Withdrawals paid before a failing transfer stay claimed.
    pub fn claim_withdrawals(&mut self, withdrawals: &[Withdrawal]) -> Result<(), LiquidityError> {
        self.config()?;
        if let Some(missing) =
            withdrawals.iter().map(Withdrawal::hash).find(|hash| !self.is_claimable(hash))
        {
            return Err(LiquidityError::WithdrawalNotFound(missing));
        }

        for withdrawal in withdrawals {
            let withdrawal_hash = withdrawal.hash();
            if !self.state.claimable_withdrawals.remove(&withdrawal_hash) {
                return Err(LiquidityError::WithdrawalNotFound(withdrawal_hash));
            }

            let token = self.state.token_data.get_token_info(withdrawal.token_index);
            let paid = match token {
                Ok(token) => self.transfer_out(withdrawal.recipient, token, withdrawal.amount)?,
                Err(_) => false,
            };
            if !paid {
                self.state.claimable_withdrawals.insert(withdrawal_hash);
                return Err(LiquidityError::TransferFailed(withdrawal.token_index));
            }

            self.metrics.claimed_withdrawals.increment(1);
            self.events.push(LiquidityEvent::ClaimedWithdrawal {
                recipient: withdrawal.recipient,
                withdrawal_hash,
            });
        }
        Ok(())
    }

    /// Pauses deposits.
    pub fn pause(&mut self, ctx: &CallContext) -> Result<(), LiquidityError> {
        self.ensure_role(ctx.sender, Role::Admin)?;
        if self.state.paused {
            return Err(LiquidityError::EnforcedPause);
        }
        self.state.paused = true;
        tracing::warn!(target: "settlement::liquidity", account = %ctx.sender, "paused deposits");
        self.events.push(LiquidityEvent::Paused(ctx.sender));
        Ok(())
    }

    /// Unpauses deposits.
    pub fn unpause(&mut self, ctx: &CallContext) -> Result<(), LiquidityError> {
        self.ensure_role(ctx.sender, Role::Admin)?;
        if !self.state.paused {
            return Err(LiquidityError::ExpectedPause);
        }
        self.state.paused = false;
        tracing::info!(target: "settlement::liquidity", account = %ctx.sender, "unpaused deposits");
        self.events.push(LiquidityEvent::Unpaused(ctx.sender));
        Ok(())
    }

    /// Returns true if deposits are paused.
    pub const fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Returns the stored entry of a deposit, empty if unknown or deleted.
    pub fn deposit_data(&self, deposit_id: u64) -> DepositData {
        self.state.deposit_queue.get(deposit_id).copied().unwrap_or_default()
    }

    /// Returns the stored entries of the deposits.
    pub fn deposit_data_batch(&self, deposit_ids: &[u64]) -> Vec<DepositData> {
        deposit_ids.iter().map(|&id| self.deposit_data(id)).collect()
    }

    /// Returns the id of the last deposit.
    pub fn last_deposit_id(&self) -> u64 {
        self.state.deposit_queue.last_deposit_id()
    }

    /// Returns the id of the last deposit analyzed and relayed.
    pub const fn last_relayed_deposit_id(&self) -> u64 {
        self.state.deposit_queue.front() - 1
    }

    /// Returns true if the pending deposit was made by `sender` and was not rejected.
    pub fn is_deposit_valid(&self, deposit_id: u64, deposit: &Deposit, sender: Address) -> bool {
        let data = self.deposit_data(deposit_id);
        !data.is_empty() &&
            !data.is_rejected &&
            data.sender == sender &&
            data.deposit_hash == deposit.hash()
    }

    /// Returns true if the withdrawal can be claimed.
    pub fn is_claimable(&self, withdrawal_hash: &B256) -> bool {
        self.state.claimable_withdrawals.contains(withdrawal_hash)
    }

    /// Returns the id of the last processed direct withdrawal.
    pub const fn last_direct_withdrawal_id(&self) -> u64 {
        self.state.last_direct_withdrawal_id
    }

    /// Returns the id of the last processed claimable withdrawal.
    pub const fn last_claimable_withdrawal_id(&self) -> u64 {
        self.state.last_claimable_withdrawal_id
    }

    /// Returns the token registry.
    pub const fn token_data(&self) -> &TokenData {
        &self.state.token_data
    }

    /// Returns the vault holding the custodied assets.
    pub const fn vault(&self) -> &V {
        &self.vault
    }

    /// Returns a mutable reference to the vault.
    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }

    /// Returns the events emitted since the last call, draining them.
    pub fn take_events(&mut self) -> Vec<LiquidityEvent> {
        std::mem::take(&mut self.events)
    }

    fn config(&self) -> Result<&LiquidityConfig, LiquidityError> {
        self.state.config.as_ref().ok_or(LiquidityError::NotInitialized)
    }

    fn ensure_role(&self, account: Address, role: Role) -> Result<(), LiquidityError> {
        let config = self.config()?;
        let holder = match role {
            Role::Admin => config.admin,
            Role::Analyzer => config.analyzer,
        };
        if account != holder {
            return Err(LiquidityError::Unauthorized { account, role });
        }
        Ok(())
    }

    fn transfer_in(
        &mut self,
        from: Address,
        token: TokenInfo,
        amount: U256,
    ) -> Result<bool, LiquidityError> {
        let this = self.config()?.address;
        let vault = &mut self.vault;
        Ok(match token.token_type {
            TokenType::Native => vault.transfer_native(from, this, amount),
            TokenType::Erc20 => {
                transfer::transfer_from(vault, this, token.token_address, from, this, amount)
            }
            TokenType::Erc721 => transfer::transfer_erc721(
                vault,
                this,
                token.token_address,
                from,
                this,
                token.token_id,
            ),
            TokenType::Erc1155 => transfer::transfer_erc1155(
                vault,
                this,
                token.token_address,
                from,
                this,
                token.token_id,
                amount,
            ),
        })
    }

    fn transfer_out(
        &mut self,
        to: Address,
        token: TokenInfo,
        amount: U256,
    ) -> Result<bool, LiquidityError> {
        let this = self.config()?.address;
        let vault = &mut self.vault;
        Ok(match token.token_type {
            TokenType::Native => vault.transfer_native(this, to, amount),
            TokenType::Erc20 => transfer::transfer(vault, this, token.token_address, to, amount),
            TokenType::Erc721 => transfer::transfer_erc721(
                vault,
                this,
                token.token_address,
                this,
                to,
                token.token_id,
            ),
            TokenType::Erc1155 => transfer::transfer_erc1155(
                vault,
                this,
                token.token_address,
                this,
                to,
                token.token_id,
                amount,
            ),
        })
    }
}

impl<V: TokenVault, M: CrossDomainMessenger> MessageReceiver for Liquidity<V, M> {
    type Error = LiquidityError;

    fn address(&self) -> Address {
        self.state.config.as_ref().map(|config| config.address).unwrap_or_default()
    }

    fn on_message_received(
        &mut self,
        ctx: &XDomainContext,
        message: &[u8],
    ) -> Result<(), Self::Error> {
        let Some(CrossDomainCall::ProcessWithdrawals(call)) = CrossDomainCall::try_decode(message)
        else {
            return Err(LiquidityError::UnknownMessage);
        };

        let last_direct_withdrawal_id = u64::try_from(call.lastProcessedDirectWithdrawalId)
            .map_err(|_| LiquidityError::UnknownMessage)?;
        let last_claimable_withdrawal_id = u64::try_from(call.lastProcessedClaimableWithdrawalId)
            .map_err(|_| LiquidityError::UnknownMessage)?;
        self.process_withdrawals(
            ctx,
            last_direct_withdrawal_id,
            call.withdrawals.into_iter().map(Into::into).collect(),
            last_claimable_withdrawal_id,
            call.withdrawalHashes,
        )
    }
}

/// Returns the id of the first entry of a batch of `len` entries ending at `last_id`.
fn first_batch_id(len: usize, last_id: u64) -> Result<u64, LiquidityError> {
    last_id
        .checked_sub(len as u64)
        .map(|before| before + 1)
        .ok_or(LiquidityError::InvalidWithdrawalBatch { len, last_id })
}

fn ensure_contiguous(first_id: u64, last_processed_id: u64) -> Result<(), LiquidityError> {
    let expected = last_processed_id.saturating_add(1);
    if first_id > expected {
        return Err(LiquidityError::WithdrawalBatchOutOfOrder { first_id, expected });
    }
    Ok(())
}
