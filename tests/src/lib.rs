//! A two-domain harness for the settlement integration tests.
//!
//! [`TwoDomainEnv`] deploys the liquidity contract on the liquidity domain and the rollup and
//! withdrawal contracts on the rollup domain, wired through one messenger per direction. Messages
//! only cross domains when a test relays them.

use alloy_primitives::{Address, B256, U256};
use parking_lot::RwLock;
use settlement_liquidity::{test_utils::MockVault, Liquidity, LiquidityConfig};
use settlement_messenger::{CrossDomainMessage, Inbox, MessengerError, Outbox, RelayStatus};
use settlement_primitives::{
    test_utils::{init_test_tracing, MockPairingVerifier, MockProofVerifier},
    CallContext,
};
use settlement_rollup::{BlockSubmission, PostedBlock, RateLimitConstants, Rollup, RollupConfig};
use settlement_withdrawal::{Withdrawal, WithdrawalConfig};
use std::sync::Arc;

/// The liquidity contract.
pub const LIQUIDITY: Address = Address::repeat_byte(0x10);
/// The admin of the liquidity contract.
pub const ADMIN: Address = Address::repeat_byte(0x11);
/// The analyzer relaying deposits.
pub const ANALYZER: Address = Address::repeat_byte(0x12);
/// The messenger of the liquidity domain.
pub const L1_MESSENGER: Address = Address::repeat_byte(0x13);
/// The rollup contract.
pub const ROLLUP: Address = Address::repeat_byte(0x20);
/// The withdrawal contract.
pub const WITHDRAWAL: Address = Address::repeat_byte(0x21);
/// The messenger of the rollup domain.
pub const L2_MESSENGER: Address = Address::repeat_byte(0x22);
/// The owner of the rollup domain contracts.
pub const OWNER: Address = Address::repeat_byte(0x23);
/// The block builder posting blocks.
pub const BUILDER: Address = Address::repeat_byte(0x30);
/// The aggregator submitting withdrawal proofs.
pub const AGGREGATOR: Address = Address::repeat_byte(0x31);
/// A depositing user.
pub const USER: Address = Address::repeat_byte(0x40);
/// The fungible tokens registered at deployment, at token indices 1 and 2.
pub const INITIAL_TOKENS: [Address; 2] = [Address::repeat_byte(0xa1), Address::repeat_byte(0xa2)];
/// A fungible token registered by the first deposit.
pub const TOKEN: Address = Address::repeat_byte(0xa3);
/// The deployment time of the contracts.
pub const DEPLOYED_AT: u64 = 1_700_000_000;
/// The gas limit of the relayed messages.
pub const GAS_LIMIT: U256 = U256::from_limbs([1_000_000, 0, 0, 0]);
/// The seconds between two posted blocks, slow enough to never pay a penalty.
pub const BLOCK_INTERVAL: u64 = 60;

/// The rollup contract, shared with the withdrawal contract.
pub type SharedRollup = Arc<RwLock<Rollup<MockPairingVerifier>>>;

/// The withdrawal contract of the harness.
pub type TestWithdrawal = Withdrawal<MockProofVerifier, Outbox, SharedRollup>;

/// The contracts of both domains and the messengers between them.
#[derive(Debug)]
pub struct TwoDomainEnv {
    /// The liquidity contract.
    pub liquidity: Liquidity<MockVault, Outbox>,
    /// The rollup contract.
    pub rollup: SharedRollup,
    /// The withdrawal contract.
    pub withdrawal: TestWithdrawal,
    /// The messages sent from the liquidity domain.
    pub l1_outbox: Outbox,
    /// The messages sent from the rollup domain.
    pub l2_outbox: Outbox,
    l1_inbox: Inbox,
    l2_inbox: Inbox,
    relayed_to_rollup: usize,
    relayed_to_liquidity: usize,
    timestamp: u64,
}

impl TwoDomainEnv {
    /// Deploys and initializes the contracts of both domains. Native currency and [`TOKEN`]
    /// are minted to [`USER`].
    pub fn new() -> eyre::Result<Self> {
        init_test_tracing();

        let l1_outbox = Outbox::new(L1_MESSENGER, U256::ZERO);
        let l2_outbox = Outbox::new(L2_MESSENGER, U256::ZERO);

        let mut liquidity = Liquidity::new(MockVault::default(), l1_outbox.clone());
        liquidity.initialize(LiquidityConfig {
            address: LIQUIDITY,
            admin: ADMIN,
            analyzer: ANALYZER,
            messenger: L1_MESSENGER,
            rollup: ROLLUP,
            withdrawal: WITHDRAWAL,
            initial_erc20_tokens: INITIAL_TOKENS.to_vec(),
            deployment_time: DEPLOYED_AT,
        })?;
        liquidity.vault_mut().mint_native(USER, U256::from(1_000_000));
        liquidity.vault_mut().mint_erc20(TOKEN, USER, U256::from(1_000_000));

        let mut rollup = Rollup::new(MockPairingVerifier::accepting());
        rollup.initialize(RollupConfig {
            address: ROLLUP,
            owner: OWNER,
            messenger: L2_MESSENGER,
            liquidity: LIQUIDITY,
            rate_limit: RateLimitConstants::default(),
        })?;
        let rollup = Arc::new(RwLock::new(rollup));

        let mut withdrawal =
            Withdrawal::new(MockProofVerifier::accepting(), l2_outbox.clone(), rollup.clone());
        withdrawal.initialize(WithdrawalConfig {
            address: WITHDRAWAL,
            owner: OWNER,
            messenger: L2_MESSENGER,
            liquidity: LIQUIDITY,
            rollup: ROLLUP,
            gas_limit: GAS_LIMIT,
            direct_withdrawal_token_indices: vec![0, 1, 2],
        })?;

        Ok(Self {
            liquidity,
            rollup,
            withdrawal,
            l1_outbox,
            l2_outbox,
            l1_inbox: Inbox::new(L1_MESSENGER),
            l2_inbox: Inbox::new(L2_MESSENGER),
            relayed_to_rollup: 0,
            relayed_to_liquidity: 0,
            timestamp: DEPLOYED_AT,
        })
    }

    /// Returns the current timestamp of both domains.
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Returns a call context of the account at the current timestamp.
    pub const fn ctx(&self, sender: Address) -> CallContext {
        CallContext::new(sender, self.timestamp)
    }

    /// Relays the messages sent from the liquidity domain since the last relay to the rollup,
    /// stopping at the first message the rollup rejects.
    pub fn relay_to_rollup(&mut self) -> eyre::Result<Vec<RelayStatus>> {
        let messages = self.l1_outbox.messages_from(self.relayed_to_rollup);

        let mut rollup = self.rollup.write();
        let mut statuses = Vec::with_capacity(messages.len());
        for message in &messages {
            let status = self.l2_inbox.relay_message(&self.l1_outbox, message, &mut *rollup)?;
            let executed = status.is_executed();
            statuses.push(status);
            if !executed {
                break;
            }
            self.relayed_to_rollup += 1;
        }
        tracing::debug!(target: "settlement::tests", relayed = statuses.len(), "relayed to rollup");
        Ok(statuses)
    }

    /// Relays the messages sent from the rollup domain since the last relay to the liquidity
    /// contract, stopping at the first message the contract rejects.
    pub fn relay_to_liquidity(&mut self) -> eyre::Result<Vec<RelayStatus>> {
        let messages = self.l2_outbox.messages_from(self.relayed_to_liquidity);

        let mut statuses = Vec::with_capacity(messages.len());
        for message in &messages {
            let status =
                self.l1_inbox.relay_message(&self.l2_outbox, message, &mut self.liquidity)?;
            let executed = status.is_executed();
            statuses.push(status);
            if !executed {
                break;
            }
            self.relayed_to_liquidity += 1;
        }
        tracing::debug!(
            target: "settlement::tests",
            relayed = statuses.len(),
            "relayed to liquidity"
        );
        Ok(statuses)
    }

    /// Relays a single message sent from the liquidity domain to the rollup.
    pub fn relay_message_to_rollup(
        &mut self,
        message: &CrossDomainMessage,
    ) -> Result<RelayStatus, MessengerError> {
        let mut rollup = self.rollup.write();
        let status = self.l2_inbox.relay_message(&self.l1_outbox, message, &mut *rollup)?;
        if status.is_executed() {
            self.relayed_to_rollup += 1;
        }
        Ok(status)
    }

    /// Relays a single message sent from the rollup domain to the liquidity contract.
    pub fn relay_message_to_liquidity(
        &mut self,
        message: &CrossDomainMessage,
    ) -> Result<RelayStatus, MessengerError> {
        let status = self.l1_inbox.relay_message(&self.l2_outbox, message, &mut self.liquidity)?;
        if status.is_executed() {
            self.relayed_to_liquidity += 1;
        }
        Ok(status)
    }

    /// Delivers a message sent from the liquidity domain to the rollup again.
    pub fn redeliver_to_rollup(
        &mut self,
        message: &CrossDomainMessage,
    ) -> eyre::Result<RelayStatus> {
        let mut rollup = self.rollup.write();
        Ok(self.l2_inbox.redeliver_message(&self.l1_outbox, message, &mut *rollup)?)
    }

    /// Delivers a message sent from the rollup domain to the liquidity contract again.
    pub fn redeliver_to_liquidity(
        &mut self,
        message: &CrossDomainMessage,
    ) -> eyre::Result<RelayStatus> {
        Ok(self.l1_inbox.redeliver_message(&self.l2_outbox, message, &mut self.liquidity)?)
    }

    /// Advances the clock by [`BLOCK_INTERVAL`] and posts a registration block from
    /// [`BUILDER`].
    pub fn post_block(&mut self) -> eyre::Result<PostedBlock> {
        self.timestamp += BLOCK_INTERVAL;
        let submission = BlockSubmission {
            tx_tree_root: B256::repeat_byte(0xe9),
            expiry: self.timestamp + BLOCK_INTERVAL,
            agg_pubkey: [B256::repeat_byte(1); 2],
            agg_signature: [B256::repeat_byte(2); 4],
            message_point: [B256::repeat_byte(3); 4],
            ..Default::default()
        };
        let ctx = self.ctx(BUILDER);
        let keys = vec![U256::from(self.timestamp)];
        Ok(self.rollup.write().post_registration_block(&ctx, submission, keys)?)
    }
}
