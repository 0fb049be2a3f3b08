use crate::{
    metrics::InboxMetrics, CrossDomainMessage, CrossDomainMessenger, MessageReceiver,
    MessengerError, Outbox, XDomainContext,
};

use alloy_primitives::{Address, B256, U256};
use std::collections::{HashMap, HashSet};

/// The outcome of relaying a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayStatus {
    /// The message executed successfully.
    Executed(B256),
    /// The receiver rejected the message. The message can be relayed again.
    Failed {
        /// The hash of the message.
        hash: B256,
        /// The error returned by the receiver.
        reason: String,
    },
}

impl RelayStatus {
    /// Returns true if the message executed successfully.
    pub const fn is_executed(&self) -> bool {
        matches!(self, Self::Executed(_))
    }
}

/// The messenger of a receiving domain.
///
/// Messages from a sending domain execute in nonce order: a message is only relayed once every
/// message before it on the same channel executed.
#[derive(Debug)]
pub struct Inbox {
    address: Address,
    executed: HashSet<B256>,
    next_nonces: HashMap<Address, U256>,
    metrics: InboxMetrics,
}

impl Inbox {
    /// Returns a new inbox for the messenger at the given address.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            executed: HashSet::new(),
            next_nonces: HashMap::new(),
            metrics: InboxMetrics::default(),
        }
    }

    /// Returns the address of the messenger.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns true if the message was successfully executed.
    pub fn is_executed(&self, hash: &B256) -> bool {
        self.executed.contains(hash)
    }

    /// Returns the nonce of the next message to execute from the messenger at `source`.
    pub fn next_nonce(&self, source: Address) -> U256 {
        self.next_nonces.get(&source).copied().unwrap_or_default()
    }

    /// Relays a message committed on the sending domain to its target.
    ///
    /// Fails if the message was not committed by `source`, if it already executed, if an earlier
    /// message from `source` has not executed yet, or if `receiver` is not its target. A receiver
    /// error does not fail the relay: the message is reported as [`RelayStatus::Failed`] and
    /// stays relayable.
    pub fn relay_message<R: MessageReceiver>(
        &mut self,
        source: &Outbox,
        message: &CrossDomainMessage,
        receiver: &mut R,
    ) -> Result<RelayStatus, MessengerError> {
        let hash = message.hash();
        if !source.is_committed(&hash) {
            return Err(MessengerError::MessageNotCommitted(hash));
        }
        if self.executed.contains(&hash) {
            return Err(MessengerError::MessageAlreadyExecuted(hash));
        }
        self.ensure_next(source, message)?;

        let status = self.execute(hash, message, receiver)?;
        if status.is_executed() {
            self.mark_executed(source, hash, message);
        }
        Ok(status)
    }

    /// Delivers a committed message again, even if it already executed. This models the
    /// at-least-once delivery of the transport: receivers must treat the replay as a no-op.
    /// A message that has not executed yet keeps its place in the nonce order.
    pub fn redeliver_message<R: MessageReceiver>(
        &mut self,
        source: &Outbox,
        message: &CrossDomainMessage,
        receiver: &mut R,
    ) -> Result<RelayStatus, MessengerError> {
        let hash = message.hash();
        if !source.is_committed(&hash) {
            return Err(MessengerError::MessageNotCommitted(hash));
        }
        let first_delivery = !self.executed.contains(&hash);
        if first_delivery {
            self.ensure_next(source, message)?;
        }
        self.metrics.redeliveries.increment(1);

        let status = self.execute(hash, message, receiver)?;
        if first_delivery && status.is_executed() {
            self.mark_executed(source, hash, message);
        }
        Ok(status)
    }

    fn ensure_next(
        &self,
        source: &Outbox,
        message: &CrossDomainMessage,
    ) -> Result<(), MessengerError> {
        let expected = self.next_nonce(source.address());
        if message.nonce != expected {
            return Err(MessengerError::MessageOutOfOrder { expected, got: message.nonce });
        }
        Ok(())
    }

    fn mark_executed(&mut self, source: &Outbox, hash: B256, message: &CrossDomainMessage) {
        self.executed.insert(hash);
        self.next_nonces.insert(source.address(), message.nonce.saturating_add(U256::from(1)));
    }

    fn execute<R: MessageReceiver>(
        &self,
        hash: B256,
        message: &CrossDomainMessage,
        receiver: &mut R,
    ) -> Result<RelayStatus, MessengerError> {
        if receiver.address() != message.target {
            return Err(MessengerError::UnexpectedTarget {
                expected: message.target,
                got: receiver.address(),
            });
        }

        let ctx = XDomainContext {
            caller: self.address,
            x_domain_message_sender: message.sender,
            value: message.value,
        };
        match receiver.on_message_received(&ctx, &message.message) {
            Ok(()) => {
                self.metrics.messages_relayed.increment(1);
                tracing::debug!(
                    target: "settlement::messenger",
                    ?hash,
                    nonce = %message.nonce,
                    "relayed message"
                );
                Ok(RelayStatus::Executed(hash))
            }
            Err(err) => {
                self.metrics.relay_failures.increment(1);
                tracing::warn!(
                    target: "settlement::messenger",
                    ?hash,
                    %err,
                    "failed to relay message"
                );
                Ok(RelayStatus::Failed { hash, reason: err.to_string() })
            }
        }
    }
}
