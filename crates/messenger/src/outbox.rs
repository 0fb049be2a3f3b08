use crate::{
    metrics::OutboxMetrics, CrossDomainMessage, CrossDomainMessenger, MessengerError, SentMessage,
};

use alloy_primitives::{Address, Bytes, B256, U256};
use parking_lot::Mutex;
use std::{collections::HashSet, sync::Arc};

/// The in-memory message queue of a sending domain.
///
/// Clones share the same queue, so the contracts of a domain and the relayer can hold their own
/// handle.
#[derive(Debug, Clone)]
pub struct Outbox {
    inner: Arc<Mutex<OutboxInner>>,
}

#[derive(Debug)]
struct OutboxInner {
    address: Address,
    fee_per_gas: U256,
    messages: Vec<CrossDomainMessage>,
    committed: HashSet<B256>,
    metrics: OutboxMetrics,
}

impl Outbox {
    /// Returns a new outbox for the messenger at the given address. The relay fee of a message
    /// is its gas limit times `fee_per_gas`.
    pub fn new(address: Address, fee_per_gas: U256) -> Self {
        Self {
            inner: Arc::new(Mutex::new(OutboxInner {
                address,
                fee_per_gas,
                messages: Vec::new(),
                committed: HashSet::new(),
                metrics: OutboxMetrics::default(),
            })),
        }
    }

    /// Returns true if the message hash was committed.
    pub fn is_committed(&self, hash: &B256) -> bool {
        self.inner.lock().committed.contains(hash)
    }

    /// Returns the messages committed from the given position onwards, in nonce order.
    pub fn messages_from(&self, position: usize) -> Vec<CrossDomainMessage> {
        self.inner.lock().messages.iter().skip(position).cloned().collect()
    }

    /// Returns every committed message, in nonce order.
    pub fn messages(&self) -> Vec<CrossDomainMessage> {
        self.messages_from(0)
    }

    /// Returns the number of committed messages.
    pub fn len(&self) -> usize {
        self.inner.lock().messages.len()
    }

    /// Returns true if no message was committed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CrossDomainMessenger for Outbox {
    fn address(&self) -> Address {
        self.inner.lock().address
    }

    fn relay_fee(&self, gas_limit: U256) -> U256 {
        self.inner.lock().fee_per_gas.saturating_mul(gas_limit)
    }

    fn send_message(
        &self,
        sender: Address,
        target: Address,
        value: U256,
        message: Bytes,
        gas_limit: U256,
        msg_value: U256,
    ) -> Result<SentMessage, MessengerError> {
        let mut inner = self.inner.lock();

        let fee = inner.fee_per_gas.saturating_mul(gas_limit);
        let required = value.saturating_add(fee);
        if msg_value < required {
            return Err(MessengerError::InsufficientMsgValue { required, provided: msg_value });
        }

        let nonce = U256::from(inner.messages.len());
        let message = CrossDomainMessage { sender, target, value, nonce, message, gas_limit };
        let hash = message.hash();
        inner.messages.push(message);
        inner.committed.insert(hash);
        inner.metrics.messages_sent.increment(1);

        tracing::debug!(
            target: "settlement::messenger",
            %sender,
            %target,
            %nonce,
            ?hash,
            "committed message"
        );

        Ok(SentMessage { nonce, hash, fee, refund: msg_value - required })
    }
}
