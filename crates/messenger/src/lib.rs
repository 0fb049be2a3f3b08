//! The cross-domain messenger connecting the liquidity and rollup domains.
//!
//! Messages are committed to an [`Outbox`] on the sending domain and relayed to a
//! [`MessageReceiver`] through the [`Inbox`] of the receiving domain. Relaying is proof-gated:
//! only messages committed by the sending domain can be relayed, and each message executes at
//! most once through the inbox. Transport order and timing are left to the caller.

pub mod abi;
pub use abi::CrossDomainCall;

pub use error::MessengerError;
mod error;

pub use inbox::{Inbox, RelayStatus};
mod inbox;

pub use message::{CrossDomainMessage, SentMessage, XDomainContext};
mod message;

mod metrics;

pub use outbox::Outbox;
mod outbox;

use alloy_primitives::{Address, Bytes, U256};

/// Sends messages to the other domain.
#[auto_impl::auto_impl(&, Arc, Box)]
pub trait CrossDomainMessenger {
    /// Returns the address of the messenger on the local domain.
    fn address(&self) -> Address;

    /// Returns the fee charged to relay a message with the given gas limit.
    fn relay_fee(&self, gas_limit: U256) -> U256;

    /// Commits a message to the other domain. `msg_value` must cover the transferred `value`
    /// and the relay fee, the excess is returned as the refund.
    fn send_message(
        &self,
        sender: Address,
        target: Address,
        value: U256,
        message: Bytes,
        gas_limit: U256,
        msg_value: U256,
    ) -> Result<SentMessage, MessengerError>;
}

/// A contract receiving cross-domain messages.
#[auto_impl::auto_impl(&mut, Box)]
pub trait MessageReceiver {
    /// The error returned when the message cannot be executed.
    type Error: std::error::Error;

    /// Returns the address of the receiving contract.
    fn address(&self) -> Address;

    /// Executes a relayed message.
    fn on_message_received(
        &mut self,
        ctx: &XDomainContext,
        message: &[u8],
    ) -> Result<(), Self::Error>;
}
