//! First-in first-out queues backing the deposit and withdrawal pipelines.
//!
//! All queues are 1-indexed: index 0 holds a default sentinel value and is never a member.
//! Dequeuing only advances the front pointer, so dequeued entries stay readable by index.

pub use deposit::DepositQueue;
mod deposit;

pub use error::{DepositQueueError, QueueError};
mod error;

pub use fifo::Queue;
mod fifo;

use alloy_primitives::B256;
use settlement_primitives::Withdrawal;

/// A queue of 32-byte values.
pub type Bytes32Queue = Queue<B256>;

/// A queue of withdrawals.
pub type WithdrawalQueue = Queue<Withdrawal>;
