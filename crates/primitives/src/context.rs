use alloy_primitives::{Address, U256};

/// The environment a contract call executes in.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// The immediate caller.
    pub sender: Address,
    /// The native value attached to the call.
    pub value: U256,
    /// The timestamp of the block the call executes in, in seconds.
    pub timestamp: u64,
}

impl CallContext {
    /// Returns a new [`CallContext`] without attached value.
    pub const fn new(sender: Address, timestamp: u64) -> Self {
        Self { sender, value: U256::ZERO, timestamp }
    }

    /// Sets the attached native value.
    pub const fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}
