/// An error returned by a [`crate::Queue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The queue has no members.
    #[error("queue is empty")]
    QueueIsEmpty,
    /// The index was never allocated.
    #[error("index {index} is out of range, next index is {next_index}")]
    IndexOutOfRange {
        /// The requested index.
        index: u64,
        /// The next index the queue will allocate.
        next_index: u64,
    },
}

/// An error returned by the [`crate::DepositQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DepositQueueError {
    /// Tried to analyze deposits that were never enqueued.
    #[error("tried to analyze up to deposit {up_to} but the next deposit id is {rear}")]
    TriedAnalyzeNotExists {
        /// The requested upper bound.
        up_to: u64,
        /// The next deposit id.
        rear: u64,
    },
    /// Tried to analyze deposits that were already analyzed.
    #[error("deposit {up_to} is too old, deposits were analyzed up to {last_analyzed}")]
    UpToDepositIdIsTooOld {
        /// The requested upper bound.
        up_to: u64,
        /// The last analyzed deposit id.
        last_analyzed: u64,
    },
    /// A rejected deposit id is outside of the analyzed range.
    #[error("rejected deposit {rejected_id} is outside of ({last_analyzed}, {up_to}]")]
    TriedToRejectOutOfRange {
        /// The rejected deposit id.
        rejected_id: u64,
        /// The requested upper bound.
        up_to: u64,
        /// The last analyzed deposit id.
        last_analyzed: u64,
    },
    /// Tried to collect deposits that were not analyzed.
    #[error("tried to collect up to deposit {up_to}, analyzed up to {last_analyzed}")]
    TriedCollectDepositsNotAnalyzedYet {
        /// The requested upper bound.
        up_to: u64,
        /// The last analyzed deposit id.
        last_analyzed: u64,
    },
}
