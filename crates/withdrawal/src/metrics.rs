use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::Withdrawal`].
#[derive(Metrics, Clone)]
#[metrics(scope = "withdrawal")]
pub(crate) struct WithdrawalMetrics {
    /// A counter on the accepted withdrawal proofs.
    pub(crate) proofs: Counter,
    /// A counter on the withdrawals queued for direct payout.
    pub(crate) direct_withdrawals: Counter,
    /// A counter on the withdrawals queued to be claimed.
    pub(crate) claimable_withdrawals: Counter,
    /// A counter on the already processed withdrawals skipped.
    pub(crate) skipped_withdrawals: Counter,
    /// A counter on the relay messages sent.
    pub(crate) relays: Counter,
}
