use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::Liquidity`].
#[derive(Metrics, Clone)]
#[metrics(scope = "liquidity")]
pub(crate) struct LiquidityMetrics {
    /// A counter on the deposits made.
    pub(crate) deposits: Counter,
    /// A counter on the deposits relayed to the rollup.
    pub(crate) relayed_deposits: Counter,
    /// A counter on the deposits rejected during analysis.
    pub(crate) rejected_deposits: Counter,
    /// A counter on the canceled or reclaimed deposits.
    pub(crate) refunded_deposits: Counter,
    /// A counter on the direct withdrawals paid out.
    pub(crate) direct_withdrawals: Counter,
    /// A counter on the direct withdrawals that failed and became claimable.
    pub(crate) failed_direct_withdrawals: Counter,
    /// A counter on the withdrawals made claimable.
    pub(crate) claimable_withdrawals: Counter,
    /// A counter on the claimed withdrawals.
    pub(crate) claimed_withdrawals: Counter,
}
