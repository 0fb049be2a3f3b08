use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::Rollup`].
#[derive(Metrics, Clone)]
#[metrics(scope = "rollup")]
pub(crate) struct RollupMetrics {
    /// A counter on the posted registration blocks.
    pub(crate) registration_blocks: Counter,
    /// A counter on the posted non-registration blocks.
    pub(crate) non_registration_blocks: Counter,
    /// A counter on the blocks that paid a rate limit penalty.
    pub(crate) penalized_blocks: Counter,
    /// A counter on the deposits inserted into the deposit tree.
    pub(crate) deposits_processed: Counter,
}

/// The metrics for the [`super::BlockBuilderRegistry`].
#[derive(Metrics, Clone)]
#[metrics(scope = "block_builder_registry")]
pub(crate) struct RegistryMetrics {
    /// A counter on the block builder updates.
    pub(crate) builder_updates: Counter,
    /// A counter on the stopped block builders.
    pub(crate) builders_stopped: Counter,
    /// A counter on the unstaked block builders.
    pub(crate) unstakes: Counter,
    /// A counter on the slashed block builders.
    pub(crate) slashes: Counter,
}
