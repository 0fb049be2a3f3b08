use metrics::Counter;
use metrics_derive::Metrics;

/// The metrics for the [`super::Outbox`].
#[derive(Metrics, Clone)]
#[metrics(scope = "messenger_outbox")]
pub(crate) struct OutboxMetrics {
    /// A counter on the messages sent.
    pub(crate) messages_sent: Counter,
}

/// The metrics for the [`super::Inbox`].
#[derive(Metrics, Clone)]
#[metrics(scope = "messenger_inbox")]
pub(crate) struct InboxMetrics {
    /// A counter on the messages successfully executed.
    pub(crate) messages_relayed: Counter,
    /// A counter on the messages whose execution failed.
    pub(crate) relay_failures: Counter,
    /// A counter on the redelivered messages.
    pub(crate) redeliveries: Counter,
}
