//! Store metrics.
//!
//! Counters are recorded through the `metrics` facade. Nothing is exported
//! unless the embedding application installs a recorder, in which case the
//! names below show up alongside its own metrics.

use metrics::{counter, describe_counter};

/// Actions reduced, including actions fed back from effects.
pub const ACTIONS_PROCESSED: &str = "store_actions_processed_total";

/// `Effect::Run` tasks executed.
pub const EFFECTS_EXECUTED: &str = "store_effects_executed_total";

/// Sends rejected because the store was shut down.
pub const SENDS_REJECTED: &str = "store_sends_rejected_total";

/// Register metric descriptions with the installed recorder.
///
/// Safe to call more than once.
pub fn describe_metrics() {
    describe_counter!(
        ACTIONS_PROCESSED,
        "Total number of actions processed by the store reducer"
    );
    describe_counter!(EFFECTS_EXECUTED, "Total number of effects executed");
    describe_counter!(
        SENDS_REJECTED,
        "Total number of actions rejected after shutdown"
    );
}

/// Store metrics recorder.
pub struct StoreMetrics;

impl StoreMetrics {
    /// Record one reduced action.
    pub fn record_action() {
        counter!(ACTIONS_PROCESSED).increment(1);
    }

    /// Record one executed effect, labelled with its name.
    pub fn record_effect(name: &'static str) {
        counter!(EFFECTS_EXECUTED, "effect" => name).increment(1);
    }

    /// Record a send rejected during shutdown.
    pub fn record_rejected() {
        counter!(SENDS_REJECTED).increment(1);
    }
}
