//! Prometheus counters for the bridge.
//!
//! Counters live in a registry owned by [`Metrics`] rather than the
//! process-global default registry, so each handler state (and each test)
//! gets its own.

use prometheus::{Encoder, IntCounter, Opts, Registry, TextEncoder};

/// Name of the received-requests counter.
pub const RECEIVED_TOTAL: &str = "messages_received_total";

/// Name of the errored-requests counter.
pub const ERRORED_TOTAL: &str = "error_alerts_total";

/// The two monotonic counters exposed on `/metrics`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    received: IntCounter,
    errored: IntCounter,
}

impl Metrics {
    /// Create and register both counters.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let received = IntCounter::with_opts(Opts::new(
            RECEIVED_TOTAL,
            "Number of messages processed by Hermes",
        ))?;
        let errored = IntCounter::with_opts(Opts::new(
            ERRORED_TOTAL,
            "Number of messages received by Hermes that ended in an error",
        ))?;

        registry.register(Box::new(received.clone()))?;
        registry.register(Box::new(errored.clone()))?;

        Ok(Self {
            registry,
            received,
            errored,
        })
    }

    /// Count an inbound request, whatever its outcome.
    pub fn inc_received(&self) {
        self.received.inc();
    }

    /// Count a request that ended in an error.
    pub fn inc_errored(&self) {
        self.errored.inc();
    }

    /// Current value of the received counter.
    pub fn received(&self) -> u64 {
        self.received.get()
    }

    /// Current value of the errored counter.
    pub fn errored(&self) -> u64 {
        self.errored.get()
    }

    /// Encode all registered metrics in the Prometheus text format.
    pub fn gather(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&metric_families, &mut buffer).is_ok() {
            String::from_utf8(buffer).unwrap_or_default()
        } else {
            String::new()
        }
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("received", &self.received())
            .field("errored", &self.errored())
            .finish()
    }
}
