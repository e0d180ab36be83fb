use crate::status::PreHandleStatus;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};

/// Counters and a latency histogram for one node's pre-handle workflow,
/// registered against a caller-supplied [`Registry`] the way the rest of the
/// node's subsystems register theirs.
pub struct PreHandleMetrics {
    outcomes: IntCounterVec,
    dispatched_verifications: IntCounterVec,
    duration_seconds: Histogram,
}

impl PreHandleMetrics {
    pub fn new(registry: &Registry) -> Self {
        let outcomes = IntCounterVec::new(
            Opts::new(
                "prehandle_outcomes_total",
                "Pre-handle passes completed, by terminal status",
            ),
            &["status"],
        )
        .expect("metric names and label names are static and well-formed");
        registry
            .register(Box::new(outcomes.clone()))
            .expect("metric is registered exactly once");

        let dispatched_verifications = IntCounterVec::new(
            Opts::new(
                "prehandle_dispatched_verifications_total",
                "Signature verifications submitted to the verification pool, by kind",
            ),
            &["kind"],
        )
        .expect("metric names and label names are static and well-formed");
        registry
            .register(Box::new(dispatched_verifications.clone()))
            .expect("metric is registered exactly once");

        let duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "prehandle_duration_seconds",
            "Wall-clock time spent in one pre-handle pass, excluding completion of dispatched verifications",
        ))
        .expect("histogram options are static and well-formed");
        registry
            .register(Box::new(duration_seconds.clone()))
            .expect("metric is registered exactly once");

        Self {
            outcomes,
            dispatched_verifications,
            duration_seconds,
        }
    }

    pub fn observe_status(&self, status: PreHandleStatus) {
        let label = match status {
            PreHandleStatus::SoFarSoGood => "so_far_so_good",
            PreHandleStatus::NodeDueDiligenceFailure => "node_due_diligence_failure",
            PreHandleStatus::PreHandleFailure => "pre_handle_failure",
            PreHandleStatus::UnknownFailure => "unknown_failure",
        };
        self.outcomes.with_label_values(&[label]).inc();
    }

    pub fn observe_dispatched_key(&self) {
        self.dispatched_verifications
            .with_label_values(&["key"])
            .inc();
    }

    pub fn observe_dispatched_hollow_account(&self) {
        self.dispatched_verifications
            .with_label_values(&["hollow_account"])
            .inc();
    }

    pub fn observe_duration_seconds(&self, seconds: f64) {
        self.duration_seconds.observe(seconds);
    }
}
