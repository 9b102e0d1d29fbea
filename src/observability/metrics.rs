//! Metrics collection and exposition.
//!
//! # Metrics
//! - `<namespace>_execution_latency_seconds` (histogram, label `step`):
//!   wall time spent in instrumented handlers
//!
//! # Design Decisions
//! - The Prometheus recorder is owned by `Metrics` and never installed
//!   globally, so every server (and every test) gets its own registry
//! - Exponential buckets from 1ms, doubling 15 times

use std::sync::Arc;
use std::time::{Duration, Instant};

use metrics::Unit;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

/// Metric name, appended to the configured namespace.
pub const LATENCY_METRIC: &str = "execution_latency_seconds";

/// Step label for whole-handler observations.
pub const TOTAL_STEP: &str = "total";

const LATENCY_HELP: &str = "Time Spent.";

/// Histogram buckets: 0.001 * 2^i for i in 0..15.
pub fn latency_buckets() -> Vec<f64> {
    (0..15).map(|i| 0.001 * 2f64.powi(i)).collect()
}

/// Destination for latency observations.
///
/// Implementations must be safe to call concurrently from request tasks.
pub trait LatencySink: Send + Sync {
    fn observe(&self, step: &str, seconds: f64);
}

/// Sink that discards observations.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl LatencySink for NoopSink {
    fn observe(&self, _step: &str, _seconds: f64) {}
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("invalid histogram buckets: {0}")]
    Buckets(#[from] BuildError),
}

/// Prometheus-backed metrics registry.
#[derive(Clone)]
pub struct Metrics {
    recorder: Arc<PrometheusRecorder>,
    handle: PrometheusHandle,
    latency_name: String,
}

impl Metrics {
    /// Create a registry whose metric names start with `namespace`.
    pub fn new(namespace: &str) -> Result<Self, MetricsError> {
        let latency_name = format!("{}_{}", namespace, LATENCY_METRIC);

        let recorder = PrometheusBuilder::new()
            .set_buckets_for_metric(Matcher::Full(latency_name.clone()), &latency_buckets())?
            .build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            metrics::describe_histogram!(latency_name.clone(), Unit::Seconds, LATENCY_HELP);
        });

        tracing::debug!(metric = %latency_name, "Metrics registry initialized");

        Ok(Self {
            recorder: Arc::new(recorder),
            handle,
            latency_name,
        })
    }

    /// Full name of the latency histogram.
    pub fn latency_name(&self) -> &str {
        &self.latency_name
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl LatencySink for Metrics {
    fn observe(&self, step: &str, seconds: f64) {
        metrics::with_local_recorder(self.recorder.as_ref(), || {
            metrics::histogram!(self.latency_name.clone(), "step" => step.to_owned()).record(seconds);
        });
    }
}

/// Measures one execution and reports it as a `total` observation.
///
/// The observation is emitted when the timer is dropped, so every exit path
/// of the timed scope is recorded exactly once.
pub struct ExecutionTimer {
    sink: Arc<dyn LatencySink>,
    start: Instant,
    observed: bool,
}

impl ExecutionTimer {
    pub fn start(sink: Arc<dyn LatencySink>) -> Self {
        Self {
            sink,
            start: Instant::now(),
            observed: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Emit the observation now instead of at drop.
    pub fn observe_total(mut self) {
        self.record();
    }

    fn record(&mut self) {
        if !self.observed {
            self.observed = true;
            self.sink.observe(TOTAL_STEP, self.elapsed().as_secs_f64());
        }
    }
}

impl Drop for ExecutionTimer {
    fn drop(&mut self) {
        self.record();
    }
}
