//! Metrics for provider API calls.
//!
//! Instruments are registered on the global OpenTelemetry meter. The binary
//! installs a stdout meter provider with the `observability` feature;
//! otherwise they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

/// Instrumentation scope of the provider instruments.
pub const METER_NAME: &str = "clipchain_provider";

static METRICS: OnceLock<ProviderMetrics> = OnceLock::new();

/// Request, error and latency instruments labeled by provider and model.
#[derive(Clone)]
pub struct ProviderMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total provider API requests
    pub requests: Counter<u64>,
    /// Failed provider API requests
    pub errors: Counter<u64>,
    /// Provider API call duration in seconds
    pub duration: Histogram<f64>,
}

impl ProviderMetrics {
    /// Build the instruments on an explicit meter.
    pub fn new(meter: &Meter) -> Self {
        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("provider.requests")
                .with_description("Total provider API requests")
                .build(),
            errors: meter
                .u64_counter("provider.errors")
                .with_description("Failed provider API requests")
                .build(),
            duration: meter
                .f64_histogram("provider.duration")
                .with_unit("seconds")
                .with_description("Provider API call duration")
                .build(),
        }
    }

    /// Get the global provider metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(|| Self::new(&global::meter(METER_NAME)))
    }

    /// Record a successful request.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type.to_string()),
        ];
        self.errors.add(1, labels);
    }
}

/// Short label for an error, for the `error_type` metric attribute.
pub fn classify_status(status: u16) -> &'static str {
    match status {
        400 | 422 => "validation",
        401 | 403 => "auth",
        404 => "not_found",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "other",
    }
}
