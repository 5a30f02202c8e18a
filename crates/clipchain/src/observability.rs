//! OpenTelemetry span and metric export.

use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_sdk::{Resource, metrics::SdkMeterProvider, trace::SdkTracerProvider};
use opentelemetry_stdout::{MetricExporter, SpanExporter};
use std::sync::OnceLock;
use tracing_subscriber::{Layer, registry::LookupSpan};

static PROVIDERS: OnceLock<(SdkTracerProvider, SdkMeterProvider)> = OnceLock::new();

fn resource(service_name: &str) -> Resource {
    Resource::builder()
        .with_service_name(service_name.to_string())
        .with_attributes(vec![KeyValue::new(
            "service.version",
            env!("CARGO_PKG_VERSION"),
        )])
        .build()
}

/// Meter provider exporting to stdout on a periodic reader.
pub fn meter_provider(service_name: &str) -> SdkMeterProvider {
    SdkMeterProvider::builder()
        .with_periodic_exporter(MetricExporter::default())
        .with_resource(resource(service_name))
        .build()
}

/// A tracing layer exporting spans to stdout.
///
/// Registers the global tracer and meter providers, so provider request
/// metrics are exported alongside spans.
pub fn otel_layer<S>(service_name: &str) -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'span> LookupSpan<'span>,
{
    let tracer_provider = SdkTracerProvider::builder()
        .with_simple_exporter(SpanExporter::default())
        .with_resource(resource(service_name))
        .build();
    global::set_tracer_provider(tracer_provider.clone());

    let meter_provider = meter_provider(service_name);
    global::set_meter_provider(meter_provider.clone());

    let tracer = tracer_provider.tracer(service_name.to_string());
    let _ = PROVIDERS.set((tracer_provider, meter_provider));
    tracing_opentelemetry::layer().with_tracer(tracer)
}

/// Flush pending spans and metrics.
pub fn shutdown_observability() {
    if let Some((tracer_provider, meter_provider)) = PROVIDERS.get() {
        if let Err(e) = meter_provider.shutdown() {
            tracing::warn!(error = %e, "Failed to flush metrics");
        }
        if let Err(e) = tracer_provider.shutdown() {
            tracing::warn!(error = %e, "Failed to flush spans");
        }
    }
}
