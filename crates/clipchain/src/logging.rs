//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output options.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Service name reported to exporters
    pub service_name: String,
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl LogConfig {
    /// Defaults for the `clipchain` service.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            level: if verbose { "debug" } else { "info" }.to_string(),
            json,
        }
    }

    fn filter(&self) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&self.level))
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if self.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer().with_target(false).boxed()
        }
    }
}

/// Install the global subscriber.
///
/// With the `observability` feature, spans and provider metrics are also
/// exported through OpenTelemetry.
pub fn init_logging(config: &LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    #[cfg(feature = "observability")]
    {
        let otel_layer = crate::observability::otel_layer(&config.service_name);
        tracing_subscriber::registry()
            .with(config.filter()?)
            .with(config.fmt_layer())
            .with(otel_layer)
            .try_init()?;
    }
    #[cfg(not(feature = "observability"))]
    {
        tracing_subscriber::registry()
            .with(config.filter()?)
            .with(config.fmt_layer())
            .try_init()?;
    }
    Ok(())
}

/// Flush exporters installed by [`init_logging`]. A no-op without the
/// `observability` feature.
pub fn shutdown_logging() {
    #[cfg(feature = "observability")]
    crate::observability::shutdown_observability();
}
