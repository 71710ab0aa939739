//! Subscriber setup.

use super::tracer;
use crate::infrastructure::paths::trace_file;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::sync::OnceLock;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "cinedex";
const DEFAULT_LEVEL: &str = "info";

static INITIALIZED: OnceLock<bool> = OnceLock::new();

/// Installs the global subscriber: an `EnvFilter` from `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that exports to
/// `<data dir>/cinedex-otlp.json`.
///
/// Best-effort and idempotent. Returns `true` if a subscriber from this crate
/// is active, `false` when the data directory could not be created or another
/// global subscriber was already installed.
///
/// # Example
///
/// ```no_run
/// use cinedex::observability::init_tracing;
/// use cinedex::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    *INITIALIZED.get_or_init(|| install(config))
}

fn install(config: &Config) -> bool {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return false;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = tracer::create_tracer_provider(trace_file(&data_dir), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init()
        .is_ok();

    if installed {
        opentelemetry::global::set_tracer_provider(provider);
    }
    installed
}

/// Flushes and stops the exporter. Safe to call when tracing was never set up.
pub fn shutdown_tracing() {
    if INITIALIZED.get().copied().unwrap_or(false) {
        opentelemetry::global::shutdown_tracer_provider();
    }
}
