//! OpenTelemetry tracing with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → cinedex-otlp.json
//! ```
//!
//! Each exported batch is one OTLP JSON document per line. The file rotates at
//! 10 MB and keeps three backups (`cinedex-otlp.json.1` .. `.3`).
//!
//! Trace level comes from `trace_level` in [`Config`](crate::Config)
//! (`CINEDEX_TRACE_LEVEL` in the environment), default `info`.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `tracer`: tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON encoding
//! - `file_writer`: rotating writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, shutdown_tracing};
