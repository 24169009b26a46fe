//! Logging setup for the extension module.

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("pretty") {
            Some(Self::Pretty)
        } else if name.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }

    fn layer<S, W>(self, writer: W, ansi: bool) -> BoxedLayer<S>
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi);
        match self {
            Self::Pretty => layer.pretty().boxed(),
            Self::Json => layer.json().boxed(),
        }
    }
}

fn open_log_file(path: &str) -> PyResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| PyRuntimeError::new_err(format!("Failed to open log file: {err}")))
}

fn level_filter(level: &str) -> PyResult<EnvFilter> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(level)
        .map_err(|err| PyRuntimeError::new_err(format!("Invalid log filter: {err}")))
}

/// Enable structured logging for the solver bindings.
///
/// When `level` is None, this reads `HIGHSPY_TRACE` if set, else logging
/// stays off. `HIGHSPY_LOG_FORMAT` selects `pretty` (default) or `json`, and
/// `HIGHSPY_LOG_FILE` adds a file sink. Returns False if a subscriber is
/// already configured.
#[pyfunction]
#[pyo3(signature = (*, level=None))]
pub fn enable_logging(level: Option<String>) -> PyResult<bool> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level = level
        .or_else(|| env::var("HIGHSPY_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = level_filter(&level)?;

    let format_name = env::var("HIGHSPY_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let format = LogFormat::from_name(&format_name).ok_or_else(|| {
        PyRuntimeError::new_err("Invalid HIGHSPY_LOG_FORMAT (expected 'json' or 'pretty')")
    })?;

    let mut layers = vec![format.layer(io::stderr, true)];
    if let Ok(path) = env::var("HIGHSPY_LOG_FILE") {
        layers.push(format.layer(open_log_file(&path)?, false));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|err| PyRuntimeError::new_err(format!("Failed to initialize logging: {err}")))?;
    Ok(true)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(pyo3::wrap_pyfunction!(enable_logging, m)?)?;
    Ok(())
}
