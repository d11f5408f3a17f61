//! Logging setup.
//!
//! Logs go to stderr so they never interleave with the report on stdout.
//! The filter is reloadable: [`LogHandle::escalate_transport`] raises the
//! transport targets to `trace` and the returned [`VerbosityGuard`] puts the
//! previous filter back when dropped.

use crate::{Error, ErrorContext, Result};
use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Targets raised to `trace` while a [`VerbosityGuard`] is alive.
pub const TRANSPORT_TRACE_DIRECTIVES: &str = "genai_probe::transport=trace,reqwest=trace,hyper=trace";

/// Handle on the installed filter.
#[derive(Clone)]
pub struct LogHandle {
    handle: reload::Handle<EnvFilter, Registry>,
    current: Arc<Mutex<String>>,
}

/// Installs the global subscriber. Reads `RUST_LOG`, defaulting to [`DEFAULT_DIRECTIVES`].
pub fn init() -> Result<LogHandle> {
    let directives = std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string());
    let filter = parse_filter(&directives)?;
    let (filter_layer, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
        .map_err(|e| {
            Error::runtime_with_context(
                "failed to install tracing subscriber",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("logging"),
            )
        })?;

    Ok(LogHandle::from_parts(handle, directives))
}

impl LogHandle {
    /// Wraps an existing reload handle whose filter was built from `directives`.
    pub fn from_parts(
        handle: reload::Handle<EnvFilter, Registry>,
        directives: impl Into<String>,
    ) -> Self {
        Self {
            handle,
            current: Arc::new(Mutex::new(directives.into())),
        }
    }

    /// Directives currently in effect.
    pub fn current_directives(&self) -> String {
        self.current
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Raises the transport targets to `trace` until the guard is dropped.
    pub fn escalate_transport(&self) -> Result<VerbosityGuard> {
        let previous = self.current_directives();
        let escalated = format!("{},{}", previous, TRANSPORT_TRACE_DIRECTIVES);
        self.apply(&escalated)?;
        tracing::debug!(directives = escalated.as_str(), "transport logging escalated");
        Ok(VerbosityGuard {
            log: self.clone(),
            previous,
        })
    }

    fn apply(&self, directives: &str) -> Result<()> {
        let filter = parse_filter(directives)?;
        self.handle.reload(filter).map_err(|e| {
            Error::runtime_with_context(
                "failed to reload log filter",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("logging"),
            )
        })?;
        if let Ok(mut current) = self.current.lock() {
            *current = directives.to_string();
        }
        Ok(())
    }
}

/// Restores the filter that was active before escalation.
#[must_use = "verbosity is restored as soon as the guard is dropped"]
pub struct VerbosityGuard {
    log: LogHandle,
    previous: String,
}

impl VerbosityGuard {
    pub fn previous_directives(&self) -> &str {
        &self.previous
    }
}

impl Drop for VerbosityGuard {
    fn drop(&mut self) {
        if let Err(e) = self.log.apply(&self.previous) {
            eprintln!("warning: could not restore log filter: {}", e);
        }
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        Error::configuration_with_context(
            format!("invalid log filter '{}'", directives),
            ErrorContext::new()
                .with_field_path("RUST_LOG")
                .with_details(e.to_string())
                .with_source("logging"),
        )
    })
}
