use super::{Probe, ProbeOutcome};
use crate::client::ModelService;
use crate::logging::LogHandle;
use crate::transport::TransportLogging;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-image-preview";
pub const DEFAULT_PROMPT: &str = "Say 'OK'";

/// Single generation call with the raw HTTP exchange logged.
///
/// The client must be built with [`TransportLogging::Verbose`] (the runner
/// does this from [`Probe::transport_logging`]). When a [`LogHandle`] is
/// attached, the transport targets are raised to `trace` for the duration of
/// the call only.
#[derive(Clone)]
pub struct TraceProbe {
    model: String,
    prompt: String,
    log: Option<LogHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceReport {
    pub model: String,
    pub outcome: ProbeOutcome,
    pub duration_ms: u64,
    /// Whether the log filter was actually raised during the call.
    pub escalated: bool,
}

impl TraceProbe {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            log: None,
        }
    }

    pub fn with_log_handle(mut self, log: LogHandle) -> Self {
        self.log = Some(log);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Default for TraceProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL, DEFAULT_PROMPT)
    }
}

#[async_trait]
impl Probe for TraceProbe {
    type Report = TraceReport;

    fn name(&self) -> &'static str {
        "trace-request"
    }

    fn title(&self) -> String {
        format!("Testing {} with HTTP request details", self.model)
    }

    fn transport_logging(&self) -> TransportLogging {
        TransportLogging::Verbose
    }

    async fn run(&self, service: &dyn ModelService) -> TraceReport {
        let guard = match &self.log {
            Some(log) => match log.escalate_transport() {
                Ok(guard) => Some(guard),
                Err(e) => {
                    warn!("could not raise transport logging: {}", e);
                    None
                }
            },
            None => None,
        };
        let escalated = guard.is_some();

        info!(model = self.model.as_str(), "sending request");
        let start = Instant::now();
        let outcome =
            ProbeOutcome::from_result(service.generate_content(&self.model, &self.prompt).await);
        let duration_ms = start.elapsed().as_millis() as u64;
        drop(guard);

        TraceReport {
            model: self.model.clone(),
            outcome,
            duration_ms,
            escalated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::ProbeErrorKind;
    use crate::probe::fake::{runtime, FakeService, Reply};
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{reload, EnvFilter, Registry};

    #[test]
    fn trace_restores_filter_after_call() {
        let (layer, handle) = reload::Layer::new(EnvFilter::new("info"));
        let _subscriber = Registry::default().with(layer);
        let log = LogHandle::from_parts(handle, "info");

        let service = FakeService::with_replies(vec![(DEFAULT_MODEL, Reply::Text("OK"))]);
        let probe = TraceProbe::default().with_log_handle(log.clone());
        let report = tokio_test::block_on(probe.run(&service));

        assert!(report.escalated);
        assert_eq!(report.outcome, ProbeOutcome::Success { text: "OK".into() });
        assert_eq!(log.current_directives(), "info");
    }

    #[test]
    fn trace_without_handle_still_reports_errors() {
        let service = FakeService::with_replies(vec![(
            "gemini-x",
            Reply::Fail(runtime("404 Publisher model not found")),
        )]);
        let probe = TraceProbe::new("gemini-x", "Say 'OK'");
        let report = tokio_test::block_on(probe.run(&service));
        assert!(!report.escalated);
        assert_eq!(report.outcome.kind(), Some(ProbeErrorKind::NotFound));
        assert_eq!(probe.transport_logging(), TransportLogging::Verbose);
    }
}
