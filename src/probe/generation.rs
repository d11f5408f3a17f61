use super::{Probe, ProbeOutcome};
use crate::client::ModelService;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{info, warn};

/// Models tried by `test-models`, in order.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-3-pro-image-preview",
    "gemini-2.0-flash-exp",
    "gemini-2.5-flash",
];

pub const DEFAULT_PROMPT: &str = "Hello, just say 'OK' if you can understand this.";

/// Sends one generation request per model and classifies each outcome.
///
/// Models are tried strictly in order, exactly once each; a failure never
/// stops the remaining models.
#[derive(Debug, Clone)]
pub struct GenerationProbe {
    models: Vec<String>,
    prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResult {
    pub model: String,
    pub outcome: ProbeOutcome,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub prompt: String,
    pub results: Vec<ModelResult>,
}

impl GenerationReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

impl GenerationProbe {
    pub fn new<S: Into<String>>(models: impl IntoIterator<Item = S>, prompt: impl Into<String>) -> Self {
        Self {
            models: models.into_iter().map(Into::into).collect(),
            prompt: prompt.into(),
        }
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl Default for GenerationProbe {
    fn default() -> Self {
        Self::new(DEFAULT_MODELS.iter().copied(), DEFAULT_PROMPT)
    }
}

#[async_trait]
impl Probe for GenerationProbe {
    type Report = GenerationReport;

    fn name(&self) -> &'static str {
        "test-models"
    }

    fn title(&self) -> String {
        "Testing direct model access".to_string()
    }

    async fn run(&self, service: &dyn ModelService) -> GenerationReport {
        let mut results = Vec::with_capacity(self.models.len());
        for model in &self.models {
            let start = Instant::now();
            let outcome = ProbeOutcome::from_result(
                service.generate_content(model, &self.prompt).await,
            );
            let duration_ms = start.elapsed().as_millis() as u64;
            match outcome.kind() {
                None => info!(model = model.as_str(), duration_ms, "model responded"),
                Some(kind) => warn!(
                    model = model.as_str(),
                    error_kind = kind.name(),
                    duration_ms,
                    "model check failed"
                ),
            }
            results.push(ModelResult {
                model: model.clone(),
                outcome,
                duration_ms,
            });
        }
        GenerationReport {
            prompt: self.prompt.clone(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::ProbeErrorKind;
    use crate::probe::fake::{runtime, FakeService, Reply};

    #[test]
    fn each_model_is_tried_once_in_order() {
        let service = FakeService::with_replies(vec![
            ("m1", Reply::Text("OK")),
            ("m2", Reply::Fail(runtime("404 not found"))),
            ("m3", Reply::Fail(runtime("permission denied (403)"))),
        ]);
        let probe = GenerationProbe::new(["m1", "m2", "m3"], "ping");
        let report = tokio_test::block_on(probe.run(&service));

        assert_eq!(*service.generated.lock().unwrap(), vec!["m1", "m2", "m3"]);
        assert_eq!(service.call_count(), 3);
        assert_eq!(
            report.results[0].outcome,
            ProbeOutcome::Success { text: "OK".into() }
        );
        assert_eq!(report.results[1].outcome.kind(), Some(ProbeErrorKind::NotFound));
        assert_eq!(
            report.results[2].outcome.kind(),
            Some(ProbeErrorKind::PermissionDenied)
        );
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 2);
    }

    #[test]
    fn empty_and_auth_outcomes() {
        let service = FakeService::with_replies(vec![
            ("quiet", Reply::Empty),
            ("locked", Reply::Fail(runtime("HTTP 401: key expired"))),
            ("weird", Reply::Fail(runtime("connection reset"))),
        ]);
        let probe = GenerationProbe::new(["quiet", "locked", "weird"], "ping");
        let report = tokio_test::block_on(probe.run(&service));
        let kinds: Vec<_> = report.results.iter().map(|r| r.outcome.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                Some(ProbeErrorKind::EmptyResponse),
                Some(ProbeErrorKind::Authentication),
                Some(ProbeErrorKind::CallFailed),
            ]
        );
    }

    #[test]
    fn default_probe_uses_fixed_targets() {
        let probe = GenerationProbe::default();
        assert_eq!(probe.models().len(), 3);
        assert_eq!(probe.models()[0], "gemini-3-pro-image-preview");
        assert_eq!(probe.prompt(), DEFAULT_PROMPT);
    }
}
