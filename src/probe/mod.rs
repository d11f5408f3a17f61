//! The three diagnostic probes.
//!
//! A probe takes a [`ModelService`], performs its calls sequentially and
//! returns a report. Failures from the service are folded into the report;
//! `run` itself cannot fail.

mod generation;
mod listing;
mod trace;

pub use generation::{GenerationProbe, GenerationReport, ModelResult};
pub use listing::{ListingProbe, ListingReport, ListingSummary};
pub use trace::{TraceProbe, TraceReport};

use crate::client::{GenerateResponse, ModelService};
use crate::error_code::ProbeErrorKind;
use crate::transport::TransportLogging;
use crate::{Error, Result};
use async_trait::async_trait;
use std::fmt;

/// One self-contained diagnostic check.
#[async_trait]
pub trait Probe: Send + Sync {
    type Report: fmt::Display + Send;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Banner printed before the client is built.
    fn title(&self) -> String;

    /// Transport logging the client for this probe should be built with.
    fn transport_logging(&self) -> TransportLogging {
        TransportLogging::Standard
    }

    async fn run(&self, service: &dyn ModelService) -> Self::Report;
}

/// Outcome of a single generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The call returned non-empty text.
    Success { text: String },
    /// The call succeeded but carried no text.
    EmptyResponse,
    /// The call failed; `kind` is never `EmptyResponse`.
    Failed {
        kind: ProbeErrorKind,
        message: String,
    },
}

impl ProbeOutcome {
    pub fn from_result(result: Result<GenerateResponse>) -> Self {
        match result {
            Ok(response) => match response.text {
                Some(text) if !text.is_empty() => Self::Success { text },
                _ => Self::EmptyResponse,
            },
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self::Failed {
            kind: ProbeErrorKind::classify(err),
            message: err.to_string(),
        }
    }

    /// The failure category, `None` on success.
    pub fn kind(&self) -> Option<ProbeErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::EmptyResponse => Some(ProbeErrorKind::EmptyResponse),
            Self::Failed { kind, .. } => Some(*kind),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A failure that prevented a probe from producing its normal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeFailure {
    pub kind: ProbeErrorKind,
    pub message: String,
    /// Source chain of the error, outermost first, excluding `message` itself.
    pub causes: Vec<String>,
}

impl ProbeFailure {
    pub fn from_error(err: &Error) -> Self {
        let mut causes = Vec::new();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            kind: ProbeErrorKind::classify(err),
            message: err.to_string(),
            causes,
        }
    }
}
