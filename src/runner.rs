//! Shared flow behind the three binaries: credential, client, probe, report.

use crate::client::{GenAiClient, GenAiClientBuilder, ModelService};
use crate::credential::Credential;
use crate::probe::{Probe, ProbeFailure};
use crate::report::section;
use crate::transport::TransportLogging;
use crate::Result;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{info, warn};

/// How far a run got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The probe ran and its report was printed, whatever the individual outcomes.
    Completed,
    /// No credential; nothing was sent.
    MissingCredential,
    /// The client could not be built; nothing was sent.
    ClientFailed,
}

impl RunStatus {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Completed => ExitCode::SUCCESS,
            Self::MissingCredential | Self::ClientFailed => ExitCode::FAILURE,
        }
    }
}

/// Builds the real client from the environment (`GENAI_BACKEND`, `GENAI_BASE_URL`, ...).
pub fn connect_from_env(
    credential: Credential,
    logging: TransportLogging,
) -> Result<GenAiClient> {
    GenAiClientBuilder::from_env()
        .api_key(credential)
        .transport_logging(logging)
        .build()
}

/// Runs `probe` with the credential from `GOOGLE_CLOUD_API_KEY`, printing to stdout.
pub async fn run_from_env<P: Probe>(probe: &P) -> Result<RunStatus> {
    let mut out = io::stdout();
    run_probe(probe, Credential::from_env(), connect_from_env, &mut out).await
}

/// Runs one probe end to end.
///
/// `connect` is only called once a credential is present, so a missing
/// credential never reaches the network. Only failures writing to `out`
/// are returned as errors.
pub async fn run_probe<P, S, F, W>(
    probe: &P,
    credential: Result<Credential>,
    connect: F,
    out: &mut W,
) -> Result<RunStatus>
where
    P: Probe,
    S: ModelService,
    F: FnOnce(Credential, TransportLogging) -> Result<S>,
    W: Write,
{
    let credential = match credential {
        Ok(credential) => credential,
        Err(e) => {
            warn!(probe = probe.name(), "no credential: {}", e);
            writeln!(out, "❌ Error: {}", e)?;
            return Ok(RunStatus::MissingCredential);
        }
    };
    writeln!(out, "✅ API key loaded (length: {})", credential.len())?;
    writeln!(out, "\n{}\n", section(&probe.title()))?;

    let service = match connect(credential, probe.transport_logging()) {
        Ok(service) => service,
        Err(e) => {
            let failure = ProbeFailure::from_error(&e);
            warn!(
                probe = probe.name(),
                error_kind = failure.kind.name(),
                "client construction failed"
            );
            writeln!(out, "❌ Client initialization failed: {}", failure.message)?;
            for cause in &failure.causes {
                writeln!(out, "   caused by: {}", cause)?;
            }
            return Ok(RunStatus::ClientFailed);
        }
    };
    writeln!(out, "✅ Client initialized\n")?;

    info!(probe = probe.name(), "probe started");
    let report = probe.run(&service).await;
    write!(out, "{}", report)?;
    out.flush()?;
    info!(probe = probe.name(), "probe finished");
    Ok(RunStatus::Completed)
}
