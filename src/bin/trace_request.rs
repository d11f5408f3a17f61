//! One generation call with the raw HTTP request and response logged to stderr.
//!
//! Usage:
//!   GOOGLE_CLOUD_API_KEY="..." cargo run --bin trace-request
//!
//! Wire logging is raised only for the duration of the call; the filter from
//! RUST_LOG (default `info`) is restored afterwards.

use genai_probe::probe::TraceProbe;
use genai_probe::{logging, runner};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let mut probe = TraceProbe::default();
    match logging::init() {
        Ok(handle) => probe = probe.with_log_handle(handle),
        Err(e) => eprintln!("warning: logging disabled, no request details will be shown: {}", e),
    }

    match runner::run_from_env(&probe).await {
        Ok(status) => status.exit_code(),
        Err(e) => {
            let e = anyhow::Error::from(e);
            eprintln!("\n❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
