//! Sends one short prompt to each target model and reports which ones answer.
//!
//! Usage:
//!   GOOGLE_CLOUD_API_KEY="..." cargo run --bin test-models

use genai_probe::probe::GenerationProbe;
use genai_probe::{logging, runner};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    match runner::run_from_env(&GenerationProbe::default()).await {
        Ok(status) => status.exit_code(),
        Err(e) => {
            let e = anyhow::Error::from(e);
            eprintln!("\n❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
