//! Lists the models visible to `GOOGLE_CLOUD_API_KEY` and checks a fixed set of targets.
//!
//! Usage:
//!   GOOGLE_CLOUD_API_KEY="..." cargo run --bin list-models
//! Set GENAI_BACKEND=gemini to query the public Gemini API instead of Vertex AI.

use genai_probe::probe::ListingProbe;
use genai_probe::{logging, runner};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    match runner::run_from_env(&ListingProbe::default()).await {
        Ok(status) => status.exit_code(),
        Err(e) => {
            let e = anyhow::Error::from(e);
            eprintln!("\n❌ Error: {:?}", e);
            ExitCode::FAILURE
        }
    }
}
