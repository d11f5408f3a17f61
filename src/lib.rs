//! # genai-probe
//!
//! 面向 Gemini / Vertex AI 生成式接口的诊断探针：列出模型、逐个测试生成、追踪原始请求。
//!
//! Diagnostic probes for a hosted generative-AI API (Google Gemini, either the
//! public Gemini API or the Vertex AI express endpoint).
//!
//! ## Overview
//!
//! Each probe is a short, sequential check: load one credential from the
//! environment, build a client, issue one category of API call and turn every
//! outcome (including failures) into a line of human-readable report. Nothing
//! raised by the remote service is allowed to abort a run.
//!
//! ## Probes
//!
//! | Binary | Probe | What it checks |
//! |--------|-------|----------------|
//! | `list-models` | [`probe::ListingProbe`] | Enumerates models, partitions names, checks a target list |
//! | `test-models` | [`probe::GenerationProbe`] | One generation call per target model |
//! | `trace-request` | [`probe::TraceProbe`] | One generation call with wire-level logging |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use genai_probe::{Backend, Credential, GenAiClientBuilder};
//! use genai_probe::probe::{GenerationProbe, Probe};
//!
//! #[tokio::main]
//! async fn main() -> genai_probe::Result<()> {
//!     let credential = Credential::from_env()?;
//!     let client = GenAiClientBuilder::new()
//!         .backend(Backend::VertexAi)
//!         .api_key(credential)
//!         .build()?;
//!
//!     let report = GenerationProbe::default().run(&client).await;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`credential`] | Credential lookup from the process environment |
//! | [`client`] | Client builder, backend selection and the [`ModelService`] seam |
//! | [`transport`] | HTTP transport with optional wire logging |
//! | [`catalog`] | Model name partitioning and checklist evaluation |
//! | [`probe`] | The three probes and their outcome types |
//! | [`report`] | Console rendering of probe reports |
//! | [`logging`] | tracing subscriber with a reloadable, scoped verbosity |
//! | [`runner`] | Shared credential -> client -> probe -> report flow |

pub mod catalog;
pub mod client;
pub mod credential;
pub mod error_code;
pub mod logging;
pub mod probe;
pub mod report;
pub mod runner;
pub mod transport;

// Re-export main types for convenience
pub use catalog::{ChecklistEntry, ModelCatalog};
pub use client::{
    Backend, GenAiClient, GenAiClientBuilder, GenerateResponse, ModelDescriptor, ModelService,
};
pub use credential::Credential;
pub use error_code::ProbeErrorKind;
pub use probe::ProbeOutcome;
pub use transport::TransportLogging;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
