//! Client for the generative-AI service.
//!
//! [`GenAiClient`] is built by [`GenAiClientBuilder`] and implements
//! [`ModelService`], the seam the probes are written against.
//! Implementation details are split into submodules under `src/client/`.

mod backend;
mod builder;
pub mod core;
mod service;

pub use self::core::{GenAiClient, ModelStream};
pub use backend::Backend;
pub use builder::GenAiClientBuilder;
pub use service::{GenerateResponse, ModelDescriptor, ModelService, UsageInfo};
