//! HTTP transport for the generative-AI service.

mod http;

pub use http::{HttpTransport, TransportConfig, TransportError, TransportLogging, WIRE_TARGET};
