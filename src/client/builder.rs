use crate::client::backend::Backend;
use crate::client::core::GenAiClient;
use crate::credential::Credential;
use crate::transport::{HttpTransport, TransportConfig, TransportLogging};
use crate::{Error, ErrorContext, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Builder for [`GenAiClient`].
///
/// Construction is a single attempt: any failure is returned as-is and the
/// caller decides how to report it.
pub struct GenAiClientBuilder {
    backend: Backend,
    api_key: Option<Credential>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    transport: TransportConfig,
}

impl GenAiClientBuilder {
    pub fn new() -> Self {
        Self {
            backend: Backend::default(),
            api_key: None,
            base_url_override: None,
            transport: TransportConfig::from_env(),
        }
    }

    /// Like [`new`](Self::new), plus `GENAI_BACKEND` and `GENAI_BASE_URL`.
    pub fn from_env() -> Self {
        let mut builder = Self::new().backend(Backend::from_env());
        if let Ok(url) = env::var("GENAI_BASE_URL") {
            if !url.trim().is_empty() {
                builder = builder.base_url_override(url.trim());
            }
        }
        builder
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub fn api_key(mut self, credential: Credential) -> Self {
        self.api_key = Some(credential);
        self
    }

    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = timeout;
        self
    }

    pub fn proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.transport.proxy_url = Some(proxy_url.into());
        self
    }

    /// Wire logging for this client only. Pair with
    /// [`LogHandle::escalate_transport`](crate::logging::LogHandle::escalate_transport)
    /// to actually see the output.
    pub fn transport_logging(mut self, logging: TransportLogging) -> Self {
        self.transport.logging = logging;
        self
    }

    pub fn build(self) -> Result<GenAiClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                Error::configuration_with_context(
                    "an API key is required to build the client",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_source("client_builder"),
                )
            })?;

        let base_url = self
            .base_url_override
            .unwrap_or_else(|| self.backend.default_base_url().to_string());
        validate_base_url(&base_url)?;

        let transport = HttpTransport::new(&base_url, api_key, &self.transport)?;
        tracing::debug!(
            backend = %self.backend,
            base_url = base_url.as_str(),
            timeout_secs = self.transport.timeout.as_secs(),
            "genai client built"
        );
        Ok(GenAiClient::new(self.backend, transport))
    }
}

impl Default for GenAiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let invalid = |details: String| {
        Error::configuration_with_context(
            format!("invalid base url '{}'", base_url),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(details)
                .with_source("client_builder"),
        )
    };
    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_api_key() {
        let err = GenAiClientBuilder::new().build().err().unwrap();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn build_rejects_bad_base_url() {
        let err = GenAiClientBuilder::new()
            .api_key(Credential::new("k"))
            .base_url_override("ftp://example.com")
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("unsupported scheme"));

        let err = GenAiClientBuilder::new()
            .api_key(Credential::new("k"))
            .base_url_override("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn build_uses_backend_default_url() {
        let client = GenAiClientBuilder::new()
            .backend(Backend::GeminiApi)
            .api_key(Credential::new("k"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://generativelanguage.googleapis.com");
        assert_eq!(client.backend(), Backend::GeminiApi);
    }

    #[test]
    fn build_keeps_transport_logging_choice() {
        let client = GenAiClientBuilder::new()
            .api_key(Credential::new("k"))
            .transport_logging(TransportLogging::Verbose)
            .build()
            .unwrap();
        assert_eq!(client.transport_logging(), TransportLogging::Verbose);
    }
}
