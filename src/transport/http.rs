use crate::credential::Credential;
use crate::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, Proxy, StatusCode};
use serde_json::Value;
use std::env;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";
/// Our own correlation id. The service ignores it; it links log lines to a request.
const REQUEST_ID_HEADER: &str = "x-genai-probe-request-id";

/// tracing target for raw request/response dumps.
pub const WIRE_TARGET: &str = "genai_probe::transport::wire";

/// How much of the HTTP exchange the transport writes to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportLogging {
    /// One summary line per request.
    #[default]
    Standard,
    /// Summary plus full headers and bodies on [`WIRE_TARGET`]. The API key is redacted.
    Verbose,
}

/// Transport knobs. Defaults come from the environment.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub proxy_url: Option<String>,
    pub logging: TransportLogging,
}

impl TransportConfig {
    /// Reads `GENAI_HTTP_TIMEOUT_SECS` (default 60) and `GENAI_PROXY_URL`.
    pub fn from_env() -> Self {
        let timeout_secs = env::var("GENAI_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        Self {
            timeout: Duration::from_secs(timeout_secs),
            proxy_url: env::var("GENAI_PROXY_URL").ok().filter(|s| !s.is_empty()),
            logging: TransportLogging::Standard,
        }
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Credential,
    logging: TransportLogging,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: Credential, config: &TransportConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(1);

        if let Some(proxy_url) = &config.proxy_url {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => warn!(proxy = proxy_url.as_str(), error = %e, "ignoring invalid proxy url"),
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            logging: config.logging,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn logging(&self) -> TransportLogging {
        self.logging
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.execute(Method::GET, path, query, None).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut req = self
            .client
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, self.api_key.expose())
            .header(REQUEST_ID_HEADER, request_id.as_str());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        let request = req.build().map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if self.logging == TransportLogging::Verbose {
            trace!(
                target: WIRE_TARGET,
                request_id = request_id.as_str(),
                "--> {} {}\n{}{}",
                request.method(),
                request.url(),
                format_headers(request.headers()),
                body.map(pretty).unwrap_or_default()
            );
        }

        let start = Instant::now();
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        debug!(
            http_status = status.as_u16(),
            client_request_id = request_id.as_str(),
            method = %method,
            path,
            duration_ms = start.elapsed().as_millis(),
            "genai-probe request finished"
        );
        if self.logging == TransportLogging::Verbose {
            trace!(
                target: WIRE_TARGET,
                request_id = request_id.as_str(),
                "<-- {}\n{}{}",
                status,
                format_headers(&headers),
                text
            );
        }

        if !status.is_success() {
            let err = remote_error(status, &text);
            info!(
                http_status = status.as_u16(),
                client_request_id = request_id.as_str(),
                path,
                "genai-probe request failed"
            );
            return Err(err);
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// Builds [`Error::Remote`] from a non-2xx response.
///
/// Google errors look like `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`,
/// sometimes wrapped in a one-element array.
fn remote_error(status: StatusCode, body: &str) -> Error {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error_obj = parsed.as_ref().and_then(|v| match v {
        Value::Array(items) => items.first().and_then(|i| i.get("error")),
        other => other.get("error"),
    });

    let message = error_obj
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(String::from)
        .unwrap_or_else(|| body.trim().to_string());
    let class = error_obj
        .and_then(|e| e.get("status"))
        .and_then(|s| s.as_str())
        .map(String::from)
        .or_else(|| status.canonical_reason().map(String::from))
        .unwrap_or_else(|| "unknown".to_string());

    Error::Remote {
        status: status.as_u16(),
        class,
        message,
    }
}

fn format_headers(headers: &HeaderMap) -> String {
    let mut out = String::new();
    for (name, value) in headers {
        let shown = if name.as_str().eq_ignore_ascii_case(API_KEY_HEADER) {
            "<redacted>"
        } else {
            value.to_str().unwrap_or("<binary>")
        };
        out.push_str(&format!("{}: {}\n", name, shown));
    }
    out
}

fn pretty(body: &Value) -> String {
    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
