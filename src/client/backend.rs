//! Backend selection: public Gemini API or the Vertex AI (managed) endpoint.

use std::env;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// `generativelanguage.googleapis.com`
    GeminiApi,
    /// `aiplatform.googleapis.com`, Google-published models addressed by API key.
    #[default]
    VertexAi,
}

impl Backend {
    /// Reads `GENAI_BACKEND` (`gemini` or `vertex`). Anything else means Vertex AI.
    pub fn from_env() -> Self {
        match env::var("GENAI_BACKEND")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            Ok("gemini") | Ok("gemini-api") | Ok("genai") => Self::GeminiApi,
            _ => Self::VertexAi,
        }
    }

    /// Whether this is the enterprise/managed backend.
    pub fn is_managed(&self) -> bool {
        matches!(self, Self::VertexAi)
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::GeminiApi => "https://generativelanguage.googleapis.com",
            Self::VertexAi => "https://aiplatform.googleapis.com",
        }
    }

    pub(crate) fn list_models_path(&self) -> &'static str {
        match self {
            Self::GeminiApi => "/v1beta/models",
            Self::VertexAi => "/v1beta1/publishers/google/models",
        }
    }

    pub(crate) fn generate_content_path(&self, model: &str) -> String {
        let id = short_model_id(model);
        match self {
            Self::GeminiApi => format!("/v1beta/models/{}:generateContent", id),
            Self::VertexAi => format!("/v1/publishers/google/models/{}:generateContent", id),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GeminiApi => write!(f, "Gemini API"),
            Self::VertexAi => write!(f, "Vertex AI"),
        }
    }
}

/// Strips resource prefixes so listed names can be fed back into generate calls.
fn short_model_id(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_paths_per_backend() {
        assert_eq!(
            Backend::VertexAi.generate_content_path("gemini-2.5-flash"),
            "/v1/publishers/google/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            Backend::GeminiApi.generate_content_path("gemini-2.5-flash"),
            "/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn listed_resource_names_are_shortened() {
        assert_eq!(
            Backend::VertexAi.generate_content_path("publishers/google/models/gemini-2.0-flash-exp"),
            "/v1/publishers/google/models/gemini-2.0-flash-exp:generateContent"
        );
        assert_eq!(
            Backend::GeminiApi.generate_content_path("models/gemini-pro"),
            "/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn vertex_is_the_default_managed_backend() {
        assert_eq!(Backend::default(), Backend::VertexAi);
        assert!(Backend::VertexAi.is_managed());
        assert!(!Backend::GeminiApi.is_managed());
    }
}
