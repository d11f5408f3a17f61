use crate::client::backend::Backend;
use crate::client::service::{GenerateResponse, ModelDescriptor, ModelService};
use crate::transport::{HttpTransport, TransportLogging};
use crate::{Error, Result};
use async_trait::async_trait;
use futures::stream::{self, Stream, TryStreamExt};
use serde::Deserialize;
use serde_json::Value;
use std::pin::Pin;
use tracing::debug;

/// A pinned, boxed stream of models.
pub type ModelStream<'a> = Pin<Box<dyn Stream<Item = Result<ModelDescriptor>> + Send + 'a>>;

/// Client bound to one backend and one credential.
pub struct GenAiClient {
    backend: Backend,
    transport: HttpTransport,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsPage {
    #[serde(default, alias = "publisherModels")]
    models: Vec<ModelDescriptor>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl GenAiClient {
    pub(crate) fn new(backend: Backend, transport: HttpTransport) -> Self {
        Self { backend, transport }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn transport_logging(&self) -> TransportLogging {
        self.transport.logging()
    }

    /// Streams every model, fetching pages lazily until the service stops
    /// returning a `nextPageToken`.
    ///
    /// A repeated token ends the stream so a misbehaving server cannot loop it.
    pub fn models(&self) -> ModelStream<'_> {
        let pages = stream::try_unfold(Some(None::<String>), move |state| async move {
            let Some(token) = state else {
                return Ok::<_, Error>(None);
            };
            let page = self.fetch_page(token.as_deref()).await?;
            let next = page
                .next_page_token
                .filter(|t| !t.is_empty() && Some(t) != token.as_ref());
            Ok::<_, Error>(Some((page.models, next.map(Some))))
        });
        Box::pin(
            pages
                .map_ok(|models| stream::iter(models.into_iter().map(Ok::<_, Error>)))
                .try_flatten(),
        )
    }

    async fn fetch_page(&self, page_token: Option<&str>) -> Result<ListModelsPage> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        let body = self
            .transport
            .get_json(self.backend.list_models_path(), &query)
            .await?;
        if body.is_null() {
            return Ok(ListModelsPage::default());
        }
        let page: ListModelsPage = serde_json::from_value(body)?;
        debug!(
            models = page.models.len(),
            has_next = page.next_page_token.is_some(),
            "fetched model page"
        );
        Ok(page)
    }
}

#[async_trait]
impl ModelService for GenAiClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        self.models().try_collect().await
    }

    async fn generate_content(&self, model: &str, prompt: &str) -> Result<GenerateResponse> {
        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        });
        let path = self.backend.generate_content_path(model);
        let response: Value = self.transport.post_json(&path, &body).await?;
        Ok(GenerateResponse::from_body(response))
    }
}
