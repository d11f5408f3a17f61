use super::{Probe, ProbeFailure};
use crate::catalog::{ChecklistEntry, ModelCatalog, DEFAULT_CHECKLIST};
use crate::client::ModelService;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{info, warn};

/// Lists every model, partitions the names and checks a fixed target list.
#[derive(Debug, Clone)]
pub struct ListingProbe {
    checklist: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub catalog: ModelCatalog,
    pub checklist: Vec<ChecklistEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReport {
    pub result: Result<ListingSummary, ProbeFailure>,
}

impl ListingProbe {
    pub fn new<S: Into<String>>(checklist: impl IntoIterator<Item = S>) -> Self {
        Self {
            checklist: checklist.into_iter().map(Into::into).collect(),
        }
    }

    pub fn checklist(&self) -> &[String] {
        &self.checklist
    }
}

impl Default for ListingProbe {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKLIST.iter().copied())
    }
}

#[async_trait]
impl Probe for ListingProbe {
    type Report = ListingReport;

    fn name(&self) -> &'static str {
        "list-models"
    }

    fn title(&self) -> String {
        "Initializing client and listing models".to_string()
    }

    async fn run(&self, service: &dyn ModelService) -> ListingReport {
        let start = Instant::now();
        let result = match service.list_models().await {
            Ok(models) => {
                let catalog = ModelCatalog::from_descriptors(&models);
                let checklist = catalog.checklist(self.checklist.as_slice());
                info!(
                    total = catalog.total(),
                    generation_family = catalog.generation_family().len(),
                    media_capable = catalog.media_capable().len(),
                    duration_ms = start.elapsed().as_millis(),
                    "model listing complete"
                );
                Ok(ListingSummary { catalog, checklist })
            }
            Err(e) => {
                let failure = ProbeFailure::from_error(&e);
                warn!(
                    error_kind = failure.kind.name(),
                    duration_ms = start.elapsed().as_millis(),
                    "model listing failed: {}",
                    failure.message
                );
                Err(failure)
            }
        };
        ListingReport { result }
    }
}
