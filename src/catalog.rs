//! Model name partitioning and checklist evaluation.
//!
//! All matching is a case-insensitive substring test on the model name.

use crate::client::ModelDescriptor;

/// Marker for the generation family.
pub const GENERATION_FAMILY_MARKER: &str = "gemini";
/// Marker for image-capable models.
pub const MEDIA_MARKER: &str = "image";

/// Checklist probed by `list-models`, in display order.
pub const DEFAULT_CHECKLIST: &[&str] = &[
    "gemini-3-pro-image-preview",
    "gemini-3-pro-preview",
    "gemini-2.0-flash-exp",
    "gemini-2.5-flash",
    "imagen-3.0-generate",
];

/// Partitioned view of a model listing. Both lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    total: usize,
    generation_family: Vec<String>,
    media_capable: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub target: String,
    pub available: bool,
}

impl ModelCatalog {
    pub fn from_descriptors<'a, I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'a ModelDescriptor>,
    {
        Self::from_names(descriptors.into_iter().map(|d| d.name.as_str()))
    }

    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut total = 0;
        let mut generation_family = Vec::new();
        let mut media_capable = Vec::new();

        for name in names {
            total += 1;
            let lower = name.to_lowercase();
            if !lower.contains(GENERATION_FAMILY_MARKER) {
                continue;
            }
            if lower.contains(MEDIA_MARKER) {
                media_capable.push(name.to_string());
            }
            generation_family.push(name.to_string());
        }

        generation_family.sort();
        media_capable.sort();
        Self {
            total,
            generation_family,
            media_capable,
        }
    }

    /// Number of names seen, matched or not.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn generation_family(&self) -> &[String] {
        &self.generation_family
    }

    pub fn media_capable(&self) -> &[String] {
        &self.media_capable
    }

    /// True iff some generation-family name contains `target`, ignoring case.
    pub fn is_available(&self, target: &str) -> bool {
        let target = target.to_lowercase();
        self.generation_family
            .iter()
            .any(|name| name.to_lowercase().contains(&target))
    }

    /// Evaluates `targets` in the given order.
    pub fn checklist<S: AsRef<str>>(&self, targets: &[S]) -> Vec<ChecklistEntry> {
        targets
            .iter()
            .map(|t| ChecklistEntry {
                target: t.as_ref().to_string(),
                available: self.is_available(t.as_ref()),
            })
            .collect()
    }
}
