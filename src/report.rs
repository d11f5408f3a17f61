//! Console rendering of probe reports.
//!
//! Plain text on stdout: `=` rules around section headers, `-` rules under
//! per-model headers, two-space bullets. Every report ends with a summary.

use crate::error_code::ProbeErrorKind;
use crate::probe::{
    GenerationReport, ListingReport, ModelResult, ProbeFailure, ProbeOutcome, TraceReport,
};
use std::fmt;

/// Max characters of response text or error message shown per model.
pub const PREVIEW_CHARS: usize = 100;

pub fn rule() -> String {
    "=".repeat(60)
}

fn sub_rule() -> String {
    "-".repeat(40)
}

/// Section header between two `=` rules.
pub fn section(title: &str) -> String {
    format!("{rule}\n{title}\n{rule}", rule = rule())
}

/// First `max` characters of `text`, cut on a char boundary.
pub fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn write_failure(f: &mut fmt::Formatter<'_>, failure: &ProbeFailure) -> fmt::Result {
    writeln!(f, "\n❌ Error [{}]: {}", failure.kind.name(), failure.message)?;
    for cause in &failure.causes {
        writeln!(f, "   caused by: {}", cause)?;
    }
    Ok(())
}

impl fmt::Display for ListingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = match &self.result {
            Ok(summary) => summary,
            Err(failure) => {
                write_failure(f, failure)?;
                return writeln!(f, "\nListing failed; no models to show.");
            }
        };
        let catalog = &summary.catalog;

        writeln!(
            f,
            "{}",
            section(&format!(
                "📊 Found {} Gemini models:",
                catalog.generation_family().len()
            ))
        )?;
        for name in catalog.generation_family() {
            writeln!(f, "  - {}", name)?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{}",
            section(&format!(
                "🖼️  Found {} image models:",
                catalog.media_capable().len()
            ))
        )?;
        for name in catalog.media_capable() {
            writeln!(f, "  - {}", name)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", section("🎯 Models of interest:"))?;
        for entry in &summary.checklist {
            let status = if entry.available {
                "✅ available"
            } else {
                "❌ not found"
            };
            writeln!(f, "  {} - {}", status, entry.target)?;
        }

        let available = summary.checklist.iter().filter(|e| e.available).count();
        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} models listed, {} Gemini, {} image, {}/{} targets available",
            catalog.total(),
            catalog.generation_family().len(),
            catalog.media_capable().len(),
            available,
            summary.checklist.len()
        )
    }
}

impl fmt::Display for ModelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n🔍 Testing model: {}", self.model)?;
        writeln!(f, "{}", sub_rule())?;
        match &self.outcome {
            ProbeOutcome::Success { text } => {
                writeln!(f, "✅ Model {} is available!", self.model)?;
                writeln!(f, "   Response: {}", preview(text, PREVIEW_CHARS))
            }
            ProbeOutcome::EmptyResponse => {
                writeln!(f, "⚠️  Model {} returned an empty response", self.model)
            }
            ProbeOutcome::Failed { kind, message } => match kind {
                ProbeErrorKind::NotFound => {
                    writeln!(f, "❌ Model {} not found (404)", self.model)
                }
                ProbeErrorKind::PermissionDenied => {
                    writeln!(f, "❌ Model {} access denied (403)", self.model)
                }
                ProbeErrorKind::Authentication => writeln!(f, "❌ Authentication failed (401)"),
                _ => writeln!(f, "❌ Error: {}", preview(message, PREVIEW_CHARS)),
            },
        }
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            write!(f, "{}", result)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            section(&format!(
                "Test complete: {} available, {} failed",
                self.succeeded(),
                self.failed()
            ))
        )
    }
}

impl fmt::Display for TraceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProbeOutcome::Success { text } => writeln!(f, "\n✅ Success! Response: {}", text)?,
            ProbeOutcome::EmptyResponse => {
                writeln!(f, "\n⚠️  {} returned an empty response", self.model)?
            }
            ProbeOutcome::Failed { kind, message } => {
                writeln!(f, "\n❌ Error [{}]: {}", kind.name(), message)?
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} {} in {} ms",
            self.model,
            if self.outcome.is_success() { "succeeded" } else { "failed" },
            self.duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModelCatalog;
    use crate::probe::ListingSummary;

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("héllo", 2), "hé");
        assert_eq!(preview("short", 100), "short");
        let long = "x".repeat(250);
        assert_eq!(preview(&long, PREVIEW_CHARS).len(), 100);
    }

    #[test]
    fn listing_report_renders_sections() {
        let catalog = ModelCatalog::from_names(["gemini-b", "gemini-a-image", "text-bison"]);
        let checklist = catalog.checklist(&["gemini-a", "gemini-z"][..]);
        let report = ListingReport {
            result: Ok(ListingSummary { catalog, checklist }),
        };
        let out = report.to_string();
        assert!(out.contains("📊 Found 2 Gemini models:"));
        assert!(out.contains("🖼️  Found 1 image models:"));
        assert!(out.contains("  - gemini-a-image\n  - gemini-b"));
        assert!(out.contains("  ✅ available - gemini-a"));
        assert!(out.contains("  ❌ not found - gemini-z"));
        assert!(out.contains("Summary: 3 models listed, 2 Gemini, 1 image, 1/2 targets available"));
    }

    #[test]
    fn generation_report_lines_per_outcome() {
        let long_error = format!("boom {}", "z".repeat(300));
        let report = GenerationReport {
            prompt: "ping".into(),
            results: vec![
                ModelResult {
                    model: "m1".into(),
                    outcome: ProbeOutcome::Success { text: "OK".into() },
                    duration_ms: 5,
                },
                ModelResult {
                    model: "m2".into(),
                    outcome: ProbeOutcome::Failed {
                        kind: ProbeErrorKind::NotFound,
                        message: "404 not found".into(),
                    },
                    duration_ms: 5,
                },
                ModelResult {
                    model: "m3".into(),
                    outcome: ProbeOutcome::EmptyResponse,
                    duration_ms: 5,
                },
                ModelResult {
                    model: "m4".into(),
                    outcome: ProbeOutcome::Failed {
                        kind: ProbeErrorKind::CallFailed,
                        message: long_error.clone(),
                    },
                    duration_ms: 5,
                },
            ],
        };
        let out = report.to_string();
        assert!(out.contains("🔍 Testing model: m1"));
        assert!(out.contains("✅ Model m1 is available!\n   Response: OK"));
        assert!(out.contains("❌ Model m2 not found (404)"));
        assert!(out.contains("⚠️  Model m3 returned an empty response"));
        assert!(out.contains(&format!("❌ Error: {}\n", preview(&long_error, 100))));
        assert!(!out.contains(&long_error));
        assert!(out.contains("Test complete: 1 available, 3 failed"));
    }
}
