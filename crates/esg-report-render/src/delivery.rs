//! Artifact delivery with a two-tier write strategy.
//!
//! Generation failures are terminal and surface from the engine; delivery
//! failures after the artifact exists degrade to a single fallback attempt
//! and a logged, user-visible error instead of silent loss. Nothing here
//! re-throws: the artifact was already produced.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::ReportArtifact;

/// File extension for serialized report artifacts.
pub const ARTIFACT_EXTENSION: &str = "esgr";

/// Outcome of a delivery attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Written to the requested path.
    Delivered(PathBuf),
    /// Primary write failed; written into the system temp directory.
    FallbackDelivered(PathBuf),
    /// Both attempts failed.
    Failed,
}

/// Append the artifact extension when the supplied name lacks it.
///
/// Never rejects the input; `report.bin` becomes `report.bin.esgr`.
pub fn normalize_filename(name: impl Into<PathBuf>) -> PathBuf {
    let path = name.into();
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION));
    if has_extension {
        return path;
    }
    let mut raw = path.into_os_string();
    raw.push(".");
    raw.push(ARTIFACT_EXTENSION);
    PathBuf::from(raw)
}

/// Write an artifact to `requested`, falling back to the temp directory
/// exactly once if the primary write fails.
pub fn deliver_artifact(artifact: &ReportArtifact, requested: &Path) -> DeliveryOutcome {
    deliver_with_fallback_dir(artifact, requested, &env::temp_dir())
}

fn deliver_with_fallback_dir(
    artifact: &ReportArtifact,
    requested: &Path,
    fallback_dir: &Path,
) -> DeliveryOutcome {
    let target = normalize_filename(requested);
    match fs::write(&target, &artifact.bytes) {
        Ok(()) => {
            log::debug!("report delivered to {}", target.display());
            DeliveryOutcome::Delivered(target)
        }
        Err(primary_err) => {
            log::warn!(
                "primary delivery to {} failed ({primary_err}), trying temp directory",
                target.display()
            );
            let file_name = target
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(format!("report.{ARTIFACT_EXTENSION}")));
            let fallback = fallback_dir.join(file_name);
            match fs::write(&fallback, &artifact.bytes) {
                Ok(()) => {
                    log::warn!("report delivered to fallback path {}", fallback.display());
                    DeliveryOutcome::FallbackDelivered(fallback)
                }
                Err(fallback_err) => {
                    log::error!(
                        "report could not be delivered to {} or {} ({fallback_err}); \
                         the generated artifact was discarded",
                        target.display(),
                        fallback.display()
                    );
                    DeliveryOutcome::Failed
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> ReportArtifact {
        ReportArtifact {
            bytes: vec![1, 2, 3, 4],
            page_count: 1,
        }
    }

    #[test]
    fn filename_normalization_appends_missing_extension() {
        assert_eq!(
            normalize_filename("annual-report"),
            PathBuf::from("annual-report.esgr")
        );
        assert_eq!(
            normalize_filename("annual-report.esgr"),
            PathBuf::from("annual-report.esgr")
        );
        assert_eq!(
            normalize_filename("annual-report.ESGR"),
            PathBuf::from("annual-report.ESGR")
        );
        assert_eq!(
            normalize_filename("annual-report.bin"),
            PathBuf::from("annual-report.bin.esgr")
        );
    }

    #[test]
    fn delivery_writes_to_requested_path() {
        let dir = env::temp_dir();
        let requested = dir.join("esg-delivery-primary-test");
        let outcome = deliver_artifact(&artifact(), &requested);
        let expected = dir.join("esg-delivery-primary-test.esgr");
        assert_eq!(outcome, DeliveryOutcome::Delivered(expected.clone()));
        assert_eq!(fs::read(&expected).unwrap(), vec![1, 2, 3, 4]);
        let _ = fs::remove_file(expected);
    }

    #[test]
    fn delivery_falls_back_to_temp_dir_when_primary_path_is_unwritable() {
        let requested = Path::new("/nonexistent-esg-dir/esg-delivery-fallback-test");
        let outcome = deliver_artifact(&artifact(), requested);
        let expected = env::temp_dir().join("esg-delivery-fallback-test.esgr");
        assert_eq!(outcome, DeliveryOutcome::FallbackDelivered(expected.clone()));
        assert_eq!(fs::read(&expected).unwrap(), vec![1, 2, 3, 4]);
        let _ = fs::remove_file(expected);
    }

    #[test]
    fn delivery_reports_failure_when_both_paths_are_unwritable() {
        let requested = Path::new("/nonexistent-esg-dir/esg-delivery-failed-test");
        let fallback_dir = Path::new("/nonexistent-esg-fallback-dir");
        let outcome = deliver_with_fallback_dir(&artifact(), requested, fallback_dir);
        assert_eq!(outcome, DeliveryOutcome::Failed);
    }
}
