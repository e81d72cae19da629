//! Detection Service - suggests a technology and version for a directory.
//!
//! A version pinned by the project's manifest wins over the version of the
//! toolchain installed locally; the toolchain is only asked when the
//! manifest is silent.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::ports::{ProjectDetector, VersionDetector},
    domain::{Technology, VersionSource},
};

/// Where a suggested version came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrigin {
    Manifest,
    Toolchain,
}

/// A detected version and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSuggestion {
    pub version: String,
    pub origin: VersionOrigin,
}

impl VersionSuggestion {
    /// Detected versions are always accepted verbatim by the config builder.
    pub const fn source(&self) -> VersionSource {
        VersionSource::Detected
    }
}

/// What detection suggests for a project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub technology: Technology,
    pub version: Option<VersionSuggestion>,
    pub project_name: Option<String>,
}

pub struct DetectionService {
    project: Box<dyn ProjectDetector>,
    version: Box<dyn VersionDetector>,
}

impl DetectionService {
    pub fn new(project: Box<dyn ProjectDetector>, version: Box<dyn VersionDetector>) -> Self {
        Self { project, version }
    }

    /// Suggest a technology and version for `dir`.
    ///
    /// `None` when no manifest is recognised.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn suggest(&self, dir: &Path) -> Option<Suggestion> {
        let detected = self.project.detect(dir)?;
        debug!(technology = %detected.technology, "Project detected");

        let version = match detected.version {
            Some(version) => Some(VersionSuggestion {
                version,
                origin: VersionOrigin::Manifest,
            }),
            None => self.toolchain_version(detected.technology),
        };

        Some(Suggestion {
            technology: detected.technology,
            version,
            project_name: detected.name,
        })
    }

    /// Version of the locally-installed toolchain for `technology`.
    #[instrument(skip(self))]
    pub fn toolchain_version(&self, technology: Technology) -> Option<VersionSuggestion> {
        let version = self.version.detect(technology)?;
        debug!(%version, "Toolchain version detected");
        Some(VersionSuggestion {
            version,
            origin: VersionOrigin::Toolchain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DetectedProject, MockProjectDetector, MockVersionDetector};

    #[test]
    fn manifest_version_wins_over_toolchain() {
        let mut project = MockProjectDetector::new();
        project.expect_detect().returning(|_| {
            Some(DetectedProject {
                technology: Technology::Node,
                version: Some("20".into()),
                name: Some("api".into()),
            })
        });
        let mut version = MockVersionDetector::new();
        version.expect_detect().never();

        let suggestion = DetectionService::new(Box::new(project), Box::new(version))
            .suggest(Path::new("."))
            .unwrap();

        assert_eq!(suggestion.technology, Technology::Node);
        assert_eq!(
            suggestion.version,
            Some(VersionSuggestion {
                version: "20".into(),
                origin: VersionOrigin::Manifest,
            })
        );
        assert_eq!(suggestion.project_name.as_deref(), Some("api"));
    }

    #[test]
    fn falls_back_to_toolchain_when_manifest_is_silent() {
        let mut project = MockProjectDetector::new();
        project
            .expect_detect()
            .returning(|_| Some(DetectedProject::new(Technology::Go)));
        let mut version = MockVersionDetector::new();
        version
            .expect_detect()
            .withf(|t| *t == Technology::Go)
            .returning(|_| Some("1.23".into()));

        let suggestion = DetectionService::new(Box::new(project), Box::new(version))
            .suggest(Path::new("."))
            .unwrap();

        let version = suggestion.version.unwrap();
        assert_eq!(version.version, "1.23");
        assert_eq!(version.origin, VersionOrigin::Toolchain);
    }

    #[test]
    fn nothing_detected_means_no_suggestion() {
        let mut project = MockProjectDetector::new();
        project.expect_detect().returning(|_| None);
        let version = MockVersionDetector::new();

        assert!(
            DetectionService::new(Box::new(project), Box::new(version))
                .suggest(Path::new("."))
                .is_none()
        );
    }
}
