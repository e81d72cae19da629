//! Manifest-based project detection.
//!
//! Manifests are probed in a fixed order; the first one present decides the
//! technology. Anything unreadable or malformed is "not detected".

use std::path::Path;
use std::sync::Arc;

use deepblue_core::{
    application::ports::{DetectedProject, Filesystem, ProjectDetector},
    domain::Technology,
};
use tracing::{debug, instrument};

use super::{java_major, leading_version};
use crate::filesystem::LocalFilesystem;

type Probe = fn(&ManifestProjectDetector, &Path) -> Option<DetectedProject>;

/// Probe order. Earlier manifests win when several are present.
const PROBES: &[(&str, Probe)] = &[
    ("package.json", ManifestProjectDetector::node),
    ("requirements.txt", ManifestProjectDetector::python),
    ("go.mod", ManifestProjectDetector::go),
    ("pom.xml", ManifestProjectDetector::java),
    ("composer.json", ManifestProjectDetector::php),
    ("Gemfile", ManifestProjectDetector::ruby),
    ("Cargo.toml", ManifestProjectDetector::rust),
];

pub struct ManifestProjectDetector {
    fs: Arc<dyn Filesystem>,
}

impl ManifestProjectDetector {
    pub fn new() -> Self {
        Self::with_filesystem(Arc::new(LocalFilesystem::new()))
    }

    pub fn with_filesystem(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }

    fn read(&self, path: &Path) -> Option<String> {
        if !self.fs.exists(path) {
            return None;
        }
        self.fs.read_to_string(path).ok()
    }

    fn node(&self, dir: &Path) -> Option<DetectedProject> {
        let text = self.read(&dir.join("package.json"))?;
        let json: serde_json::Value = serde_json::from_str(&text).ok()?;

        Some(DetectedProject {
            technology: Technology::Node,
            version: json
                .pointer("/engines/node")
                .and_then(|v| v.as_str())
                .and_then(|v| leading_version(v, false)),
            name: json.get("name").and_then(|v| v.as_str()).map(str::to_string),
        })
    }

    fn python(&self, dir: &Path) -> Option<DetectedProject> {
        if self.fs.exists(&dir.join("requirements.txt")) {
            return Some(DetectedProject::new(Technology::Python));
        }

        let text = self.read(&dir.join("pyproject.toml"))?;
        let doc: toml::Table = toml::from_str(&text).ok()?;

        let project = doc.get("project");
        let poetry = doc.get("tool").and_then(|t| t.get("poetry"));

        let version = project
            .and_then(|p| p.get("requires-python"))
            .or_else(|| poetry.and_then(|p| p.get("dependencies")).and_then(|d| d.get("python")))
            .and_then(|v| v.as_str())
            .and_then(|v| leading_version(v, true));
        let name = project
            .or(poetry)
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Some(DetectedProject {
            technology: Technology::Python,
            version,
            name,
        })
    }

    fn go(&self, dir: &Path) -> Option<DetectedProject> {
        let text = self.read(&dir.join("go.mod"))?;
        let directive = |keyword: &str| {
            text.lines()
                .map(str::trim)
                .find_map(|line| line.strip_prefix(keyword))
                .filter(|rest| rest.starts_with(char::is_whitespace))
                .map(|rest| rest.trim().to_string())
        };

        Some(DetectedProject {
            technology: Technology::Go,
            version: directive("go").and_then(|v| leading_version(&v, true)),
            name: directive("module"),
        })
    }

    fn java(&self, dir: &Path) -> Option<DetectedProject> {
        let Some(pom) = self.read(&dir.join("pom.xml")) else {
            let gradle = dir.join("build.gradle");
            let gradle_kts = dir.join("build.gradle.kts");
            return (self.fs.exists(&gradle) || self.fs.exists(&gradle_kts))
                .then(|| DetectedProject::new(Technology::Java));
        };

        Some(DetectedProject {
            technology: Technology::Java,
            version: xml_element(&pom, "maven.compiler.source")
                .or_else(|| xml_element(&pom, "java.version"))
                .and_then(|v| java_major(&v)),
            name: xml_element(&pom, "artifactId"),
        })
    }

    fn php(&self, dir: &Path) -> Option<DetectedProject> {
        let text = self.read(&dir.join("composer.json"))?;
        let json: serde_json::Value = serde_json::from_str(&text).ok()?;

        Some(DetectedProject {
            technology: Technology::Php,
            version: json
                .pointer("/require/php")
                .and_then(|v| v.as_str())
                .and_then(|v| leading_version(v, true)),
            name: json.get("name").and_then(|v| v.as_str()).map(str::to_string),
        })
    }

    fn ruby(&self, dir: &Path) -> Option<DetectedProject> {
        let text = self.read(&dir.join("Gemfile"))?;
        let version = text
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix("ruby"))
            .find(|rest| rest.starts_with(char::is_whitespace) || rest.starts_with('('))
            .and_then(|rest| leading_version(rest, true));

        Some(DetectedProject {
            technology: Technology::Ruby,
            version,
            name: None,
        })
    }

    fn rust(&self, dir: &Path) -> Option<DetectedProject> {
        let text = self.read(&dir.join("Cargo.toml"))?;
        let doc: toml::Table = toml::from_str(&text).ok()?;

        Some(DetectedProject {
            technology: Technology::Rust,
            version: None,
            name: doc
                .get("package")
                .and_then(|p| p.get("name"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
        })
    }
}

impl Default for ManifestProjectDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectDetector for ManifestProjectDetector {
    #[instrument(skip_all, fields(dir = %dir.display()))]
    fn detect(&self, dir: &Path) -> Option<DetectedProject> {
        PROBES.iter().find_map(|(manifest, probe)| {
            let found = probe(self, dir)?;
            debug!(%manifest, technology = %found.technology, "Manifest matched");
            Some(found)
        })
    }
}

/// Text of the first `<tag>...</tag>` element.
fn xml_element(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = xml[start..].find(&format!("</{tag}>"))?;
    let value = xml[start..start + end].trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;

    fn detector_with(files: &[(&str, &str)]) -> ManifestProjectDetector {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("proj")).unwrap();
        for (name, content) in files {
            fs.write_file(&Path::new("proj").join(name), content).unwrap();
        }
        ManifestProjectDetector::with_filesystem(Arc::new(fs))
    }

    fn detect(files: &[(&str, &str)]) -> Option<DetectedProject> {
        detector_with(files).detect(Path::new("proj"))
    }

    #[test]
    fn node_engines_major_and_name() {
        let found = detect(&[(
            "package.json",
            r#"{"name":"api","engines":{"node":">=20.11"}}"#,
        )])
        .unwrap();
        assert_eq!(found.technology, Technology::Node);
        assert_eq!(found.version.as_deref(), Some("20"));
        assert_eq!(found.name.as_deref(), Some("api"));
    }

    #[test]
    fn malformed_package_json_is_not_detected() {
        assert_eq!(detect(&[("package.json", "{ not json")]), None);
    }

    #[test]
    fn requirements_txt_wins_over_pyproject() {
        let found = detect(&[
            ("requirements.txt", "flask\n"),
            ("pyproject.toml", "[project]\nname = \"svc\"\n"),
        ])
        .unwrap();
        assert_eq!(found, DetectedProject::new(Technology::Python));
    }

    #[test]
    fn pyproject_requires_python() {
        let found = detect(&[(
            "pyproject.toml",
            "[project]\nname = \"svc\"\nrequires-python = \">=3.12\"\n",
        )])
        .unwrap();
        assert_eq!(found.version.as_deref(), Some("3.12"));
        assert_eq!(found.name.as_deref(), Some("svc"));
    }

    #[test]
    fn poetry_python_dependency() {
        let found = detect(&[(
            "pyproject.toml",
            "[tool.poetry]\nname = \"svc\"\n[tool.poetry.dependencies]\npython = \"^3.11\"\n",
        )])
        .unwrap();
        assert_eq!(found.version.as_deref(), Some("3.11"));
        assert_eq!(found.name.as_deref(), Some("svc"));
    }

    #[test]
    fn go_mod_directives() {
        let found = detect(&[(
            "go.mod",
            "module github.com/acme/api\n\ngo 1.23.2\n\nrequire golang.org/x/net v0.1.0\n",
        )])
        .unwrap();
        assert_eq!(found.version.as_deref(), Some("1.23"));
        assert_eq!(found.name.as_deref(), Some("github.com/acme/api"));
    }

    #[test]
    fn pom_compiler_source_and_artifact() {
        let pom = "<project><artifactId>shop</artifactId><properties>\
                   <maven.compiler.source>17</maven.compiler.source></properties></project>";
        let found = detect(&[("pom.xml", pom)]).unwrap();
        assert_eq!(found.version.as_deref(), Some("17"));
        assert_eq!(found.name.as_deref(), Some("shop"));
    }

    #[test]
    fn legacy_java_version_in_pom() {
        let pom = "<project><properties><java.version>1.8</java.version></properties></project>";
        let found = detect(&[("pom.xml", pom)]).unwrap();
        assert_eq!(found.version.as_deref(), Some("8"));
        assert_eq!(found.name, None);
    }

    #[test]
    fn gradle_only_project() {
        let found = detect(&[("build.gradle", "plugins {}")]).unwrap();
        assert_eq!(found, DetectedProject::new(Technology::Java));
    }

    #[test]
    fn composer_php_constraint() {
        let found = detect(&[(
            "composer.json",
            r#"{"name":"acme/site","require":{"php":"^8.2"}}"#,
        )])
        .unwrap();
        assert_eq!(found.version.as_deref(), Some("8.2"));
        assert_eq!(found.name.as_deref(), Some("acme/site"));
    }

    #[test]
    fn gemfile_ruby_directive() {
        let found = detect(&[(
            "Gemfile",
            "source 'https://rubygems.org'\nruby '3.2.2'\ngem 'sinatra'\n",
        )])
        .unwrap();
        assert_eq!(found.technology, Technology::Ruby);
        assert_eq!(found.version.as_deref(), Some("3.2"));
    }

    #[test]
    fn cargo_package_name() {
        let found = detect(&[("Cargo.toml", "[package]\nname = \"svc\"\nversion = \"0.1.0\"\n")])
            .unwrap();
        assert_eq!(found.technology, Technology::Rust);
        assert_eq!(found.name.as_deref(), Some("svc"));
        assert_eq!(found.version, None);
    }

    #[test]
    fn empty_directory() {
        assert_eq!(detect(&[]), None);
    }

    #[test]
    fn probe_order_prefers_node() {
        let found = detect(&[("Cargo.toml", "[package]\nname=\"x\"\n"), ("package.json", "{}")])
            .unwrap();
        assert_eq!(found.technology, Technology::Node);
    }
}
