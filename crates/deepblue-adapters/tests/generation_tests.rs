//! End-to-end generation through the real adapters.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use deepblue_adapters::{LocalFilesystem, ManifestProjectDetector, MemoryFilesystem};
use deepblue_core::{
    application::{ApplicationError, GenerateService, WriteOptions, ports::ProjectDetector},
    domain::{ConfigRequest, Technology, TemplateConfig},
    error::DeepblueError,
};
use tempfile::TempDir;

fn config(request: ConfigRequest) -> TemplateConfig {
    request.resolve().unwrap()
}

#[test]
fn writes_every_document_to_disk() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("docker");

    let report = GenerateService::new(Box::new(LocalFilesystem::new()))
        .write(
            &config(ConfigRequest::new("go").with_database("postgres")),
            &out,
            &WriteOptions::default(),
        )
        .unwrap();

    assert_eq!(report.files.len(), 3);
    for file in &report.files {
        assert!(file.exists(), "{}", file.display());
    }
    let compose = std::fs::read_to_string(out.join("docker-compose.yml")).unwrap();
    assert!(compose.contains("postgres_data"));
}

#[test]
fn php_gets_a_proxy_config() {
    let dir = TempDir::new().unwrap();

    GenerateService::new(Box::new(LocalFilesystem::new()))
        .write(
            &config(ConfigRequest::new("php")),
            dir.path(),
            &WriteOptions::default(),
        )
        .unwrap();

    let conf = std::fs::read_to_string(dir.path().join("nginx.conf")).unwrap();
    assert!(conf.contains("fastcgi_pass app:9000"));
}

#[test]
fn second_write_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let service = GenerateService::new(Box::new(LocalFilesystem::new()));
    let node = config(ConfigRequest::new("node"));

    service
        .write(&node, dir.path(), &WriteOptions::default())
        .unwrap();
    std::fs::write(dir.path().join("Dockerfile"), "# mine\n").unwrap();

    let err = service
        .write(&node, dir.path(), &WriteOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        DeepblueError::Application(ApplicationError::ArtifactExists { .. })
    ));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Dockerfile")).unwrap(),
        "# mine\n"
    );

    let overwrite = WriteOptions {
        overwrite: true,
        ..WriteOptions::default()
    };
    service.write(&node, dir.path(), &overwrite).unwrap();
    let dockerfile = std::fs::read_to_string(dir.path().join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("FROM node:"));
}

#[test]
fn partial_write_names_the_files_on_disk() {
    let fs = MemoryFilesystem::new();
    fs.fail_writes_to("out/.dockerignore");

    let err = GenerateService::new(Box::new(fs.clone()))
        .write(
            &config(ConfigRequest::new("python")),
            "out",
            &WriteOptions::default(),
        )
        .unwrap_err();

    match err {
        DeepblueError::Application(ApplicationError::PartialWrite {
            written, failed, ..
        }) => {
            assert_eq!(
                written,
                vec![
                    PathBuf::from("out/Dockerfile"),
                    PathBuf::from("out/docker-compose.yml"),
                ]
            );
            assert_eq!(failed, PathBuf::from("out/.dockerignore"));
        }
        other => panic!("expected PartialWrite, got {other:?}"),
    }
    assert_eq!(fs.list_files().len(), 2);
}

#[test]
fn detects_project_on_disk() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("go.mod"),
        "module example.com/svc\n\ngo 1.22\n",
    )
    .unwrap();

    let found = ManifestProjectDetector::new().detect(dir.path()).unwrap();
    assert_eq!(found.technology, Technology::Go);
    assert_eq!(found.version.as_deref(), Some("1.22"));
}

#[test]
fn detection_shares_a_filesystem_with_generation() {
    let fs = MemoryFilesystem::new();
    let detector = ManifestProjectDetector::with_filesystem(Arc::new(fs.clone()));
    assert_eq!(detector.detect(Path::new("app")), None);

    GenerateService::new(Box::new(fs.clone()))
        .write(
            &config(ConfigRequest::new("rust")),
            "app",
            &WriteOptions::default(),
        )
        .unwrap();

    // generated files are not manifests
    assert_eq!(detector.detect(Path::new("app")), None);
    assert!(fs.read_file(Path::new("app/Dockerfile")).is_some());
}
