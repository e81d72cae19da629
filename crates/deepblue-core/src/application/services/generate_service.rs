//! Generate Service - renders documents and writes them to disk.
//!
//! Workflow:
//! 1. Dispatch the configuration to its stack generator
//! 2. Add the auxiliary documents (`.dockerignore`, `nginx.conf`)
//! 3. Refuse to replace existing files unless asked to
//! 4. Write, reporting exactly which files made it to disk

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{ApplicationError, dispatcher, ports::Filesystem},
    domain::{
        COMPOSE_FILE, DOCKERFILE, DOCKERIGNORE, DockerTemplate, NGINX_CONF, TemplateConfig,
        dockerignore, nginx_conf,
    },
    error::{DeepblueError, DeepblueResult},
};

/// Options for [`GenerateService::write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace files that already exist.
    pub overwrite: bool,
    /// Also write `.dockerignore`.
    pub dockerignore: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            overwrite: false,
            dockerignore: true,
        }
    }
}

/// One document and the fixed file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: &'static str,
    pub content: String,
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    /// Files written, in order.
    pub files: Vec<PathBuf>,
}

/// Renders documents for a configuration and persists them.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Generate the build recipe and orchestration document.
    pub fn render(&self, config: &TemplateConfig) -> DeepblueResult<DockerTemplate> {
        dispatcher::dispatch(config)
    }

    /// Every file [`write`](Self::write) would produce, in write order.
    #[instrument(skip_all, fields(config = %config))]
    pub fn plan(
        &self,
        config: &TemplateConfig,
        options: &WriteOptions,
    ) -> DeepblueResult<Vec<GeneratedFile>> {
        let template = self.render(config)?;

        let mut files = vec![
            GeneratedFile {
                name: DOCKERFILE,
                content: template.dockerfile,
            },
            GeneratedFile {
                name: COMPOSE_FILE,
                content: template.docker_compose,
            },
        ];
        if options.dockerignore {
            files.push(GeneratedFile {
                name: DOCKERIGNORE,
                content: dockerignore(config.technology()),
            });
        }
        if config.is_fixed_port() {
            files.push(GeneratedFile {
                name: NGINX_CONF,
                content: nginx_conf(config.container_port()),
            });
        }

        debug!(count = files.len(), "Planned files");
        Ok(files)
    }

    /// Generate and write every file into `output_dir`.
    ///
    /// Nothing is written if any target exists and `overwrite` is off. If a
    /// write fails after earlier ones succeeded, the error lists the files
    /// already on disk.
    #[instrument(skip_all, fields(config = %config, output_dir = %output_dir.as_ref().display()))]
    pub fn write(
        &self,
        config: &TemplateConfig,
        output_dir: impl AsRef<Path>,
        options: &WriteOptions,
    ) -> DeepblueResult<GenerationReport> {
        let output_dir = output_dir.as_ref();
        let files = self.plan(config, options)?;

        if !options.overwrite {
            if let Some(existing) = files
                .iter()
                .map(|f| output_dir.join(f.name))
                .find(|p| self.filesystem.exists(p))
            {
                return Err(ApplicationError::ArtifactExists { path: existing }.into());
            }
        }

        self.filesystem.create_dir_all(output_dir)?;

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            let path = output_dir.join(file.name);
            if let Err(e) = self.filesystem.write_file(&path, &file.content) {
                warn!(path = %path.display(), error = %e, "Write failed");
                return Err(partial_failure(written, path, e));
            }
            debug!(path = %path.display(), "Wrote file");
            written.push(path);
        }

        info!(files = written.len(), "Generation complete");
        Ok(GenerationReport {
            output_dir: output_dir.to_path_buf(),
            files: written,
        })
    }
}

fn partial_failure(written: Vec<PathBuf>, failed: PathBuf, cause: DeepblueError) -> DeepblueError {
    if written.is_empty() {
        return cause;
    }
    let reason = match cause {
        DeepblueError::Application(ApplicationError::FilesystemError { reason, .. }) => reason,
        other => other.to_string(),
    };
    ApplicationError::PartialWrite {
        written,
        failed,
        reason,
    }
    .into()
}
