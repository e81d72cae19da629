use serde::{Deserialize, Serialize};

/// Fixed file name of the build recipe.
pub const DOCKERFILE: &str = "Dockerfile";
/// Fixed file name of the orchestration document.
pub const COMPOSE_FILE: &str = "docker-compose.yml";
/// Fixed file name of the ignore-pattern document.
pub const DOCKERIGNORE: &str = ".dockerignore";
/// Fixed file name of the reverse-proxy configuration.
pub const NGINX_CONF: &str = "nginx.conf";

/// The two documents produced by one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockerTemplate {
    pub dockerfile: String,
    pub docker_compose: String,
}
