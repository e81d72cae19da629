use crate::domain::{
    entities::{Dockerfile, Stage, TemplateConfig},
    templates::{
        go::RUNTIME_IMAGE,
        stack::{GENERATED_BY, StackTemplate},
    },
    value_objects::Technology,
};

/// Copies the first executable under target/release to a fixed path, since
/// the package name is not known when the recipe is generated.
const PROBE_BINARY: &str = "mkdir -p /app/out && \
find target/release -maxdepth 1 -type f -perm -u+x -exec cp {} /app/out/app \\; -quit";

pub struct RustTemplate;

impl StackTemplate for RustTemplate {
    fn technology(&self) -> Technology {
        Technology::Rust
    }

    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile {
        Dockerfile::new()
            .header(GENERATED_BY)
            .stage(
                Stage::from_image(format!("rust:{}-alpine", config.image_tag()))
                    .named("builder")
                    .run("apk add --no-cache musl-dev")
                    .workdir("/app")
                    .copy(".", ".")
                    .run_if_exists(&[
                        ("Cargo.lock", "cargo fetch --locked"),
                        ("Cargo.toml", "cargo fetch"),
                    ])
                    .run("cargo build --release")
                    .comment("With several binaries, replace the next step with")
                    .comment("`cp target/release/<name> /app/out/app`.")
                    .run(PROBE_BINARY),
            )
            .stage(
                Stage::from_image(RUNTIME_IMAGE)
                    .copy_from("builder", "/app/out/app", "/usr/local/bin/app")
                    .expose(config.port().get())
                    .cmd(&["app"]),
            )
    }

    fn environment(&self, config: &TemplateConfig) -> Vec<String> {
        vec![format!("PORT={}", config.port())]
    }
}
