use crate::domain::{
    entities::{Dockerfile, Stage, TemplateConfig},
    templates::stack::{GENERATED_BY, StackTemplate},
    value_objects::Technology,
};

/// Minimal runtime image for compiled stacks.
pub(crate) const RUNTIME_IMAGE: &str = "alpine:3.21";

pub struct GoTemplate;

impl StackTemplate for GoTemplate {
    fn technology(&self) -> Technology {
        Technology::Go
    }

    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile {
        Dockerfile::new()
            .header(GENERATED_BY)
            .stage(
                Stage::from_image(format!("golang:{}-alpine", config.image_tag()))
                    .named("builder")
                    .workdir("/app")
                    .copy(".", ".")
                    .run_if_exists(&[("go.mod", "go mod download")])
                    .run("CGO_ENABLED=0 GOOS=linux go build -o main ."),
            )
            .stage(
                Stage::from_image(RUNTIME_IMAGE)
                    .run("apk --no-cache add ca-certificates")
                    .workdir("/root/")
                    .copy_from("builder", "/app/main", ".")
                    .expose(config.port().get())
                    .cmd(&["./main"]),
            )
    }

    fn environment(&self, config: &TemplateConfig) -> Vec<String> {
        vec![format!("PORT={}", config.port())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::dockerfile::Instruction;

    #[test]
    fn final_stage_holds_only_the_binary() {
        let config = TemplateConfig::builder()
            .technology(Technology::Go)
            .build()
            .unwrap();
        let file = GoTemplate.dockerfile(&config);

        assert_eq!(file.stages().len(), 2);
        let last = file.final_stage().unwrap();
        assert_eq!(last.base(), RUNTIME_IMAGE);
        assert!(last.instructions().iter().all(|i| !matches!(
            i,
            Instruction::Copy { from: None, .. }
        )));
        assert!(!last.to_string().contains("go build"));
    }
}
