use crate::domain::{
    entities::{Dockerfile, Stage, TemplateConfig},
    templates::stack::{GENERATED_BY, StackTemplate},
    value_objects::Technology,
};

pub struct JavaTemplate;

impl StackTemplate for JavaTemplate {
    fn technology(&self) -> Technology {
        Technology::Java
    }

    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile {
        let tag = config.image_tag();
        Dockerfile::new()
            .header(GENERATED_BY)
            .stage(
                Stage::from_image(format!("eclipse-temurin:{tag}-jdk-alpine"))
                    .named("builder")
                    .workdir("/app")
                    .copy(".", ".")
                    .run_if_exists(&[
                        ("mvnw", "./mvnw -B package -DskipTests"),
                        ("pom.xml", "apk add --no-cache maven && mvn -B package -DskipTests"),
                        (
                            "gradlew",
                            "./gradlew build -x test && mkdir -p target && cp build/libs/*.jar target/",
                        ),
                    ]),
            )
            .stage(
                Stage::from_image(format!("eclipse-temurin:{tag}-jre-alpine"))
                    .workdir("/app")
                    .comment("The build must produce exactly one jar under target/ to match app.jar.")
                    .copy_from("builder", "/app/target/*.jar", "app.jar")
                    .expose(config.port().get())
                    .entrypoint(&["java", "-jar", "app.jar"]),
            )
    }

    fn environment(&self, config: &TemplateConfig) -> Vec<String> {
        vec![
            "SPRING_PROFILES_ACTIVE=prod".into(),
            format!("SERVER_PORT={}", config.port()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lts_qualifier_is_stripped_from_image() {
        let config = TemplateConfig::builder()
            .technology(Technology::Java)
            .build()
            .unwrap();
        let text = JavaTemplate.dockerfile(&config).render();

        assert!(text.contains("FROM eclipse-temurin:21-jdk-alpine AS builder"));
        assert!(text.contains("FROM eclipse-temurin:21-jre-alpine"));
        assert!(!text.contains("LTS"));
        assert!(text.contains("COPY --from=builder /app/target/*.jar app.jar"));
        assert!(text.trim_end().ends_with(r#"ENTRYPOINT ["java", "-jar", "app.jar"]"#));
    }

    #[test]
    fn jar_note_precedes_the_copy() {
        let config = TemplateConfig::builder()
            .technology(Technology::Java)
            .build()
            .unwrap();
        let text = JavaTemplate.dockerfile(&config).render();
        let lines: Vec<&str> = text.lines().collect();
        let copy = lines
            .iter()
            .position(|l| l.starts_with("COPY --from=builder"))
            .unwrap();
        assert!(lines[copy - 1].starts_with("# ") && lines[copy - 1].contains("app.jar"));
    }
}
