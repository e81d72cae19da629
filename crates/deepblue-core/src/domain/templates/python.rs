use crate::domain::{
    entities::{Dockerfile, Stage, TemplateConfig},
    templates::stack::{GENERATED_BY, StackTemplate},
    value_objects::Technology,
};

pub struct PythonTemplate;

impl StackTemplate for PythonTemplate {
    fn technology(&self) -> Technology {
        Technology::Python
    }

    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile {
        Dockerfile::new().header(GENERATED_BY).stage(
            Stage::from_image(format!("python:{}-slim", config.image_tag()))
                .workdir("/app")
                .env("PYTHONDONTWRITEBYTECODE", "1")
                .env("PYTHONUNBUFFERED", "1")
                .copy(".", ".")
                .run_if_exists(&[
                    (
                        "requirements.txt",
                        "pip install --no-cache-dir -r requirements.txt",
                    ),
                    ("pyproject.toml", "pip install --no-cache-dir ."),
                ])
                .expose(config.port().get())
                .cmd(&["python", "app.py"]),
        )
    }

    fn environment(&self, config: &TemplateConfig) -> Vec<String> {
        vec![
            "PYTHONUNBUFFERED=1".into(),
            format!("PORT={}", config.port()),
        ]
    }
}
