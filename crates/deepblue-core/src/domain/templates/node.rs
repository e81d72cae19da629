use crate::domain::{
    entities::{Dockerfile, Stage, TemplateConfig},
    templates::stack::{GENERATED_BY, StackTemplate},
    value_objects::Technology,
};

pub struct NodeTemplate;

impl StackTemplate for NodeTemplate {
    fn technology(&self) -> Technology {
        Technology::Node
    }

    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile {
        Dockerfile::new().header(GENERATED_BY).stage(
            Stage::from_image(format!("node:{}-alpine", config.image_tag()))
                .workdir("/app")
                .copy(".", ".")
                .run_if_exists(&[
                    ("package-lock.json", "npm ci --omit=dev"),
                    ("package.json", "npm install --omit=dev"),
                ])
                .expose(config.port().get())
                .user("node")
                .cmd(&["npm", "start"]),
        )
    }

    fn environment(&self, config: &TemplateConfig) -> Vec<String> {
        vec![
            "NODE_ENV=production".into(),
            format!("PORT={}", config.port()),
        ]
    }

    fn app_volumes(&self, _config: &TemplateConfig) -> Vec<String> {
        vec![".:/app".into(), "/app/node_modules".into()]
    }
}
