use crate::domain::{
    entities::{Dockerfile, Stage, TemplateConfig},
    templates::stack::{GENERATED_BY, StackTemplate},
    value_objects::Technology,
};

pub struct RubyTemplate;

impl StackTemplate for RubyTemplate {
    fn technology(&self) -> Technology {
        Technology::Ruby
    }

    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile {
        Dockerfile::new().header(GENERATED_BY).stage(
            Stage::from_image(format!("ruby:{}-alpine", config.image_tag()))
                .run("apk add --no-cache build-base")
                .workdir("/app")
                .copy(".", ".")
                .run_if_exists(&[(
                    "Gemfile",
                    "bundle config set --local without 'development test' && bundle install",
                )])
                .expose(config.port().get())
                .cmd(&["ruby", "app.rb"]),
        )
    }

    fn environment(&self, config: &TemplateConfig) -> Vec<String> {
        vec![
            "RACK_ENV=production".into(),
            format!("PORT={}", config.port()),
        ]
    }
}
