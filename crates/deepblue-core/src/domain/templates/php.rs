use crate::domain::{
    entities::{Dockerfile, Stage, TemplateConfig},
    templates::{
        proxy::DOCUMENT_ROOT,
        stack::{GENERATED_BY, StackTemplate},
    },
    value_objects::{DatabaseKind, Technology},
};

pub struct PhpTemplate;

impl PhpTemplate {
    /// PDO driver matching the datastore.
    fn pdo_extension(config: &TemplateConfig) -> &'static str {
        match config.database() {
            Some(DatabaseKind::Postgres) => "pdo_pgsql",
            _ => "pdo_mysql",
        }
    }
}

impl StackTemplate for PhpTemplate {
    fn technology(&self) -> Technology {
        Technology::Php
    }

    fn dockerfile(&self, config: &TemplateConfig) -> Dockerfile {
        let ext = Self::pdo_extension(config);
        let install = if ext == "pdo_pgsql" {
            "apk add --no-cache postgresql-dev && docker-php-ext-install pdo pdo_pgsql"
        } else {
            "docker-php-ext-install pdo pdo_mysql"
        };

        Dockerfile::new().header(GENERATED_BY).stage(
            Stage::from_image(format!("php:{}-fpm-alpine", config.image_tag()))
                .workdir(DOCUMENT_ROOT)
                .run(install)
                .copy_from("composer:2", "/usr/bin/composer", "/usr/bin/composer")
                .copy(".", ".")
                .run_if_exists(&[(
                    "composer.json",
                    "composer install --no-dev --optimize-autoloader --no-interaction",
                )])
                .run(format!("chown -R www-data:www-data {DOCUMENT_ROOT}"))
                .expose(config.container_port().get())
                .cmd(&["php-fpm"]),
        )
    }

    fn environment(&self, _config: &TemplateConfig) -> Vec<String> {
        vec!["PHP_ENV=production".into()]
    }

    fn app_volumes(&self, _config: &TemplateConfig) -> Vec<String> {
        vec![format!(".:{DOCUMENT_ROOT}")]
    }
}
