//! Reverse proxy for fixed-port stacks.
//!
//! php-fpm speaks FastCGI on 9000, not HTTP, so an nginx service publishes
//! the configured port and forwards PHP requests to the app.

use crate::domain::{
    entities::compose::{APP_SERVICE, Dependency, Service},
    value_objects::Port,
};

pub use crate::domain::entities::compose::PROXY_SERVICE;

pub const PROXY_IMAGE: &str = "nginx:alpine";

/// Document root shared by the app and the proxy.
pub const DOCUMENT_ROOT: &str = "/var/www/html";

/// The `nginx` service, publishing `host_port` on the proxy's port 80.
pub fn proxy_service(host_port: Port) -> Service {
    Service::from_image(PROXY_IMAGE)
        .port(format!("{host_port}:80"))
        .volume(format!(".:{DOCUMENT_ROOT}"))
        .volume("./nginx.conf:/etc/nginx/conf.d/default.conf")
        .depends_on(APP_SERVICE, Dependency::started())
}

/// `nginx.conf` forwarding `.php` requests to `app:<fastcgi_port>`.
pub fn nginx_conf(fastcgi_port: Port) -> String {
    format!(
        "server {{
    listen 80;
    server_name localhost;
    root {DOCUMENT_ROOT};
    index index.php index.html;

    location / {{
        try_files $uri $uri/ /index.php?$query_string;
    }}

    location ~ \\.php$ {{
        fastcgi_pass {APP_SERVICE}:{fastcgi_port};
        fastcgi_index index.php;
        include fastcgi_params;
        fastcgi_param SCRIPT_FILENAME $document_root$fastcgi_script_name;
    }}

    location ~ /\\.ht {{
        deny all;
    }}
}}
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_publishes_configured_port_on_80() {
        let svc = proxy_service(Port::new(8000).unwrap());
        assert_eq!(svc.image.as_deref(), Some(PROXY_IMAGE));
        assert_eq!(svc.ports, vec!["8000:80".to_string()]);
        assert!(svc.depends_on.contains_key(APP_SERVICE));
    }

    #[test]
    fn nginx_conf_forwards_to_app() {
        let conf = nginx_conf(Port::new(9000).unwrap());
        assert!(conf.contains("fastcgi_pass app:9000;"));
        assert!(conf.contains("root /var/www/html;"));
        assert!(conf.contains(r"location ~ \.php$"));
    }
}
