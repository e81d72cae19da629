use crate::domain::value_objects::Technology;

const COMMON: &[&str] = &[
    ".git",
    ".gitignore",
    ".dockerignore",
    "Dockerfile",
    "docker-compose.yml",
    ".env",
    ".env.*",
    "*.log",
    ".DS_Store",
    ".vscode",
    ".idea",
    "README.md",
];

fn stack_patterns(technology: Technology) -> &'static [&'static str] {
    match technology {
        Technology::Node => &["node_modules", "npm-debug.log*", "coverage", "dist", ".next"],
        Technology::Python => &[
            "__pycache__",
            "*.py[cod]",
            ".venv",
            "venv",
            ".pytest_cache",
            "*.egg-info",
        ],
        Technology::Go => &["bin", "*.test", "vendor"],
        Technology::Java => &["target", "build", ".gradle", "*.class"],
        Technology::Php => &["vendor", ".phpunit.result.cache"],
        Technology::Ruby => &[".bundle", "vendor/bundle", "log", "tmp"],
        Technology::Rust => &["target", "**/*.rs.bk"],
    }
}

/// `.dockerignore` content for a technology.
pub fn dockerignore(technology: Technology) -> String {
    let mut out = String::from("# Version control and editor files\n");
    for pattern in COMMON {
        out.push_str(pattern);
        out.push('\n');
    }
    out.push_str(&format!("\n# {}\n", technology.label()));
    for pattern in stack_patterns(technology) {
        out.push_str(pattern);
        out.push('\n');
    }
    out
}
