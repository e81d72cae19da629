//! Toolchain version sniffing.
//!
//! Each technology's toolchain is asked for its version on the command
//! line. A missing binary, a non-zero exit or unparseable output all mean
//! "unknown".

use std::process::Command;

use deepblue_core::{application::ports::VersionDetector, domain::Technology};
use tracing::{debug, instrument};

use super::{java_major, leading_version};

/// Runs a program and returns its combined stdout and stderr.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&'static str]) -> Option<String>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&'static str]) -> Option<String> {
        let output = Command::new(program).args(args).output().ok()?;
        if !output.status.success() {
            return None;
        }
        // `java -version` reports on stderr
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Some(text)
    }
}

/// Candidate invocations per technology, tried in order.
fn invocations(technology: Technology) -> &'static [(&'static str, &'static [&'static str])] {
    match technology {
        Technology::Node => &[("node", &["--version"])],
        Technology::Python => &[("python3", &["--version"]), ("python", &["--version"])],
        Technology::Go => &[("go", &["version"])],
        Technology::Java => &[("java", &["-version"])],
        Technology::Php => &[("php", &["-v"])],
        Technology::Ruby => &[("ruby", &["-v"])],
        Technology::Rust => &[("rustc", &["--version"])],
    }
}

/// Pull the version out of a toolchain's banner.
///
/// Node and Java report a major version; every other stack reports
/// `major.minor`.
pub fn format_version(technology: Technology, raw: &str) -> Option<String> {
    match technology {
        Technology::Node => {
            let token = raw.split_whitespace().find(|t| t.starts_with('v'))?;
            leading_version(token, false)
        }
        Technology::Java => {
            let start = raw.find("version \"")? + "version \"".len();
            java_major(&raw[start..])
        }
        Technology::Go => raw
            .split_whitespace()
            .filter_map(|t| t.strip_prefix("go"))
            .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
            .and_then(|t| leading_version(t, true)),
        Technology::Python | Technology::Php | Technology::Ruby | Technology::Rust => {
            let token = raw.split_whitespace().nth(1)?;
            leading_version(token, true)
        }
    }
}

pub struct CommandVersionDetector {
    runner: Box<dyn CommandRunner>,
}

impl CommandVersionDetector {
    pub fn new() -> Self {
        Self::with_runner(Box::new(SystemCommandRunner))
    }

    pub fn with_runner(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl Default for CommandVersionDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionDetector for CommandVersionDetector {
    #[instrument(skip(self))]
    fn detect(&self, technology: Technology) -> Option<String> {
        let version = invocations(technology).iter().find_map(|(program, args)| {
            let raw = self.runner.run(program, args)?;
            format_version(technology, &raw)
        });
        debug!(?version, "Toolchain probed");
        version
    }
}
