//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "deepblue",
    bin_name = "deepblue",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f433} Dockerfile and docker-compose generator",
    long_about = "deepblue writes a Dockerfile and a docker-compose.yml for a \
                  Node.js, Python, Go, Java, PHP, Ruby or Rust project, with an \
                  optional PostgreSQL, MySQL, MongoDB or Redis service.",
    after_help = "EXAMPLES:\n\
        \x20 deepblue init\n\
        \x20 deepblue init --tech go --db postgres --port 8080 --yes\n\
        \x20 deepblue init --tech php --dry-run\n\
        \x20 deepblue list --format json\n\
        \x20 deepblue completions bash > /usr/share/bash-completion/completions/deepblue",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate Docker files for a project.
    #[command(
        visible_alias = "i",
        about = "Generate a Dockerfile and docker-compose.yml",
        after_help = "EXAMPLES:\n\
            \x20 deepblue init                          # detect, then ask\n\
            \x20 deepblue init --yes                    # detect, then use defaults\n\
            \x20 deepblue init -t node -d redis -p 3000 --yes\n\
            \x20 deepblue init -t ruby --dir ./api --force"
    )]
    Init(InitArgs),

    /// List supported technologies and datastores.
    #[command(
        visible_alias = "ls",
        about = "List supported technologies and datastores",
        after_help = "EXAMPLES:\n\
            \x20 deepblue list\n\
            \x20 deepblue list --format csv"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 deepblue completions bash > ~/.local/share/bash-completion/completions/deepblue\n\
            \x20 deepblue completions zsh  > ~/.zfunc/_deepblue\n\
            \x20 deepblue completions fish > ~/.config/fish/completions/deepblue.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the deepblue configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 deepblue config get defaults.database\n\
            \x20 deepblue config list\n\
            \x20 deepblue config init"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `deepblue init`.
///
/// Technology and datastore are free-form tags: an unsupported technology is
/// reported by the generator, an unknown datastore is ignored with a warning.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Runtime technology.
    #[arg(
        short = 't',
        long = "tech",
        value_name = "TECH",
        help = "Technology (node, python, go, java, php, ruby, rust)"
    )]
    pub technology: Option<String>,

    /// Runtime version.
    #[arg(
        id = "runtime_version",
        long = "version",
        value_name = "VERSION",
        help = "Runtime version (e.g. 22, 3.12, 1.24)"
    )]
    pub version: Option<String>,

    /// Companion datastore.
    #[arg(
        short = 'd',
        long = "db",
        value_name = "DB",
        help = "Datastore (postgres, mysql, mongodb, redis, none)"
    )]
    pub database: Option<String>,

    /// Port the app listens on.
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Application port")]
    pub port: Option<u32>,

    /// Host port for the datastore.
    #[arg(long = "db-port", value_name = "PORT", help = "Datastore host port")]
    pub database_port: Option<u32>,

    /// Project directory to detect in and write to.
    #[arg(
        short = 'o',
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Project directory"
    )]
    pub dir: PathBuf,

    /// Skip prompts and confirmation.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Use detected values and defaults without asking"
    )]
    pub yes: bool,

    /// Replace existing files.
    #[arg(short = 'f', long = "force", help = "Overwrite existing files")]
    pub force: bool,

    /// Print the generated files instead of writing them.
    #[arg(long = "dry-run", help = "Print the files without writing them")]
    pub dry_run: bool,

    /// Do not write `.dockerignore`.
    #[arg(long = "no-dockerignore", help = "Skip the .dockerignore file")]
    pub no_dockerignore: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `deepblue list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON object.
    Json,
    /// CSV rows.
    Csv,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `deepblue completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `deepblue config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.database`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a configuration file with the built-in defaults.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────
