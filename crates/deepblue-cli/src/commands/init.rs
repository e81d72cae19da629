//! `deepblue init`: detect the project, fill the gaps, generate, write.
//!
//! Every value is taken from the first source that has one:
//!
//! 1. the command-line flag
//! 2. a prompt (interactive sessions only)
//! 3. detection: the manifest, then the local toolchain
//! 4. the `[defaults]` table of the config file
//! 5. the registry default (newest version, technology's default port)

use std::io::IsTerminal as _;
use std::path::Path;

use serde_json::json;
use tracing::{debug, info, instrument};

use deepblue_adapters::{CommandVersionDetector, LocalFilesystem, ManifestProjectDetector};
use deepblue_core::{
    application::{
        DetectionService, GenerateService, GeneratedFile, GenerationReport, Suggestion,
        VersionSuggestion, WriteOptions, resolve_request,
    },
    domain::{
        ConfigRequest, DatabaseKind, Port, Technology, TemplateConfig, VersionSource,
        capabilities,
    },
};

use crate::{
    cli::{GlobalArgs, InitArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    prompt,
};

#[instrument(skip_all, fields(dir = %args.dir.display()))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let interactive = is_interactive(&args, &global, &output);
    debug!(interactive, "Init started");

    // 1. Detect
    let detection = DetectionService::new(
        Box::new(ManifestProjectDetector::new()),
        Box::new(CommandVersionDetector::new()),
    );
    let suggestion = detection.suggest(&args.dir);
    if let Some(found) = &suggestion {
        output.info(&describe_detection(found))?;
    }

    // 2. Fill the gaps and resolve
    let request = gather(&args, &config, &detection, suggestion.as_ref(), interactive)?;
    if let Some(tag) = request.unrecognized_database() {
        output.warning(&format!("Unknown database '{tag}', generating without one"))?;
    }
    let template_config = resolve_request(&request)?;
    debug!(config = %template_config, "Configuration resolved");

    let options = WriteOptions {
        overwrite: args.force,
        dockerignore: !args.no_dockerignore && config.defaults.dockerignore,
    };
    let service = GenerateService::new(Box::new(LocalFilesystem::new()));

    // 3. Dry run: print, never write
    if args.dry_run {
        let files = service.plan(&template_config, &options)?;
        return print_plan(&files, &output);
    }

    // 4. Confirm
    show_configuration(&template_config, &args.dir, &output)?;
    if interactive && !prompt::confirm("Generate these files?")? {
        return Err(CliError::Cancelled);
    }

    // 5. Write
    let spinner = output.spinner("Generating Docker files...");
    let result = service.write(&template_config, &args.dir, &options);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;
    info!(files = report.files.len(), "Files written");

    show_report(&report, &template_config, &output)
}

/// Prompts need a real terminal on both ends and the `interactive` feature.
fn is_interactive(args: &InitArgs, global: &GlobalArgs, output: &OutputManager) -> bool {
    prompt::is_available()
        && !args.yes
        && !global.quiet
        && output.format() != OutputFormat::Json
        && std::io::stdin().is_terminal()
        && std::io::stderr().is_terminal()
}

// ── Gathering ─────────────────────────────────────────────────────────────────

fn gather(
    args: &InitArgs,
    config: &AppConfig,
    detection: &DetectionService,
    suggestion: Option<&Suggestion>,
    interactive: bool,
) -> CliResult<ConfigRequest> {
    let configured_tech = config
        .defaults
        .technology
        .as_deref()
        .and_then(|t| t.parse::<Technology>().ok());

    let tag = match &args.technology {
        Some(tag) => tag.clone(),
        None if interactive => {
            prompt::technology(suggestion.map(|s| s.technology).or(configured_tech))?.to_string()
        }
        None => suggestion
            .map(|s| s.technology.to_string())
            .or_else(|| config.defaults.technology.clone())
            .ok_or_else(|| CliError::NothingDetected {
                dir: args.dir.clone(),
            })?,
    };

    let mut request = ConfigRequest::new(tag);
    request.database_port = args.database_port;

    // An unsupported tag is reported by `resolve_request`; nothing else to ask.
    let Ok(technology) = request.technology.parse::<Technology>() else {
        return Ok(request);
    };

    // ── version ───────────────────────────────────────────────────────────
    if let Some(version) = &args.version {
        request.version = Some(version.clone());
    } else {
        let detected = match suggestion {
            Some(s) if s.technology == technology => s.version.clone(),
            _ => detection.toolchain_version(technology),
        };
        let chosen = if interactive {
            Some(prompt::version(technology, detected.as_ref())?)
        } else {
            detected.map(|d: VersionSuggestion| {
                let source = d.source();
                (d.version, source)
            })
        };
        if let Some((version, source)) = chosen {
            request.version = Some(version);
            request.version_source = source;
        }
    }

    // ── database ──────────────────────────────────────────────────────────
    request.database = match &args.database {
        Some(tag) => Some(tag.clone()),
        None if interactive => {
            let default = config
                .defaults
                .database
                .as_deref()
                .and_then(DatabaseKind::parse_lenient);
            let kind = prompt::database(default)?;
            Some(kind.map_or_else(|| "none".to_string(), |k| k.to_string()))
        }
        None => config.defaults.database.clone(),
    };

    // ── port ──────────────────────────────────────────────────────────────
    request.port = match args.port {
        Some(port) => Some(port),
        None if interactive => {
            let default = config
                .defaults
                .port
                .and_then(|p| Port::new(p).ok())
                .unwrap_or_else(|| technology.default_port());
            Some(u32::from(prompt::port(default)?.get()))
        }
        None => config.defaults.port,
    };

    Ok(request)
}

// ── Presentation ──────────────────────────────────────────────────────────────

fn describe_detection(found: &Suggestion) -> String {
    let mut line = format!("Detected a {} project", found.technology.label());
    if let Some(name) = &found.project_name {
        line.push_str(&format!(" '{name}'"));
    }
    if let Some(version) = &found.version {
        line.push_str(&format!(" ({} {})", found.technology.label(), version.version));
    }
    line
}

fn show_configuration(config: &TemplateConfig, dir: &Path, out: &OutputManager) -> CliResult<()> {
    let version = match config.version_source() {
        VersionSource::Detected => format!("{} (detected)", config.version()),
        VersionSource::Offered => config.version().to_string(),
    };
    let port = if config.is_fixed_port() {
        format!("{} (nginx → app:{})", config.port(), config.container_port())
    } else {
        config.port().to_string()
    };

    out.header("Configuration")?;
    out.field("Technology", config.technology().label())?;
    out.field("Version", &version)?;
    out.field("Port", &port)?;
    out.field("Database", config.database().map_or("None", |d| d.label()))?;
    out.field("Directory", &dir.display().to_string())?;
    out.print("")?;
    Ok(())
}

fn print_plan(files: &[GeneratedFile], out: &OutputManager) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        let files: Vec<_> = files
            .iter()
            .map(|f| json!({ "name": f.name, "content": f.content }))
            .collect();
        out.json(&json!({ "files": files }))?;
        return Ok(());
    }

    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            out.emit("")?;
        }
        out.emit(&format!("==> {} <==", file.name))?;
        out.emit(&file.content)?;
    }
    Ok(())
}

fn show_report(
    report: &GenerationReport,
    config: &TemplateConfig,
    out: &OutputManager,
) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        let files: Vec<_> = report
            .files
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        out.json(&json!({
            "output_dir": report.output_dir.display().to_string(),
            "files": files,
            "config": ConfigRequest::from(config),
        }))?;
        return Ok(());
    }

    out.success(&format!(
        "Generated {} files in {}",
        report.files.len(),
        report.output_dir.display()
    ))?;
    for file in &report.files {
        out.print(&format!("  • {}", file.display()))?;
    }

    out.print("")?;
    out.print("Next steps:")?;
    if let Some(kind) = config.database() {
        let variable = capabilities::datastore_def(kind).connection_env;
        out.print(&format!("  export {variable}=...   # read by the app container"))?;
    }
    out.print("  docker compose up --build")?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
