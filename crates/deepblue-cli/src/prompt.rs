//! Interactive prompts for `deepblue init`.
//!
//! The dialogs need the `interactive` feature (dialoguer). Without it every
//! prompt fails with `CliError::FeatureNotAvailable` and callers must stay
//! on the non-interactive path, see [`is_available`].

use deepblue_core::{
    application::VersionSuggestion,
    domain::{DatabaseKind, Port, Technology, VersionSource, capabilities},
};

#[cfg(feature = "interactive")]
pub use dialogs::{confirm, database, port, technology, version};
#[cfg(not(feature = "interactive"))]
pub use unavailable::{confirm, database, port, technology, version};

/// Whether this build can show prompts at all.
pub const fn is_available() -> bool {
    cfg!(feature = "interactive")
}

// ── Choice lists ──────────────────────────────────────────────────────────────

/// One entry of the version menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChoice {
    pub label: String,
    pub version: String,
    pub source: VersionSource,
}

/// Offered versions, newest first, preceded by the detected one if any.
pub fn version_choices(
    technology: Technology,
    detected: Option<&VersionSuggestion>,
) -> Vec<VersionChoice> {
    let detected = detected.map(|d| VersionChoice {
        label: format!("{} (detected)", d.version),
        version: d.version.clone(),
        source: d.source(),
    });
    let offered = capabilities::technology_def(technology)
        .versions
        .iter()
        .map(|v| VersionChoice {
            label: (*v).to_string(),
            version: (*v).to_string(),
            source: VersionSource::default(),
        });
    detected.into_iter().chain(offered).collect()
}

/// "None" followed by every datastore.
pub fn database_choices() -> Vec<(String, Option<DatabaseKind>)> {
    std::iter::once(("None".to_string(), None))
        .chain(
            DatabaseKind::ALL
                .into_iter()
                .map(|kind| (kind.label().to_string(), Some(kind))),
        )
        .collect()
}

/// Menu labels for every technology.
pub fn technology_choices() -> Vec<String> {
    Technology::ALL
        .iter()
        .map(|t| format!("{} ({t})", t.label()))
        .collect()
}

// ── Dialogs ───────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
mod dialogs {
    use dialoguer::{Confirm, FuzzySelect, Input, Select, theme::ColorfulTheme};

    use super::*;
    use crate::error::{CliError, CliResult};

    fn failed(e: dialoguer::Error) -> CliError {
        CliError::Prompt {
            message: e.to_string(),
        }
    }

    pub fn technology(default: Option<Technology>) -> CliResult<Technology> {
        let default = default
            .and_then(|d| Technology::ALL.iter().position(|t| *t == d))
            .unwrap_or(0);
        let index = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Technology")
            .items(&technology_choices())
            .default(default)
            .interact_opt()
            .map_err(failed)?
            .ok_or(CliError::Cancelled)?;
        Ok(Technology::ALL[index])
    }

    pub fn version(
        technology: Technology,
        detected: Option<&VersionSuggestion>,
    ) -> CliResult<(String, VersionSource)> {
        let choices = version_choices(technology, detected);
        let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} version", technology.label()))
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(failed)?
            .ok_or(CliError::Cancelled)?;
        let choice = &choices[index];
        Ok((choice.version.clone(), choice.source))
    }

    pub fn database(default: Option<DatabaseKind>) -> CliResult<Option<DatabaseKind>> {
        let choices = database_choices();
        let labels: Vec<&str> = choices.iter().map(|(label, _)| label.as_str()).collect();
        let default = choices
            .iter()
            .position(|(_, kind)| *kind == default)
            .unwrap_or(0);
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Database")
            .items(&labels)
            .default(default)
            .interact_opt()
            .map_err(failed)?
            .ok_or(CliError::Cancelled)?;
        Ok(choices[index].1)
    }

    pub fn port(default: Port) -> CliResult<Port> {
        let text: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Port")
            .default(default.to_string())
            .validate_with(|input: &String| -> Result<(), String> {
                Port::parse(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(failed)?;
        Port::parse(&text).map_err(|e| CliError::Core(e.into()))
    }

    pub fn confirm(prompt: &str) -> CliResult<bool> {
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(true)
            .interact_opt()
            .map_err(failed)?
            .unwrap_or(false))
    }
}

#[cfg(not(feature = "interactive"))]
mod unavailable {
    use super::*;
    use crate::error::{CliError, CliResult};

    fn unavailable<T>() -> CliResult<T> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }

    pub fn technology(_default: Option<Technology>) -> CliResult<Technology> {
        unavailable()
    }

    pub fn version(
        _technology: Technology,
        _detected: Option<&VersionSuggestion>,
    ) -> CliResult<(String, VersionSource)> {
        unavailable()
    }

    pub fn database(_default: Option<DatabaseKind>) -> CliResult<Option<DatabaseKind>> {
        unavailable()
    }

    pub fn port(_default: Port) -> CliResult<Port> {
        unavailable()
    }

    pub fn confirm(_prompt: &str) -> CliResult<bool> {
        unavailable()
    }
}
