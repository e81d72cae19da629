//! `deepblue list`: supported technologies and datastores.

use serde_json::{Value, json};

use deepblue_core::domain::capabilities::{
    DATASTORE_REGISTRY, DatastoreDef, TECHNOLOGY_REGISTRY, TechnologyDef,
};

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    // --output-format json wins over the table default
    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Technologies")?;
            output.print(&format!("  {:<8} {:<8} {:<6} {}", "NAME", "LABEL", "PORT", "VERSIONS"))?;
            for def in TECHNOLOGY_REGISTRY {
                output.print(&format!(
                    "  {:<8} {:<8} {:<6} {}",
                    def.technology.as_str(),
                    def.label,
                    port_column(def),
                    def.versions.join(", ")
                ))?;
            }
            output.print("")?;
            output.header("Databases")?;
            output.print(&format!("  {:<8} {:<11} {:<6} {}", "NAME", "LABEL", "PORT", "IMAGE"))?;
            for def in DATASTORE_REGISTRY {
                output.print(&format!(
                    "  {:<8} {:<11} {:<6} {}",
                    def.kind.as_str(),
                    def.label,
                    def.port,
                    def.image
                ))?;
            }
        }

        ListFormat::List => {
            let names = TECHNOLOGY_REGISTRY
                .iter()
                .map(|d| d.technology.as_str())
                .chain(DATASTORE_REGISTRY.iter().map(|d| d.kind.as_str()));
            for name in names {
                output.emit(name)?;
            }
        }

        ListFormat::Json => output.json(&catalog_json())?,

        ListFormat::Csv => {
            for row in csv_rows() {
                output.emit(&row)?;
            }
        }
    }

    Ok(())
}

fn port_column(def: &TechnologyDef) -> String {
    match def.fixed_container_port {
        Some(fixed) => format!("{fixed}*"),
        None => def.default_port.to_string(),
    }
}

fn technology_json(def: &TechnologyDef) -> Value {
    json!({
        "name": def.technology.as_str(),
        "label": def.label,
        "versions": def.versions,
        "default_port": def.default_port,
        "fixed_container_port": def.fixed_container_port,
    })
}

fn datastore_json(def: &DatastoreDef) -> Value {
    json!({
        "name": def.kind.as_str(),
        "label": def.label,
        "image": def.image,
        "port": def.port,
        "connection_env": def.connection_env,
        "health_check": def.health_probe.is_some(),
    })
}

fn catalog_json() -> Value {
    json!({
        "technologies": TECHNOLOGY_REGISTRY.iter().map(technology_json).collect::<Vec<_>>(),
        "databases": DATASTORE_REGISTRY.iter().map(datastore_json).collect::<Vec<_>>(),
    })
}

/// `kind,name,label,port,detail`; versions are `;`-separated.
fn csv_rows() -> Vec<String> {
    let mut rows = vec!["kind,name,label,port,detail".to_string()];
    rows.extend(TECHNOLOGY_REGISTRY.iter().map(|d| {
        format!(
            "technology,{},{},{},{}",
            d.technology.as_str(),
            d.label,
            d.default_port,
            d.versions.join(";")
        )
    }));
    rows.extend(DATASTORE_REGISTRY.iter().map(|d| {
        format!("database,{},{},{},{}", d.kind.as_str(), d.label, d.port, d.image)
    }));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepblue_core::domain::{DatabaseKind, Technology};

    #[test]
    fn json_catalog_lists_everything() {
        let catalog = catalog_json();
        assert_eq!(
            catalog["technologies"].as_array().unwrap().len(),
            Technology::ALL.len()
        );
        assert_eq!(
            catalog["databases"].as_array().unwrap().len(),
            DatabaseKind::ALL.len()
        );
        let redis = &catalog["databases"][3];
        assert_eq!(redis["name"], "redis");
        assert_eq!(redis["health_check"], false);
    }

    #[test]
    fn csv_has_header_and_one_row_per_entry() {
        let rows = csv_rows();
        assert_eq!(rows[0], "kind,name,label,port,detail");
        assert_eq!(rows.len(), 1 + Technology::ALL.len() + DatabaseKind::ALL.len());
        assert!(rows.iter().any(|r| r.starts_with("technology,go,Go,8080,")));
        assert!(rows.iter().all(|r| r.split(',').count() == 5));
    }

    #[test]
    fn fixed_port_is_marked() {
        let php = TECHNOLOGY_REGISTRY
            .iter()
            .find(|d| d.technology == Technology::Php)
            .unwrap();
        assert_eq!(port_column(php), "9000*");
    }
}
