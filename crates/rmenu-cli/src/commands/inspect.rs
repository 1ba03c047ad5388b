use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use rmenu_router::{CompiledTable, Config};
use serde_json::{json, Value};

use super::compile_manifests;

pub fn execute(config: &Config, manifests: &[PathBuf], path: Option<&str>) -> Result<()> {
    let table = compile_manifests(config, manifests)?;

    let output = match path {
        Some(path) => inspect_path(&table, path)?,
        None => serde_json::to_value(table.routes().collect::<Vec<_>>())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Route, tabs and actions at a canonical path, else the runtime match
fn inspect_path(table: &CompiledTable, path: &str) -> Result<Value> {
    if let Some(route) = table.get(path) {
        return Ok(json!({
            "route": route,
            "tabs": table.tabs(path),
            "actions": table.actions(path),
        }));
    }

    let matched = table
        .lookup(path)
        .with_context(|| format!("No route matches {}", path.yellow()))?;

    Ok(json!({
        "route": matched.route,
        "args": matched.args,
        "tabs": table.tabs(&matched.route.path),
        "actions": table.actions(&matched.route.path),
    }))
}
