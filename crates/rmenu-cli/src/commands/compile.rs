use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;
use rmenu_router::{Config, FilesystemSink};

use super::compile_manifests;

pub fn execute(config: &Config, manifests: &[PathBuf], out: Option<PathBuf>) -> Result<()> {
    let out = out.unwrap_or_else(|| PathBuf::from(&config.output.dir));

    println!("{}", "Compiling router table...".green().bold());
    println!();

    let table = compile_manifests(config, manifests)?;

    let mut sink = FilesystemSink::new(&out).with_pretty(config.output.pretty);
    let report = table.emit(&mut sink);

    println!("Manifests: {}", manifests.len());
    println!("Routes:    {}", table.len().to_string().cyan());
    println!("Records:   {}", report.records.to_string().cyan());
    println!("Output:    {}", out.display().to_string().cyan());
    println!();

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("{} {}: {}", "✗".red(), failure, failure.source);
        }
        bail!("{} route(s) could not be written", report.failures.len());
    }

    println!("{}", "✓ Router table written".green());
    Ok(())
}
