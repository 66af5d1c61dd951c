//! Package command implementation
//!
//! Loads the configuration, runs the assembler and reports the result either as a
//! console summary or as the JSON assembly record.

use std::path::{Path, PathBuf};

use console::Style;

use crate::archive::ZipArchiveWriter;
use crate::assembler::Assembler;
use crate::cli::PackageArgs;
use crate::commands::helpers::{load_config, resolve_project_dir};
use crate::domain::AssemblyResult;
use crate::error::Result;
use crate::error::archive::report_write_failed;
use crate::progress::{InteractiveProgressReporter, SilentProgressReporter};

/// Run package command
pub fn run(project_dir: Option<PathBuf>, config: Option<PathBuf>, args: &PackageArgs) -> Result<()> {
    let project_dir = resolve_project_dir(project_dir)?;
    let config = load_config(&project_dir, config.as_deref(), &args.overrides())?;
    let inputs = config.assembly_inputs(&project_dir)?;

    let writer = ZipArchiveWriter::default();
    let assembler = Assembler::new(&writer).with_resource_filter(config.property_filter());
    let result = if args.quiet || args.json {
        assembler.with_progress(SilentProgressReporter).assemble(&inputs)?
    } else {
        assembler
            .with_progress(InteractiveProgressReporter::new())
            .assemble(&inputs)?
    };

    if let Some(report) = &args.report {
        write_report(&project_dir.join(report), &result)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !args.quiet {
        print_summary(&result);
    }

    Ok(())
}

/// Write the assembly record as pretty JSON
pub fn write_report(path: &Path, result: &AssemblyResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| report_write_failed(path, e))?;
    }
    std::fs::write(path, json + "\n").map_err(|e| report_write_failed(path, e))
}

fn print_summary(result: &AssemblyResult) {
    println!(
        "{} {}",
        Style::new().bold().green().apply_to("Packaged"),
        result.archive.display()
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Digest:"),
        Style::new().dim().apply_to(&result.digest)
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("Entries:"),
        result.entries.len()
    );

    if !result.artifacts.is_empty() {
        println!("  {}", Style::new().bold().apply_to("Libraries:"));
        for id in &result.artifacts {
            println!("    - {}", Style::new().cyan().apply_to(id));
        }
    }

    if !result.collisions.is_empty() {
        println!("  {}", Style::new().bold().apply_to("Replaced entries:"));
        for collision in &result.collisions {
            println!(
                "    {} {}",
                Style::new().yellow().apply_to(&collision.path),
                Style::new().dim().apply_to(format!(
                    "{} replaced by {}",
                    collision.replaced, collision.replaced_by
                ))
            );
        }
    }

    for warning in &result.warnings {
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to("warning:"),
            warning
        );
    }
}
