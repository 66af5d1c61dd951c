//! Select command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::SelectArgs;
use crate::commands::helpers::{load_config, resolve_project_dir};
use crate::domain::ArtifactId;
use crate::error::Result;
use crate::filter::Verdict;

/// Run select command
pub fn run(project_dir: Option<PathBuf>, config: Option<PathBuf>, args: &SelectArgs) -> Result<()> {
    let project_dir = resolve_project_dir(project_dir)?;
    let config = load_config(&project_dir, config.as_deref(), &args.overrides())?;
    let filter = config.artifact_filter()?;
    let candidates = config.candidates(&project_dir);
    let verdicts = filter.explain(&candidates);

    let included = verdicts.iter().filter(|(_, v)| v.is_included()).count();
    if included == 0 {
        println!("No dependencies selected.");
    } else {
        println!("Selected dependencies ({included}):");
    }

    for line in render(&verdicts, args.all) {
        println!("{line}");
    }

    Ok(())
}

fn render(verdicts: &[(ArtifactId, Verdict)], all: bool) -> Vec<String> {
    verdicts
        .iter()
        .filter(|(_, verdict)| all || verdict.is_included())
        .map(|(id, verdict)| {
            let marker = if verdict.is_included() {
                Style::new().green().apply_to("+")
            } else {
                Style::new().red().apply_to("-")
            };
            format!(
                "  {marker} {} {}",
                Style::new().cyan().apply_to(id),
                Style::new().dim().apply_to(format!("({})", verdict.reason()))
            )
        })
        .collect()
}
