//! One-shot asset generation from a name and description.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use dialoguer::Input;

use brandkit_infra::snapshot::write_snapshot;
use brandkit_types::brand::BrandBrief;

use super::output::{print_bundle, spinner};
use crate::state::AppState;

/// Run the asset pipeline once. Missing flags are prompted for.
///
/// # Examples
///
/// ```bash
/// brandkit generate --name "Acme Mobile" --description "Prepaid plans for students"
/// ```
pub async fn generate(
    state: &AppState,
    name: Option<String>,
    description: Option<String>,
    snapshot: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Brand name")
            .interact_text()?,
    };
    let description = match description {
        Some(d) => d,
        None => Input::<String>::new()
            .with_prompt("Brand description")
            .interact_text()?,
    };
    let brief = BrandBrief::new(name, description)?;

    let progress = spinner(&format!("Generating assets for {}...", brief.name()));
    let bundle = state.wizard.pipeline().run(&brief).await;
    progress.finish_and_clear();

    print_bundle(&bundle, json)?;

    if let Some(path) = snapshot {
        write_snapshot(&path, &bundle)
            .await
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        if !json {
            println!(
                "  {} Landing page written to {}",
                style("✓").green().bold(),
                style(path.display()).cyan()
            );
        }
    }

    Ok(())
}
