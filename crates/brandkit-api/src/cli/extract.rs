//! Property extraction from free text.

use anyhow::Result;
use console::style;

use brandkit_core::assets::copy::extract_property;

use super::output::spinner;
use crate::state::AppState;

pub async fn extract(
    state: &AppState,
    property: &str,
    instructions: Option<&str>,
    text: &str,
    json: bool,
) -> Result<()> {
    let pipeline = state.wizard.pipeline();

    let progress = spinner(&format!("Extracting {property}..."));
    let result = extract_property(
        pipeline.provider(),
        &pipeline.settings().completion,
        text,
        property,
        instructions,
    )
    .await;
    progress.finish_and_clear();
    let extraction = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(());
    }

    println!();
    println!(
        "  {}  {}",
        style(format!("{}:", extraction.property)).bold(),
        style(&extraction.value).cyan()
    );
    if let Some(enhancement) = &extraction.enhancement {
        println!();
        for (label, value) in [
            ("Enhanced", &enhancement.enhanced_description),
            ("Tagline", &enhancement.tagline),
            ("Logo concept", &enhancement.logo_concept),
        ] {
            if !value.is_empty() {
                println!("  {}  {}", style(format!("{label}:")).bold(), value);
            }
        }
    }
    println!();

    Ok(())
}
