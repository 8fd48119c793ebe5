//! Terminal rendering shared by the CLI commands.

use std::time::Duration;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use brandkit_types::asset::{AssetBundle, BranchOutcome};

/// A steady-ticking spinner with `msg`. Call `finish_and_clear` when done.
pub fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn print_bot(reply: &str) {
    println!();
    for line in reply.lines() {
        println!("  {} {}", style("bot").magenta().bold(), line);
    }
    println!();
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

/// Print a bundle as JSON or as an asset table followed by a branch table.
pub fn print_bundle(bundle: &AssetBundle, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(bundle)?);
        return Ok(());
    }

    let mut assets = Table::new();
    assets.load_preset(presets::UTF8_FULL_CONDENSED);
    assets.set_content_arrangement(ContentArrangement::Dynamic);
    assets.set_header(vec![
        Cell::new("Asset").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);

    let profile = bundle.profile.as_ref();
    let mut rows = vec![
        ("Brand", bundle.brand_name.clone()),
        ("Description", bundle.brand_description.clone()),
        ("Tagline", or_dash(profile.map(|p| p.tagline.as_str()))),
        ("Keywords", or_dash(profile.map(|p| p.keywords.as_str()))),
        ("Website", or_dash(profile.map(|p| p.website_url.as_str()))),
        ("Cover image", or_dash(bundle.cover_image.as_deref())),
    ];
    if let Some(highlights) = &bundle.highlights {
        for (label, section) in [
            ("Coverage", &highlights.coverage),
            ("Phone compatibility", &highlights.phone_compatibility),
        ] {
            rows.push((label, format!("{}\n{}", section.title, section.subtitle)));
        }
    }
    rows.push((
        "Plans",
        bundle
            .subscription_titles
            .as_ref()
            .map(|titles| titles.join(", "))
            .unwrap_or_else(|| "-".to_string()),
    ));
    rows.push((
        "AI hero image",
        or_dash(bundle.ai_images.as_ref().and_then(|i| i.hero.as_deref())),
    ));
    rows.push(("Logo", or_dash(bundle.logo_url.as_deref())));

    for (label, value) in rows {
        assets.add_row(vec![Cell::new(label).fg(Color::Cyan), Cell::new(value)]);
    }

    let mut branches = Table::new();
    branches.load_preset(presets::UTF8_FULL_CONDENSED);
    branches.set_content_arrangement(ContentArrangement::Dynamic);
    branches.set_header(vec![
        Cell::new("Branch").fg(Color::White),
        Cell::new("Outcome").fg(Color::White),
        Cell::new("Time").fg(Color::White),
        Cell::new("Error").fg(Color::White),
    ]);
    for report in &bundle.reports {
        let outcome = match report.outcome {
            BranchOutcome::Succeeded => Cell::new("● succeeded").fg(Color::Green),
            BranchOutcome::Failed => Cell::new("✗ failed").fg(Color::Red),
            BranchOutcome::Skipped => Cell::new("○ skipped").fg(Color::DarkGrey),
        };
        branches.add_row(vec![
            Cell::new(report.branch.to_string()),
            outcome,
            Cell::new(format!("{} ms", report.elapsed_ms)).fg(Color::DarkGrey),
            Cell::new(report.error.as_deref().unwrap_or("")),
        ]);
    }

    println!();
    println!("{assets}");
    println!();
    println!("{branches}");
    println!();

    let failed = bundle.failed_branches().len();
    if failed > 0 {
        println!(
            "  {} {failed} branch{} failed; the bundle holds everything else.",
            style("!").yellow().bold(),
            if failed == 1 { "" } else { "es" }
        );
        println!();
    }

    Ok(())
}
