//! `modclash check`: scan enabled mods, detect conflicts, write the report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use tracing::info;

use modclash_core::config::AppConfig;
use modclash_core::conflict::{write_report_file, ConflictDetector, ReportFormat};
use modclash_core::mods::{Mod, ModScanner};
use modclash_core::script::parse_file;

use crate::style;

/// Parse the settings file under `user_dir` and resolve every enabled mod.
pub fn load_mods(config: &AppConfig, user_dir: &Path) -> Result<Vec<Mod>> {
    let settings_path = config.game.settings_path(user_dir);
    let settings = parse_file(&settings_path)
        .with_context(|| format!("failed to read settings file {}", settings_path.display()))?;

    ModScanner::new(user_dir)
        .scan(&settings, &config.game.mod_list_key)
        .context("failed to resolve enabled mods")
}

pub fn run_check(
    config: &AppConfig,
    user_dir: &Path,
    output: Option<PathBuf>,
    format: Option<ReportFormat>,
) -> Result<()> {
    let mods = load_mods(config, user_dir)?;
    let conflicts = ConflictDetector::detect(&mods, &config.report.excluded_path);

    let output = output.unwrap_or_else(|| config.report.output.clone());
    let format = format.unwrap_or(config.report.format);
    write_report_file(&output, format, &conflicts).context("failed to write conflict report")?;
    info!(output = %output.display(), conflicts = conflicts.len(), "check complete");

    println!();
    println!(
        "{}",
        style::header(&format!("Conflict Check ({} mods)", mods.len()))
    );
    println!();

    if conflicts.is_empty() {
        println!("{}", style::success("No conflicting files between enabled mods"));
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Mod", "Overridden by", "Files"]);

        for pair in ConflictDetector::summarize(&conflicts) {
            table.add_row(vec![
                Cell::new(&pair.mod_a),
                Cell::new(&pair.mod_b),
                Cell::new(pair.count),
            ]);
        }

        println!("{}", table);
        println!();
        println!(
            "{}",
            style::warn(&format!("{} conflicting files", conflicts.len()))
        );
    }

    println!(
        "{}",
        style::dim(&format!("Report written to {} ({})", output.display(), format))
    );
    println!();
    Ok(())
}
