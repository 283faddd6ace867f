//! `modclash mods`: list enabled mods and where their files come from.

use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use modclash_core::config::AppConfig;

use crate::check::load_mods;
use crate::style;

pub fn run_mods(config: &AppConfig, user_dir: &Path) -> Result<()> {
    let mods = load_mods(config, user_dir)?;

    if mods.is_empty() {
        println!();
        println!("{}", style::success("No mods enabled"));
        println!();
        return Ok(());
    }

    println!();
    println!("{}", style::header(&format!("Enabled Mods ({})", mods.len())));
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Source", "Files"]);

    for (index, m) in mods.iter().enumerate() {
        let source = m
            .source
            .as_ref()
            .map(|s| s.label().to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&m.display_name),
            Cell::new(&source),
            Cell::new(m.file_count()),
        ]);
    }

    println!("{}", table);
    println!();
    Ok(())
}
