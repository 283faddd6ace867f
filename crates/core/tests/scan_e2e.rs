//! End-to-end tests for the settings -> mods -> conflicts -> report path.
//!
//! These tests build a fake game user directory with:
//! - A `settings.txt` listing enabled mod descriptors
//! - An unpacked directory mod
//! - A workshop mod shipped as a zip archive
//!
//! No game installation is needed; everything lives in a temp dir.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::TempDir;

use modclash_core::config::AppConfig;
use modclash_core::conflict::{write_report_file, ConflictDetector, ReportFormat};
use modclash_core::errors::ModError;
use modclash_core::mods::{ModScanner, ModSource};
use modclash_core::script::parse_file;

// ===========================================================================
// Helpers
// ===========================================================================

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn write_zip(path: &Path, entries: &[&str]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for entry in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(b"# content").unwrap();
    }
    zip.finish().unwrap();
}

/// A user directory with two directory mods and one zipped workshop mod.
fn setup_user_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    let user = dir.path();

    write_file(
        &user.join("settings.txt"),
        r#"force_pow2_textures=no
language="l_english"
last_mods={
	"mod/better_ui.mod"
	"mod/ugc_1122334455.mod"
	"mod/story_pack.mod"
}
autosave="BI_YEARLY"
"#,
    );

    // Directory mod.
    write_file(
        &user.join("mod/better_ui.mod"),
        "name=\"Better UI\"\npath=\"mod/better_ui\"\ntags={\n\t\"Interface\"\n}\n",
    );
    write_file(&user.join("mod/better_ui/descriptor.mod"), "name=\"Better UI\"");
    write_file(&user.join("mod/better_ui/Interface/Main.gui"), "");
    write_file(&user.join("mod/better_ui/common/Defines/00_defines.txt"), "");

    // Workshop mod packed as an archive.
    write_file(
        &user.join("mod/ugc_1122334455.mod"),
        "name=\"Bigger Fleets\"\narchive=\"workshop/1122334455/fleets.zip\"\nremote_file_id=\"1122334455\"\n",
    );
    write_zip(
        &user.join("workshop/1122334455/fleets.zip"),
        &[
            "descriptor.mod",
            "common\\defines\\00_DEFINES.txt",
            "common/ship_sizes/fleets.txt",
        ],
    );

    // Second directory mod, overlapping the archive.
    write_file(
        &user.join("mod/story_pack.mod"),
        "name=\"Story Pack\"\npath=\"mod/story_pack\"\n",
    );
    write_file(&user.join("mod/story_pack/descriptor.mod"), "");
    write_file(&user.join("mod/story_pack/common/ship_sizes/fleets.txt"), "");
    write_file(&user.join("mod/story_pack/events/story.txt"), "");

    dir
}

// ===========================================================================
// Tests
// ===========================================================================

#[test]
fn test_scan_resolves_all_enabled_mods() {
    let dir = setup_user_dir();
    let config = AppConfig::default();
    let settings = parse_file(config.game.settings_path(dir.path())).unwrap();

    let scanner = ModScanner::new(dir.path());
    let mods = scanner.scan(&settings, &config.game.mod_list_key).unwrap();

    assert_eq!(mods.len(), 3);
    assert_eq!(mods[0].display_name, "Better UI");
    assert_eq!(mods[1].display_name, "Bigger Fleets (1122334455)");
    assert_eq!(mods[2].display_name, "Story Pack");

    assert!(matches!(mods[0].source, Some(ModSource::Directory(_))));
    assert!(matches!(mods[1].source, Some(ModSource::Archive(_))));

    assert!(mods[0].file_paths.contains("/interface/main.gui"));
    assert!(mods[1].file_paths.contains("/common/defines/00_defines.txt"));
    for m in &mods {
        for path in &m.file_paths {
            assert!(path.starts_with('/'), "{} is not rooted", path);
            assert_eq!(path, &path.to_lowercase());
            assert!(!path.contains('\\') && !path.contains("//"));
        }
    }
}

#[test]
fn test_conflicts_across_directory_and_archive() {
    let dir = setup_user_dir();
    let config = AppConfig::default();
    let settings = parse_file(config.game.settings_path(dir.path())).unwrap();
    let mods = ModScanner::new(dir.path())
        .scan(&settings, &config.game.mod_list_key)
        .unwrap();

    let conflicts = ConflictDetector::detect(&mods, &config.report.excluded_path);
    let lines: Vec<String> = conflicts.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "Better UI CONFLICTS WITH Bigger Fleets (1122334455) = /common/defines/00_defines.txt",
            "Bigger Fleets (1122334455) CONFLICTS WITH Story Pack = /common/ship_sizes/fleets.txt",
        ]
    );
}

#[test]
fn test_report_file_written_in_detection_order() {
    let dir = setup_user_dir();
    let settings = parse_file(dir.path().join("settings.txt")).unwrap();
    let mods = ModScanner::new(dir.path()).scan(&settings, "last_mods").unwrap();
    let conflicts = ConflictDetector::detect(&mods, "/descriptor.mod");

    let report = dir.path().join("dump.txt");
    write_report_file(&report, ReportFormat::Text, &conflicts).unwrap();
    let text = std::fs::read_to_string(&report).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(text.starts_with("Better UI CONFLICTS WITH"));

    let json = dir.path().join("dump.json");
    write_report_file(&json, ReportFormat::Json, &conflicts).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn test_descriptor_without_source_aborts_scan() {
    let dir = setup_user_dir();
    write_file(
        &dir.path().join("mod/story_pack.mod"),
        "name=\"Story Pack\"\n",
    );
    let settings = parse_file(dir.path().join("settings.txt")).unwrap();
    let err = ModScanner::new(dir.path())
        .scan(&settings, "last_mods")
        .unwrap_err();
    assert!(matches!(err, ModError::MissingSource { ref descriptor } if descriptor == "mod/story_pack.mod"));
}

#[test]
fn test_missing_archive_aborts_scan() {
    let dir = setup_user_dir();
    std::fs::remove_file(dir.path().join("workshop/1122334455/fleets.zip")).unwrap();
    let settings = parse_file(dir.path().join("settings.txt")).unwrap();
    let err = ModScanner::new(dir.path())
        .scan(&settings, "last_mods")
        .unwrap_err();
    assert!(matches!(err, ModError::Io { .. }));
}
