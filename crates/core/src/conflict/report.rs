//! Conflict report output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::detector::Conflict;
use crate::errors::ReportError;

/// Output format of the report file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// One `A CONFLICTS WITH B = /path` line per conflict.
    #[default]
    Text,
    /// A JSON array of `{mod_a, mod_b, path}` objects.
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{}': use 'text' or 'json'", other)),
        }
    }
}

/// Write one line per conflict, in detection order.
pub fn write_text<W: Write>(mut writer: W, conflicts: &[Conflict<'_>]) -> Result<(), ReportError> {
    for conflict in conflicts {
        writeln!(writer, "{}", conflict)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the conflicts as a pretty-printed JSON array.
pub fn write_json<W: Write>(mut writer: W, conflicts: &[Conflict<'_>]) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, conflicts)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(
    writer: W,
    format: ReportFormat,
    conflicts: &[Conflict<'_>],
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Text => write_text(writer, conflicts),
        ReportFormat::Json => write_json(writer, conflicts),
    }
}

/// Create (or truncate) `path` and write the report into it.
pub fn write_report_file<P: AsRef<Path>>(
    path: P,
    format: ReportFormat,
    conflicts: &[Conflict<'_>],
) -> Result<(), ReportError> {
    let path = path.as_ref();
    let wrap = |source: std::io::Error| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    write_report(BufWriter::new(file), format, conflicts).map_err(|e| match e {
        ReportError::IoError(source) => wrap(source),
        other => other,
    })?;

    info!(
        path = %path.display(),
        %format,
        count = conflicts.len(),
        "wrote conflict report"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::{ConflictDetector, DESCRIPTOR_PATH};
    use crate::mods::Mod;

    fn sample_mods() -> Vec<Mod> {
        vec![
            Mod::new("mod/a.mod", "Alpha", ["/common/x.txt", "/descriptor.mod"]),
            Mod::new("mod/ugc_2.mod", "Beta (2)", ["/common/x.txt", "/events/e.txt"]),
        ]
    }

    #[test]
    fn test_text_report_lines() {
        let mods = sample_mods();
        let conflicts = ConflictDetector::detect(&mods, DESCRIPTOR_PATH);
        let mut out = Vec::new();
        write_text(&mut out, &conflicts).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Alpha CONFLICTS WITH Beta (2) = /common/x.txt\n"
        );
    }

    #[test]
    fn test_json_report_uses_display_names() {
        let mods = sample_mods();
        let conflicts = ConflictDetector::detect(&mods, DESCRIPTOR_PATH);
        let mut out = Vec::new();
        write_json(&mut out, &conflicts).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["mod_a"], "Alpha");
        assert_eq!(value[0]["mod_b"], "Beta (2)");
        assert_eq!(value[0]["path"], "/common/x.txt");
    }

    #[test]
    fn test_empty_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.txt");
        write_report_file(&path, ReportFormat::Text, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_report_file_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("dump.txt");
        let err = write_report_file(&path, ReportFormat::Text, &[]).unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert!("xml".parse::<ReportFormat>().is_err());
    }
}
