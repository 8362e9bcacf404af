//! Export functionality for decoded captures
//!
//! Writes the per-frame output attribute set (see [`output_columns`]) to
//! CSV and, with the `json` feature, to a JSON document.

use crate::types::*;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Export options for controlling output formats
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
    pub output_dir: Option<String>,
}

/// Paths written by an export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub csv_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
}

/// Output paths for a capture file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub output_dir: PathBuf,
    pub csv: PathBuf,
    pub json: PathBuf,
}

/// Compute output paths: `<stem>.frames.csv` / `<stem>.frames.json` in the
/// configured directory, or next to the input file
pub fn compute_export_paths(input_path: &Path, export_options: &ExportOptions) -> ExportPaths {
    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("capture");

    let output_dir = match &export_options.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    ExportPaths {
        csv: output_dir.join(format!("{base_name}.frames.csv")),
        json: output_dir.join(format!("{base_name}.frames.json")),
        output_dir,
    }
}

fn ensure_output_dir(dir: &Path) -> Result<()> {
    // An empty parent means the current directory
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {dir:?}"))?;
    log::debug!("created output directory {dir:?}");
    Ok(())
}

/// Write frames as CSV: one header row, then one row per frame
#[cfg(feature = "csv")]
pub fn write_csv<W: std::io::Write>(capture: &CaptureLog, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(output_columns())?;

    for frame in &capture.frames {
        let row = frame
            .attributes()
            .into_iter()
            .map(|(_, value)| value.unwrap_or_default());
        csv_writer.write_record(row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export a decoded capture to CSV next to (or on behalf of) its input file
#[cfg(feature = "csv")]
pub fn export_to_csv(
    capture: &CaptureLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    let paths = compute_export_paths(input_path, export_options);
    ensure_output_dir(&paths.output_dir)?;

    let file = std::fs::File::create(&paths.csv)
        .with_context(|| format!("Failed to create CSV file: {:?}", paths.csv))?;
    write_csv(capture, std::io::BufWriter::new(file))
        .with_context(|| format!("Failed to write CSV file: {:?}", paths.csv))?;

    log::debug!("wrote {} frames to {:?}", capture.frame_count(), paths.csv);
    Ok(paths.csv)
}

/// Export a decoded capture to a JSON document
#[cfg(feature = "json")]
pub fn export_to_json(
    capture: &CaptureLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<PathBuf> {
    let paths = compute_export_paths(input_path, export_options);
    ensure_output_dir(&paths.output_dir)?;

    let file = std::fs::File::create(&paths.json)
        .with_context(|| format!("Failed to create JSON file: {:?}", paths.json))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), capture)
        .with_context(|| format!("Failed to write JSON file: {:?}", paths.json))?;

    log::debug!("wrote {} frames to {:?}", capture.frame_count(), paths.json);
    Ok(paths.json)
}

/// Run every export enabled in `export_options`
pub fn export_capture(
    capture: &CaptureLog,
    input_path: &Path,
    export_options: &ExportOptions,
) -> Result<ExportReport> {
    let mut report = ExportReport::default();

    if export_options.csv {
        #[cfg(feature = "csv")]
        {
            report.csv_path = Some(export_to_csv(capture, input_path, export_options)?);
        }
        #[cfg(not(feature = "csv"))]
        return Err(crate::error::FrameError::Export(
            "CSV export requires the `csv` feature".to_string(),
        )
        .into());
    }

    if export_options.json {
        #[cfg(feature = "json")]
        {
            report.json_path = Some(export_to_json(capture, input_path, export_options)?);
        }
        #[cfg(not(feature = "json"))]
        return Err(crate::error::FrameError::Export(
            "JSON export requires the `json` feature".to_string(),
        )
        .into());
    }

    Ok(report)
}
