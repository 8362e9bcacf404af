//! Test metadata lookup from a text test report.
//!
//! The report is scanned line by line for:
//! ```text
//! * Test                 : <free text name>
//! * Execution begin date : "<date>"
//! ```

use crate::error::FrameError;
use crate::types::{MetadataSource, TestMetadata};
use anyhow::Result;
use regex::Regex;
use std::path::Path;

const TEST_NAME_PATTERN: &str = r"^\* Test\s+: (.*)";
const EXECUTION_DATE_PATTERN: &str = r#"^\* Execution begin date\s+: "(.*)""#;

/// Extract the test name and execution date from report text.
/// The first matching line of each kind wins.
pub fn parse_report_text(text: &str) -> Result<TestMetadata> {
    let name_re = Regex::new(TEST_NAME_PATTERN)?;
    let date_re = Regex::new(EXECUTION_DATE_PATTERN)?;

    let mut metadata = TestMetadata::default();
    for line in text.lines() {
        if metadata.test_name.is_none() {
            if let Some(caps) = name_re.captures(line) {
                metadata.test_name = Some(caps[1].trim_end().to_string());
            }
        }
        if metadata.test_execution_date.is_none() {
            if let Some(caps) = date_re.captures(line) {
                metadata.test_execution_date = Some(caps[1].to_string());
            }
        }
        if metadata.test_name.is_some() && metadata.test_execution_date.is_some() {
            break;
        }
    }

    Ok(metadata)
}

/// Read and scan a report file
pub fn parse_report_file(path: &Path) -> Result<TestMetadata> {
    let text = std::fs::read_to_string(path).map_err(|source| FrameError::InvalidInputFile {
        path: path.display().to_string(),
        source,
    })?;

    let metadata = parse_report_text(&text)?;
    if metadata.test_name.is_none() {
        log::warn!("no test name line found in report {:?}", path);
    }
    if metadata.test_execution_date.is_none() {
        log::warn!("no execution begin date line found in report {:?}", path);
    }
    Ok(metadata)
}

/// Resolve the metadata of a run once, before decoding starts
pub fn resolve_metadata(source: &MetadataSource) -> Result<TestMetadata> {
    match source {
        MetadataSource::Literal { name, date } => Ok(TestMetadata::new(name.as_str(), date.as_str())),
        MetadataSource::ReportFile(path) => parse_report_file(path),
        MetadataSource::None => Ok(TestMetadata::default()),
    }
}
