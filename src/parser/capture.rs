use crate::conversion::derive_fields;
use crate::error::{FrameError, Result};
use crate::parser::decoder::FrameDecoder;
use crate::types::schema::body_fields;
use crate::types::{CaptureLog, Frame, TestMetadata};
use std::path::Path;

/// Parse a capture file into frames tagged with the given test metadata
pub fn parse_capture_file(file_path: &Path, metadata: &TestMetadata) -> Result<CaptureLog> {
    let data = std::fs::read(file_path).map_err(|source| FrameError::InvalidInputFile {
        path: file_path.display().to_string(),
        source,
    })?;

    log::debug!(
        "read capture {:?}: {} bytes ({:.2} MB)",
        file_path,
        data.len(),
        data.len() as f64 / 1024.0 / 1024.0
    );

    let source = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("capture")
        .to_string();

    let mut capture = parse_capture_bytes(&data, metadata)?;
    capture.source = source;
    Ok(capture)
}

/// Parse capture data from memory
pub fn parse_capture_bytes(data: &[u8], metadata: &TestMetadata) -> Result<CaptureLog> {
    parse_capture_bytes_with_progress(data, metadata, |_| {})
}

/// Parse capture data from memory, reporting the running frame count.
///
/// All or nothing: the first truncated frame fails the whole run and no
/// frames are returned.
pub fn parse_capture_bytes_with_progress(
    data: &[u8],
    metadata: &TestMetadata,
    mut on_frame: impl FnMut(usize),
) -> Result<CaptureLog> {
    let mut capture = CaptureLog::new("memory", metadata.clone());
    let known_body_bits: usize = body_fields().iter().map(|f| f.width()).sum();

    for raw in FrameDecoder::new(data) {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!(
                    "decode aborted after {} frames: {}",
                    capture.frames.len(),
                    e
                );
                return Err(e);
            }
        };

        capture.stats.total_frames += 1;
        capture.stats.total_bytes += raw.total_bits() / 8;
        if raw.body_bits < known_body_bits {
            capture.stats.short_frames += 1;
        }
        if let Some(payload) = &raw.payload {
            capture.stats.payload_frames += 1;
            capture.stats.payload_bytes += payload.len();
        }

        let derived = derive_fields(&raw);
        capture.frames.push(Frame::new(raw, derived, metadata));
        on_frame(capture.frames.len());
    }

    log::debug!(
        "decoded {} frames ({} with payload, {} short)",
        capture.stats.total_frames,
        capture.stats.payload_frames,
        capture.stats.short_frames
    );
    Ok(capture)
}
