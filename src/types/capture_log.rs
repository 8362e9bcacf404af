use crate::types::{Frame, TestMetadata};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Counters collected over one decode run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecodeStats {
    pub total_frames: usize,
    pub total_bytes: usize,
    pub payload_frames: usize,
    pub payload_bytes: usize,
    /// Frames whose body stopped before the last known field
    pub short_frames: usize,
}

/// All frames decoded from one capture
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CaptureLog {
    pub source: String,
    pub metadata: TestMetadata,
    pub stats: DecodeStats,
    pub frames: Vec<Frame>,
}

impl CaptureLog {
    pub fn new(source: impl Into<String>, metadata: TestMetadata) -> Self {
        Self {
            source: source.into(),
            metadata,
            stats: DecodeStats::default(),
            frames: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frames carrying a computed message type code
    pub fn frames_with_message_type(&self) -> impl Iterator<Item = &Frame> {
        self.frames
            .iter()
            .filter(|frame| frame.derived.message_type.is_some())
    }

    /// Frame dates of the first and last frame
    pub fn time_span(&self) -> Option<(String, String)> {
        let first = self.frames.first()?;
        let last = self.frames.last()?;
        Some((
            crate::conversion::format_timestamp(&first.derived.frame_date),
            crate::conversion::format_timestamp(&last.derived.frame_date),
        ))
    }
}
