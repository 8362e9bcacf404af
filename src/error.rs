use std::fmt;

/// Stage of the per-frame decode in which a read was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    ReadingHeader,
    ReadingBody,
    ReadingPayload,
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DecodeStage::ReadingHeader => "header",
            DecodeStage::ReadingBody => "body",
            DecodeStage::ReadingPayload => "payload",
        };
        f.write_str(name)
    }
}

/// Custom error types for frame capture decoding
#[derive(Debug)]
pub enum FrameError {
    /// I/O errors
    Io(std::io::Error),
    /// Capture or report file could not be read before decoding started
    InvalidInputFile { path: String, source: std::io::Error },
    /// Fewer bits remain in the buffer than a declared read needs
    TruncatedStream {
        stage: DecodeStage,
        field: &'static str,
        frame_index: usize,
        requested: usize,
        available: usize,
        bit_position: usize,
    },
    /// A read wider than the 64-bit value register was requested
    InvalidFieldWidth(usize),
    /// Export format error
    Export(String),
}

impl FrameError {
    /// True for the error that aborts a run on a short buffer
    pub fn is_truncated(&self) -> bool {
        matches!(self, FrameError::TruncatedStream { .. })
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Io(err) => write!(f, "I/O error: {}", err),
            FrameError::InvalidInputFile { path, source } => {
                write!(f, "Invalid input file {}: {}", path, source)
            }
            FrameError::TruncatedStream {
                stage,
                field,
                frame_index,
                requested,
                available,
                bit_position,
            } => write!(
                f,
                "Truncated stream in frame {} ({} field '{}'): needed {} bits at bit {}, {} available",
                frame_index, stage, field, requested, bit_position, available
            ),
            FrameError::InvalidFieldWidth(bits) => {
                write!(f, "Invalid field width: {} bits (maximum is 64)", bits)
            }
            FrameError::Export(msg) => write!(f, "Export error: {}", msg),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Io(err) => Some(err),
            FrameError::InvalidInputFile { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FrameError {
    fn from(err: std::io::Error) -> Self {
        FrameError::Io(err)
    }
}

/// Failure of a single bit-cursor read, before frame context is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    Truncated {
        requested: usize,
        available: usize,
        bit_position: usize,
    },
    InvalidWidth(usize),
}

impl StreamError {
    /// Attach the frame, stage and field that issued the read
    pub fn in_field(self, stage: DecodeStage, field: &'static str, frame_index: usize) -> FrameError {
        match self {
            StreamError::Truncated {
                requested,
                available,
                bit_position,
            } => FrameError::TruncatedStream {
                stage,
                field,
                frame_index,
                requested,
                available,
                bit_position,
            },
            StreamError::InvalidWidth(bits) => FrameError::InvalidFieldWidth(bits),
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Truncated {
                requested,
                available,
                bit_position,
            } => write!(
                f,
                "needed {} bits at bit {}, {} available",
                requested, bit_position, available
            ),
            StreamError::InvalidWidth(bits) => write!(f, "invalid read width: {} bits", bits),
        }
    }
}

impl std::error::Error for StreamError {}

pub type Result<T> = std::result::Result<T, FrameError>;
