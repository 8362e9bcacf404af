//! Bench Frame Parser Library
//!
//! Decodes binary captures of benchmark telemetry frames: a fixed 28-byte
//! header, a variable run of known bitfields bounded by the frame's declared
//! size, and an optional opaque payload.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export functionality
//! - **`cli`** (default): Build the command-line interface binary
//! - **`json`**: Enable export in JSON format
//! - **`serde`**: Enable serialization of output types
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bench_frame_parser::{parse_capture_file, TestMetadata};
//! use std::path::Path;
//!
//! let metadata = TestMetadata::new("LINK_THROUGHPUT_02", "2023-04-18 09:12:44");
//! let capture = parse_capture_file(Path::new("ethernet.bin"), &metadata).unwrap();
//! println!("Decoded {} frames", capture.frames.len());
//! for frame in &capture.frames {
//!     if let Some(mt) = &frame.derived.message_type {
//!         println!("frame {} MT {}", frame.index(), mt);
//!     }
//! }
//! ```
//!
//! # Public API
//!
//! ## Parsing Functions
//! - [`parse_capture_file`] - Decode a capture file
//! - [`parse_capture_bytes`] - Decode capture data from memory
//! - [`parse_capture_bytes_with_progress`] - Same, with a per-frame callback
//! - [`FrameDecoder`] - Low-level streaming iterator over raw frames
//! - [`resolve_metadata`] / [`parse_report_file`] - Test metadata lookup
//!
//! ## Data Types
//! - [`CaptureLog`] - All frames of a capture with run statistics
//! - [`Frame`] - Decoded frame with derived values
//! - [`FieldDescriptor`] / [`FIELD_SCHEMA`] - Frame layout
//!
//! ## Export Functions
//! - [`export_capture`] - Run the exports enabled in [`ExportOptions`]
//! - [`compute_export_paths`] - Helper for consistent path computation

pub mod conversion;
pub mod error;
pub mod export;
pub mod parser;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
