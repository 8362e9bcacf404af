//! Integration tests for decoding capture files from disk

mod common;

use bench_frame_parser::{
    format_timestamp, parse_capture_file, resolve_metadata, DecodeStage, FrameError,
    MetadataSource, TestMetadata,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_decode_capture_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("ethernet.bin");
    fs::write(&path, common::sample_capture()).unwrap();

    let metadata = TestMetadata::new("LINK_01", "2024-01-01 00:00:00");
    let capture = parse_capture_file(&path, &metadata).unwrap();

    assert_eq!(capture.source, "ethernet.bin");
    assert_eq!(capture.frame_count(), 2);
    assert_eq!(capture.stats.total_bytes, (28 + 34) + (28 + 66));
    assert_eq!(capture.stats.payload_frames, 1);
    assert_eq!(capture.stats.short_frames, 1);

    let first = &capture.frames[0];
    assert_eq!(
        format_timestamp(&first.derived.frame_date),
        "1985-11-05 00:53:20.000000"
    );
    assert_eq!(first.derived.mac_dest.unwrap().to_string(), "00:11:22:33:44:55");
    assert_eq!(first.derived.ip_dest.unwrap().to_string(), "10.0.0.2");
    assert!(first.derived.message_type.is_none());

    let second = &capture.frames[1];
    assert_eq!(second.derived.message_type.as_deref(), Some("0x12345"));
    assert_eq!(
        second.derived.packet_date.map(|d| format_timestamp(&d)).as_deref(),
        Some("2000-01-01 12:01:00.500000")
    );
    assert_eq!(second.hex_value("bench_3").as_deref(), Some("0xbeef"));
    assert_eq!(second.raw.payload.as_deref(), Some(&b"OK!\x00"[..]));
    assert!(second.payload_dump().unwrap().ends_with("OK!."));
}

#[test]
fn test_truncated_capture_file_yields_no_frames() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("short.bin");
    let mut data = common::sample_capture();
    data.truncate(data.len() - 2);
    fs::write(&path, data).unwrap();

    let err = parse_capture_file(&path, &TestMetadata::default()).unwrap_err();
    match err {
        FrameError::TruncatedStream {
            stage, frame_index, ..
        } => {
            assert_eq!(stage, DecodeStage::ReadingPayload);
            assert_eq!(frame_index, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_capture_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = parse_capture_file(&temp_dir.path().join("absent.bin"), &TestMetadata::default())
        .unwrap_err();
    assert!(matches!(err, FrameError::InvalidInputFile { .. }));
    assert!(err.to_string().contains("absent.bin"));
}

#[test]
fn test_metadata_from_report_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report = temp_dir.path().join("run.rep");
    fs::write(
        &report,
        "* Test                 : THROUGHPUT_A\n* Execution begin date : \"2023-04-18 09:12:44\"\n",
    )
    .unwrap();

    let metadata = resolve_metadata(&MetadataSource::ReportFile(report)).unwrap();
    assert_eq!(metadata, TestMetadata::new("THROUGHPUT_A", "2023-04-18 09:12:44"));
}
