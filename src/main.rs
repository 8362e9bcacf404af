//! CLI binary for Bench Frame Parser
//!
//! Decodes a frame capture, tags every frame with the test metadata and
//! exports the result.

use anyhow::{Context, Result};
use bench_frame_parser::{
    export_capture, parse_capture_bytes_with_progress, resolve_metadata, ExportOptions,
    MetadataSource,
};
use clap::{Arg, ArgAction, ArgGroup, Command};
use std::io::Write;
use std::path::{Path, PathBuf};

fn build_cli() -> Command {
    Command::new("Bench Frame Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extract benchmark telemetry frames from a binary capture. Output to CSV or JSON.")
        .arg(
            Arg::new("binary")
                .long("binary")
                .help("Binary capture file to decode")
                .value_name("FILE")
                .required(true),
        )
        .arg(
            Arg::new("full")
                .long("full")
                .help("Test report to read the test name and execution date from")
                .value_name("REPORT"),
        )
        .arg(
            Arg::new("short")
                .long("short")
                .help("Test name and execution date given directly")
                .value_names(["NAME", "DATE"])
                .num_args(2),
        )
        .group(
            ArgGroup::new("metadata")
                .args(["full", "short"])
                .required(true)
                .multiple(false),
        )
        .arg(
            Arg::new("csv")
                .long("csv")
                .help("Export frames to <stem>.frames.csv (default when no format is given)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Export frames to <stem>.frames.json")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .help("Directory for output files (default: same as input file)")
                .value_name("DIR"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed decoding information")
                .action(ArgAction::SetTrue),
        )
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let binary = matches
        .get_one::<String>("binary")
        .map(PathBuf::from)
        .context("missing --binary")?;

    let source = if let Some(report) = matches.get_one::<String>("full") {
        MetadataSource::ReportFile(PathBuf::from(report))
    } else {
        let mut values = matches
            .get_many::<String>("short")
            .context("one of --full or --short is required")?;
        match (values.next(), values.next()) {
            (Some(name), Some(date)) => MetadataSource::Literal {
                name: name.clone(),
                date: date.clone(),
            },
            _ => anyhow::bail!("--short takes a test name and an execution date"),
        }
    };

    let json = matches.get_flag("json");
    let export_options = ExportOptions {
        csv: matches.get_flag("csv") || !json,
        json,
        output_dir: matches.get_one::<String>("output-dir").cloned(),
    };

    let metadata = resolve_metadata(&source)?;
    log::debug!("test metadata: {:?}", metadata);

    let data = read_capture(&binary)?;

    println!("[+] Extracting frames");
    let mut stdout = std::io::stdout();
    let capture = parse_capture_bytes_with_progress(&data, &metadata, |count| {
        print!("\r[*] {count}");
        let _ = stdout.flush();
    });
    println!();
    let mut capture = capture?;
    capture.source = binary
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("capture")
        .to_string();

    println!("[+] Exporting frames");
    let report = export_capture(&capture, &binary, &export_options)?;
    for path in report.csv_path.iter().chain(report.json_path.iter()) {
        log::debug!("wrote {:?}", path);
    }

    println!("[+] Done");
    Ok(())
}

fn read_capture(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path).map_err(|source| bench_frame_parser::FrameError::InvalidInputFile {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("read capture {:?}: {} bytes", path, data.len());
    Ok(data)
}

fn main() {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("debug"));
    log::debug!(
        "bench_frame_parser {} (git {} {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown"),
        option_env!("VERGEN_GIT_COMMIT_DATE").unwrap_or("")
    );

    if let Err(e) = run(&matches) {
        eprintln!("[-] {e:#}");
        std::process::exit(1);
    }
}
