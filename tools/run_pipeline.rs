//! Batch Pipeline Runner
//!
//! Command-line entry point for one pipeline run: load the config mapping
//! and dataset, execute the pipeline, write the metrics envelope to the
//! output path and to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin run-pipeline -- \
//!     --input prices.csv \
//!     --config run.yaml \
//!     --output metrics.json \
//!     --log-file run.log
//! ```
//!
//! Exit code 0 on a success envelope, 1 on an error envelope. The envelope
//! is written in both cases, so downstream tooling always receives a
//! well-formed report.

use signal_pipeline::prelude::*;
use std::fs::{self, File};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

struct Args {
    input: PathBuf,
    config: PathBuf,
    output: PathBuf,
    log_file: Option<PathBuf>,
}

fn main() {
    let args = match parse_args() {
        Some(args) => args,
        None => {
            print_usage();
            process::exit(2);
        }
    };

    init_logging(args.log_file.as_deref());
    log::info!("job started");

    let started = Instant::now();

    // Collaborator loading happens outside the core run; a loader failure
    // still produces an envelope, with whatever provenance is available.
    let mapping = match load_mapping_yaml(&args.config) {
        Ok(mapping) => mapping,
        Err(error) => {
            let latency_ms = started.elapsed().as_millis() as u64;
            finish(
                &args,
                Metrics::failure(&error, None, None, None, latency_ms),
            );
            return;
        }
    };

    let dataset = match load_csv(&args.input) {
        Ok(dataset) => dataset,
        Err(error) => {
            let latency_ms = started.elapsed().as_millis() as u64;
            // Best-effort version, if the config mapping carries one.
            let version = mapping
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            finish(
                &args,
                Metrics::failure(&error.into(), version, None, None, latency_ms),
            );
            return;
        }
    };

    finish(&args, run(&mapping, dataset));
}

fn finish(args: &Args, metrics: Metrics) {
    let json = match metrics.to_json_pretty() {
        Ok(json) => json,
        Err(error) => {
            log::error!("failed to serialize metrics: {error}");
            process::exit(2);
        }
    };

    if let Err(error) = fs::write(&args.output, &json) {
        log::error!("failed to write {}: {error}", args.output.display());
        eprintln!("Error: failed to write {}: {error}", args.output.display());
        process::exit(2);
    }

    println!("{json}");

    if metrics.is_success() {
        log::info!("job completed successfully in {}ms", metrics.latency_ms);
        process::exit(0);
    } else {
        log::error!(
            "job failed: {}",
            metrics.error_message.as_deref().unwrap_or("unknown")
        );
        process::exit(1);
    }
}

fn parse_args() -> Option<Args> {
    let argv: Vec<String> = std::env::args().collect();

    let mut input = None;
    let mut config = None;
    let mut output = None;
    let mut log_file = None;

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--input" => {
                input = Some(PathBuf::from(argv.get(i + 1)?));
                i += 2;
            }
            "--config" => {
                config = Some(PathBuf::from(argv.get(i + 1)?));
                i += 2;
            }
            "--output" => {
                output = Some(PathBuf::from(argv.get(i + 1)?));
                i += 2;
            }
            "--log-file" => {
                log_file = Some(PathBuf::from(argv.get(i + 1)?));
                i += 2;
            }
            _ => return None,
        }
    }

    Some(Args {
        input: input?,
        config: config?,
        output: output?,
        log_file,
    })
}

fn init_logging(log_file: Option<&std::path::Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(error) => {
                eprintln!("Warning: could not open log file {}: {error}", path.display());
            }
        }
    }

    builder.init();
}

fn print_usage() {
    eprintln!(
        "Usage: run-pipeline --input <csv> --config <yaml> --output <json> [--log-file <path>]"
    );
    eprintln!();
    eprintln!("Runs one batch signal-pipeline job:");
    eprintln!("  --input     Path to input CSV (header row required)");
    eprintln!("  --config    Path to config YAML (version, seed, window, [threshold], [column])");
    eprintln!("  --output    Path for the metrics JSON envelope");
    eprintln!("  --log-file  Optional log file (defaults to stderr)");
}
