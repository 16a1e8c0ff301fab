//! Scrimmage CLI.
//!
//! Runs the turn policy over random snapshots, checks the shape of every
//! action list, and outputs the samples as JSONL.
//!
//! Usage:
//!   cargo run --release --bin scrimmage -- [OPTIONS]
//!
//! Options:
//!   --samples N     Number of random snapshots (default: 1000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --config FILE   Policy config JSON (default: built-in thresholds)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use kaotic::config::PolicyConfig;
use kaotic::scrimmage::{self, ScrimmageConfig, Summary};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = ScrimmageConfig::default();
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--samples" => {
                i += 1;
                config.samples = parse_arg(&args, i, "--samples");
            }
            "--threads" => {
                i += 1;
                config.threads = parse_arg(&args, i, "--threads");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_arg(&args, i, "--seed");
            }
            "--config" => {
                i += 1;
                let path: String = parse_arg(&args, i, "--config");
                config.policy = match PolicyConfig::load(Path::new(&path)) {
                    Ok(c) => c,
                    Err(e) => fail(&e.to_string()),
                };
            }
            "--output" => {
                i += 1;
                output_path = Some(parse_arg(&args, i, "--output"));
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    if !quiet {
        tracing::info!(
            samples = config.samples,
            threads = config.threads,
            seed = config.seed,
            "scrimmage starting"
        );
    }

    let start = Instant::now();
    let records = match scrimmage::run_scrimmage(&config) {
        Ok(r) => r,
        Err(e) => fail(&e.to_string()),
    };
    let elapsed = start.elapsed();

    let result = match &output_path {
        Some(path) => File::create(path)
            .map_err(scrimmage::ScrimmageError::from)
            .and_then(|file| scrimmage::write_jsonl(&records, &mut BufWriter::new(file))),
        None => {
            let stdout = io::stdout();
            scrimmage::write_jsonl(&records, &mut BufWriter::new(stdout.lock()))
        }
    };
    if let Err(e) = result {
        fail(&e.to_string());
    }

    let summary = Summary::from_records(&records);
    if !quiet {
        eprintln!("Completed {} samples in {:.3}s", records.len(), elapsed.as_secs_f64());
        eprintln!("{}", summary);
    }
    if summary.violations > 0 {
        process::exit(2);
    }
}

fn parse_arg<T: FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).map(|s| s.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => fail(&format!("invalid {} value", flag)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(1);
}

fn print_usage() {
    eprintln!("Usage: scrimmage [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --samples N      Number of random snapshots (default: 1000)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --config FILE    Policy config JSON (default: built-in thresholds)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
