//! Inspect STL files.
//!
//! Loads each file the same way a renderer would and prints what came out:
//! encoding, facet and vertex counts, bounds, or the load error with its
//! line number.
//!
//! ```text
//! stl-info part.stl
//! stl-info --single-pass --json scan.stl
//! RUST_LOG=stl_io=debug stl-info part.stl
//! ```

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use stl_io::{AsciiMode, DegeneratePolicy, LoadOptions};
use tracing::debug;

use report::Report;

/// Print counts, bounds and diagnostics for STL files
#[derive(Parser)]
#[command(name = "stl-info")]
#[command(about = "Inspect ASCII and binary STL files", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to inspect
    #[arg(name = "FILE", required = true)]
    paths: Vec<PathBuf>,

    /// Read ASCII files in one pass instead of validate-then-extract
    #[arg(long)]
    single_pass: bool,

    /// Fail on zero-area facets instead of giving them zero normals
    #[arg(long)]
    reject_degenerate: bool,

    /// Refuse binary files announcing more than N facets
    #[arg(long, value_name = "N")]
    max_facets: Option<u32>,

    /// Emit one JSON object per file
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn options(&self) -> LoadOptions {
        let mut options = LoadOptions::default();
        if self.single_pass {
            options = options.with_ascii_mode(AsciiMode::SinglePass);
        }
        if self.reject_degenerate {
            options = options.with_degenerate(DegeneratePolicy::Reject);
        }
        if let Some(limit) = self.max_facets {
            options = options.with_max_facets(limit);
        }
        options
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = cli.options();
    debug!(?options, files = cli.paths.len(), "starting");

    let mut failures = 0usize;
    for path in &cli.paths {
        let report = Report::build(path, options.clone());
        if !report.is_ok() {
            failures += 1;
        }
        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{report}");
        }
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
