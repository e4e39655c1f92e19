//! CLI tool for batch-converting PowerPoint files to PDF.

use anyhow::{Context, Result};
use clap::Parser;
use deck2pdf_core::{BatchReport, ConversionPlan};
use deck2pdf_powerpoint::PowerPoint;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Convert every PowerPoint file in a folder to PDF.
#[derive(Parser, Debug)]
#[command(name = "deck2pdf")]
#[command(version, about, long_about = None)]
struct Args {
    /// Folder to scan for .ppt/.pptx files (default: the folder containing this executable)
    input: Option<PathBuf>,

    /// Output folder for the PDFs (default: same as the input folder)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON summary of the batch to this file
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    // Failures are reported as console messages, never as an exit code.
    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
    }
}

fn run(args: &Args) -> Result<()> {
    let input_dir = match &args.input {
        Some(dir) => dir.clone(),
        None => default_input_dir()?,
    };

    println!("Scanning for PowerPoint files in: {}", input_dir.display());

    let plan = ConversionPlan::build(&input_dir, args.output.as_deref())?;

    if plan.is_empty() {
        println!("No PowerPoint files found in the specified directory.");
        return Ok(());
    }

    println!("Found {} files to convert...", plan.len());

    let powerpoint = PowerPoint::launch().context("Failed to start PowerPoint")?;

    let mut report = BatchReport::default();
    for job in plan.jobs() {
        log::debug!(
            "Converting {} -> {}",
            job.input.display(),
            job.output.display()
        );

        match powerpoint.convert_to_pdf(&job.input, &job.output) {
            Ok(()) => {
                println!("Successfully converted: {}", job.file_name());
                report.record_success(job);
            }
            Err(e) => {
                eprintln!("Failed to convert {}: {}", job.file_name(), e);
                report.record_failure(job, e);
            }
        }
    }

    if args.verbose {
        eprintln!(
            "Converted {} of {} files",
            report.converted.len(),
            report.total()
        );
    }

    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }

    Ok(())
}

/// Folder containing the running executable.
fn default_input_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    let dir = exe
        .parent()
        .context("Executable has no containing directory")?;

    Ok(dir.to_path_buf())
}

/// Write the batch report as pretty-printed JSON.
fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize the batch report")?;

    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
