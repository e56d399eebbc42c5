// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Run the pipeline: load the CSV, probe every URL, write the CSV back
// 4. Print the results and exit (0 = success, 1 = the run failed)
//
// Per-URL failures (timeouts, refused connections, ...) do not fail the run;
// they end up as markers in the output file.
// =============================================================================

mod cli;
mod logger;
mod pipeline;
mod pool;
mod probe;
mod table;

#[cfg(test)]
mod testutil;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::error;
use pipeline::RunReport;
use probe::{HttpProbe, Outcome};
use std::sync::{Arc, Mutex};
use table::TableWriter;

fn main() {
    let cli = Cli::parse();
    logger::init();

    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            error!("Error occurred: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let probe = HttpProbe::new(cli.probe_settings())?;
    let writer = TableWriter::new(Arc::new(Mutex::new(())));

    let report = pipeline::run(&cli.file, &probe, &cli.run_options(), &writer)?;

    print_results(&report, cli.json)
}

// Prints the results either as a table or JSON
fn print_results(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(&report.results)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &RunReport) {
    println!("{:<50} {:<50} {:<6}", "URL", "OUTCOME", "STATUS");
    println!("{}", "=".repeat(106));

    for result in &report.results {
        let status = result.status.map(|s| s.to_string()).unwrap_or_default();
        println!(
            "{:<50} {:<50} {:<6}",
            truncate(&result.url, 47),
            truncate(&format_outcome(&result.outcome), 47),
            status
        );
    }

    println!();

    let total = report.results.len();
    let redirected = report.redirected();
    let failed = report.failed();

    println!("📊 Summary:");
    println!("   🔀 Redirected: {}", redirected);
    println!("   ✅ No redirect: {}", total - redirected - failed);
    println!("   ❌ Failed: {}", failed);
    println!("   📋 Total: {}", total);
    println!("   ⏱️  Elapsed: {:.2?}", report.elapsed);
}

fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Redirected(target) => format!("-> {}", target),
        Outcome::NoRedirect => "✅ No redirect".to_string(),
        Outcome::Timeout => "⏱️  Timeout".to_string(),
        Outcome::ConnectionError => "🌐 Connection Error".to_string(),
        Outcome::Error => "⚠️  Error".to_string(),
    }
}

// Cuts on a char boundary so multi-byte URLs don't panic
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
