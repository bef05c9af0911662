//! eBPF+ WCET CLI
//!
//! Command-line tool that reads an encoded byte-code file, prints the
//! recovered CFG, and reports the worst-case cycle upper bound.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ebpf_wcet::{
    AnalyzerOptions, HumanFormatter, JsonFormatter, LoopPolicy, ReportFormatter,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Worst-case execution time estimator for eBPF+ byte-code.
///
/// Recovers the control-flow graph of the input program, symbolically
/// explores every feasible path, and reports the maximum cycle cost.
#[derive(Parser, Debug)]
#[command(name = "ebpf-wcet")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input byte-code file to analyze
    file: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "human")]
    format: OutputFormat,

    /// Cache-model window: prior accesses inspected per access
    #[arg(long, default_value = "5")]
    window: usize,

    /// Near distance in bytes for the cache model
    #[arg(long, default_value = "4")]
    near_distance: u64,

    /// DRAM penalty in cycles
    #[arg(long, default_value = "87")]
    dram_penalty: u32,

    /// Unroll loops up to this many iterations per path
    #[arg(long)]
    loop_bound: Option<u32>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only output the bound)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable block listing plus the bound
    Human,
    /// JSON report
    Json,
}

impl Args {
    fn options(&self) -> AnalyzerOptions {
        let mut opts = AnalyzerOptions::new();
        opts.cache_window = self.window;
        opts.near_distance = self.near_distance;
        opts.dram_penalty = self.dram_penalty;
        if let Some(bound) = self.loop_bound {
            opts.loop_policy = LoopPolicy::Bounded(bound);
        }
        opts
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("ebpf_wcet=debug")
            .init();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !args.quiet {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let options = args.options();
    let report = ebpf_wcet::analyze_file_with_options(&args.file, &options)
        .with_context(|| format!("failed to analyze {}", args.file.display()))?;

    let formatter: Box<dyn ReportFormatter> = match args.format {
        OutputFormat::Human => Box::new(HumanFormatter {
            verbose: args.verbose,
            quiet: args.quiet,
        }),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    };
    print!("{}", formatter.format_report(&report));
    Ok(())
}
