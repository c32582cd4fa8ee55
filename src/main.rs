//! casthi-lint CLI

use casthi_lint::{
    collect_python_files, config, logging, models::Severity, report, rules, Linter,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "casthi-lint")]
#[command(version, about = "A linter for Casthi addon code with target-version gating")]
struct Args {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    paths: Vec<String>,

    /// Enable specific rules (comma-separated, or "ALL")
    #[arg(long, value_delimiter = ',')]
    enable: Vec<String>,

    /// Disable specific rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    disable: Vec<String>,

    /// Exclude paths matching patterns
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Target Casthi version(s); overrides pyproject.toml target-versions
    #[arg(long = "target-version", value_delimiter = ',')]
    target_versions: Vec<String>,

    /// Output format: text, json
    #[arg(long, default_value = "text")]
    output_format: String,

    /// Append a JSON Lines entry for this run to the given file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Ignore pyproject.toml configuration
    #[arg(long)]
    no_config: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Load config
    let config = if args.no_config {
        None
    } else {
        config::load_config(None)
    };

    // Merge CLI args with config
    let (enabled_rules, exclude_patterns, target_versions) = config::merge_config(
        config.as_ref(),
        &args.enable,
        &args.disable,
        &args.exclude,
        &args.target_versions,
    );

    if args.verbose {
        eprintln!("Enabled rules: {:?}", enabled_rules);
        eprintln!("Exclude patterns: {:?}", exclude_patterns);
        eprintln!("Target versions: {:?}", target_versions);
    }

    let active_rules = rules::get_enabled_rules(enabled_rules.as_deref());

    if args.verbose {
        eprintln!(
            "Active rules: {}",
            active_rules
                .iter()
                .map(|r| r.rule_id())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    // Collect files
    let files = collect_python_files(&args.paths, &exclude_patterns);

    if args.verbose {
        eprintln!("Found {} Python files", files.len());
    }

    if files.is_empty() {
        eprintln!("No Python files found");
        return ExitCode::SUCCESS;
    }

    // Lint files
    let linter = Linter::new(active_rules, target_versions);
    let results = linter.lint_files_parallel(&files);

    // Count violations
    let mut error_count = 0;
    let mut warning_count = 0;
    let mut info_count = 0;
    let mut gate_suppressed = 0;

    for result in &results {
        gate_suppressed += result.gate_suppressed;
        for v in &result.violations {
            match v.severity {
                Severity::Error => error_count += 1,
                Severity::Warning => warning_count += 1,
                Severity::Info => info_count += 1,
            }
        }
    }

    report::print_gate_warnings(&results);

    // Output results
    match args.output_format.as_str() {
        "json" => {
            report::print_json(&results);
        }
        _ => {
            report::print_text_grouped(&results);
        }
    }

    // Append the run log
    if let Some(log_path) = &args.log_file {
        let entry = logging::LintLogEntry::from_results(
            &results,
            linter.target_versions(),
            Some(
                linter
                    .rules()
                    .iter()
                    .map(|r| r.rule_id().to_string())
                    .collect(),
            ),
        );
        match logging::LintLogger::new(&log_path.to_string_lossy()) {
            Ok(mut logger) => {
                if let Err(e) = logger.log(&entry) {
                    eprintln!("Failed to write log entry: {}", e);
                }
            }
            Err(e) => eprintln!("Failed to open log file: {}", e),
        }
    }

    // Print summary
    let total = error_count + warning_count + info_count;
    if total > 0 {
        eprintln!(
            "\nFound {} issue(s): {} error(s), {} warning(s), {} info",
            total, error_count, warning_count, info_count
        );
    } else if args.verbose {
        eprintln!("\nNo issues found.");
    }
    if args.verbose && gate_suppressed > 0 {
        eprintln!(
            "{} issue(s) suppressed by target-version gating",
            gate_suppressed
        );
    }

    // Return exit code
    if error_count > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
