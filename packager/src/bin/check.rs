//! Entry point for `packwright-check`.
//!
//! Exits 0 when every expected entry exists, 1 when any is missing, and 2
//! when validation could not run at all.

use clap::Parser;
use packwright::cli::CheckArgs;
use packwright::error::ValidationError;
use packwright::logging;
use packwright::output::{render_error_chain, write_line, write_lines};
use packwright::validator::validate_structure;
use packwright_common::PackwrightConfig;
use std::io::Write;

const EXIT_MISSING: i32 = 1;
const EXIT_FATAL: i32 = 2;

fn main() {
    let args = CheckArgs::parse();
    logging::init(args.output.log_level());
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&args, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Validate the configured project, returning whether every check passed.
fn run(args: &CheckArgs, stdout: &mut dyn Write) -> Result<bool, ValidationError> {
    let config = PackwrightConfig::load_or_embedded(args.config.config_path())?
        .with_project_root(args.config.project_root.clone());
    config.validate_for_checking()?;

    let root = &config.project.root;
    let report = validate_structure(root, &config.validation.entries)?;

    if args.output.quiet {
        write_line(stdout, report.summary_line());
    } else {
        write_line(stdout, format!("Checking project structure at {root}"));
        write_lines(stdout, report.display_lines());
    }
    if report.all_passed() {
        write_line(stdout, "Project structure is complete.");
    } else {
        write_line(
            stdout,
            format!("{} expected entries are missing.", report.total() - report.passed()),
        );
    }
    Ok(report.all_passed())
}

fn exit_code_for_run_result(result: Result<bool, ValidationError>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => EXIT_MISSING,
        Err(err) => {
            write_line(stderr, render_error_chain(&err));
            EXIT_FATAL
        }
    }
}
