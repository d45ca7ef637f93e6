//! Entry point for `packwright-package`.
//!
//! Progress and errors go to stderr; the plan or the final summary goes to
//! stdout.

use clap::Parser;
use packwright::cli::PackageArgs;
use packwright::error::Result;
use packwright::logging;
use packwright::output::{
    NEXT_STEPS, package_summary, render_error_chain, write_line, write_lines,
};
use packwright::pipeline::{PackageOptions, plan_package, run_package};
use packwright::stager::PrepareOutcome;
use packwright::stamp::RunStamp;
use packwright_common::PackwrightConfig;
use std::io::Write;

fn main() {
    let args = PackageArgs::parse();
    logging::init(args.output.log_level());
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&args, &RunStamp::now(), &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    args: &PackageArgs,
    stamp: &RunStamp,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let config = load_config(args)?;

    if args.dry_run {
        let plan = plan_package(&config, stamp)?;
        write_line(stdout, "Dry run: nothing will be written.");
        write_lines(stdout, plan.display_lines());
        return Ok(());
    }

    let options = PackageOptions {
        quiet: args.output.quiet,
        verify_archive: args.verify_archive,
    };
    let outcome = run_package(&config, stamp, options, stderr)?;

    if outcome.prepare == PrepareOutcome::Replaced {
        write_line(
            stderr,
            format!(
                "Warning: replaced existing staging directory {}",
                outcome.staging_dir
            ),
        );
    }
    write_line(
        stdout,
        package_summary(
            &outcome.staging_dir,
            &outcome.archive.path,
            &outcome.archive.size_display(),
        ),
    );
    if let Some(entries) = outcome.verified_entries {
        write_line(stdout, format!("  Archive verified: {entries} entries"));
    }
    write_line(stdout, "");
    write_line(stdout, "Project statistics:");
    write_lines(
        stdout,
        outcome
            .statistics
            .display_lines()
            .into_iter()
            .map(|line| format!("  {line}")),
    );
    write_line(stdout, "");
    write_line(stdout, NEXT_STEPS);
    Ok(())
}

fn load_config(args: &PackageArgs) -> Result<PackwrightConfig> {
    let config = PackwrightConfig::load_or_embedded(args.config.config_path())?
        .with_project_root(args.config.project_root.clone())
        .with_output_dir(args.output_dir.clone());
    Ok(config)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_line(stderr, render_error_chain(&err));
            1
        }
    }
}
