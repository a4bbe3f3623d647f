//! nutconf: Network UPS Tools configuration editor
//!
//! Entry point for the nutconf application.

use nutconf::conf::LocalFiles;
use nutconf::options::ValidatedOptions;
use nutconf::usage;
use std::process::ExitCode;

mod app;
mod run;

use app::{diagnostics_report, exit_code, setup_tracing};
use run::Outcome;

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let bin = std::env::args_os()
        .next()
        .map_or_else(|| "nutconf".to_string(), |arg| arg.to_string_lossy().into_owned());
    let options = ValidatedOptions::from_env();

    if options.help() {
        eprint!("{}", usage::text(&bin));
        return exit_code::SUCCESS;
    }

    if !options.valid() {
        eprint!("{}", diagnostics_report(&options));
        eprint!("{}", usage::text(&bin));
        return exit_code::FAILURE;
    }

    setup_tracing();

    match run::execute(&options, &LocalFiles) {
        Ok(Outcome::Applied) => exit_code::SUCCESS,
        Ok(Outcome::Configured(configured)) => {
            println!("{configured}");
            if configured {
                exit_code::SUCCESS
            } else {
                exit_code::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::runtime_error()
        }
    }
}
