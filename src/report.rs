// report.rs - Diagnostics and termination for the two failure tiers

use std::process;

use colored::Colorize;

use crate::context::{ContractError, OverflowAction, UncaughtAction};
use crate::exception::Exception;

const PREFIX: &str = "[unwinder]";

/// Print an exception that escaped every TRY scope to stderr.
pub fn report_uncaught(exception: &Exception) {
    eprintln!();
    eprintln!("{}: {}", exception.name().bright_red().bold(), exception.message());
    if let Some(origin) = exception.origin() {
        eprintln!("    at {}", origin.to_string().dimmed());
    }
}

/// Print a contract violation to stderr. No exception context is involved.
pub fn report_violation(error: &ContractError) {
    eprintln!();
    eprintln!("{}: {}", PREFIX.bright_red().bold(), error);
}

/// Report `exception` and run the uncaught action. Never returns.
pub(crate) fn terminate(action: UncaughtAction, exception: &Exception) -> ! {
    tracing::error!(
        name = exception.name(),
        message = exception.message(),
        "uncaught exception at top level"
    );
    report_uncaught(exception);

    match action {
        UncaughtAction::Exit => process::exit(1),
        UncaughtAction::Abort => process::abort(),
        UncaughtAction::Panic => panic!("uncaught exception: {}", exception),
        UncaughtAction::Custom(hook) => hook(exception),
    }
}

/// Report `error` and run the overflow action. Never returns.
pub(crate) fn fatal(action: OverflowAction, error: &ContractError) -> ! {
    tracing::error!(%error, "exception contract violated");
    report_violation(error);

    match action {
        OverflowAction::Abort => process::abort(),
        OverflowAction::Panic => panic!("{} {}", PREFIX, error),
        OverflowAction::Custom(hook) => hook(error),
    }
}
