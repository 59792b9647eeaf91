use crate::gallery;
use crate::runner::{self, RunError, RunOptions};
use crate::GlobalOpts;
use colored::Colorize;
use pgall_logger as logger;

/// Environment variable that skips the OS-support confirmation, equivalent to
/// passing `--yes`.
pub const ASSUME_YES_ENV: &str = "PGALL_ASSUME_YES";

/// Scan the gallery and run one plugin's lifecycle.
pub fn handle_run(name: &str, yes: bool, opts: &GlobalOpts) -> Result<(), RunError> {
    let registry = gallery::load_registry(opts);

    let run_opts = RunOptions {
        assume_yes: yes || std::env::var(ASSUME_YES_ENV).is_ok(),
    };

    let result = runner::run_plugin(&registry, name, &run_opts);

    // On a bad name, help the operator out with what is available
    if matches!(result, Err(RunError::PluginNotFound(_))) && !registry.is_empty() {
        println!("{}", "Available plugins:".bold());
        for available in registry.sorted_names() {
            println!("  - {}", available);
        }
    }

    result
}

/// Report a lifecycle failure at the appropriate level. Operator choices
/// (abort, interrupt) were already surfaced where they happened and are
/// logged informationally; everything else is an error.
pub fn report_failure(err: &RunError) {
    if err.is_user_choice() {
        logger::info(&err.to_string());
    } else {
        logger::error(&err.to_string());
    }
}
