//! Plugin lifecycle execution.
//!
//! One `run_plugin` call drives a single plugin through its lifecycle:
//! registry lookup, OS-support check, then the install and run stages. The
//! first failure is terminal for the call; the hosting process stays alive.

use colored::Colorize;
use pgall_logger as logger;
use pgall_manifest::{HostOs, PluginManifest, PluginRegistry};
use std::io::{self, Write};

mod exec;
mod scripts;

pub use exec::{run_script, ExitOutcome};
pub use scripts::{resolve_script, Stage};

/// Options controlling a single lifecycle run.
#[derive(Debug, Default, Clone)]
pub struct RunOptions {
    /// Skip the OS-support confirmation prompt.
    pub assume_yes: bool,
}

#[derive(Debug)]
pub enum RunError {
    PluginNotFound(String),
    UserAborted,
    NoRunScript(String),
    InstallFailed { plugin: String, code: Option<i32> },
    RunFailed { plugin: String, code: Option<i32> },
    Interrupted { plugin: String },
    Exec { stage: Stage, source: io::Error },
}

impl RunError {
    /// Whether this outcome reflects an operator choice rather than a fault.
    /// These are reported informationally, not at error level.
    pub fn is_user_choice(&self) -> bool {
        matches!(self, RunError::UserAborted | RunError::Interrupted { .. })
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::PluginNotFound(name) => {
                write!(f, "Plugin '{}' not found in the gallery", name)
            }
            RunError::UserAborted => write!(f, "Aborted by user"),
            RunError::NoRunScript(name) => {
                write!(f, "Plugin '{}' has no run script", name)
            }
            RunError::InstallFailed { plugin, code } => match code {
                Some(code) => {
                    write!(f, "Install script for '{}' failed (exit {})", plugin, code)
                }
                None => write!(f, "Install script for '{}' failed", plugin),
            },
            RunError::RunFailed { plugin, code } => match code {
                Some(code) => write!(f, "Run script for '{}' failed (exit {})", plugin, code),
                None => write!(f, "Run script for '{}' failed", plugin),
            },
            RunError::Interrupted { plugin } => {
                write!(f, "Run of '{}' interrupted by user", plugin)
            }
            RunError::Exec { stage, source } => {
                write!(f, "Failed to launch {} script: {}", stage, source)
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Run one plugin's lifecycle: install stage (if present), then run stage.
pub fn run_plugin(
    registry: &PluginRegistry,
    name: &str,
    opts: &RunOptions,
) -> Result<(), RunError> {
    let plugin = registry
        .get(name)
        .ok_or_else(|| RunError::PluginNotFound(name.to_string()))?;

    let host = HostOs::current();
    if !plugin.supports(host) && !confirm_unsupported(plugin, host, opts) {
        return Err(RunError::UserAborted);
    }

    logger::step(&format!("Running plugin: {}", name));
    println!("{}", format!("--- Running plugin: {} ---", name).bold());

    install_stage(plugin, host)?;
    run_stage(plugin, host)?;

    println!("{}", format!("--- Plugin finished: {} ---", name).bold());
    Ok(())
}

fn install_stage(plugin: &PluginManifest, host: HostOs) -> Result<(), RunError> {
    let Some(script) = resolve_script(&plugin.path, Stage::Install, host) else {
        // Installation is optional; a missing script just skips the stage
        logger::debug(&format!(
            "No install script for '{}'; skipping install stage",
            plugin.name
        ));
        return Ok(());
    };

    println!("Running install script: '{}'...", script.display());
    let outcome = run_script(&script, &plugin.path).map_err(|e| RunError::Exec {
        stage: Stage::Install,
        source: e,
    })?;

    match outcome {
        ExitOutcome::Success => {
            logger::success("Install script completed");
            Ok(())
        }
        ExitOutcome::Failed(code) => Err(RunError::InstallFailed {
            plugin: plugin.name.clone(),
            code,
        }),
        // The interrupt special case applies to the run stage only
        ExitOutcome::Interrupted => Err(RunError::InstallFailed {
            plugin: plugin.name.clone(),
            code: None,
        }),
    }
}

fn run_stage(plugin: &PluginManifest, host: HostOs) -> Result<(), RunError> {
    let script = resolve_script(&plugin.path, Stage::Run, host)
        .ok_or_else(|| RunError::NoRunScript(plugin.name.clone()))?;

    println!("Running run script: '{}'...", script.display());
    let outcome = run_script(&script, &plugin.path).map_err(|e| RunError::Exec {
        stage: Stage::Run,
        source: e,
    })?;

    match outcome {
        ExitOutcome::Success => Ok(()),
        ExitOutcome::Failed(code) => Err(RunError::RunFailed {
            plugin: plugin.name.clone(),
            code,
        }),
        ExitOutcome::Interrupted => {
            logger::info(&format!("Run of '{}' interrupted by user", plugin.name));
            println!("{}", "Interrupted.".yellow());
            Err(RunError::Interrupted {
                plugin: plugin.name.clone(),
            })
        }
    }
}

/// Ask the operator to confirm running a plugin on an OS it does not declare
/// as supported. The check is advisory; continuing is always possible with
/// consent.
fn confirm_unsupported(plugin: &PluginManifest, host: HostOs, opts: &RunOptions) -> bool {
    let declared = match plugin.declared_support(host) {
        Some(status) => format!("declared '{}'", status),
        None => "not declared".to_string(),
    };
    logger::warn(&format!(
        "Plugin '{}' is not marked as supported on {} ({})",
        plugin.name, host, declared
    ));

    if opts.assume_yes {
        logger::debug("Skipping OS-support confirmation (--yes or PGALL_ASSUME_YES set)");
        return true;
    }

    print!(
        "{} Continue anyway? {} ",
        "?".bold().cyan(),
        "[y/n] ›".dimmed()
    );
    let _ = io::stdout().flush();

    let mut response = String::new();
    if io::stdin().read_line(&mut response).is_ok() {
        let response = response.trim().to_lowercase();
        if response == "y" || response == "yes" {
            return true;
        }
        logger::info("Operation cancelled by user");
        println!("Operation cancelled.");
        false
    } else {
        logger::error("Failed to read input");
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgall_manifest::scan;
    use std::fs;
    use tempfile::TempDir;

    fn registry_with(dir: &std::path::Path) -> PluginRegistry {
        scan(dir).registry
    }

    #[test]
    fn test_unknown_plugin_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let registry = registry_with(tmp.path());
        let err = run_plugin(&registry, "ghost", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, RunError::PluginNotFound(_)));
    }

    #[cfg(unix)]
    fn write_plugin(root: &std::path::Path, name: &str, manifest: &str) -> std::path::PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("plugin.json"), manifest).unwrap();
        dir
    }

    #[cfg(unix)]
    fn supported_manifest(name: &str) -> String {
        format!(
            r#"{{"name": "{}", "platforms": {{"{}": "supported"}}}}"#,
            name,
            std::env::consts::OS
        )
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_run_script_is_fatal_without_spawn() {
        let tmp = TempDir::new().unwrap();
        write_plugin(tmp.path(), "foo", &supported_manifest("foo"));

        let registry = registry_with(tmp.path());
        let err = run_plugin(&registry, "foo", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, RunError::NoRunScript(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_only_plugin_skips_install() {
        let tmp = TempDir::new().unwrap();
        let dir = write_plugin(tmp.path(), "foo", &supported_manifest("foo"));
        fs::write(dir.join("run.sh"), "touch ran.marker\n").unwrap();

        let registry = registry_with(tmp.path());
        run_plugin(&registry, "foo", &RunOptions::default()).unwrap();
        assert!(dir.join("ran.marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_failure_blocks_run_stage() {
        let tmp = TempDir::new().unwrap();
        let dir = write_plugin(tmp.path(), "foo", &supported_manifest("foo"));
        fs::write(dir.join("install.sh"), "exit 1\n").unwrap();
        fs::write(dir.join("run.sh"), "touch ran.marker\n").unwrap();

        let registry = registry_with(tmp.path());
        let err = run_plugin(&registry, "foo", &RunOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            RunError::InstallFailed { code: Some(1), .. }
        ));
        assert!(!dir.join("ran.marker").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_runs_before_run_stage() {
        let tmp = TempDir::new().unwrap();
        let dir = write_plugin(tmp.path(), "foo", &supported_manifest("foo"));
        fs::write(dir.join("install.sh"), "echo install >> order.log\n").unwrap();
        fs::write(dir.join("run.sh"), "echo run >> order.log\n").unwrap();

        let registry = registry_with(tmp.path());
        run_plugin(&registry, "foo", &RunOptions::default()).unwrap();

        let log = fs::read_to_string(dir.join("order.log")).unwrap();
        assert_eq!(log, "install\nrun\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_failure_reports_exit_code() {
        let tmp = TempDir::new().unwrap();
        let dir = write_plugin(tmp.path(), "foo", &supported_manifest("foo"));
        fs::write(dir.join("run.sh"), "exit 7\n").unwrap();

        let registry = registry_with(tmp.path());
        let err = run_plugin(&registry, "foo", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, RunError::RunFailed { code: Some(7), .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_interrupted_run_is_a_user_choice() {
        let tmp = TempDir::new().unwrap();
        let dir = write_plugin(tmp.path(), "foo", &supported_manifest("foo"));
        fs::write(dir.join("run.sh"), "kill -INT $$\n").unwrap();

        let registry = registry_with(tmp.path());
        let err = run_plugin(&registry, "foo", &RunOptions::default()).unwrap_err();
        assert!(matches!(err, RunError::Interrupted { .. }));
        assert!(err.is_user_choice());
    }

    #[cfg(unix)]
    #[test]
    fn test_assume_yes_skips_prompt_for_unsupported() {
        let tmp = TempDir::new().unwrap();
        let dir = write_plugin(tmp.path(), "foo", r#"{"name": "foo", "platforms": {}}"#);
        fs::write(dir.join("run.sh"), "touch ran.marker\n").unwrap();

        let registry = registry_with(tmp.path());
        let opts = RunOptions { assume_yes: true };
        run_plugin(&registry, "foo", &opts).unwrap();
        assert!(dir.join("ran.marker").exists());
    }
}
