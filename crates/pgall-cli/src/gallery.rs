//! Gallery access - plugins-dir resolution, scanning, and diagnostic display.

use crate::GlobalOpts;
use pgall_config::Config;
use pgall_logger as logger;
use pgall_manifest::{scan, PluginRegistry, ScanDiagnostic, ScanOutcome};
use std::path::PathBuf;

/// Resolve the plugins root for this invocation.
pub fn plugins_root(opts: &GlobalOpts) -> PathBuf {
    let config = Config::load().unwrap_or_else(|e| {
        logger::warn(&format!("Failed to load config: {}", e));
        Config::default()
    });
    config.resolve_plugins_dir(opts.plugins_dir.as_deref())
}

/// Scan the gallery and report every diagnostic to the operator.
///
/// Scan problems are never fatal; callers always get a registry, possibly
/// empty.
pub fn load_registry(opts: &GlobalOpts) -> PluginRegistry {
    let root = plugins_root(opts);
    logger::debug(&format!("Scanning plugin gallery at '{}'", root.display()));

    logger::spinner_start("Scanning plugin gallery...");
    let ScanOutcome {
        registry,
        diagnostics,
    } = scan(&root);
    logger::spinner_stop();

    for diagnostic in &diagnostics {
        match diagnostic {
            ScanDiagnostic::RootNotFound(_) => logger::error(&diagnostic.to_string()),
            _ => logger::warn(&diagnostic.to_string()),
        }
    }

    logger::debug(&format!("Found {} plugin(s)", registry.len()));
    registry
}
