//! Gallery scanning - building the plugin registry from the filesystem.

use crate::errors::ScanDiagnostic;
use crate::manifest::{PluginManifest, PluginRegistry};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Fixed manifest filename looked for inside each plugin directory.
pub const MANIFEST_FILE_NAME: &str = "plugin.json";

/// Result of one gallery scan: the registry plus every per-directory
/// condition encountered along the way. Diagnostics are returned as data so
/// the caller owns their presentation.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub registry: PluginRegistry,
    pub diagnostics: Vec<ScanDiagnostic>,
}

/// Scan the gallery root for plugin directories.
///
/// Every immediate subdirectory containing a `plugin.json` is a candidate;
/// directories without one are not plugins and are skipped silently. A bad
/// manifest skips its directory and is reported, but never aborts the scan.
/// A missing root yields an empty registry, not an error.
pub fn scan(root: &Path) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    if !root.is_dir() {
        warn!(root = %root.display(), "plugins directory not found");
        outcome
            .diagnostics
            .push(ScanDiagnostic::RootNotFound(root.to_path_buf()));
        return outcome;
    }

    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            outcome.diagnostics.push(ScanDiagnostic::ReadError {
                path: root.to_path_buf(),
                source: e,
            });
            return outcome;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                outcome.diagnostics.push(ScanDiagnostic::ReadError {
                    path: root.to_path_buf(),
                    source: e,
                });
                continue;
            }
        };

        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }

        let manifest_path = dir.join(MANIFEST_FILE_NAME);
        if !manifest_path.is_file() {
            // Not a plugin
            continue;
        }

        match load_manifest(&dir, &manifest_path) {
            Ok(manifest) => {
                debug!(name = %manifest.name, dir = %dir.display(), "discovered plugin");
                if outcome.registry.insert(manifest).is_some() {
                    debug!(dir = %dir.display(), "duplicate plugin name, keeping later entry");
                }
            }
            Err(diagnostic) => {
                warn!(%diagnostic, "skipping plugin directory");
                outcome.diagnostics.push(diagnostic);
            }
        }
    }

    outcome
}

fn load_manifest(dir: &Path, manifest_path: &Path) -> Result<PluginManifest, ScanDiagnostic> {
    let content = fs::read_to_string(manifest_path).map_err(|e| ScanDiagnostic::ReadError {
        path: manifest_path.to_path_buf(),
        source: e,
    })?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| ScanDiagnostic::ParseError {
            path: manifest_path.to_path_buf(),
            source: e,
        })?;

    // The original launcher treats an empty name the same as a missing one.
    let has_name = value
        .get("name")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|name| !name.is_empty());
    if !has_name {
        return Err(ScanDiagnostic::MissingName {
            path: manifest_path.to_path_buf(),
        });
    }

    let mut manifest: PluginManifest =
        serde_json::from_value(value).map_err(|e| ScanDiagnostic::ParseError {
            path: manifest_path.to_path_buf(),
            source: e,
        })?;
    manifest.path = dir.to_path_buf();

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_plugin(root: &Path, dir_name: &str, manifest_json: &str) {
        let dir = root.join(dir_name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE_NAME), manifest_json).unwrap();
    }

    #[test]
    fn test_missing_root_yields_empty_registry_and_diagnostic() {
        let tmp = TempDir::new().unwrap();
        let outcome = scan(&tmp.path().join("nope"));
        assert!(outcome.registry.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(matches!(
            outcome.diagnostics[0],
            ScanDiagnostic::RootNotFound(_)
        ));
    }

    #[test]
    fn test_directory_without_manifest_is_skipped_silently() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("not-a-plugin")).unwrap();
        fs::write(tmp.path().join("stray-file.txt"), "ignored").unwrap();

        let outcome = scan(tmp.path());
        assert!(outcome.registry.is_empty());
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_valid_plugin_is_registered_with_measured_path() {
        let tmp = TempDir::new().unwrap();
        write_plugin(
            tmp.path(),
            "foo",
            r#"{"name": "foo", "version": "1.2.3", "path": "/bogus"}"#,
        );

        let outcome = scan(tmp.path());
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(outcome.registry.len(), 1);
        let manifest = outcome.registry.get("foo").unwrap();
        assert_eq!(manifest.version, "1.2.3");
        // The path key inside the file is ignored in favor of the real directory
        assert_eq!(manifest.path, tmp.path().join("foo"));
    }

    #[test]
    fn test_malformed_manifest_reports_parse_error_and_continues() {
        let tmp = TempDir::new().unwrap();
        write_plugin(tmp.path(), "broken", "{not json");
        write_plugin(tmp.path(), "ok", r#"{"name": "ok"}"#);

        let outcome = scan(tmp.path());
        assert_eq!(outcome.registry.len(), 1);
        assert!(outcome.registry.get("ok").is_some());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(matches!(
            outcome.diagnostics[0],
            ScanDiagnostic::ParseError { .. }
        ));
    }

    #[test]
    fn test_missing_name_reports_exactly_one_diagnostic() {
        let tmp = TempDir::new().unwrap();
        write_plugin(tmp.path(), "bar", r#"{"platforms": {}}"#);

        let outcome = scan(tmp.path());
        assert!(outcome.registry.is_empty());
        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(matches!(
            outcome.diagnostics[0],
            ScanDiagnostic::MissingName { .. }
        ));
    }

    #[test]
    fn test_empty_name_counts_as_missing() {
        let tmp = TempDir::new().unwrap();
        write_plugin(tmp.path(), "anon", r#"{"name": ""}"#);

        let outcome = scan(tmp.path());
        assert!(outcome.registry.is_empty());
        assert!(matches!(
            outcome.diagnostics[0],
            ScanDiagnostic::MissingName { .. }
        ));
    }

    #[test]
    fn test_duplicate_names_collapse_to_one_entry() {
        let tmp = TempDir::new().unwrap();
        write_plugin(tmp.path(), "first", r#"{"name": "dup", "version": "1"}"#);
        write_plugin(tmp.path(), "second", r#"{"name": "dup", "version": "2"}"#);

        let outcome = scan(tmp.path());
        assert_eq!(outcome.registry.len(), 1);
        // Iteration order is not guaranteed, but the survivor must be one of
        // the two directories.
        let kept = outcome.registry.get("dup").unwrap();
        assert!(
            kept.path == tmp.path().join("first") || kept.path == tmp.path().join("second"),
            "unexpected path: {}",
            kept.path.display()
        );
    }

    #[test]
    fn test_mixed_gallery() {
        let tmp = TempDir::new().unwrap();
        write_plugin(tmp.path(), "good", r#"{"name": "good"}"#);
        write_plugin(tmp.path(), "nameless", r#"{"version": "1.0"}"#);
        write_plugin(tmp.path(), "mangled", "][");
        fs::create_dir_all(tmp.path().join("empty-dir")).unwrap();

        let outcome = scan(tmp.path());
        assert_eq!(outcome.registry.len(), 1);
        assert_eq!(outcome.diagnostics.len(), 2);
    }
}
