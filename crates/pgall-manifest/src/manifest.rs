//! Manifest data model and the in-memory plugin registry.

use crate::host::HostOs;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// The `platforms` value that marks an OS as supported. Any other value (or a
/// missing entry) is treated as unsupported.
pub const SUPPORTED: &str = "supported";

fn unknown_field() -> String {
    "N/A".to_string()
}

/// One plugin's `plugin.json`, plus the directory it was found in.
///
/// Built fresh on every scan and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    pub name: String,

    #[serde(default = "unknown_field")]
    pub version: String,

    #[serde(default = "unknown_field")]
    pub level: String,

    #[serde(default = "unknown_field")]
    pub language: String,

    #[serde(default)]
    pub description: String,

    /// OS identifier (`windows` | `macos` | `linux`) to support status.
    #[serde(default)]
    pub platforms: BTreeMap<String, String>,

    /// The plugin directory, as measured by the scanner. A `path` key inside
    /// the manifest file itself is ignored.
    #[serde(skip)]
    pub path: PathBuf,
}

impl PluginManifest {
    /// Whether this plugin declares the given OS as supported.
    pub fn supports(&self, host: HostOs) -> bool {
        host.key()
            .and_then(|key| self.platforms.get(key))
            .map(String::as_str)
            == Some(SUPPORTED)
    }

    /// The raw support status declared for the given OS, if any.
    pub fn declared_support(&self, host: HostOs) -> Option<&str> {
        host.key()
            .and_then(|key| self.platforms.get(key))
            .map(String::as_str)
    }
}

/// Name-keyed plugin registry built by one scan.
///
/// Insertion follows filesystem iteration order, which is platform-dependent;
/// duplicate names collapse to whichever directory was scanned last. Display
/// code sorts explicitly.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: HashMap<String, PluginManifest>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a manifest keyed by its name, replacing any previous entry with
    /// the same name (last-write-wins).
    pub fn insert(&mut self, manifest: PluginManifest) -> Option<PluginManifest> {
        self.plugins.insert(manifest.name.clone(), manifest)
    }

    pub fn get(&self, name: &str) -> Option<&PluginManifest> {
        self.plugins.get(name)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginManifest> {
        self.plugins.values()
    }

    /// Plugin names in sorted order, for display.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
