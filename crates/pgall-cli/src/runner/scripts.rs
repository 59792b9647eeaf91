//! Lifecycle script resolution.
//!
//! Each stage maps to an ordered list of candidate filenames per host family;
//! the first one that exists in the plugin directory wins.

use pgall_manifest::HostOs;
use std::fmt;
use std::path::{Path, PathBuf};

/// A plugin lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Optional dependency setup, run before the entry point.
    Install,
    /// The plugin entry point. Mandatory.
    Run,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Install => "install",
            Stage::Run => "run",
        }
    }

    /// Ordered candidate script filenames for this stage on the given host.
    /// The Windows family prefers `.bat` and falls back to `.sh`; everywhere
    /// else only `.sh` is considered.
    pub fn candidates(self, host: HostOs) -> &'static [&'static str] {
        match (self, host.is_windows_family()) {
            (Stage::Install, true) => &["install.bat", "install.sh"],
            (Stage::Install, false) => &["install.sh"],
            (Stage::Run, true) => &["run.bat", "run.sh"],
            (Stage::Run, false) => &["run.sh"],
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve the script file to execute for a stage, if any exists.
pub fn resolve_script(plugin_dir: &Path, stage: Stage, host: HostOs) -> Option<PathBuf> {
    stage
        .candidates(host)
        .iter()
        .map(|candidate| plugin_dir.join(candidate))
        .find(|path| path.is_file())
}
