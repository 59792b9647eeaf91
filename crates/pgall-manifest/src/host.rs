//! Host operating system identification.

use std::fmt;

/// The operating system families a manifest can declare support for.
///
/// Anything outside the three known families is `Other`; plugins cannot
/// declare support for it, so the OS check always falls back to the
/// confirmation prompt there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl HostOs {
    /// The OS the launcher is currently running on.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => HostOs::Windows,
            "macos" => HostOs::MacOs,
            "linux" => HostOs::Linux,
            _ => HostOs::Other,
        }
    }

    /// The key used for this OS in a manifest's `platforms` map.
    pub fn key(self) -> Option<&'static str> {
        match self {
            HostOs::Windows => Some("windows"),
            HostOs::MacOs => Some("macos"),
            HostOs::Linux => Some("linux"),
            HostOs::Other => None,
        }
    }

    /// Whether `.bat` scripts are preferred over `.sh` on this host.
    pub fn is_windows_family(self) -> bool {
        matches!(self, HostOs::Windows)
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key() {
            Some(key) => write!(f, "{}", key),
            None => write!(f, "{}", std::env::consts::OS),
        }
    }
}
