use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions reported by a gallery scan.
///
/// Each variant is local to a single plugin directory (or the gallery root)
/// and never aborts the scan; the affected directory is skipped and scanning
/// continues.
#[derive(Error, Debug)]
pub enum ScanDiagnostic {
    #[error("plugins directory not found: '{}'", .0.display())]
    RootNotFound(PathBuf),

    #[error("cannot parse '{}': not valid JSON: {source}", .path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest '{}' has no 'name' field; directory skipped", .path.display())]
    MissingName { path: PathBuf },

    #[error("unexpected error reading '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
