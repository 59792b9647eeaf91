//! Child-process execution for lifecycle scripts.
//!
//! Scripts run through the host shell with the plugin directory as working
//! directory and fully inherited standard streams, so plugin output is
//! visible live. The call blocks until the child exits; there is no timeout.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// How a lifecycle script terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exit status zero.
    Success,
    /// Non-zero exit, with the exit code when the OS reports one.
    Failed(Option<i32>),
    /// Terminated by an operator interrupt (Ctrl-C).
    Interrupted,
}

/// Run a script to completion and classify its exit status.
pub fn run_script(script: &Path, workdir: &Path) -> io::Result<ExitOutcome> {
    let status = shell_command(script)
        .current_dir(workdir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    Ok(classify(status))
}

#[cfg(not(windows))]
fn shell_command(script: &Path) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg(script);
    cmd
}

#[cfg(windows)]
fn shell_command(script: &Path) -> Command {
    let is_batch = script
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bat"));
    if is_batch {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(script);
        cmd
    } else {
        // Fallback scripts still go through sh (e.g. Git Bash)
        let mut cmd = Command::new("sh");
        cmd.arg(script);
        cmd
    }
}

fn classify(status: ExitStatus) -> ExitOutcome {
    if status.success() {
        return ExitOutcome::Success;
    }
    if interrupted(status) {
        return ExitOutcome::Interrupted;
    }
    ExitOutcome::Failed(status.code())
}

#[cfg(unix)]
fn interrupted(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    // SIGINT
    status.signal() == Some(2)
}

#[cfg(windows)]
fn interrupted(status: ExitStatus) -> bool {
    // STATUS_CONTROL_C_EXIT
    status.code() == Some(0xC000_013Au32 as i32)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_zero_exit_is_success() {
        let tmp = TempDir::new().unwrap();
        let script = write_script(tmp.path(), "run.sh", "exit 0\n");
        let outcome = run_script(&script, tmp.path()).unwrap();
        assert_eq!(outcome, ExitOutcome::Success);
    }

    #[test]
    fn test_nonzero_exit_reports_code() {
        let tmp = TempDir::new().unwrap();
        let script = write_script(tmp.path(), "run.sh", "exit 3\n");
        let outcome = run_script(&script, tmp.path()).unwrap();
        assert_eq!(outcome, ExitOutcome::Failed(Some(3)));
    }

    #[test]
    fn test_sigint_is_interrupted() {
        let tmp = TempDir::new().unwrap();
        let script = write_script(tmp.path(), "run.sh", "kill -INT $$\n");
        let outcome = run_script(&script, tmp.path()).unwrap();
        assert_eq!(outcome, ExitOutcome::Interrupted);
    }

    #[test]
    fn test_runs_in_working_directory() {
        let tmp = TempDir::new().unwrap();
        let workdir = tmp.path().join("plugin");
        fs::create_dir_all(&workdir).unwrap();
        let script = write_script(&workdir, "run.sh", "pwd > where.txt\n");

        run_script(&script, &workdir).unwrap();

        let recorded = fs::read_to_string(workdir.join("where.txt")).unwrap();
        let recorded = recorded.trim();
        // Account for symlinked temp dirs (e.g. /tmp on macOS)
        let canonical = workdir.canonicalize().unwrap();
        assert!(
            recorded == workdir.to_string_lossy() || recorded == canonical.to_string_lossy(),
            "unexpected working directory: {}",
            recorded
        );
    }
}
