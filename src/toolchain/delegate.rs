//! Transparent invocation of external programs

use crate::error::ToolchainError;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// How a delegated process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    Signaled(i32),
}

impl Termination {
    /// Exit status the CLI should terminate with
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) => 128 + signal,
        }
    }

    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signaled(signal);
            }
        }
        Termination::Exited(1)
    }
}

/// Runs a program with stdio connected straight to ours
pub struct Delegate;

impl Delegate {
    pub fn run<I, S>(program: &Path, args: I, cwd: &Path) -> Result<Termination, ToolchainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let status = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ToolchainError::Launch {
                program: program.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Termination::from_status(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn signaled_maps_above_128() {
        assert_eq!(Termination::Signaled(9).exit_code(), 137);
        assert_eq!(Termination::Exited(7).exit_code(), 7);
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("orus");
        let err = Delegate::run(&missing, ["main.orus"], temp.path()).unwrap_err();
        assert!(matches!(err, ToolchainError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn propagates_exit_code() {
        let temp = TempDir::new().unwrap();
        let termination = Delegate::run(Path::new("/bin/sh"), ["-c", "exit 7"], temp.path()).unwrap();
        assert_eq!(termination, Termination::Exited(7));
    }
}
