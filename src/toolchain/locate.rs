//! Discovery of the Orus toolchain executable

use crate::error::{ToolchainError, TOOLCHAIN_HOME_VAR};
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const TOOLCHAIN_EXECUTABLE: &str = "orus";

/// Where to look for the toolchain.
///
/// Built explicitly so the lookup can be driven without touching the process
/// environment; `from_env` is the only place that reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    pub home: Option<PathBuf>,
    pub search_path: Option<OsString>,
    pub executable: String,
}

impl ToolchainConfig {
    pub fn new(home: Option<PathBuf>, search_path: Option<OsString>) -> Self {
        ToolchainConfig {
            home,
            search_path,
            executable: TOOLCHAIN_EXECUTABLE.to_string(),
        }
    }

    /// Read `ORUS_HOME` and `PATH` from the current process
    pub fn from_env() -> Self {
        let home = env::var_os(TOOLCHAIN_HOME_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(home, env::var_os("PATH"))
    }

    /// Resolve the toolchain executable; the override home wins over PATH
    pub fn locate(&self) -> Result<PathBuf, ToolchainError> {
        let file_name = executable_file_name(&self.executable);

        if let Some(home) = &self.home {
            let candidate = home.join(&file_name);
            if candidate.exists() {
                return Ok(absolute(candidate));
            }
        }

        if let Some(search_path) = &self.search_path {
            for dir in env::split_paths(search_path) {
                if dir.as_os_str().is_empty() {
                    continue;
                }
                let candidate = dir.join(&file_name);
                if is_executable(&candidate) {
                    return Ok(absolute(candidate));
                }
            }
        }

        Err(ToolchainError::NotFound {
            executable: self.executable.clone(),
            override_var: TOOLCHAIN_HOME_VAR.to_string(),
        })
    }
}

fn executable_file_name(name: &str) -> String {
    if cfg!(windows) && Path::new(name).extension().is_none() {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
