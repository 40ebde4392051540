//! Dependency fetching into the project-local store

use crate::cli::CliContext;
use crate::error::{KaError, KaResult, PackageError};
use super::dependency::is_valid_name;
use super::Manifest;
use anyhow::{bail, Context};
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

/// Materializes a single dependency at `dest`
pub trait Fetcher {
    fn fetch(&self, name: &str, locator: &str, dest: &Path) -> anyhow::Result<()>;
}

/// Shallow `git clone` with the child's output streamed to the terminal
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
    depth: u32,
}

impl Default for GitFetcher {
    fn default() -> Self {
        GitFetcher {
            program: "git".to_string(),
            depth: 1,
        }
    }
}

impl Fetcher for GitFetcher {
    fn fetch(&self, _name: &str, locator: &str, dest: &Path) -> anyhow::Result<()> {
        let status = Command::new(&self.program)
            .arg("clone")
            .arg("--depth")
            .arg(self.depth.to_string())
            .arg(locator)
            .arg(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("spawn {} clone {}", self.program, locator))?;

        if !status.success() {
            match status.code() {
                Some(code) => bail!("{} clone exited with status {}", self.program, code),
                None => bail!("{} clone was terminated by a signal", self.program),
            }
        }
        Ok(())
    }
}

/// Outcome of an install run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub installed: Vec<String>,
    pub skipped: Vec<String>,
}

impl InstallReport {
    pub fn is_empty(&self) -> bool {
        self.installed.is_empty() && self.skipped.is_empty()
    }
}

/// Installs manifest dependencies one at a time, skipping present checkouts
pub struct Installer<'a> {
    context: &'a CliContext,
    fetcher: &'a dyn Fetcher,
}

impl<'a> Installer<'a> {
    pub fn new(context: &'a CliContext, fetcher: &'a dyn Fetcher) -> Self {
        Self { context, fetcher }
    }

    /// Fetch every dependency missing from `store_root`.
    ///
    /// An existing `<store_root>/<name>` counts as installed regardless of its
    /// contents. The first failed fetch aborts the run; checkouts completed
    /// before it stay on disk so a rerun resumes where this one stopped.
    pub fn install(&self, manifest: &Manifest, store_root: &Path) -> KaResult<InstallReport> {
        let mut report = InstallReport::default();

        if manifest.dependencies.is_empty() {
            self.context.info("No dependencies to install");
            return Ok(report);
        }

        // orus.toml is hand-editable, so names are checked again here.
        if let Some(name) = manifest.dependencies.keys().find(|n| !is_valid_name(n)) {
            return Err(KaError::Package(PackageError::Fetch {
                name: name.clone(),
                cause: format!(
                    "invalid dependency name, must be a single path component under {}",
                    store_root.display()
                ),
            }));
        }

        fs::create_dir_all(store_root)
            .map_err(|e| KaError::io(format!("failed to create {}", store_root.display()), e))?;

        let progress = self
            .context
            .progress_bar(manifest.dependencies.len() as u64, "Installing dependencies");

        for (name, locator) in &manifest.dependencies {
            let dest = store_root.join(name);

            if dest.exists() {
                self.context.info(&format!("Dependency {} already installed", name));
                report.skipped.push(name.clone());
            } else {
                self.context.info(&format!("Cloning {} into {}...", locator, dest.display()));
                let fetched = match &progress {
                    Some(pb) => pb.suspend(|| self.fetcher.fetch(name, locator, &dest)),
                    None => self.fetcher.fetch(name, locator, &dest),
                };
                if let Err(cause) = fetched {
                    if let Some(pb) = &progress {
                        pb.abandon();
                    }
                    return Err(KaError::Package(PackageError::Fetch {
                        name: name.clone(),
                        cause: format!("{:#}", cause),
                    }));
                }
                report.installed.push(name.clone());
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &progress {
            pb.finish_and_clear();
        }
        self.context.success("Dependencies installed");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records fetch calls and creates the destination like a real clone
    #[derive(Default)]
    struct RecordingFetcher {
        calls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl Fetcher for RecordingFetcher {
        fn fetch(&self, name: &str, _locator: &str, dest: &Path) -> anyhow::Result<()> {
            self.calls.borrow_mut().push(name.to_string());
            if self.fail_on == Some(name) {
                bail!("repository not found");
            }
            fs::create_dir_all(dest)?;
            Ok(())
        }
    }

    fn manifest_with(deps: &[(&str, &str)]) -> Manifest {
        let mut manifest = Manifest::new("demo", "0.1.0");
        for (name, locator) in deps {
            manifest.add_dependency(*name, *locator);
        }
        manifest
    }

    #[test]
    fn empty_manifest_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let store = temp.path().join(".orus");
        let context = CliContext::new(false, true);
        let fetcher = RecordingFetcher::default();

        let report = Installer::new(&context, &fetcher)
            .install(&Manifest::new("demo", "0.1.0"), &store)
            .unwrap();

        assert!(report.is_empty());
        assert!(!store.exists());
        assert!(fetcher.calls.borrow().is_empty());
    }

    #[test]
    fn second_install_skips_everything() {
        let temp = TempDir::new().unwrap();
        let store = temp.path().join(".orus");
        let context = CliContext::new(false, true);
        let fetcher = RecordingFetcher::default();
        let manifest = manifest_with(&[("json", "https://example.com/json.git"), ("http", "1.0")]);
        let installer = Installer::new(&context, &fetcher);

        let first = installer.install(&manifest, &store).unwrap();
        assert_eq!(first.installed, vec!["json", "http"]);
        assert!(first.skipped.is_empty());

        let second = installer.install(&manifest, &store).unwrap();
        assert!(second.installed.is_empty());
        assert_eq!(second.skipped, vec!["json", "http"]);
        assert_eq!(fetcher.calls.borrow().len(), 2);
    }

    #[test]
    fn first_failure_aborts_without_rollback() {
        let temp = TempDir::new().unwrap();
        let store = temp.path().join(".orus");
        let context = CliContext::new(false, true);
        let fetcher = RecordingFetcher {
            fail_on: Some("broken"),
            ..Default::default()
        };
        let manifest = manifest_with(&[("good", "a"), ("broken", "b"), ("later", "c")]);

        let err = Installer::new(&context, &fetcher).install(&manifest, &store).unwrap_err();
        match err {
            KaError::Package(PackageError::Fetch { name, cause }) => {
                assert_eq!(name, "broken");
                assert!(cause.contains("repository not found"));
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(store.join("good").is_dir());
        assert!(!store.join("later").exists());
        assert_eq!(*fetcher.calls.borrow(), vec!["good", "broken"]);
    }

    #[test]
    fn names_outside_the_store_are_never_fetched() {
        for bad in ["../escaped", "/tmp/ka-abs-dep", "a/../../b", "."] {
            let temp = TempDir::new().unwrap();
            let store = temp.path().join(".orus");
            let context = CliContext::new(false, true);
            let fetcher = RecordingFetcher::default();
            let manifest = manifest_with(&[("good", "a"), (bad, "b")]);

            let err = Installer::new(&context, &fetcher).install(&manifest, &store).unwrap_err();
            assert!(
                matches!(err, KaError::Package(PackageError::Fetch { ref name, .. }) if name == bad),
                "unexpected error for {}: {}",
                bad,
                err
            );
            assert!(fetcher.calls.borrow().is_empty());
            assert!(!temp.path().join("escaped").exists());
            assert!(!store.exists());
        }
    }

    #[test]
    fn git_fetcher_reports_missing_program() {
        let temp = TempDir::new().unwrap();
        let fetcher = GitFetcher {
            program: "ka-test-no-such-git".to_string(),
            depth: 1,
        };
        let err = fetcher
            .fetch("json", "https://example.com/json.git", &temp.path().join("json"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("spawn ka-test-no-such-git clone"));
    }
}
