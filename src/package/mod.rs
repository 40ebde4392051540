//! Package management for Orus projects
//!
//! This module provides functionality for:
//! - Manifest loading and saving (orus.toml)
//! - Project scaffolding
//! - Dependency declaration and installation into `.orus/`

pub mod manifest;
pub mod project;
pub mod dependency;
pub mod install;

pub use manifest::{Manifest, PackageInfo};
pub use project::{InitReport, Project, ProjectLayout, DEFAULT_SOURCE, LOCK_FILE, MANIFEST_FILE, STORE_DIR};
pub use dependency::DependencyArg;
pub use install::{Fetcher, GitFetcher, InstallReport, Installer};

use crate::cli::CliContext;
use crate::error::KaResult;

/// Package manager bound to one project root
#[derive(Debug, Clone)]
pub struct PackageManager {
    layout: ProjectLayout,
}

impl PackageManager {
    pub fn new(layout: ProjectLayout) -> Self {
        PackageManager { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Read the manifest fresh from disk
    pub fn load_manifest(&self) -> KaResult<Manifest> {
        Manifest::load(self.layout.manifest_path())
    }

    /// Record `name=locator` in the manifest.
    ///
    /// The argument is validated before the manifest is read, so a malformed
    /// argument leaves the file untouched. Returns the locator that was
    /// replaced, if the dependency was already declared.
    pub fn add(&self, arg: &str) -> KaResult<(DependencyArg, Option<String>)> {
        let dep = DependencyArg::parse(arg)?;
        let mut manifest = self.load_manifest()?;
        let previous = manifest.add_dependency(dep.name.clone(), dep.locator.clone());
        manifest.save(self.layout.manifest_path())?;
        Ok((dep, previous))
    }

    /// Fetch all declared dependencies into the store root
    pub fn install(&self, context: &CliContext, fetcher: &dyn Fetcher) -> KaResult<InstallReport> {
        let manifest = self.load_manifest()?;
        Installer::new(context, fetcher).install(&manifest, &self.layout.store_root())
    }
}
