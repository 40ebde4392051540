//! Project layout and scaffolding

use crate::error::{KaError, KaResult, PackageError};
use super::PackageInfo;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "orus.toml";
pub const LOCK_FILE: &str = "orus.lock";
pub const STORE_DIR: &str = ".orus";
pub const DEFAULT_SOURCE: &str = "src/main.orus";

const DEFAULT_NAME: &str = "example";
const DEFAULT_VERSION: &str = "0.1.0";

/// Fixed file locations of an Orus project, resolved against its root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        ProjectLayout {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(LOCK_FILE)
    }

    /// Directory holding one checkout per dependency
    pub fn store_root(&self) -> PathBuf {
        self.root.join(STORE_DIR)
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn default_source(&self) -> PathBuf {
        self.root.join(DEFAULT_SOURCE)
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// Package name used when scaffolding: the root directory's name
    fn package_name(&self) -> String {
        fs::canonicalize(&self.root)
            .ok()
            .and_then(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string())
    }
}

/// Files touched by `Project::init`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub created: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
}

/// Project structure manager
pub struct Project;

impl Project {
    /// Scaffold a project without overwriting anything that already exists
    pub fn init(layout: &ProjectLayout) -> KaResult<InitReport> {
        let mut report = InitReport::default();

        Self::create_dir(&layout.src_dir())?;

        let package = PackageInfo {
            name: layout.package_name(),
            version: DEFAULT_VERSION.to_string(),
        };
        let manifest_text = format!(
            "{}\n[dependencies]\n",
            toml::to_string(&ManifestHeader { package: &package })
                .map_err(|e| KaError::Package(PackageError::Serialize(e.to_string())))?
        );

        let files = [
            (layout.manifest_path(), manifest_text),
            (layout.lock_path(), String::new()),
            (layout.readme_path(), "# New Orus Project\n".to_string()),
            (layout.default_source(), "print(\"Hello from Orus!\")\n".to_string()),
        ];

        for (path, content) in files {
            if path.exists() {
                report.existing.push(path);
            } else {
                Self::create_file(&path, &content)?;
                report.created.push(path);
            }
        }

        Ok(report)
    }

    fn create_dir(path: &Path) -> KaResult<()> {
        fs::create_dir_all(path).map_err(|e| {
            KaError::Package(PackageError::ProjectCreationFailed(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            )))
        })
    }

    fn create_file(path: &Path, content: &str) -> KaResult<()> {
        fs::write(path, content).map_err(|e| {
            KaError::Package(PackageError::ProjectCreationFailed(format!(
                "Failed to create file {}: {}",
                path.display(),
                e
            )))
        })
    }
}

// Only the [package] table; init appends an empty [dependencies] header.
#[derive(serde::Serialize)]
struct ManifestHeader<'a> {
    package: &'a PackageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::Manifest;
    use tempfile::TempDir;

    #[test]
    fn init_creates_all_files() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());

        let report = Project::init(&layout).unwrap();
        assert_eq!(report.created.len(), 4);
        assert!(report.existing.is_empty());

        let manifest = Manifest::load(layout.manifest_path()).unwrap();
        assert_eq!(manifest.package.version, "0.1.0");
        assert!(!manifest.package.name.is_empty());
        assert!(manifest.dependencies.is_empty());
        assert_eq!(fs::read_to_string(layout.lock_path()).unwrap(), "");
        assert!(layout.default_source().is_file());
        assert!(temp.path().join(MANIFEST_FILE).is_file());
    }

    #[test]
    fn init_never_overwrites() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        fs::write(layout.manifest_path(), "[package]\nname = \"mine\"\nversion = \"9.9.9\"\n").unwrap();

        let report = Project::init(&layout).unwrap();
        assert_eq!(report.existing, vec![layout.manifest_path()]);

        let manifest = Manifest::load(layout.manifest_path()).unwrap();
        assert_eq!(manifest.package.name, "mine");

        let again = Project::init(&layout).unwrap();
        assert!(again.created.is_empty());
        assert_eq!(again.existing.len(), 4);
    }
}
