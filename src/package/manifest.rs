//! Manifest store for orus.toml files

use crate::error::{KaError, KaResult, PackageError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Project manifest loaded from orus.toml
///
/// The dependency table maps a dependency name to its locator: either a
/// version tag or a fetchable URL. Locators are kept opaque and are never
/// validated when the manifest is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub package: PackageInfo,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
}

/// Package identity section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl Manifest {
    /// Create a manifest with no dependencies
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Manifest {
            package: PackageInfo {
                name: name.into(),
                version: version.into(),
            },
            dependencies: IndexMap::new(),
        }
    }

    /// Load a manifest from disk
    pub fn load<P: AsRef<Path>>(path: P) -> KaResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => KaError::Package(PackageError::ManifestNotFound(path.to_path_buf())),
            _ => KaError::io(format!("failed to read {}", path.display()), e),
        })?;

        Self::from_toml(&content).map_err(|message| {
            KaError::Package(PackageError::Parse {
                path: path.to_path_buf(),
                message,
            })
        })
    }

    /// Parse a manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.message().to_string())
    }

    /// Render the manifest as TOML text
    pub fn to_toml(&self) -> KaResult<String> {
        toml::to_string(self).map_err(|e| KaError::Package(PackageError::Serialize(e.to_string())))
    }

    /// Write the whole manifest back to disk in a single write
    pub fn save<P: AsRef<Path>>(&self, path: P) -> KaResult<()> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        fs::write(path, content).map_err(|e| {
            KaError::Package(PackageError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        })
    }

    /// Insert or replace a dependency, returning the previous locator
    pub fn add_dependency(&mut self, name: impl Into<String>, locator: impl Into<String>) -> Option<String> {
        self.dependencies.insert(name.into(), locator.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dependency_table_is_empty() {
        let manifest = Manifest::from_toml("[package]\nname = \"demo\"\nversion = \"0.1.0\"\n").unwrap();
        assert_eq!(manifest.package.name, "demo");
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn dependency_order_follows_document() {
        let manifest = Manifest::from_toml(
            "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n\n[dependencies]\nzeta = \"1.0\"\nalpha = \"https://example.com/alpha.git\"\n",
        )
        .unwrap();
        let names: Vec<&str> = manifest.dependencies.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn malformed_manifest_is_rejected() {
        assert!(Manifest::from_toml("[package\nname = ").is_err());
        assert!(Manifest::from_toml("[dependencies]\njson = 3\n").is_err());
    }

    #[test]
    fn add_dependency_replaces_existing() {
        let mut manifest = Manifest::new("demo", "0.1.0");
        assert_eq!(manifest.add_dependency("json", "1.0"), None);
        assert_eq!(manifest.add_dependency("json", "2.0"), Some("1.0".to_string()));
        assert_eq!(manifest.dependencies.len(), 1);
    }
}
