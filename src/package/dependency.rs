//! Dependency declarations given on the command line

use crate::error::PackageError;
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

/// A `name=locator` pair as accepted by `ka add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyArg {
    pub name: String,
    pub locator: String,
}

/// A dependency name must be a single plain path component so its checkout
/// lands directly under the store root
pub fn is_valid_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

impl DependencyArg {
    /// Split on the first `=`; the locator is kept verbatim
    pub fn parse(arg: &str) -> Result<Self, PackageError> {
        match arg.split_once('=') {
            Some((name, locator)) if is_valid_name(name.trim()) => Ok(DependencyArg {
                name: name.trim().to_string(),
                locator: locator.to_string(),
            }),
            _ => Err(PackageError::InvalidDependencyArg(arg.to_string())),
        }
    }
}

impl FromStr for DependencyArg {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DependencyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.locator)
    }
}
