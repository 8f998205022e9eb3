//! Types for the build manifest and the generated package config

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Version of the package config format written to `configVersion`
pub const CONFIG_VERSION: u32 = 2;

/// Language version used when a package declares none
pub const DEFAULT_LANGUAGE_VERSION: &str = "2.8";

/// One package entry as emitted by the build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPackageDescriptor {
    pub name: String,
    pub root_uri: String,
    pub package_uri: String,
    #[serde(default)]
    pub language_version: Option<String>,
    #[serde(default)]
    pub pubspec_path: Option<PathBuf>,
}

/// A package entry of `package_config.json`
///
/// Fields are declared in the order their JSON keys sort, so the serialized
/// object comes out with sorted keys. Ordering between packages is by
/// `(name, rootUri, languageVersion, packageUri)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPackage {
    pub language_version: String,
    pub name: String,
    pub package_uri: String,
    pub root_uri: String,
}

impl ResolvedPackage {
    fn sort_key(&self) -> (&str, &str, &str, &str) {
        (
            &self.name,
            &self.root_uri,
            &self.language_version,
            &self.package_uri,
        )
    }
}

impl Ord for ResolvedPackage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for ResolvedPackage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `package_config.json` document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    pub config_version: u32,
    pub generator: String,
    pub packages: Vec<ResolvedPackage>,
}

impl PackageConfig {
    /// Build a document from resolved packages, sorting them
    pub fn new(mut packages: Vec<ResolvedPackage>, generator: impl Into<String>) -> Self {
        packages.sort();
        PackageConfig {
            config_version: CONFIG_VERSION,
            generator: generator.into(),
            packages,
        }
    }

    /// Render the document as pretty JSON with two-space indentation
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
