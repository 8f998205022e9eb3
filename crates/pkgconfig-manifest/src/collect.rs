//! Package collection
//!
//! Resolves every build manifest entry into a [`ResolvedPackage`]. The
//! duplicate-root check is off by default: the build currently produces
//! several packages sharing a root and tolerates it.

use crate::errors::ManifestError;
use crate::language_version::{PubspecParser, VersionResolver};
use crate::paths::relative_path;
use crate::types::{RawPackageDescriptor, ResolvedPackage};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct CollectOptions {
    /// Reject two packages resolving to the same `rootUri`
    pub check_duplicate_roots: bool,
}

/// Two packages claiming the same root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRoot {
    pub root_uri: String,
    pub first: String,
    pub second: String,
}

/// Result of a collection run that did not hit an I/O error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectOutcome {
    Packages(Vec<ResolvedPackage>),
    DuplicateRoot(DuplicateRoot),
}

/// Read the build manifest: a JSON array of package entries
pub fn load_descriptors(path: &Path) -> Result<Vec<RawPackageDescriptor>, ManifestError> {
    debug!("Reading build manifest: {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| ManifestError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptors: Vec<RawPackageDescriptor> =
        serde_json::from_str(&content).map_err(ManifestError::ParseManifest)?;

    info!("Loaded {} package entries", descriptors.len());
    Ok(descriptors)
}

/// Resolve every entry, in input order
///
/// `relative_to` is the directory that will contain `package_config.json`;
/// each `rootUri` is expressed relative to it.
pub fn collect_packages<P: PubspecParser>(
    items: &[RawPackageDescriptor],
    relative_to: &Path,
    resolver: &VersionResolver<P>,
    options: CollectOptions,
) -> Result<CollectOutcome, ManifestError> {
    let mut packages: Vec<ResolvedPackage> = Vec::with_capacity(items.len());

    for item in items {
        let package = ResolvedPackage {
            language_version: resolver.resolve(item)?,
            name: item.name.clone(),
            package_uri: item.package_uri.clone(),
            root_uri: relative_path(Path::new(&item.root_uri), relative_to)?,
        };
        debug!(
            "Resolved {} -> {} (language {})",
            package.name, package.root_uri, package.language_version
        );

        if options.check_duplicate_roots {
            if let Some(existing) = packages.iter().find(|p| p.root_uri == package.root_uri) {
                return Ok(CollectOutcome::DuplicateRoot(DuplicateRoot {
                    root_uri: package.root_uri.clone(),
                    first: existing.name.clone(),
                    second: package.name,
                }));
            }
        }

        packages.push(package);
    }

    Ok(CollectOutcome::Packages(packages))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn descriptor(name: &str, root_uri: &str) -> RawPackageDescriptor {
        RawPackageDescriptor {
            name: name.to_string(),
            root_uri: root_uri.to_string(),
            package_uri: "lib/".to_string(),
            language_version: Some("2.12".to_string()),
            pubspec_path: None,
        }
    }

    fn collect(items: &[RawPackageDescriptor], options: CollectOptions) -> Option<CollectOutcome> {
        collect_packages(
            items,
            Path::new("/root/out"),
            &VersionResolver::default(),
            options,
        )
        .ok()
    }

    #[test]
    fn test_single_package_scenario() {
        let outcome = collect(&[descriptor("foo", "/root/foo")], CollectOptions::default());
        let expected = ResolvedPackage {
            language_version: "2.12".to_string(),
            name: "foo".to_string(),
            package_uri: "lib/".to_string(),
            root_uri: "../foo".to_string(),
        };
        assert_eq!(outcome, Some(CollectOutcome::Packages(vec![expected])));
    }

    #[test]
    fn test_preserves_order_and_cardinality() {
        let items = [
            descriptor("zeta", "/root/zeta"),
            descriptor("alpha", "/root/alpha"),
            descriptor("mid", "/root/out/mid"),
        ];
        let Some(CollectOutcome::Packages(packages)) = collect(&items, CollectOptions::default())
        else {
            panic!("expected packages");
        };
        let names: Vec<&str> = packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(packages[2].root_uri, "mid");
    }

    #[test]
    fn test_duplicate_roots_allowed_by_default() {
        let items = [descriptor("foo", "/root/shared"), descriptor("bar", "/root/shared")];
        let outcome = collect(&items, CollectOptions::default());
        assert!(matches!(outcome, Some(CollectOutcome::Packages(ref p)) if p.len() == 2));
    }

    #[test]
    fn test_duplicate_roots_rejected_when_enabled() {
        let items = [
            descriptor("foo", "/root/shared"),
            descriptor("baz", "/root/baz"),
            descriptor("bar", "/root/shared/"),
        ];
        let outcome = collect(
            &items,
            CollectOptions {
                check_duplicate_roots: true,
            },
        );
        assert_eq!(
            outcome,
            Some(CollectOutcome::DuplicateRoot(DuplicateRoot {
                root_uri: "../shared".to_string(),
                first: "foo".to_string(),
                second: "bar".to_string(),
            }))
        );
    }

    #[test]
    fn test_load_descriptors() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest = temp_dir.path().join("packages.json");
        let content = r#"[
  {"name": "foo", "root_uri": "/root/foo", "package_uri": "lib/", "language_version": "2.12"},
  {"name": "bar", "root_uri": "/root/bar", "package_uri": "lib/", "pubspec_path": "/root/bar/pubspec.yaml"}
]"#;
        assert!(fs::write(&manifest, content).is_ok());

        let descriptors = load_descriptors(&manifest).unwrap_or_default();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].language_version.as_deref(), Some("2.12"));
        assert_eq!(
            descriptors[1].pubspec_path.as_deref(),
            Some(Path::new("/root/bar/pubspec.yaml"))
        );
    }

    #[test]
    fn test_load_descriptors_errors() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(
            load_descriptors(&missing),
            Err(ManifestError::ManifestRead { .. })
        ));

        let malformed = temp_dir.path().join("malformed.json");
        assert!(fs::write(&malformed, r#"{"name": "foo"}"#).is_ok());
        assert!(matches!(
            load_descriptors(&malformed),
            Err(ManifestError::ParseManifest(_))
        ));
    }

    #[test]
    fn test_pubspec_error_propagates() {
        let mut item = descriptor("foo", "/root/foo");
        item.language_version = None;
        item.pubspec_path = Some("/does/not/exist/pubspec.yaml".into());
        let result = collect_packages(
            &[item],
            Path::new("/root/out"),
            &VersionResolver::default(),
            CollectOptions::default(),
        );
        assert!(matches!(result, Err(ManifestError::PubspecRead { .. })));
    }
}
