//! Package config generation
//!
//! Turns the package list collected by the build into a `package_config.json`
//! (config version 2) that the Dart toolchain uses to resolve `package:` URIs.
//!
//! The pipeline is: [`load_descriptors`] reads the build manifest,
//! [`collect_packages`] resolves each entry's language version and root,
//! [`PackageConfig::new`] sorts the result, and [`write_to_path`] emits it.

pub mod collect;
pub mod errors;
pub mod language_version;
pub mod manifest_writer;
pub mod paths;
pub mod types;

pub use collect::{
    collect_packages, load_descriptors, CollectOptions, CollectOutcome, DuplicateRoot,
};
pub use errors::ManifestError;
pub use language_version::{
    parse_min_sdk_version, PubspecParser, VersionResolver, YamlPubspecParser,
};
pub use manifest_writer::{read_from_path, write_to_path};
pub use paths::{relative_path, relative_path_from};
pub use types::{
    PackageConfig, RawPackageDescriptor, ResolvedPackage, CONFIG_VERSION, DEFAULT_LANGUAGE_VERSION,
};
