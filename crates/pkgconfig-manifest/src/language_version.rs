//! Language version resolution
//!
//! A package's language version comes from, in order: an explicit
//! `language_version` in the build manifest, the lower bound of the
//! `environment.sdk` constraint in its pubspec, or the default.

use crate::errors::ManifestError;
use crate::types::{RawPackageDescriptor, DEFAULT_LANGUAGE_VERSION};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Optional `>=` then `major.minor`; components have no leading zeros.
const MIN_SDK_PATTERN: &str = r"^(>=)?((0|[1-9]\d*)\.(0|[1-9]\d*))";

static MIN_SDK_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(MIN_SDK_PATTERN).ok());

/// Constraint assumed when a pubspec has no `environment.sdk`
const ANY_SDK: &str = "any";

/// Extracts the SDK constraint from pubspec text.
///
/// Implementations must not fail: content they cannot understand yields
/// `None`, and the resolver falls back to the default version.
pub trait PubspecParser {
    /// Return `environment.sdk` if present and a string
    fn sdk_constraint(&self, content: &str) -> Option<String>;
}

/// [`PubspecParser`] backed by `serde_yaml`
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlPubspecParser;

impl PubspecParser for YamlPubspecParser {
    fn sdk_constraint(&self, content: &str) -> Option<String> {
        let parsed: serde_yaml::Value = match serde_yaml::from_str(content) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Ignoring unparsable pubspec: {}", e);
                return None;
            }
        };

        parsed
            .get("environment")
            .and_then(|environment| environment.get("sdk"))
            .and_then(|sdk| sdk.as_str())
            .map(str::to_string)
    }
}

/// Lower bound `major.minor` of an SDK constraint such as `>=2.12.0 <3.0.0`
pub fn parse_min_sdk_version(constraint: &str) -> Option<String> {
    let regex = (*MIN_SDK_REGEX).as_ref()?;
    regex
        .captures(constraint)
        .and_then(|captures| captures.get(2))
        .map(|m| m.as_str().to_string())
}

/// Resolves the language version of each package
pub struct VersionResolver<P: PubspecParser> {
    parser: P,
    default_version: String,
}

impl Default for VersionResolver<YamlPubspecParser> {
    fn default() -> Self {
        VersionResolver::new(YamlPubspecParser, DEFAULT_LANGUAGE_VERSION)
    }
}

impl<P: PubspecParser> VersionResolver<P> {
    pub fn new(parser: P, default_version: impl Into<String>) -> Self {
        VersionResolver {
            parser,
            default_version: default_version.into(),
        }
    }

    pub fn default_version(&self) -> &str {
        &self.default_version
    }

    /// Resolve the language version for one manifest entry
    ///
    /// Only a failure to read the pubspec file is an error.
    pub fn resolve(&self, descriptor: &RawPackageDescriptor) -> Result<String, ManifestError> {
        if let Some(version) = &descriptor.language_version {
            return Ok(version.clone());
        }

        match &descriptor.pubspec_path {
            Some(pubspec_path) => self.from_pubspec(pubspec_path),
            None => Ok(self.default_version.clone()),
        }
    }

    fn from_pubspec(&self, pubspec_path: &Path) -> Result<String, ManifestError> {
        let content =
            fs::read_to_string(pubspec_path).map_err(|source| ManifestError::PubspecRead {
                path: pubspec_path.to_path_buf(),
                source,
            })?;

        let constraint = self
            .parser
            .sdk_constraint(&content)
            .unwrap_or_else(|| ANY_SDK.to_string());

        match parse_min_sdk_version(&constraint) {
            Some(version) => Ok(version),
            None => {
                debug!(
                    "No minimum SDK version in {:?} (sdk: {:?}), using {}",
                    pubspec_path, constraint, self.default_version
                );
                Ok(self.default_version.clone())
            }
        }
    }
}
