//! Relative path computation for `rootUri`
//!
//! Paths are compared lexically after being made absolute, the same way
//! `package_config.json` consumers resolve them: symlinks are not followed
//! and neither path has to exist.

use crate::errors::ManifestError;
use std::ffi::OsString;
use std::path::{Component, Path};

/// Express `path` relative to the directory `base`, using the current directory
/// to absolutize relative inputs.
pub fn relative_path(path: &Path, base: &Path) -> Result<String, ManifestError> {
    let cwd = std::env::current_dir()?;
    relative_path_from(path, base, &cwd)
}

/// Express `path` relative to the directory `base`, resolving relative inputs
/// against `cwd`.
///
/// Identical paths give `"."`. Components are joined with `/`.
pub fn relative_path_from(path: &Path, base: &Path, cwd: &Path) -> Result<String, ManifestError> {
    if path.as_os_str().is_empty() {
        return Err(ManifestError::InvalidPath("empty path".to_string()));
    }
    if base.as_os_str().is_empty() {
        return Err(ManifestError::InvalidPath("empty base directory".to_string()));
    }

    let (path_root, path_parts) = normalize(path, cwd);
    let (base_root, base_parts) = normalize(base, cwd);

    if path_root != base_root {
        return Err(ManifestError::InvalidPath(format!(
            "{} and {} are on different roots",
            path.display(),
            base.display()
        )));
    }

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let parts: Vec<String> = std::iter::repeat("..".to_string())
        .take(base_parts.len() - common)
        .chain(
            path_parts[common..]
                .iter()
                .map(|part| part.to_string_lossy().into_owned()),
        )
        .collect();

    if parts.is_empty() {
        Ok(".".to_string())
    } else {
        Ok(parts.join("/"))
    }
}

/// Split an absolutized path into its root (prefix and root dir) and its
/// normal components, with `.` dropped and `..` applied.
fn normalize(path: &Path, cwd: &Path) -> (OsString, Vec<OsString>) {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut root = OsString::new();
    let mut parts: Vec<OsString> = Vec::new();
    for component in absolute.components() {
        match component {
            Component::Prefix(prefix) => root.push(prefix.as_os_str()),
            Component::RootDir => root.push(component.as_os_str()),
            Component::CurDir => {}
            // `..` above the root stays at the root
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(part) => parts.push(part.to_os_string()),
        }
    }
    (root, parts)
}
